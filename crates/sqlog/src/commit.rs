//! Transactional flush of the entry buffer.
//!
//! A flush is all-or-nothing: every pending entry is inserted in arrival
//! order inside one transaction, and the buffer is cleared only after the
//! commit succeeds. Any failure drops the transaction (rolling it back) and
//! leaves the buffer exactly as it was, so the caller may retry.

use sqlog_core::Result;
use tracing::{debug, warn};

use crate::buffer::EntryBuffer;
use crate::storage::{LogStorage, LogTransaction};

/// Write every pending entry to `storage` in one transaction, then clear `buffer`.
pub fn flush<S: LogStorage>(storage: &mut S, buffer: &mut EntryBuffer) -> Result<()> {
    let rows = buffer.len();

    let mut tx = storage.begin().inspect_err(|e| {
        warn!(rows, error = %e, "failed to begin flush transaction");
    })?;

    for (row, entry) in buffer.entries().iter().enumerate() {
        if let Err(e) = tx.insert(entry) {
            warn!(row, rows, error = %e, "insert failed, rolling back flush");
            return Err(e);
        }
    }

    tx.commit().inspect_err(|e| {
        warn!(rows, error = %e, "commit failed, flush rolled back");
    })?;

    buffer.clear();
    debug!(rows, "flushed log entries");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
