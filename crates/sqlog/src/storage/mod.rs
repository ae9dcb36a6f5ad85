//! Storage seam for flushed entries.
//!
//! The committer only needs to open a transaction, insert rows in order, and
//! commit. A [`LogTransaction`] that is dropped without [`LogTransaction::commit`]
//! rolls back, so every early return out of a flush leaves storage untouched.

pub mod memory;
pub mod schema;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::{SqliteOptions, SqliteStorage};

use sqlog_core::Result;

use crate::entry::LogEntry;

/// A transactional destination for log entries.
pub trait LogStorage {
    /// Transaction handle borrowed from the storage.
    type Transaction<'a>: LogTransaction
    where
        Self: 'a;

    /// Begin a transaction.
    fn begin(&mut self) -> Result<Self::Transaction<'_>>;

    /// Release the storage handle and everything prepared on it.
    fn close(self) -> Result<()>;
}

/// An open transaction. Dropping it without committing rolls back.
pub trait LogTransaction {
    /// Insert one entry.
    fn insert(&mut self, entry: &LogEntry) -> Result<()>;

    /// Commit every inserted entry.
    fn commit(self) -> Result<()>;
}
