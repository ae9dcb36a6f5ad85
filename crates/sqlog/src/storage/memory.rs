//! In-memory storage backend.
//!
//! Keeps committed entries in a shared vector. Clones share state, so a test
//! can hand one clone to a [`Logger`](crate::Logger) and inspect or fault the
//! storage through another.

use std::sync::Arc;

use parking_lot::Mutex;
use sqlog_core::{Result, SqlogError};

use super::{LogStorage, LogTransaction};
use crate::entry::LogEntry;

#[derive(Debug, Default)]
struct MemoryState {
    committed: Vec<LogEntry>,
    transactions: usize,
    commits: usize,
    fail_insert_at: Option<usize>,
    fail_commit: bool,
    closed: bool,
}

/// Shared in-memory storage.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed entries in commit order.
    pub fn rows(&self) -> Vec<LogEntry> {
        self.state.lock().committed.clone()
    }

    /// Transactions begun so far.
    pub fn transactions(&self) -> usize {
        self.state.lock().transactions
    }

    /// Transactions committed so far.
    pub fn commits(&self) -> usize {
        self.state.lock().commits
    }

    /// Fail the insert of the row at `index` within each transaction.
    pub fn fail_insert_at(&self, index: Option<usize>) {
        self.state.lock().fail_insert_at = index;
    }

    /// Fail every commit while set.
    pub fn fail_commit(&self, fail: bool) {
        self.state.lock().fail_commit = fail;
    }

    /// Whether [`LogStorage::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }
}

fn injected(what: &str) -> SqlogError {
    SqlogError::Storage(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_IOERR),
        Some(format!("injected {what} failure")),
    ))
}

impl LogStorage for MemoryStorage {
    type Transaction<'a> = MemoryTransaction<'a>;

    fn begin(&mut self) -> Result<MemoryTransaction<'_>> {
        self.state.lock().transactions += 1;
        Ok(MemoryTransaction {
            storage: self,
            staged: Vec::new(),
        })
    }

    fn close(self) -> Result<()> {
        self.state.lock().closed = true;
        Ok(())
    }
}

/// Staged rows, published on commit and discarded on drop.
#[derive(Debug)]
pub struct MemoryTransaction<'a> {
    storage: &'a MemoryStorage,
    staged: Vec<LogEntry>,
}

impl LogTransaction for MemoryTransaction<'_> {
    fn insert(&mut self, entry: &LogEntry) -> Result<()> {
        if self.storage.state.lock().fail_insert_at == Some(self.staged.len()) {
            return Err(injected("insert"));
        }
        self.staged.push(entry.clone());
        Ok(())
    }

    fn commit(self) -> Result<()> {
        let mut state = self.storage.state.lock();
        if state.fail_commit {
            return Err(injected("commit"));
        }
        state.committed.extend(self.staged);
        state.commits += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Record;
    use sqlog_core::LogLevel;

    fn entry(msg: &str) -> LogEntry {
        LogEntry::from_record(&Record::new(msg, LogLevel::Info))
    }

    #[test]
    fn commit_publishes_rows() {
        let mut storage = MemoryStorage::new();
        let mut tx = storage.begin().unwrap();
        tx.insert(&entry("a")).unwrap();
        tx.commit().unwrap();
        assert_eq!(storage.rows().len(), 1);
        assert_eq!(storage.commits(), 1);
    }

    #[test]
    fn drop_discards_rows() {
        let mut storage = MemoryStorage::new();
        {
            let mut tx = storage.begin().unwrap();
            tx.insert(&entry("a")).unwrap();
        }
        assert!(storage.rows().is_empty());
        assert_eq!(storage.transactions(), 1);
        assert_eq!(storage.commits(), 0);
    }

    #[test]
    fn injected_insert_failure() {
        let mut storage = MemoryStorage::new();
        storage.fail_insert_at(Some(1));
        let mut tx = storage.begin().unwrap();
        tx.insert(&entry("a")).unwrap();
        let err = tx.insert(&entry("b")).unwrap_err();
        assert_eq!(err.code(), rusqlite::ffi::SQLITE_IOERR);
    }

    #[test]
    fn clones_share_state() {
        let handle = MemoryStorage::new();
        let storage = handle.clone();
        storage.close().unwrap();
        assert!(handle.is_closed());
    }
}
