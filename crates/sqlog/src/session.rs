//! One live logging session: a storage handle plus its entry buffer.

use sqlog_core::Result;

use crate::buffer::EntryBuffer;
use crate::commit;
use crate::entry::{LogEntry, Record};
use crate::storage::LogStorage;

/// Storage and buffer bound together for the lifetime of a session.
#[derive(Debug)]
pub struct Session<S: LogStorage> {
    storage: S,
    buffer: EntryBuffer,
}

impl<S: LogStorage> Session<S> {
    /// Start a session over `storage` with an empty buffer of `capacity` slots.
    pub fn new(storage: S, capacity: usize) -> Self {
        Self {
            storage,
            buffer: EntryBuffer::new(capacity),
        }
    }

    /// Append an admitted record, flushing first when the buffer is full.
    ///
    /// If that flush fails the record is not appended and the flush error is
    /// returned.
    pub fn submit(&mut self, record: &Record<'_>) -> Result<()> {
        if !self.buffer.has_room() {
            self.flush()?;
        }
        self.buffer.push(LogEntry::from_record(record));
        Ok(())
    }

    /// Flush every pending entry.
    pub fn flush(&mut self) -> Result<()> {
        commit::flush(&mut self.storage, &mut self.buffer)
    }

    /// Pending entries.
    pub fn buffer(&self) -> &EntryBuffer {
        &self.buffer
    }

    /// The storage backing this session.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Flush what is pending, then release the storage.
    ///
    /// The storage is released even when the final flush fails; the flush
    /// error takes precedence over a close error.
    pub fn close(mut self) -> Result<()> {
        let flushed = if self.buffer.is_empty() {
            Ok(())
        } else {
            self.flush()
        };
        let closed = self.storage.close();
        flushed.and(closed)
    }
}
