//! Fixed-capacity entry buffer.
//!
//! Entries are kept in arrival order. Occupancy never exceeds the capacity
//! chosen at construction; the session flushes before an append would leave
//! the buffer full.

use crate::entry::LogEntry;

/// Ordered, bounded buffer of pending entries.
#[derive(Debug)]
pub struct EntryBuffer {
    entries: Vec<LogEntry>,
    capacity: usize,
}

impl EntryBuffer {
    /// Preallocate a buffer with `capacity` slots (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pending entries in arrival order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Whether another entry can be appended without a flush first.
    ///
    /// One slot is always held back, so a buffer of capacity `n` flushes when
    /// the `n`-th entry arrives.
    pub fn has_room(&self) -> bool {
        self.entries.len() + 1 < self.capacity
    }

    pub(crate) fn push(&mut self, entry: LogEntry) {
        debug_assert!(self.entries.len() < self.capacity, "entry buffer overflow");
        self.entries.push(entry);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
