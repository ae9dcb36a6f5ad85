//! # sqlog
//!
//! Buffered, level-filtered logging into per-session `SQLite` tables.
//!
//! Entries at or above the current threshold are truncated to fixed field
//! limits, stamped, and held in a fixed-capacity buffer. When the buffer fills
//! it is written out in a single transaction; a failed write rolls back and
//! leaves the buffer as it was. `terminate` performs a final flush and always
//! releases the database.
//!
//! - [`Logger`] is an owned logger value; [`global`] wraps one process-wide
//!   logger behind a mutex.
//! - [`storage`] is the transactional seam with the `SQLite` backend and an
//!   in-memory backend.
//! - [`LogReader`] reads stored sessions back.
//!
//! ```ignore
//! sqlog::global::initialize("app.log.db")?;
//! sqlog::global::set_level(sqlog::LogLevel::Warning);
//! sqlog::log_error!("request failed", Some("http"), None)?;
//! sqlog::global::terminate()?;
//! ```

#![deny(unsafe_code)]

#[macro_use]
mod macros;

pub mod buffer;
pub mod commit;
pub mod entry;
pub mod global;
pub mod logger;
pub mod reader;
pub mod session;
pub mod storage;

pub use buffer::EntryBuffer;
pub use entry::{LogEntry, Record};
pub use logger::Logger;
pub use reader::{LogReader, StoredEntry};
pub use session::Session;
pub use sqlog_core::{
    LogLevel, Result, SqlogError, VERSION, VERSION_NUMBER, result_to_string,
};
pub use storage::{LogStorage, LogTransaction, MemoryStorage, SqliteOptions, SqliteStorage};
