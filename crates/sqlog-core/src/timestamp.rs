//! Fixed-width timestamps.
//!
//! Timestamps are always rendered in UTC as
//! `YYYY-MM-DD HH:MM:SS.ffffff UTC` (30 bytes), independent of locale. The
//! same string stamps log entries and names a session's table.

use chrono::{DateTime, Utc};

/// Width in bytes of every timestamp produced by this module.
pub const TIMESTAMP_WIDTH: usize = 30;

/// Render `at` as a fixed-width timestamp.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S%.6f UTC").to_string()
}

/// Current time as a fixed-width timestamp.
pub fn now() -> String {
    format_timestamp(Utc::now())
}
