//! Log entries and field truncation.
//!
//! Every variable-length field has a byte limit that includes one reserved
//! terminator byte, so the stored value is at most `limit - 1` bytes. Values
//! are cut on a UTF-8 character boundary, which only ever shortens the cut for
//! non-ASCII text.

use sqlog_core::{LogLevel, timestamp};

/// Byte limit for `timestamp`.
pub const TIMESTAMP_LIMIT: usize = 32;
/// Byte limit for `message`.
pub const MESSAGE_LIMIT: usize = 1024;
/// Byte limit for the level name.
pub const LEVEL_LIMIT: usize = 16;
/// Byte limit for `file_name`.
pub const FILE_NAME_LIMIT: usize = 256;
/// Byte limit for `function_name`.
pub const FUNCTION_NAME_LIMIT: usize = 256;
/// Byte limit for `tag`.
pub const TAG_LIMIT: usize = 128;
/// Byte limit for `supplemental_data`.
pub const SUPPLEMENTAL_DATA_LIMIT: usize = 1024;

/// Clamp `value` to at most `limit - 1` bytes.
pub fn truncate(value: &str, limit: usize) -> &str {
    let max = limit.saturating_sub(1);
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

/// A caller's log request, borrowed for the duration of the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Record<'a> {
    /// Message text. Must not be empty.
    pub message: &'a str,
    /// Level used for admission and stored as its name.
    pub level: LogLevel,
    /// Source file name.
    pub file_name: Option<&'a str>,
    /// Function or module name.
    pub function_name: Option<&'a str>,
    /// Source line. `0` is stored as `0`.
    pub line_number: u32,
    /// Free-form tag.
    pub tag: Option<&'a str>,
    /// Free-form supplemental data.
    pub supplemental_data: Option<&'a str>,
}

impl<'a> Record<'a> {
    /// A record with only a message and level.
    pub fn new(message: &'a str, level: LogLevel) -> Self {
        Self {
            message,
            level,
            file_name: None,
            function_name: None,
            line_number: 0,
            tag: None,
            supplemental_data: None,
        }
    }

    /// Set the source location.
    #[must_use]
    pub fn location(mut self, file_name: &'a str, function_name: &'a str, line_number: u32) -> Self {
        self.file_name = Some(file_name);
        self.function_name = Some(function_name);
        self.line_number = line_number;
        self
    }

    /// Set the tag.
    #[must_use]
    pub fn tag(mut self, tag: &'a str) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Set the supplemental data.
    #[must_use]
    pub fn supplemental_data(mut self, data: &'a str) -> Self {
        self.supplemental_data = Some(data);
        self
    }
}

/// An accepted, truncated log entry owned by the entry buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    timestamp: String,
    message: String,
    level: String,
    file_name: Option<String>,
    function_name: Option<String>,
    line_number: u32,
    tag: Option<String>,
    supplemental_data: Option<String>,
}

impl LogEntry {
    /// Build an entry from `record`, stamped now.
    pub fn from_record(record: &Record<'_>) -> Self {
        Self::with_timestamp(record, &timestamp::now())
    }

    /// Build an entry from `record` with an explicit timestamp.
    pub fn with_timestamp(record: &Record<'_>, timestamp: &str) -> Self {
        let clamp = |value: Option<&str>, limit| value.map(|v| truncate(v, limit).to_owned());
        Self {
            timestamp: truncate(timestamp, TIMESTAMP_LIMIT).to_owned(),
            message: truncate(record.message, MESSAGE_LIMIT).to_owned(),
            level: truncate(record.level.as_str(), LEVEL_LIMIT).to_owned(),
            file_name: clamp(record.file_name, FILE_NAME_LIMIT),
            function_name: clamp(record.function_name, FUNCTION_NAME_LIMIT),
            line_number: record.line_number,
            tag: clamp(record.tag, TAG_LIMIT),
            supplemental_data: clamp(record.supplemental_data, SUPPLEMENTAL_DATA_LIMIT),
        }
    }

    /// When the entry was accepted.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Message text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Level name.
    pub fn level(&self) -> &str {
        &self.level
    }

    /// Source file name.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Function or module name.
    pub fn function_name(&self) -> Option<&str> {
        self.function_name.as_deref()
    }

    /// Source line.
    pub fn line_number(&self) -> u32 {
        self.line_number
    }

    /// Tag.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Supplemental data.
    pub fn supplemental_data(&self) -> Option<&str> {
        self.supplemental_data.as_deref()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
