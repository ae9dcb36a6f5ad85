//! Log levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::SqlogError;

/// Ordered log level.
///
/// The ordinal drives admission filtering (`Diagnostic` is the least severe),
/// and [`LogLevel::as_str`] is the name written to the `log_level` column.
/// `None` is a threshold that suppresses everything.
///
/// Serializes as the lowercase name; deserializes any spelling [`FromStr`]
/// accepts, so `"Warning"`, `"warning"` and `"warn"` all read back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Log everything.
    Diagnostic = 0,
    /// Detail, info, warnings and errors.
    Detail = 1,
    /// Info, warnings and errors (default threshold).
    #[default]
    Info = 2,
    /// Warnings and errors.
    Warning = 3,
    /// Errors only.
    Error = 4,
    /// Log nothing.
    None = 5,
}

impl LogLevel {
    /// Every level, least severe first.
    pub const ALL: [Self; 6] = [
        Self::Diagnostic,
        Self::Detail,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::None,
    ];

    /// Levels that can be attached to a stored entry (everything but `None`).
    pub const ENTRY_LEVELS: [Self; 5] = [
        Self::Diagnostic,
        Self::Detail,
        Self::Info,
        Self::Warning,
        Self::Error,
    ];

    /// Numeric ordinal (0 = `Diagnostic`, 5 = `None`).
    #[must_use]
    pub const fn ordinal(self) -> i32 {
        self as i32
    }

    /// Stored display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Diagnostic => "Diagnostic",
            Self::Detail => "Detail",
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::None => "None",
        }
    }

    /// Whether an entry at `level` passes `threshold`.
    ///
    /// An entry carrying `None` is never admitted, so a `None` threshold
    /// really does suppress everything. This is stricter than a plain
    /// `level >= threshold` comparison, which would store `None` entries.
    #[must_use]
    pub fn admits(threshold: Self, level: Self) -> bool {
        level != Self::None && level >= threshold
    }
}

impl TryFrom<i32> for LogLevel {
    type Error = SqlogError;

    fn try_from(value: i32) -> Result<Self, SqlogError> {
        match value {
            0 => Ok(LogLevel::Diagnostic),
            1 => Ok(LogLevel::Detail),
            2 => Ok(LogLevel::Info),
            3 => Ok(LogLevel::Warning),
            4 => Ok(LogLevel::Error),
            5 => Ok(LogLevel::None),
            other => Err(SqlogError::InvalidArgument(format!(
                "level {other} is out of range"
            ))),
        }
    }
}

impl FromStr for LogLevel {
    type Err = SqlogError;

    /// Parse a level name (case-insensitive). `warn` is accepted for `Warning`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "diagnostic" => Ok(Self::Diagnostic),
            "detail" => Ok(Self::Detail),
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "none" => Ok(Self::None),
            _ => Err(SqlogError::InvalidArgument(format!("unknown level '{s}'"))),
        }
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
