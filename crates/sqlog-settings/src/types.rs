//! Settings types.

use serde::{Deserialize, Serialize};
use sqlog_core::LogLevel;

/// Default entry buffer capacity.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Largest accepted entry buffer capacity.
pub const MAX_CAPACITY: usize = 1_048_576;

/// Default `SQLite` busy timeout in milliseconds.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Top-level logger settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SqlogSettings {
    /// Initial admission threshold.
    pub level: LogLevel,
    /// Entry buffer settings.
    pub buffer: BufferSettings,
    /// Storage settings.
    pub store: StoreSettings,
}

/// Entry buffer settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BufferSettings {
    /// Number of entry slots, fixed when a logger is constructed.
    pub capacity: usize,
}

impl Default for BufferSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Storage settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSettings {
    /// How long a write waits on a locked database before failing.
    pub busy_timeout_ms: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}
