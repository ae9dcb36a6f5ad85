//! Process-wide logger.
//!
//! Free functions over a single [`Logger`] behind a mutex. The logger is
//! built from [`sqlog_settings::get_settings`] on first use, so its buffer
//! capacity and initial level come from the settings file and `SQLOG_*`
//! environment overrides.

use std::path::Path;
use std::sync::LazyLock;

use parking_lot::Mutex;
use sqlog_core::{LogLevel, Result};
use tracing::warn;

pub use sqlog_core::result_to_string;

use crate::entry::Record;
use crate::logger::Logger;

static LOGGER: LazyLock<Mutex<Logger>> = LazyLock::new(|| {
    let logger = Logger::from_settings(sqlog_settings::get_settings()).unwrap_or_else(|e| {
        warn!(error = %e, "invalid logger settings, using defaults");
        Logger::default()
    });
    Mutex::new(logger)
});

/// Open or create the database at `path` and start the process-wide session.
pub fn initialize(path: impl AsRef<Path>) -> Result<()> {
    LOGGER.lock().initialize(path)
}

/// Flush and end the process-wide session.
pub fn terminate() -> Result<()> {
    LOGGER.lock().terminate()
}

/// Replace the admission threshold.
pub fn set_level(level: LogLevel) {
    LOGGER.lock().set_level(level);
}

/// Replace the admission threshold from its ordinal (`0..=5`).
pub fn set_level_code(code: i32) -> Result<()> {
    LOGGER.lock().set_level_code(code)
}

/// Current admission threshold.
pub fn get_level() -> LogLevel {
    LOGGER.lock().level()
}

/// Submit one entry.
#[allow(clippy::too_many_arguments)]
pub fn log(
    message: &str,
    level: LogLevel,
    file_name: Option<&str>,
    function_name: Option<&str>,
    line_number: u32,
    tag: Option<&str>,
    supplemental_data: Option<&str>,
) -> Result<()> {
    log_record(&Record {
        message,
        level,
        file_name,
        function_name,
        line_number,
        tag,
        supplemental_data,
    })
}

/// Submit a prepared [`Record`].
pub fn log_record(record: &Record<'_>) -> Result<()> {
    LOGGER.lock().log(record)
}

/// Flush pending entries now.
pub fn flush() -> Result<()> {
    LOGGER.lock().flush()
}

/// Entries waiting in the process-wide buffer.
pub fn pending() -> usize {
    LOGGER.lock().pending()
}

/// Table written by the live session.
pub fn table_name() -> Option<String> {
    LOGGER.lock().table_name().map(str::to_owned)
}
