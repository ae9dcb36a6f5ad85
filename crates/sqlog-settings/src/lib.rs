//! # sqlog-settings
//!
//! Layered configuration for the sqlog logger.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`SqlogSettings::default()`]
//! 2. **User file**: `~/.sqlog/settings.json` (deep-merged over defaults)
//! 3. **Environment variables**: `SQLOG_*` overrides (highest priority)

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path, validate};
pub use types::*;

use std::sync::OnceLock;

static SETTINGS: OnceLock<SqlogSettings> = OnceLock::new();

/// Get the global settings instance.
///
/// The first call loads from `~/.sqlog/settings.json` with env var overrides
/// and falls back to compiled defaults if loading fails.
pub fn get_settings() -> &'static SqlogSettings {
    SETTINGS.get_or_init(|| {
        load_settings().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load settings, using defaults");
            SqlogSettings::default()
        })
    })
}

/// Initialize the global settings with a specific value.
///
/// Returns the settings back if the global was already initialized.
#[allow(clippy::result_large_err)]
pub fn init_settings(settings: SqlogSettings) -> std::result::Result<(), SqlogSettings> {
    SETTINGS.set(settings)
}
