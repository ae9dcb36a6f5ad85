//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`SqlogSettings::default()`]
//! 2. If `~/.sqlog/settings.json` exists, deep-merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)
//! 4. Validate the result
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use sqlog_core::LogLevel;
use tracing::debug;

use crate::errors::{Result, SettingsError};
use crate::types::{MAX_CAPACITY, SqlogSettings};

/// Resolve the path to the settings file (`~/.sqlog/settings.json`).
pub fn settings_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home).join(".sqlog").join("settings.json")
}

/// Load settings from the default path with env var overrides.
pub fn load_settings() -> Result<SqlogSettings> {
    load_settings_from_path(&settings_path())
}

/// Load settings from a specific path with env var overrides.
///
/// A missing file yields defaults. Invalid JSON or an out-of-range value is an
/// error.
pub fn load_settings_from_path(path: &Path) -> Result<SqlogSettings> {
    let defaults = serde_json::to_value(SqlogSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: SqlogSettings = serde_json::from_value(merged)?;
    apply_env_overrides(&mut settings);
    validate(&settings)?;
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Check value ranges that serde cannot express.
pub fn validate(settings: &SqlogSettings) -> Result<()> {
    let capacity = settings.buffer.capacity;
    if capacity == 0 || capacity > MAX_CAPACITY {
        return Err(SettingsError::InvalidValue(format!(
            "buffer.capacity must be in 1..={MAX_CAPACITY}, got {capacity}"
        )));
    }
    Ok(())
}

/// Apply environment variable overrides to loaded settings.
///
/// - `SQLOG_CAPACITY`: buffer capacity, `1..=1048576`
/// - `SQLOG_LEVEL`: initial threshold by name
/// - `SQLOG_BUSY_TIMEOUT_MS`: busy timeout, `0..=600000`
///
/// Invalid values are ignored with a warning.
pub fn apply_env_overrides(settings: &mut SqlogSettings) {
    if let Some(v) = read_env_usize("SQLOG_CAPACITY", 1, MAX_CAPACITY) {
        settings.buffer.capacity = v;
    }
    if let Some(v) = read_env_level("SQLOG_LEVEL") {
        settings.level = v;
    }
    if let Some(v) = read_env_u64("SQLOG_BUSY_TIMEOUT_MS", 0, 600_000) {
        settings.store.busy_timeout_ms = v;
    }
}

// ── Pure parsing functions (testable without env vars) ──────────────────────

/// Parse a string as a `u64` within a range.
pub fn parse_u64_range(val: &str, min: u64, max: u64) -> Option<u64> {
    let n: u64 = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a string as a `usize` within a range.
pub fn parse_usize_range(val: &str, min: usize, max: usize) -> Option<usize> {
    let n: usize = val.parse().ok()?;
    (n >= min && n <= max).then_some(n)
}

/// Parse a level name.
pub fn parse_level(val: &str) -> Option<LogLevel> {
    val.parse().ok()
}

// ── Env var readers (thin wrappers) ─────────────────────────────────────────

fn read_env_usize(name: &str, min: usize, max: usize) -> Option<usize> {
    let val = std::env::var(name).ok()?;
    let result = parse_usize_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid usize env var, ignoring");
    }
    result
}

fn read_env_u64(name: &str, min: u64, max: u64) -> Option<u64> {
    let val = std::env::var(name).ok()?;
    let result = parse_u64_range(&val, min, max);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid u64 env var, ignoring");
    }
    result
}

fn read_env_level(name: &str) -> Option<LogLevel> {
    let val = std::env::var(name).ok()?;
    let result = parse_level(&val);
    if result.is_none() {
        tracing::warn!(key = name, value = %val, "invalid level env var, ignoring");
    }
    result
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deep_merge_nested_objects() {
        let target = json!({"buffer": {"capacity": 1024}, "level": "info"});
        let source = json!({"buffer": {"capacity": 8}});
        let merged = deep_merge(target, source);
        assert_eq!(merged["buffer"]["capacity"], 8);
        assert_eq!(merged["level"], "info");
    }

    #[test]
    fn deep_merge_skips_nulls() {
        let target = json!({"level": "info"});
        let source = json!({"level": null});
        assert_eq!(deep_merge(target, source)["level"], "info");
    }

    #[test]
    fn deep_merge_replaces_primitives() {
        assert_eq!(deep_merge(json!(1), json!("x")), json!("x"));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from_path(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings.buffer.capacity, SqlogSettings::default().buffer.capacity);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"level": "warning", "store": {"busyTimeoutMs": 250}}"#)
            .unwrap();

        let settings = load_settings_from_path(&path).unwrap();
        assert_eq!(settings.store.busy_timeout_ms, 250);
        assert_eq!(settings.buffer.capacity, SqlogSettings::default().buffer.capacity);
    }

    #[test]
    fn capitalized_level_name_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"level": "Warning", "buffer": {"capacity": 64}, "store": {"busyTimeoutMs": 250}}"#,
        )
        .unwrap();

        let settings = load_settings_from_path(&path).unwrap();
        assert_eq!(settings.level, LogLevel::Warning);
        assert_eq!(settings.buffer.capacity, 64);
        assert_eq!(settings.store.busy_timeout_ms, 250);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            load_settings_from_path(&path),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn zero_capacity_rejected() {
        let mut settings = SqlogSettings::default();
        settings.buffer.capacity = 0;
        assert!(matches!(
            validate(&settings),
            Err(SettingsError::InvalidValue(_))
        ));
    }

    #[test]
    fn oversized_capacity_rejected() {
        let mut settings = SqlogSettings::default();
        settings.buffer.capacity = MAX_CAPACITY + 1;
        assert!(validate(&settings).is_err());
    }

    #[test]
    fn parse_usize_range_bounds() {
        assert_eq!(parse_usize_range("1", 1, 10), Some(1));
        assert_eq!(parse_usize_range("10", 1, 10), Some(10));
        assert_eq!(parse_usize_range("0", 1, 10), None);
        assert_eq!(parse_usize_range("11", 1, 10), None);
        assert_eq!(parse_usize_range("-3", 1, 10), None);
        assert_eq!(parse_usize_range("abc", 1, 10), None);
    }

    #[test]
    fn parse_u64_range_bounds() {
        assert_eq!(parse_u64_range("0", 0, 600_000), Some(0));
        assert_eq!(parse_u64_range("600001", 0, 600_000), None);
    }

    #[test]
    fn parse_level_names() {
        assert_eq!(parse_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_level("None"), Some(LogLevel::None));
        assert_eq!(parse_level("loud"), None);
    }
}
