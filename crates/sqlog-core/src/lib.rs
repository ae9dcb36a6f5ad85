//! # sqlog-core
//!
//! Foundation types shared by the sqlog crates:
//!
//! - **Levels**: [`LogLevel`], the six-value ordered classification used both
//!   for admission filtering and as the stored level name
//! - **Errors**: [`SqlogError`] via `thiserror`, plus the numeric result codes
//!   and [`result_to_string`]
//! - **Timestamps**: fixed-width microsecond timestamps for entries and table names
//! - **Diagnostics**: `tracing` subscriber setup and test capture helpers

#![deny(unsafe_code)]

pub mod errors;
pub mod level;
pub mod logging;
pub mod timestamp;

pub use errors::{Result, SqlogError, result_to_string};
pub use level::LogLevel;

/// Implementation version string.
pub const VERSION: &str = "0.1.0";

/// Implementation version number (`0xMMmm_pppp`).
pub const VERSION_NUMBER: u32 = 0x0001_0000;
