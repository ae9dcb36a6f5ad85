//! Error types and numeric result codes.
//!
//! [`SqlogError`] is returned by every fallible logger operation. Each variant
//! maps onto a stable numeric code via [`SqlogError::code`] so callers that
//! branch on integers (or cross an FFI boundary) can render them with
//! [`result_to_string`].
//!
//! Code ranges:
//! - `0` is success.
//! - `-1..=-31` is reserved for the logger itself.
//! - Positive codes are passed through from the storage engine.

use std::borrow::Cow;

use thiserror::Error;

/// The call succeeded.
pub const RESULT_SUCCESS: i32 = 0;
/// Non-specific logger failure.
pub const RESULT_FAILURE: i32 = -1;
/// An operation needed a live session and there was none.
pub const RESULT_NOT_INITIALIZED: i32 = -2;
/// `initialize` was called while a session was live.
pub const RESULT_ALREADY_INITIALIZED: i32 = -3;
/// A caller-supplied argument was empty or out of range.
pub const RESULT_INVALID_ARGUMENT: i32 = -4;
/// Lowest code in the reserved logger range.
pub const RESULT_RESERVED_END: i32 = -31;

const UNKNOWN_CODE: &str = "Unknown error code";

/// Errors returned by logger operations.
#[derive(Debug, Error)]
pub enum SqlogError {
    /// Empty, missing, or out-of-range caller input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation requires a live session.
    #[error("not initialized")]
    NotInitialized,

    /// `initialize` was called while a session was live.
    #[error("already initialized")]
    AlreadyInitialized,

    /// Opaque passthrough of a storage engine failure (open, prepare, bind,
    /// step, commit, rollback).
    #[error("storage engine error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl SqlogError {
    /// Numeric result code for this error.
    ///
    /// Storage failures report the engine's extended result code when one is
    /// available and [`RESULT_FAILURE`] otherwise.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => RESULT_INVALID_ARGUMENT,
            Self::NotInitialized => RESULT_NOT_INITIALIZED,
            Self::AlreadyInitialized => RESULT_ALREADY_INITIALIZED,
            Self::Storage(e) => e
                .sqlite_error()
                .map_or(RESULT_FAILURE, |ffi| ffi.extended_code),
        }
    }
}

/// Convenience type alias for logger results.
pub type Result<T> = std::result::Result<T, SqlogError>;

/// Numeric code for a logger result (`0` on success).
pub fn result_code<T>(result: &Result<T>) -> i32 {
    match result {
        Ok(_) => RESULT_SUCCESS,
        Err(e) => e.code(),
    }
}

/// Describe a result code.
///
/// Any code outside the enumerated logger codes, including unassigned codes
/// in the reserved range, yields `"Unknown error code"`.
pub fn result_to_string(code: i32) -> Cow<'static, str> {
    match code {
        RESULT_SUCCESS => Cow::Borrowed("Success"),
        RESULT_FAILURE => Cow::Borrowed("Failure"),
        RESULT_NOT_INITIALIZED => Cow::Borrowed("Not initialized"),
        RESULT_ALREADY_INITIALIZED => Cow::Borrowed("Already initialized"),
        RESULT_INVALID_ARGUMENT => Cow::Borrowed("Invalid argument"),
        c if c > 0 => Cow::Owned(rusqlite::ffi::Error::new(c).to_string()),
        _ => Cow::Borrowed(UNKNOWN_CODE),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
