//! Convenience macros over [`global::log`](crate::global::log).
//!
//! Each macro records the call site (`file!()`, `module_path!()`, `line!()`)
//! and takes an optional tag and optional supplemental data:
//!
//! ```ignore
//! sqlog::log_warning!("disk nearly full", Some("storage"), None);
//! ```

/// Log at [`LogLevel::Diagnostic`](crate::LogLevel::Diagnostic).
#[macro_export]
macro_rules! log_diagnostic {
    ($message:expr, $tag:expr, $data:expr $(,)?) => {
        $crate::__log_at!($crate::LogLevel::Diagnostic, $message, $tag, $data)
    };
}

/// Log at [`LogLevel::Detail`](crate::LogLevel::Detail).
#[macro_export]
macro_rules! log_detail {
    ($message:expr, $tag:expr, $data:expr $(,)?) => {
        $crate::__log_at!($crate::LogLevel::Detail, $message, $tag, $data)
    };
}

/// Log at [`LogLevel::Info`](crate::LogLevel::Info).
#[macro_export]
macro_rules! log_info {
    ($message:expr, $tag:expr, $data:expr $(,)?) => {
        $crate::__log_at!($crate::LogLevel::Info, $message, $tag, $data)
    };
}

/// Log at [`LogLevel::Warning`](crate::LogLevel::Warning).
#[macro_export]
macro_rules! log_warning {
    ($message:expr, $tag:expr, $data:expr $(,)?) => {
        $crate::__log_at!($crate::LogLevel::Warning, $message, $tag, $data)
    };
}

/// Log at [`LogLevel::Error`](crate::LogLevel::Error).
#[macro_export]
macro_rules! log_error {
    ($message:expr, $tag:expr, $data:expr $(,)?) => {
        $crate::__log_at!($crate::LogLevel::Error, $message, $tag, $data)
    };
}

/// Log `"Assertion failed!"` at error level when `cond` is false.
///
/// Evaluates to `Ok(())` when the condition holds.
#[macro_export]
macro_rules! log_assert {
    ($cond:expr, $tag:expr, $data:expr $(,)?) => {
        if $cond {
            $crate::Result::Ok(())
        } else {
            $crate::log_error!("Assertion failed!", $tag, $data)
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:expr, $message:expr, $tag:expr, $data:expr) => {
        $crate::global::log(
            $message,
            $level,
            ::core::option::Option::Some(::core::file!()),
            ::core::option::Option::Some(::core::module_path!()),
            ::core::line!(),
            $tag,
            $data,
        )
    };
}
