//! Logging macros for ergonomic log message formatting.
//!
//! The level macros pass `format_args!` to the logger, so the message is
//! only rendered when the record passes the level gate. They return the
//! emission `Result`.
//!
//! # Examples
//!
//! ```
//! use rust_context_logger::prelude::*;
//! use rust_context_logger::{info, warning};
//!
//! let hub = LogHub::builder()
//!     .min_level(LogLevel::Info)
//!     .output(std::io::sink())
//!     .build();
//! let logger = hub.logger(Context::background());
//!
//! info!(logger, "Server started").unwrap();
//!
//! let port = 8080;
//! warning!(logger, "Port {} already in use, retrying", port).unwrap();
//! ```

/// Log a formatted message at an explicit level.
///
/// ```
/// # use rust_context_logger::prelude::*;
/// # let logger = LogHub::builder().output(std::io::sink()).build().logger(Context::background());
/// use rust_context_logger::log;
/// log!(logger, LogLevel::Warning, "Simple message").unwrap();
/// log!(logger, LogLevel::Error, "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, ::std::format_args!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(::std::format_args!($($arg)+))
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(::std::format_args!($($arg)+))
    };
}

/// Log a warning-level message.
///
/// ```
/// # use rust_context_logger::prelude::*;
/// # let logger = LogHub::builder().output(std::io::sink()).build().logger(Context::background());
/// use rust_context_logger::warning;
/// warning!(logger, "Retry attempt {} of {}", 3, 5).unwrap();
/// ```
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warning(::std::format_args!($($arg)+))
    };
}

/// Log an error-level message, optionally attaching an error value.
///
/// ```
/// # use rust_context_logger::prelude::*;
/// # let logger = LogHub::builder().output(std::io::sink()).build().logger(Context::background());
/// use rust_context_logger::error;
/// let e = std::io::Error::other("connection refused");
/// error!(logger, err = e, "Failed to reach {}", "db-1").unwrap();
/// error!(logger, "Error code: {}", 500).unwrap();
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, err = $err:expr, $($arg:tt)+) => {
        $logger.error(
            ::std::option::Option::Some(&$err as &dyn ::std::error::Error),
            ::std::format_args!($($arg)+),
        )
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.error(::std::option::Option::None, ::std::format_args!($($arg)+))
    };
}

/// Build [`Fields`](crate::Fields) from alternating names and values.
///
/// Each element goes through `FieldValue::from`, so any type with a
/// conversion can be used. A trailing name without a value is ignored.
///
/// ```
/// use rust_context_logger::fields;
///
/// let fields = fields!["user_id", 42, "ratio", 0.5, "admin", false];
/// assert_eq!(fields.len(), 3);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Fields::from_flat(::std::vec![$($crate::FieldValue::from($value)),+])
    };
}
