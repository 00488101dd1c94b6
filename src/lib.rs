//! # Rust Context Logger
//!
//! A structured, leveled JSON logger for concurrent server processes.
//!
//! ## Features
//!
//! - **Structured Output**: One JSON object per line with level, message,
//!   optional error, caller location and an `Extra` object of fields
//! - **Context Callbacks**: Process-wide callbacks derive fields such as an
//!   operation ID from the context a logger is bound to
//! - **Thread Safe**: Logger values are immutable and can be shared and
//!   reconfigured from any number of threads
//! - **Crash Reporting**: Error records can be forwarded to an external
//!   crash reporter
//!
//! ## Example
//!
//! ```
//! use rust_context_logger::prelude::*;
//! use rust_context_logger::sinks::LockedWriter;
//!
//! let output = LockedWriter::new(Vec::new());
//! let hub = LogHub::builder().output(output.clone()).build();
//! hub.register_extra_data_callback("opID", |ctx: &Context| {
//!     ctx.value::<String>("opID").map(FieldValue::from)
//! });
//!
//! let ctx = Context::background().with_value("opID", "OpId1".to_string());
//! let logger = hub.logger(ctx);
//! logger.warning("cache miss").unwrap();
//!
//! assert!(output.contents().contains(r#""Extra":{"opID":"OpId1"}"#));
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        CallerLocation, Context, ContextualLogger, CrashReporter, ExtraDataCallback,
        ExtraDataRegistry, FieldValue, Fields, LogHub, LogHubBuilder, LogLevel, LogRecord,
        Logger, LoggerError, LoggerMetrics, Result,
    };
    pub use crate::fields;
}

pub use crate::core::{
    CallerLocation, Context, ContextualLogger, CrashReportBridge, CrashReporter,
    ExtraDataCallback, ExtraDataRegistry, FieldValue, Fields, LevelGate, LogHub, LogHubBuilder,
    LogLevel, LogRecord, Logger, LoggerError, LoggerMetrics, Result,
};

use std::io::Write;

/// Replace the global output destination, returning the previous one
pub fn set_output<W: Write + Send + 'static>(writer: W) -> sinks::BoxedWriter {
    LogHub::global().set_output(writer)
}

/// Set the global minimum level
pub fn set_min_level(level: LogLevel) {
    LogHub::global().set_min_level(level);
}

/// The global minimum level
pub fn min_level() -> LogLevel {
    LogHub::global().min_level()
}

/// Register a global extra-data callback, replacing any previous one for `name`
pub fn register_extra_data_callback<K, F>(name: K, callback: F)
where
    K: Into<String>,
    F: Fn(&Context) -> Option<FieldValue> + Send + Sync + 'static,
{
    LogHub::global().register_extra_data_callback(name, callback);
}

/// Register a possibly absent global extra-data callback
pub fn register_optional_extra_data_callback<K: Into<String>>(
    name: K,
    callback: Option<ExtraDataCallback>,
) {
    LogHub::global().register_optional_extra_data_callback(name, callback);
}

/// Remove every global extra-data callback
pub fn clear_extra_data_callbacks() {
    LogHub::global().clear_extra_data_callbacks();
}

/// Install the global crash reporter
pub fn set_crash_reporter<R: CrashReporter + 'static>(reporter: R) {
    LogHub::global().set_crash_reporter(reporter);
}

/// Remove the global crash reporter
pub fn clear_crash_reporter() {
    LogHub::global().clear_crash_reporter();
}
