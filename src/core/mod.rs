//! Core logger types

pub mod caller;
pub mod context;
pub mod crash_report;
pub mod error;
pub mod extra_data;
pub mod field_value;
pub mod fields;
pub mod hub;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;

pub use caller::CallerLocation;
pub use context::Context;
pub use crash_report::{CrashReportBridge, CrashReporter};
pub use error::{LoggerError, Result};
pub use extra_data::{ExtraDataCallback, ExtraDataRegistry};
pub use field_value::FieldValue;
pub use fields::Fields;
pub use hub::{LogHub, LogHubBuilder};
pub use log_level::{LevelGate, LogLevel};
pub use log_record::LogRecord;
pub use logger::{ContextualLogger, Logger};
pub use metrics::LoggerMetrics;
