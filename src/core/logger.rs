//! Logger values: fluent per-call-site configuration and emission

use super::{
    caller,
    context::Context,
    error::{LoggerError, Result},
    fields::Fields,
    hub::LogHub,
    log_level::LogLevel,
    log_record::LogRecord,
};
use std::error::Error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// A cheap, immutable logger bound to a context
///
/// Configuration methods never modify the receiver; each returns a new
/// `Logger`. One logger can therefore be shared between any number of
/// threads, each deriving its own configuration chain from it. The only
/// shared mutable state lives in the [`LogHub`] the logger writes through.
///
/// # Example
///
/// ```
/// use rust_context_logger::prelude::*;
/// use rust_context_logger::sinks::LockedWriter;
///
/// let output = LockedWriter::new(Vec::new());
/// let hub = LogHub::builder().output(output.clone()).build();
/// let logger = hub.logger(Context::background());
///
/// logger.info("below the default minimum, dropped").unwrap();
/// logger
///     .capture_crash_report(false)
///     .contextual()
///     .warning("disk almost full", fields!["free_mb", 512])
///     .unwrap();
///
/// assert!(output.contents().contains(r#""Extra":{"free_mb":512}"#));
/// ```
#[derive(Clone)]
pub struct Logger {
    hub: Arc<LogHub>,
    context: Context,
    capture_crash_report: bool,
    caller_skip: usize,
    min_level: Option<LogLevel>,
}

impl Logger {
    /// Logger bound to `context` that writes through the global hub
    pub fn new(context: Context) -> Self {
        Self::with_hub(LogHub::global(), context)
    }

    /// Logger bound to `context` that writes through `hub`
    pub fn with_hub(hub: Arc<LogHub>, context: Context) -> Self {
        Self {
            hub,
            context,
            capture_crash_report: true,
            caller_skip: 0,
            min_level: None,
        }
    }

    /// Same configuration, different context
    #[must_use]
    pub fn bind_context(&self, context: Context) -> Self {
        Self {
            context,
            ..self.clone()
        }
    }

    /// Enable or disable forwarding of error records to the crash reporter
    ///
    /// Enabled by default.
    #[must_use]
    pub fn capture_crash_report(&self, enabled: bool) -> Self {
        Self {
            capture_crash_report: enabled,
            ..self.clone()
        }
    }

    /// Skip `n` more stack frames when resolving the reported caller
    ///
    /// Use this in helpers that wrap the logger so the record points at the
    /// helper's caller. Calls accumulate.
    #[must_use]
    pub fn additional_caller_skip(&self, n: usize) -> Self {
        Self {
            caller_skip: self.caller_skip.saturating_add(n),
            ..self.clone()
        }
    }

    /// Use `level` instead of the hub's minimum level for this logger
    #[must_use]
    pub fn with_min_level(&self, level: LogLevel) -> Self {
        Self {
            min_level: Some(level),
            ..self.clone()
        }
    }

    /// Switch to key/value mode for the next emission call
    ///
    /// The returned logger's level methods take a list of fields instead of
    /// treating the message as a format template.
    #[must_use]
    pub fn contextual(&self) -> ContextualLogger {
        ContextualLogger {
            logger: self.clone(),
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn hub(&self) -> &Arc<LogHub> {
        &self.hub
    }

    pub fn captures_crash_reports(&self) -> bool {
        self.capture_crash_report
    }

    pub fn caller_skip(&self) -> usize {
        self.caller_skip
    }

    /// The minimum level in force for this logger right now
    pub fn effective_min_level(&self) -> LogLevel {
        self.min_level
            .unwrap_or_else(|| self.hub.level_gate().get())
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.effective_min_level()
    }

    /// Log `message` at `level`
    ///
    /// The message is only rendered when the level is enabled, so passing
    /// `format_args!(..)` costs nothing for filtered records.
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl fmt::Display) -> Result<()> {
        self.emit(level, None, &message, Fields::new, Location::caller())
    }

    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) -> Result<()> {
        self.emit(LogLevel::Debug, None, &message, Fields::new, Location::caller())
    }

    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) -> Result<()> {
        self.emit(LogLevel::Info, None, &message, Fields::new, Location::caller())
    }

    #[track_caller]
    pub fn warning(&self, message: impl fmt::Display) -> Result<()> {
        self.emit(LogLevel::Warning, None, &message, Fields::new, Location::caller())
    }

    /// Log an error record, attaching `err` when present
    #[track_caller]
    pub fn error(&self, err: Option<&dyn Error>, message: impl fmt::Display) -> Result<()> {
        self.emit(LogLevel::Error, err, &message, Fields::new, Location::caller())
    }

    fn emit<F>(
        &self,
        level: LogLevel,
        err: Option<&dyn Error>,
        message: &dyn fmt::Display,
        fields: F,
        call_site: &Location<'_>,
    ) -> Result<()>
    where
        F: FnOnce() -> Fields,
    {
        let metrics = self.hub.metrics();
        if !self.is_enabled(level) {
            metrics.record_filtered();
            return Ok(());
        }

        let message = message.to_string();

        // Call-supplied fields are applied last so they win over
        // context-derived ones, and later pairs win over earlier ones.
        let mut extra = self.hub.registry().collect(&self.context);
        for (name, value) in fields() {
            extra.insert(name, value);
        }

        let error = err.map(|e| e.to_string());
        if level == LogLevel::Error
            && self.capture_crash_report
            && self.hub.crash_reports().forward(&message, error.as_deref())
        {
            metrics.record_crash_event();
        }

        let mut record = LogRecord::new(level, message)
            .with_extra(extra)
            .with_caller(caller::resolve(call_site, self.caller_skip));
        record.error = error;

        let line = record.to_json_line()?;
        match self.hub.sink().write(&line) {
            Ok(_) => {
                metrics.record_logged();
                Ok(())
            }
            Err(e) => {
                metrics.record_dropped();
                Err(LoggerError::io_operation(
                    "writing log record",
                    "destination rejected the record",
                    e,
                ))
            }
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("context", &self.context)
            .field("capture_crash_report", &self.capture_crash_report)
            .field("caller_skip", &self.caller_skip)
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}

/// Logger in key/value mode, obtained from [`Logger::contextual`]
///
/// Field lists are usually written with the [`fields!`](crate::fields)
/// macro as alternating names and values. A dangling final name is ignored.
#[derive(Clone, Debug)]
pub struct ContextualLogger {
    logger: Logger,
}

impl ContextualLogger {
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    #[track_caller]
    pub fn log(
        &self,
        level: LogLevel,
        message: impl fmt::Display,
        fields: impl Into<Fields>,
    ) -> Result<()> {
        self.logger
            .emit(level, None, &message, || fields.into(), Location::caller())
    }

    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display, fields: impl Into<Fields>) -> Result<()> {
        self.logger
            .emit(LogLevel::Debug, None, &message, || fields.into(), Location::caller())
    }

    #[track_caller]
    pub fn info(&self, message: impl fmt::Display, fields: impl Into<Fields>) -> Result<()> {
        self.logger
            .emit(LogLevel::Info, None, &message, || fields.into(), Location::caller())
    }

    #[track_caller]
    pub fn warning(&self, message: impl fmt::Display, fields: impl Into<Fields>) -> Result<()> {
        self.logger
            .emit(LogLevel::Warning, None, &message, || fields.into(), Location::caller())
    }

    #[track_caller]
    pub fn error(
        &self,
        err: Option<&dyn Error>,
        message: impl fmt::Display,
        fields: impl Into<Fields>,
    ) -> Result<()> {
        self.logger
            .emit(LogLevel::Error, err, &message, || fields.into(), Location::caller())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field_value::FieldValue;
    use crate::fields;
    use crate::sinks::LockedWriter;

    fn hub_with_output(level: LogLevel) -> (Arc<LogHub>, LockedWriter<Vec<u8>>) {
        let output = LockedWriter::new(Vec::new());
        let hub = LogHub::builder()
            .min_level(level)
            .output(output.clone())
            .build();
        (hub, output)
    }

    #[test]
    fn test_defaults() {
        let (hub, _) = hub_with_output(LogLevel::Warning);
        let logger = hub.logger(Context::background());

        assert!(logger.captures_crash_reports());
        assert_eq!(logger.caller_skip(), 0);
        assert_eq!(logger.effective_min_level(), LogLevel::Warning);
        assert!(logger.context().is_empty());
    }

    #[test]
    fn test_fluent_calls_leave_receiver_unchanged() {
        let (hub, _) = hub_with_output(LogLevel::Warning);
        let base = hub.logger(Context::background());

        let derived = base
            .capture_crash_report(false)
            .additional_caller_skip(2)
            .additional_caller_skip(1)
            .with_min_level(LogLevel::Debug)
            .bind_context(Context::background().with_value("k", 1_i32));

        assert!(!derived.captures_crash_reports());
        assert_eq!(derived.caller_skip(), 3);
        assert_eq!(derived.effective_min_level(), LogLevel::Debug);
        assert!(derived.context().contains_key("k"));

        assert!(base.captures_crash_reports());
        assert_eq!(base.caller_skip(), 0);
        assert_eq!(base.effective_min_level(), LogLevel::Warning);
        assert!(base.context().is_empty());
    }

    #[test]
    fn test_filtered_record_writes_nothing() {
        let (hub, output) = hub_with_output(LogLevel::Warning);
        let logger = hub.logger(Context::background());

        logger.debug("hidden").unwrap();
        logger.info("hidden").unwrap();
        logger.contextual().info("hidden", fields!["k", 1]).unwrap();

        assert!(output.is_empty());
        assert_eq!(hub.metrics().filtered_count(), 3);
        assert_eq!(hub.metrics().total_logged(), 0);
    }

    #[test]
    fn test_filtered_record_skips_callbacks() {
        let (hub, _) = hub_with_output(LogLevel::Error);
        let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        hub.register_extra_data_callback("count", move |_: &Context| {
            counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            None
        });

        hub.logger(Context::background()).warning("filtered").unwrap();
        assert_eq!(calls.load(std::sync::atomic::Ordering::Relaxed), 0);
    }

    #[test]
    fn test_min_level_override() {
        let (hub, output) = hub_with_output(LogLevel::Error);
        let logger = hub.logger(Context::background());

        logger.with_min_level(LogLevel::Debug).debug("visible").unwrap();
        logger.warning("hidden").unwrap();

        let lines = output.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains(r#""level":"debug""#));
    }

    #[test]
    fn test_log_with_explicit_level() {
        let (hub, output) = hub_with_output(LogLevel::Debug);
        let logger = hub.logger(Context::background());

        logger.log(LogLevel::Info, "generic").unwrap();
        logger
            .contextual()
            .log(LogLevel::Warning, "generic kv", Fields::new().with("a", 1))
            .unwrap();

        let lines = output.lines();
        assert!(lines[0].contains(r#""level":"info""#));
        assert!(lines[1].contains(r#""Extra":{"a":1}"#));
    }

    #[test]
    fn test_caller_points_at_call_site() {
        let (hub, output) = hub_with_output(LogLevel::Warning);
        let logger = hub.logger(Context::background());

        let line = line!() + 1;
        logger.warning("where am I").unwrap();

        let record = LogRecord::from_json(&output.lines()[0]).unwrap();
        assert_eq!(record.file.as_deref(), Some(file!()));
        assert_eq!(record.line, Some(line));
    }

    #[test]
    fn test_context_fields_and_call_fields_merge() {
        let (hub, output) = hub_with_output(LogLevel::Warning);
        hub.register_extra_data_callback("source", |_: &Context| Some(FieldValue::from("context")));
        hub.register_extra_data_callback("only_ctx", |_: &Context| Some(FieldValue::from(1)));

        hub.logger(Context::background())
            .contextual()
            .warning("merge", fields!["source", "call", "only_call", 2])
            .unwrap();

        let contents = output.contents();
        assert!(contents.contains(r#""Extra":{"only_call":2,"only_ctx":1,"source":"call"}"#));
    }

    #[test]
    fn test_format_args_message() {
        let (hub, output) = hub_with_output(LogLevel::Warning);
        let logger = hub.logger(Context::background());

        logger
            .warning(format_args!("format with {} {} value", "more than one", "argument"))
            .unwrap();

        assert!(output
            .contents()
            .contains(r#""message":"format with more than one argument value""#));
    }
}
