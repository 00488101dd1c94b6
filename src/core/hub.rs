//! Process-wide logging state
//!
//! A `LogHub` owns the pieces every logger value shares: the level gate,
//! the extra-data callback registry, the output sink, the crash-report
//! bridge and the metrics. The free functions at the crate root operate on
//! [`LogHub::global`]; isolated hubs from [`LogHub::builder`] are handed to
//! loggers explicitly with [`LogHub::logger`].

use super::{
    context::Context,
    crash_report::{CrashReportBridge, CrashReporter},
    extra_data::{ExtraDataCallback, ExtraDataRegistry},
    field_value::FieldValue,
    log_level::{LevelGate, LogLevel},
    logger::Logger,
    metrics::LoggerMetrics,
};
use crate::sinks::{BoxedWriter, SharedSink};
use std::io::Write;
use std::sync::{Arc, LazyLock};

static GLOBAL_HUB: LazyLock<Arc<LogHub>> = LazyLock::new(|| Arc::new(LogHub::new()));

#[derive(Debug)]
pub struct LogHub {
    level: LevelGate,
    registry: ExtraDataRegistry,
    sink: SharedSink,
    crash_reports: CrashReportBridge,
    metrics: LoggerMetrics,
}

impl LogHub {
    /// Hub with the default configuration: minimum level `Warning`, output
    /// to stderr, no callbacks and no crash reporter
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: LevelGate::default(),
            registry: ExtraDataRegistry::new(),
            sink: SharedSink::stderr(),
            crash_reports: CrashReportBridge::new(),
            metrics: LoggerMetrics::new(),
        }
    }

    /// The process-wide hub behind the crate-level functions
    pub fn global() -> Arc<LogHub> {
        Arc::clone(&GLOBAL_HUB)
    }

    /// Create a builder for an isolated hub
    #[must_use]
    pub fn builder() -> LogHubBuilder {
        LogHubBuilder::new()
    }

    /// A logger value bound to `context` that logs through this hub
    pub fn logger(self: &Arc<Self>, context: Context) -> Logger {
        Logger::with_hub(Arc::clone(self), context)
    }

    /// Replace the output destination, returning the previous one
    pub fn set_output<W: Write + Send + 'static>(&self, writer: W) -> BoxedWriter {
        self.sink.set_output(Box::new(writer))
    }

    pub fn set_min_level(&self, level: LogLevel) {
        self.level.set(level);
    }

    pub fn min_level(&self) -> LogLevel {
        self.level.get()
    }

    pub fn register_extra_data_callback<K, F>(&self, name: K, callback: F)
    where
        K: Into<String>,
        F: Fn(&Context) -> Option<FieldValue> + Send + Sync + 'static,
    {
        self.registry.register(name, callback);
    }

    pub fn register_optional_extra_data_callback<K: Into<String>>(
        &self,
        name: K,
        callback: Option<ExtraDataCallback>,
    ) {
        self.registry.register_optional(name, callback);
    }

    pub fn clear_extra_data_callbacks(&self) {
        self.registry.clear();
    }

    pub fn set_crash_reporter<R: CrashReporter + 'static>(&self, reporter: R) {
        self.crash_reports.set(Arc::new(reporter));
    }

    pub fn clear_crash_reporter(&self) {
        self.crash_reports.clear();
    }

    pub fn registry(&self) -> &ExtraDataRegistry {
        &self.registry
    }

    /// Get the logger metrics for detailed observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn flush(&self) -> std::io::Result<()> {
        self.sink.flush()
    }

    pub(crate) fn level_gate(&self) -> &LevelGate {
        &self.level
    }

    pub(crate) fn sink(&self) -> &SharedSink {
        &self.sink
    }

    pub(crate) fn crash_reports(&self) -> &CrashReportBridge {
        &self.crash_reports
    }
}

impl Default for LogHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a `LogHub` with a fluent API
///
/// # Example
/// ```
/// use rust_context_logger::prelude::*;
/// use rust_context_logger::sinks::LockedWriter;
///
/// let output = LockedWriter::new(Vec::new());
/// let hub = LogHub::builder()
///     .min_level(LogLevel::Info)
///     .output(output.clone())
///     .extra_data_callback("service", |_: &Context| Some(FieldValue::from("billing")))
///     .build();
///
/// hub.logger(Context::background()).info("started").unwrap();
/// assert!(output.contents().contains(r#""service":"billing""#));
/// ```
pub struct LogHubBuilder {
    min_level: LogLevel,
    output: Option<BoxedWriter>,
    crash_reporter: Option<Arc<dyn CrashReporter>>,
    registry: ExtraDataRegistry,
}

impl LogHubBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::default(),
            output: None,
            crash_reporter: None,
            registry: ExtraDataRegistry::new(),
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the output destination (stderr when not called)
    #[must_use = "builder methods return a new value"]
    pub fn output<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.output = Some(Box::new(writer));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn crash_reporter<R: CrashReporter + 'static>(mut self, reporter: R) -> Self {
        self.crash_reporter = Some(Arc::new(reporter));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn extra_data_callback<K, F>(self, name: K, callback: F) -> Self
    where
        K: Into<String>,
        F: Fn(&Context) -> Option<FieldValue> + Send + Sync + 'static,
    {
        self.registry.register(name, callback);
        self
    }

    /// Build the hub
    pub fn build(self) -> Arc<LogHub> {
        let hub = LogHub {
            level: LevelGate::new(self.min_level),
            registry: self.registry,
            sink: match self.output {
                Some(writer) => SharedSink::from_boxed(writer),
                None => SharedSink::stderr(),
            },
            crash_reports: CrashReportBridge::new(),
            metrics: LoggerMetrics::new(),
        };
        if let Some(reporter) = self.crash_reporter {
            hub.crash_reports.set(reporter);
        }
        Arc::new(hub)
    }
}

impl Default for LogHubBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::LockedWriter;

    #[test]
    fn test_builder_default() {
        let hub = LogHubBuilder::default().build();
        assert_eq!(hub.min_level(), LogLevel::Warning);
        assert!(hub.registry().is_empty());
        assert_eq!(hub.metrics().total_logged(), 0);
    }

    #[test]
    fn test_builder_full_configuration() {
        let output = LockedWriter::new(Vec::new());
        let hub = LogHub::builder()
            .min_level(LogLevel::Debug)
            .output(output.clone())
            .crash_reporter(|_: &str, _: Option<&str>| {})
            .extra_data_callback("svc", |_: &Context| Some(FieldValue::from("api")))
            .build();

        assert_eq!(hub.min_level(), LogLevel::Debug);
        assert!(hub.registry().contains("svc"));
        assert!(hub.crash_reports().is_installed());

        hub.logger(Context::background()).debug("configured").unwrap();
        assert_eq!(output.lines().len(), 1);
    }

    #[test]
    fn test_set_output_returns_previous() {
        let first = LockedWriter::new(Vec::new());
        let hub = LogHub::builder().output(first.clone()).build();

        let mut previous = hub.set_output(std::io::sink());
        previous.write_all(b"still usable\n").unwrap();
        assert_eq!(first.contents(), "still usable\n");
    }

    #[test]
    fn test_min_level_roundtrip() {
        let hub = LogHub::builder().build();
        hub.set_min_level(LogLevel::Error);
        assert_eq!(hub.min_level(), LogLevel::Error);
        assert!(!hub.level_gate().allows(LogLevel::Warning));
    }

    #[test]
    fn test_global_is_shared() {
        assert!(Arc::ptr_eq(&LogHub::global(), &LogHub::global()));
    }
}
