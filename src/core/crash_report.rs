//! Forwarding of error records to an external crash reporter

use super::error::panic_message;
use parking_lot::RwLock;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// External crash-reporting capability
///
/// Implementations receive the message of every error-level record whose
/// logger has crash-report capture enabled, together with the stringified
/// error when one was supplied.
///
/// Any `Fn(&str, Option<&str>)` closure is a reporter:
///
/// ```
/// use rust_context_logger::CrashReporter;
///
/// let reporter = |message: &str, error: Option<&str>| {
///     eprintln!("captured: {} ({:?})", message, error);
/// };
/// reporter.capture_event("db down", Some("connection refused"));
/// ```
pub trait CrashReporter: Send + Sync {
    fn capture_event(&self, message: &str, error: Option<&str>);
}

impl<F> CrashReporter for F
where
    F: Fn(&str, Option<&str>) + Send + Sync,
{
    fn capture_event(&self, message: &str, error: Option<&str>) {
        self(message, error)
    }
}

/// Slot holding the hub's crash reporter, if any
#[derive(Default)]
pub struct CrashReportBridge {
    reporter: RwLock<Option<Arc<dyn CrashReporter>>>,
}

impl CrashReportBridge {
    pub fn new() -> Self {
        Self {
            reporter: RwLock::new(None),
        }
    }

    pub fn set(&self, reporter: Arc<dyn CrashReporter>) {
        *self.reporter.write() = Some(reporter);
    }

    pub fn clear(&self) {
        *self.reporter.write() = None;
    }

    pub fn is_installed(&self) -> bool {
        self.reporter.read().is_some()
    }

    /// Hand an event to the installed reporter
    ///
    /// Returns `true` when a reporter received the event. A panicking
    /// reporter is reported on stderr and does not reach the caller.
    pub fn forward(&self, message: &str, error: Option<&str>) -> bool {
        let installed = self.reporter.read().clone();
        let Some(reporter) = installed else {
            return false;
        };

        match catch_unwind(AssertUnwindSafe(|| reporter.capture_event(message, error))) {
            Ok(()) => true,
            Err(panic_info) => {
                eprintln!(
                    "[LOGGER CRITICAL] Crash reporter panicked: {}. Event not captured.",
                    panic_message(panic_info.as_ref())
                );
                false
            }
        }
    }
}

impl std::fmt::Debug for CrashReportBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrashReportBridge")
            .field("installed", &self.is_installed())
            .finish()
    }
}
