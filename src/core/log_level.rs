//! Log level definitions and the process-wide level gate

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    #[default]
    Warning = 2,
    Error = 3,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Debug,
            1 => LogLevel::Info,
            2 => LogLevel::Warning,
            _ => LogLevel::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            _ => Err(LoggerError::config(
                "LogLevel",
                format!("Invalid log level: '{}'", s),
            )),
        }
    }
}

/// Process-wide minimum severity threshold
///
/// Reads and writes are single atomic operations, so concurrent emission
/// calls never observe a torn value. A change is visible to every emission
/// call that starts after `set` returns.
#[derive(Debug)]
pub struct LevelGate {
    min_level: AtomicU8,
}

impl LevelGate {
    pub const fn new(level: LogLevel) -> Self {
        Self {
            min_level: AtomicU8::new(level as u8),
        }
    }

    #[inline]
    pub fn get(&self) -> LogLevel {
        LogLevel::from_u8(self.min_level.load(Ordering::Acquire))
    }

    pub fn set(&self, level: LogLevel) {
        self.min_level.store(level as u8, Ordering::Release);
    }

    /// Whether a record at `level` passes this gate
    #[inline]
    pub fn allows(&self, level: LogLevel) -> bool {
        level >= self.get()
    }
}

impl Default for LevelGate {
    fn default() -> Self {
        Self::new(LogLevel::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[test]
    fn test_default_is_warning() {
        assert_eq!(LogLevel::default(), LogLevel::Warning);
        assert_eq!(LevelGate::default().get(), LogLevel::Warning);
    }

    #[test]
    fn test_parse_levels() {
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("Warn".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!(" warning ".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("error".parse::<LogLevel>().unwrap(), LogLevel::Error);

        let err = "fatal".parse::<LogLevel>().unwrap_err();
        assert!(err.to_string().contains("Invalid log level: 'fatal'"));
    }

    #[test]
    fn test_serialized_lowercase() {
        assert_eq!(serde_json::to_string(&LogLevel::Warning).unwrap(), "\"warning\"");
        let parsed: LogLevel = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(parsed, LogLevel::Error);
    }

    #[test]
    fn test_gate_allows() {
        let gate = LevelGate::new(LogLevel::Info);
        assert!(!gate.allows(LogLevel::Debug));
        assert!(gate.allows(LogLevel::Info));
        assert!(gate.allows(LogLevel::Error));

        gate.set(LogLevel::Error);
        assert_eq!(gate.get(), LogLevel::Error);
        assert!(!gate.allows(LogLevel::Warning));
    }
}
