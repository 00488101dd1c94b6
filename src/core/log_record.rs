//! Structured log record written to the sink

use super::caller::CallerLocation;
use super::field_value::FieldValue;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One structured log line
///
/// Serializes to a single JSON object. `error` and `Extra` are left out
/// entirely when absent or empty, as are the caller fields when the location
/// is unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: LogLevel,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(rename = "Extra", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, FieldValue>,

    pub time: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    pub message: String,
}

impl LogRecord {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            error: None,
            extra: BTreeMap::new(),
            time: Utc::now(),
            file: None,
            line: None,
            message: message.into(),
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_extra(mut self, extra: BTreeMap<String, FieldValue>) -> Self {
        self.extra = extra;
        self
    }

    pub fn with_caller(mut self, caller: CallerLocation) -> Self {
        self.file = Some(caller.file);
        self.line = Some(caller.line);
        self
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to a newline-terminated JSON line, ready for the sink
    pub fn to_json_line(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(line)
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_record_shape() {
        let json = LogRecord::new(LogLevel::Warning, "message").to_json().unwrap();

        assert!(json.starts_with(r#"{"level":"warning","time":""#));
        assert!(json.ends_with(r#""message":"message"}"#));
        assert!(!json.contains("\"Extra\""));
        assert!(!json.contains("\"error\""));
        assert!(!json.contains("\"file\""));
    }

    #[test]
    fn test_full_record_shape() {
        let mut extra = BTreeMap::new();
        extra.insert("tx_id".to_string(), FieldValue::from(123));
        extra.insert("opID".to_string(), FieldValue::from("OpId1"));

        let record = LogRecord::new(LogLevel::Error, "ERROR")
            .with_error("error-message")
            .with_extra(extra)
            .with_caller(CallerLocation {
                file: "src/main.rs".to_string(),
                line: 12,
            });
        let json = record.to_json().unwrap();

        assert!(json.contains(r#""level":"error","#));
        assert!(json.contains(r#""error":"error-message","#));
        assert!(json.contains(r#""Extra":{"opID":"OpId1","tx_id":123}"#));
        assert!(json.contains(r#""file":"src/main.rs","line":12,"#));
        assert!(json.contains(r#""message":"ERROR""#));
    }

    #[test]
    fn test_message_newlines_stay_on_one_line() {
        let line = LogRecord::new(LogLevel::Error, "first\nERROR injected")
            .to_json_line()
            .unwrap();
        let text = String::from_utf8(line).unwrap();

        assert_eq!(text.matches('\n').count(), 1);
        assert!(text.ends_with('\n'));
        assert!(text.contains(r#"first\nERROR injected"#));
    }

    #[test]
    fn test_json_roundtrip() {
        let record = LogRecord::new(LogLevel::Info, "hello")
            .with_extra(BTreeMap::from([("n".to_string(), FieldValue::from(3))]));

        let parsed = LogRecord::from_json(&record.to_json().unwrap()).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_float_extra_parses_back_exactly() {
        let value = 472979207.33584404_f64;
        let record = LogRecord::new(LogLevel::Warning, "float")
            .with_extra(BTreeMap::from([("v".to_string(), FieldValue::from(value))]));

        let json = record.to_json().unwrap();
        assert!(json.contains(r#""v":472979207.33584404"#));

        let parsed = LogRecord::from_json(&json).unwrap();
        assert_eq!(parsed.extra["v"], FieldValue::Float(value));
    }
}
