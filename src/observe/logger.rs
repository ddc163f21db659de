//! Structured JSON event logger.
//!
//! One log line per event, synchronous, deterministic key ordering. The
//! engine logs store lookup failures here and the registry logs schema
//! loads; everything else is silent.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Normal operations
    Info = 0,
    /// Recoverable issues
    Warn = 1,
    /// Operation failures
    Error = 2,
}

impl Severity {
    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured logger that emits one JSON object per line.
pub struct Logger;

impl Logger {
    /// Log an event; info/warn go to stdout, errors to stderr.
    ///
    /// Keys are emitted in sorted order. `event` and `severity` are
    /// reserved keys; callers must not pass fields named either.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        match severity {
            Severity::Error => Self::log_to_writer(severity, event, fields, &mut io::stderr()),
            _ => Self::log_to_writer(severity, event, fields, &mut io::stdout()),
        }
    }

    /// Log at INFO level.
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    /// Log at WARN level.
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    /// Log at ERROR level.
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }

    fn log_to_writer<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let mut entry: BTreeMap<&str, &str> = BTreeMap::new();
        entry.insert("event", event);
        entry.insert("severity", severity.as_str());
        for &(key, value) in fields {
            entry.insert(key, value);
        }

        // String-to-string maps cannot fail to serialize; logging never
        // fails the caller either way
        if let Ok(line) = serde_json::to_string(&entry) {
            let _ = writer.write_all(line.as_bytes());
            let _ = writer.write_all(b"\n");
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
fn capture_log(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut buffer = Vec::new();
    Logger::log_to_writer(severity, event, fields, &mut buffer);
    String::from_utf8(buffer).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_display() {
        assert_eq!(Severity::Info.as_str(), "INFO");
        assert_eq!(Severity::Warn.as_str(), "WARN");
        assert_eq!(Severity::Error.as_str(), "ERROR");
        assert!(Severity::Info < Severity::Error);
    }

    #[test]
    fn test_log_is_valid_json() {
        let line = capture_log(Severity::Info, "schema_loaded", &[("record_type", "Guardian")]);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["event"], "schema_loaded");
        assert_eq!(parsed["severity"], "INFO");
        assert_eq!(parsed["record_type"], "Guardian");
    }

    #[test]
    fn test_one_line_per_event() {
        let line = capture_log(Severity::Warn, "lookup_failed", &[("reason", "timeout")]);
        assert!(line.ends_with('\n'));
        assert_eq!(line.matches('\n').count(), 1);
    }

    #[test]
    fn test_keys_sorted_deterministically() {
        let line = capture_log(
            Severity::Warn,
            "lookup_failed",
            &[("zeta", "1"), ("alpha", "2")],
        );
        let alpha = line.find("alpha").unwrap();
        let zeta = line.find("zeta").unwrap();
        assert!(alpha < zeta);

        let again = capture_log(
            Severity::Warn,
            "lookup_failed",
            &[("alpha", "2"), ("zeta", "1")],
        );
        assert_eq!(line, again);
    }

    #[test]
    fn test_escaping_special_characters() {
        let line = capture_log(Severity::Info, "note", &[("text", "a\"b\nc")]);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["text"], "a\"b\nc");
    }
}
