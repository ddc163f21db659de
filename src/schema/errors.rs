//! Schema registry error types.
//!
//! These are configuration faults, not user-input problems: an unknown
//! record type or a malformed schema file means the service is miswired,
//! and the validation call must abort rather than fold the fault into the
//! accumulated validation errors.
//!
//! Error codes:
//! - UNKNOWN_RECORD_TYPE (REJECT)
//! - DUPLICATE_RECORD_TYPE (REJECT)
//! - MALFORMED_SCHEMA (FATAL)

use std::fmt;

/// Severity levels for schema errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The offending call is rejected
    Reject,
    /// The registry cannot be trusted (startup should fail)
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Schema-specific error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Record type has no registered schema
    UnknownRecordType,
    /// Attempt to register a record type twice
    DuplicateRecordType,
    /// Schema file unreadable or structurally invalid
    MalformedSchema,
}

impl SchemaErrorCode {
    /// Returns the stable string code.
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::UnknownRecordType => "UNKNOWN_RECORD_TYPE",
            SchemaErrorCode::DuplicateRecordType => "DUPLICATE_RECORD_TYPE",
            SchemaErrorCode::MalformedSchema => "MALFORMED_SCHEMA",
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::MalformedSchema => Severity::Fatal,
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema registry error with context.
#[derive(Debug, Clone)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    record_type: Option<String>,
}

impl SchemaError {
    /// Create an unknown record type error.
    pub fn unknown_record_type(record_type: impl Into<String>) -> Self {
        let rt = record_type.into();
        Self {
            code: SchemaErrorCode::UnknownRecordType,
            message: format!("No schema registered for record type '{}'", rt),
            record_type: Some(rt),
        }
    }

    /// Create a duplicate record type error.
    pub fn duplicate_record_type(record_type: impl Into<String>) -> Self {
        let rt = record_type.into();
        Self {
            code: SchemaErrorCode::DuplicateRecordType,
            message: format!("Record type '{}' is already registered", rt),
            record_type: Some(rt),
        }
    }

    /// Create a malformed schema error for a file or in-memory definition.
    pub fn malformed_schema(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::MalformedSchema,
            message: format!("Malformed schema '{}': {}", source.into(), reason.into()),
            record_type: None,
        }
    }

    /// Returns the error code.
    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    /// Returns the severity level.
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the record type if applicable.
    pub fn record_type(&self) -> Option<&str> {
        self.record_type.as_deref()
    }

    /// Returns whether this is a fatal error.
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema registry operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_stable() {
        assert_eq!(SchemaErrorCode::UnknownRecordType.code(), "UNKNOWN_RECORD_TYPE");
        assert_eq!(SchemaErrorCode::DuplicateRecordType.code(), "DUPLICATE_RECORD_TYPE");
        assert_eq!(SchemaErrorCode::MalformedSchema.code(), "MALFORMED_SCHEMA");
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(SchemaErrorCode::UnknownRecordType.severity(), Severity::Reject);
        assert_eq!(SchemaErrorCode::MalformedSchema.severity(), Severity::Fatal);
        assert!(SchemaError::malformed_schema("x.json", "bad json").is_fatal());
    }

    #[test]
    fn test_display_includes_code_and_message() {
        let err = SchemaError::unknown_record_type("Ghost");
        let display = format!("{}", err);
        assert!(display.contains("UNKNOWN_RECORD_TYPE"));
        assert!(display.contains("Ghost"));
        assert_eq!(err.record_type(), Some("Ghost"));
    }
}
