//! Validation error types.
//!
//! Two disjoint classes live here. [`ValidationError`] is data: a
//! user-input problem, accumulated into a [`ValidationResult`] and returned
//! to the caller for correction. [`EngineError`] is exceptional: a
//! configuration or infrastructure fault (unknown record type, store
//! lookup failure) that aborts the validation call. The HTTP layer maps the
//! first to 4xx bodies and the second to 5xx.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::schema::SchemaError;
use crate::store::StoreError;

/// Closed set of validation error codes. The serialized strings are stable
/// and meant for programmatic handling by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    RequiredField,
    InvalidType,
    InvalidEmail,
    InvalidPhone,
    DuplicateValue,
    MinLength,
    MaxLength,
    MinValue,
    MaxValue,
    InvalidDate,
    ForeignKeyError,
    SchemaError,
}

impl ErrorCode {
    /// Returns the stable string code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::RequiredField => "REQUIRED_FIELD",
            ErrorCode::InvalidType => "INVALID_TYPE",
            ErrorCode::InvalidEmail => "INVALID_EMAIL",
            ErrorCode::InvalidPhone => "INVALID_PHONE",
            ErrorCode::DuplicateValue => "DUPLICATE_VALUE",
            ErrorCode::MinLength => "MIN_LENGTH",
            ErrorCode::MaxLength => "MAX_LENGTH",
            ErrorCode::MinValue => "MIN_VALUE",
            ErrorCode::MaxValue => "MAX_VALUE",
            ErrorCode::InvalidDate => "INVALID_DATE",
            ErrorCode::ForeignKeyError => "FOREIGN_KEY_ERROR",
            ErrorCode::SchemaError => "SCHEMA_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One failed rule on one field.
///
/// `context` carries rule-specific metadata (value, bounds, actual length)
/// in deterministic key order so clients can render precise messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field the rule failed on
    pub field: String,
    /// Stable error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Rule-specific metadata
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, Value>,
}

impl ValidationError {
    /// Create an error with an empty context.
    pub fn new(field: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
            context: BTreeMap::new(),
        }
    }

    /// Attach a context entry.
    pub fn with_context(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }

    /// `REQUIRED_FIELD`: a required field is absent on create.
    pub fn required(field: &str) -> Self {
        Self::new(
            field,
            ErrorCode::RequiredField,
            format!("Field '{}' is required", field),
        )
    }

    /// `INVALID_TYPE`: the value does not coerce to the declared kind.
    pub fn invalid_type(field: &str, expected: &str, actual: &str) -> Self {
        Self::new(
            field,
            ErrorCode::InvalidType,
            format!("Field '{}' must be of type {}", field, expected),
        )
        .with_context("expected", Value::String(expected.into()))
        .with_context("actual", Value::String(actual.into()))
    }

    /// `MIN_LENGTH`: a string is shorter than its minimum.
    pub fn min_length(field: &str, value: &str, min: usize, max: Option<usize>) -> Self {
        let mut err = Self::new(
            field,
            ErrorCode::MinLength,
            format!("Field '{}' must be at least {} characters", field, min),
        )
        .with_context("value", Value::String(value.into()))
        .with_context("min", Value::from(min))
        .with_context("actualLength", Value::from(value.chars().count()));
        if let Some(max) = max {
            err = err.with_context("max", Value::from(max));
        }
        err
    }

    /// `MAX_LENGTH`: a string exceeds its maximum.
    pub fn max_length(field: &str, value: &str, min: Option<usize>, max: usize) -> Self {
        let mut err = Self::new(
            field,
            ErrorCode::MaxLength,
            format!("Field '{}' must be at most {} characters", field, max),
        )
        .with_context("value", Value::String(value.into()))
        .with_context("max", Value::from(max))
        .with_context("actualLength", Value::from(value.chars().count()));
        if let Some(min) = min {
            err = err.with_context("min", Value::from(min));
        }
        err
    }

    /// `MIN_VALUE`: a number is below its minimum.
    pub fn min_value(field: &str, value: Value, min: f64, max: Option<f64>) -> Self {
        let mut err = Self::new(
            field,
            ErrorCode::MinValue,
            format!("Field '{}' must be at least {}", field, min),
        )
        .with_context("value", value)
        .with_context("min", Value::from(min));
        if let Some(max) = max {
            err = err.with_context("max", Value::from(max));
        }
        err
    }

    /// `MAX_VALUE`: a number exceeds its maximum.
    pub fn max_value(field: &str, value: Value, min: Option<f64>, max: f64) -> Self {
        let mut err = Self::new(
            field,
            ErrorCode::MaxValue,
            format!("Field '{}' must be at most {}", field, max),
        )
        .with_context("value", value)
        .with_context("max", Value::from(max));
        if let Some(min) = min {
            err = err.with_context("min", Value::from(min));
        }
        err
    }

    /// `INVALID_EMAIL`: the value fails the email pattern.
    pub fn invalid_email(field: &str, value: &str) -> Self {
        Self::new(
            field,
            ErrorCode::InvalidEmail,
            format!("Field '{}' must be a valid email address", field),
        )
        .with_context("value", Value::String(value.into()))
    }

    /// `INVALID_PHONE`: the value fails the phone pattern.
    pub fn invalid_phone(field: &str, value: &str) -> Self {
        Self::new(
            field,
            ErrorCode::InvalidPhone,
            format!("Field '{}' must be a valid phone number", field),
        )
        .with_context("value", Value::String(value.into()))
    }

    /// `INVALID_DATE`: a date-like value does not parse.
    pub fn invalid_date(field: &str, value: &str) -> Self {
        Self::new(
            field,
            ErrorCode::InvalidDate,
            format!("Field '{}' must be a valid date", field),
        )
        .with_context("value", Value::String(value.into()))
    }

    /// `DUPLICATE_VALUE`: another record already holds this unique value.
    pub fn duplicate(field: &str, value: Value) -> Self {
        Self::new(
            field,
            ErrorCode::DuplicateValue,
            format!("Field '{}' must be unique", field),
        )
        .with_context("value", value)
    }

    /// `FOREIGN_KEY_ERROR`: the referenced record does not exist.
    pub fn foreign_key(field: &str, target: &str, id: &str) -> Self {
        Self::new(
            field,
            ErrorCode::ForeignKeyError,
            format!("Field '{}' references a {} that does not exist", field, target),
        )
        .with_context("value", Value::String(id.into()))
        .with_context("target", Value::String(target.into()))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.field, self.message)
    }
}

/// Outcome of one validation call: every violation found, in field
/// declaration order and within-field rule order.
///
/// `ok` is true iff `errors` is empty; the invariant holds by construction
/// because the only constructor derives one from the other.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    ok: bool,
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Builds a result from accumulated errors.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
        }
    }

    /// Whether the payload passed every rule.
    pub fn ok(&self) -> bool {
        self.ok
    }

    /// The accumulated errors, ordered.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Consumes the result, yielding the errors.
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

/// Infrastructure and configuration faults that abort a validation call.
///
/// These are never folded into [`ValidationResult`]; the caller should map
/// them to a 5xx response. When a wire body is still needed, the code is
/// rendered as `SCHEMA_ERROR`.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Unknown record type or malformed schema definition
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// Uniqueness or foreign-key lookup failed
    #[error("{0}")]
    Store(#[from] StoreError),
}

impl EngineError {
    /// The wire code for configuration faults.
    pub fn wire_code(&self) -> ErrorCode {
        ErrorCode::SchemaError
    }
}

/// Result type for validation calls: `Ok` carries the accumulated
/// validation outcome, `Err` an infrastructure fault.
pub type EngineResult<T> = Result<T, EngineError>;
