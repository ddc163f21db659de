//! Per-field rule chain.
//!
//! Rules run in a fixed order: required, type coercion, length/range,
//! pattern, date. A field may fail several rules and all are reported, but
//! a field that failed any of them never reaches its uniqueness or
//! foreign-key step (that is the engine's concern; this module only
//! reports whether the field came out clean).

use regex::Regex;
use serde_json::Value;

use crate::schema::{FieldDescriptor, Pattern};

use super::errors::ValidationError;
use super::value::{self, CoerceError, FieldValue};
use super::OperationMode;

/// RFC-lite: one `@`, a dot in the domain, no whitespace.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
/// 10-15 digits, optional leading `+`.
const PHONE_PATTERN: &str = r"^\+?\d{10,15}$";

/// Compiled pattern set, built once per engine.
pub struct Patterns {
    email: Regex,
    phone: Regex,
}

impl Patterns {
    /// Compiles the built-in patterns.
    pub fn new() -> Self {
        Self {
            // Both patterns are literals checked by tests below
            email: Regex::new(EMAIL_PATTERN).expect("email pattern compiles"),
            phone: Regex::new(PHONE_PATTERN).expect("phone pattern compiles"),
        }
    }

    /// Whether a value matches the email pattern.
    pub fn is_email(&self, value: &str) -> bool {
        self.email.is_match(value)
    }

    /// Whether a value matches the phone pattern.
    pub fn is_phone(&self, value: &str) -> bool {
        self.phone.is_match(value)
    }
}

impl Default for Patterns {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of the field-local rule chain for one field.
pub struct FieldCheck {
    /// Errors found by the field-local rules, in rule order
    pub errors: Vec<ValidationError>,
    /// The coerced value, when the raw value was present and coercible
    pub value: Option<FieldValue>,
}

impl FieldCheck {
    /// Whether the field is present, coerced, and free of rule failures,
    /// i.e. eligible for uniqueness and foreign-key checks.
    pub fn clean_value(&self) -> Option<&FieldValue> {
        if self.errors.is_empty() {
            self.value.as_ref()
        } else {
            None
        }
    }
}

/// Runs the field-local rule chain (required, type, length/range, pattern,
/// date) for one descriptor against the raw payload value.
pub fn check_field(
    descriptor: &FieldDescriptor,
    raw: Option<&Value>,
    mode: OperationMode,
    patterns: &Patterns,
) -> FieldCheck {
    // Rule 1: required. On update, absence is a valid partial payload and
    // silences every later rule for this field.
    if value::is_missing(raw) {
        let errors = if descriptor.required && mode == OperationMode::Create {
            vec![ValidationError::required(&descriptor.name)]
        } else {
            vec![]
        };
        return FieldCheck { errors, value: None };
    }

    // Not missing, so the key is present with a non-null value
    let Some(raw) = raw else {
        return FieldCheck {
            errors: vec![],
            value: None,
        };
    };

    // Rule 2 (and 5 for datetime kinds): coercion
    let coerced = match value::coerce(raw, descriptor.kind) {
        Ok(v) => v,
        Err(CoerceError::Type { expected, actual }) => {
            return FieldCheck {
                errors: vec![ValidationError::invalid_type(
                    &descriptor.name,
                    expected,
                    actual,
                )],
                value: None,
            };
        }
        Err(CoerceError::Date { value }) => {
            return FieldCheck {
                errors: vec![ValidationError::invalid_date(&descriptor.name, &value)],
                value: None,
            };
        }
    };

    let mut errors = Vec::new();

    match &coerced {
        FieldValue::Str(s) => {
            // Rule 3: length bounds
            let len = s.chars().count();
            if let Some(min) = descriptor.min_length {
                if len < min {
                    errors.push(ValidationError::min_length(
                        &descriptor.name,
                        s,
                        min,
                        descriptor.max_length,
                    ));
                }
            }
            if let Some(max) = descriptor.max_length {
                if len > max {
                    errors.push(ValidationError::max_length(
                        &descriptor.name,
                        s,
                        descriptor.min_length,
                        max,
                    ));
                }
            }

            // Rule 4: pattern
            match descriptor.pattern {
                Pattern::None => {}
                Pattern::Email => {
                    if !patterns.is_email(s) {
                        errors.push(ValidationError::invalid_email(&descriptor.name, s));
                    }
                }
                Pattern::Phone => {
                    if !patterns.is_phone(s) {
                        errors.push(ValidationError::invalid_phone(&descriptor.name, s));
                    }
                }
            }
        }
        FieldValue::Int(_) | FieldValue::Float(_) => {
            // Rule 3: numeric bounds
            let n = match &coerced {
                FieldValue::Int(i) => *i as f64,
                FieldValue::Float(f) => *f,
                _ => unreachable!(),
            };
            if let Some(min) = descriptor.min {
                if n < min {
                    errors.push(ValidationError::min_value(
                        &descriptor.name,
                        coerced.to_json(),
                        min,
                        descriptor.max,
                    ));
                }
            }
            if let Some(max) = descriptor.max {
                if n > max {
                    errors.push(ValidationError::max_value(
                        &descriptor.name,
                        coerced.to_json(),
                        descriptor.min,
                        max,
                    ));
                }
            }
        }
        FieldValue::Bool(_) | FieldValue::DateTime(_) => {}
    }

    FieldCheck {
        errors,
        value: Some(coerced),
    }
}
