//! Tagged field values and explicit coercion from raw payload input.
//!
//! Payloads arrive as JSON, often with every value a string straight out
//! of a form submission. Each raw value is coerced to the field's declared
//! kind exactly once; failure is reported (`INVALID_TYPE`, or
//! `INVALID_DATE` for unparsable date-like strings), never silently cast.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::schema::FieldKind;

/// A payload value after successful coercion to its declared kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(DateTime<Utc>),
}

impl FieldValue {
    /// Renders the coerced value back to JSON, canonical per kind.
    ///
    /// Uniqueness lookups use this form, so `"42"` and `42` collide on an
    /// int field.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Str(s) => Value::String(s.clone()),
            FieldValue::Int(i) => Value::from(*i),
            FieldValue::Float(f) => Value::from(*f),
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::DateTime(dt) => Value::String(dt.to_rfc3339()),
        }
    }
}

/// Why a raw value failed to coerce.
#[derive(Debug, Clone, PartialEq)]
pub enum CoerceError {
    /// Value is not of, and does not convert to, the declared kind
    Type {
        /// Declared kind name
        expected: &'static str,
        /// JSON type name of the raw value
        actual: &'static str,
    },
    /// Date-like string that does not parse
    Date {
        /// The offending input
        value: String,
    },
}

/// Missing-value policy: absent keys, JSON `null`, and zero-length strings
/// count as missing. `0`, `false`, and whitespace-only strings are present
/// values (whitespace-only strings then face length and pattern rules
/// as-is).
pub fn is_missing(raw: Option<&Value>) -> bool {
    match raw {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Coerces a present raw value to the declared kind.
pub fn coerce(raw: &Value, kind: FieldKind) -> Result<FieldValue, CoerceError> {
    match kind {
        FieldKind::String => match raw {
            Value::String(s) => Ok(FieldValue::Str(s.clone())),
            other => Err(type_error(kind, other)),
        },
        FieldKind::Int => match raw {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(FieldValue::Int(i))
                } else {
                    // u64 beyond i64 range, or a fractional float
                    match n.as_f64() {
                        Some(f) if f.fract() == 0.0 && f.abs() < (i64::MAX as f64) => {
                            Ok(FieldValue::Int(f as i64))
                        }
                        _ => Err(type_error(kind, raw)),
                    }
                }
            }
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map(FieldValue::Int)
                .map_err(|_| type_error(kind, raw)),
            other => Err(type_error(kind, other)),
        },
        FieldKind::Float => match raw {
            Value::Number(n) => n
                .as_f64()
                .map(FieldValue::Float)
                .ok_or_else(|| type_error(kind, raw)),
            // Form strings may spell non-finite values ("NaN", "inf") that
            // str::parse accepts; those defeat every bound check and have
            // no JSON rendering, so they are a type failure, not a float
            Value::String(s) => match s.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(FieldValue::Float(f)),
                _ => Err(type_error(kind, raw)),
            },
            other => Err(type_error(kind, other)),
        },
        FieldKind::Boolean => match raw {
            Value::Bool(b) => Ok(FieldValue::Bool(*b)),
            Value::String(s) => match s.trim() {
                "true" => Ok(FieldValue::Bool(true)),
                "false" => Ok(FieldValue::Bool(false)),
                _ => Err(type_error(kind, raw)),
            },
            other => Err(type_error(kind, other)),
        },
        FieldKind::DateTime => match raw {
            Value::String(s) => parse_datetime(s).ok_or_else(|| CoerceError::Date {
                value: s.clone(),
            }),
            other => Err(type_error(kind, other)),
        },
    }
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS`, and bare `YYYY-MM-DD`.
fn parse_datetime(s: &str) -> Option<FieldValue> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(FieldValue::DateTime(dt.with_timezone(&Utc)));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(FieldValue::DateTime(naive.and_utc()));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let naive = date.and_hms_opt(0, 0, 0)?;
        return Some(FieldValue::DateTime(naive.and_utc()));
    }
    None
}

fn type_error(kind: FieldKind, raw: &Value) -> CoerceError {
    CoerceError::Type {
        expected: kind.kind_name(),
        actual: json_type_name(raw),
    }
}

/// Returns the JSON type name for error context.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                "int"
            } else {
                "float"
            }
        }
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_policy() {
        assert!(is_missing(None));
        assert!(is_missing(Some(&Value::Null)));
        assert!(is_missing(Some(&json!(""))));
        // 0, false, and whitespace are present values
        assert!(!is_missing(Some(&json!(0))));
        assert!(!is_missing(Some(&json!(false))));
        assert!(!is_missing(Some(&json!("   "))));
    }

    #[test]
    fn test_string_coercion_is_strict() {
        assert_eq!(
            coerce(&json!("Ada"), FieldKind::String),
            Ok(FieldValue::Str("Ada".into()))
        );
        // No silent number-to-string cast
        assert!(matches!(
            coerce(&json!(42), FieldKind::String),
            Err(CoerceError::Type { expected: "string", actual: "int" })
        ));
    }

    #[test]
    fn test_int_coercion_accepts_form_strings() {
        assert_eq!(coerce(&json!(42), FieldKind::Int), Ok(FieldValue::Int(42)));
        assert_eq!(coerce(&json!("42"), FieldKind::Int), Ok(FieldValue::Int(42)));
        assert_eq!(coerce(&json!(" 7 "), FieldKind::Int), Ok(FieldValue::Int(7)));
        assert!(coerce(&json!("4.5"), FieldKind::Int).is_err());
        assert!(coerce(&json!(4.5), FieldKind::Int).is_err());
        assert!(coerce(&json!(true), FieldKind::Int).is_err());
    }

    #[test]
    fn test_int_coercion_accepts_integral_floats() {
        // JSON numbers like 42.0 arrive as floats
        assert_eq!(coerce(&json!(42.0), FieldKind::Int), Ok(FieldValue::Int(42)));
    }

    #[test]
    fn test_float_coercion() {
        assert_eq!(
            coerce(&json!(99.5), FieldKind::Float),
            Ok(FieldValue::Float(99.5))
        );
        assert_eq!(
            coerce(&json!(100), FieldKind::Float),
            Ok(FieldValue::Float(100.0))
        );
        assert_eq!(
            coerce(&json!("12.25"), FieldKind::Float),
            Ok(FieldValue::Float(12.25))
        );
        assert!(coerce(&json!("abc"), FieldKind::Float).is_err());
    }

    #[test]
    fn test_nonfinite_float_strings_rejected() {
        for s in ["NaN", "nan", "inf", "-inf", "infinity", "-Infinity"] {
            let result = coerce(&json!(s), FieldKind::Float);
            assert!(
                matches!(result, Err(CoerceError::Type { expected: "float", .. })),
                "{} must not coerce to a float",
                s
            );
        }
    }

    #[test]
    fn test_boolean_coercion() {
        assert_eq!(
            coerce(&json!(true), FieldKind::Boolean),
            Ok(FieldValue::Bool(true))
        );
        assert_eq!(
            coerce(&json!("false"), FieldKind::Boolean),
            Ok(FieldValue::Bool(false))
        );
        assert!(coerce(&json!("yes"), FieldKind::Boolean).is_err());
        assert!(coerce(&json!(1), FieldKind::Boolean).is_err());
    }

    #[test]
    fn test_datetime_formats() {
        assert!(coerce(&json!("2024-09-01"), FieldKind::DateTime).is_ok());
        assert!(coerce(&json!("2024-09-01T08:30:00"), FieldKind::DateTime).is_ok());
        assert!(coerce(&json!("2024-09-01T08:30:00+02:00"), FieldKind::DateTime).is_ok());
    }

    #[test]
    fn test_unparsable_date_is_date_error() {
        let err = coerce(&json!("next tuesday"), FieldKind::DateTime).unwrap_err();
        assert_eq!(
            err,
            CoerceError::Date {
                value: "next tuesday".into()
            }
        );
    }

    #[test]
    fn test_non_string_date_is_type_error() {
        assert!(matches!(
            coerce(&json!(20240901), FieldKind::DateTime),
            Err(CoerceError::Type { expected: "datetime", .. })
        ));
    }

    #[test]
    fn test_to_json_canonical_forms() {
        assert_eq!(FieldValue::Int(42).to_json(), json!(42));
        assert_eq!(coerce(&json!("42"), FieldKind::Int).unwrap().to_json(), json!(42));
        assert_eq!(FieldValue::Bool(false).to_json(), json!(false));
    }
}
