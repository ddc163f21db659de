//! Error formatting for wire responses and form clients.
//!
//! Pure transforms over a [`ValidationResult`]: a flat wire body the HTTP
//! layer can serialize into a 4xx response, and a field-grouped message
//! map a form renderer can attach per input. Both are total, including
//! over the empty-errors case.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::{ErrorCode, ValidationResult};

/// One validation error as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireValidationError {
    /// Field the rule failed on
    pub field: String,
    /// Human-readable message
    pub message: String,
    /// Stable error code
    pub code: ErrorCode,
    /// The offending value, when the rule captured one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Response body for a failed (or empty-failure) validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireErrorBody {
    /// Summary line
    pub message: String,
    /// Same summary, kept for clients that read `error`
    pub error: String,
    /// Per-field errors in accumulation order
    #[serde(rename = "validationErrors")]
    pub validation_errors: Vec<WireValidationError>,
}

/// Formats a result into the wire body shape.
pub fn format(result: &ValidationResult) -> WireErrorBody {
    let validation_errors = result
        .errors()
        .iter()
        .map(|e| WireValidationError {
            field: e.field.clone(),
            message: e.message.clone(),
            code: e.code,
            value: e.context.get("value").cloned(),
        })
        .collect();

    WireErrorBody {
        message: "Validation failed".to_string(),
        error: "Validation failed".to_string(),
        validation_errors,
    }
}

/// Groups messages by field for direct form annotation.
///
/// Keys are sorted (deterministic); messages within a field keep rule
/// order. An ok result yields an empty map.
pub fn group_by_field(result: &ValidationResult) -> BTreeMap<String, Vec<String>> {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for err in result.errors() {
        grouped
            .entry(err.field.clone())
            .or_default()
            .push(err.message.clone());
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::errors::ValidationError;
    use serde_json::json;

    fn failed_result() -> ValidationResult {
        ValidationResult::from_errors(vec![
            ValidationError::min_length("name", "A", 2, None),
            ValidationError::invalid_phone("phone", "invalid-phone"),
            ValidationError::invalid_email("phone", "x"),
        ])
    }

    #[test]
    fn test_wire_body_shape() {
        let body = format(&failed_result());
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["message"], "Validation failed");
        assert_eq!(json["error"], "Validation failed");
        let errors = json["validationErrors"].as_array().unwrap();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors[0]["field"], "name");
        assert_eq!(errors[0]["code"], "MIN_LENGTH");
        assert_eq!(errors[0]["value"], "A");
    }

    #[test]
    fn test_wire_body_keeps_accumulation_order() {
        let body = format(&failed_result());
        let codes: Vec<_> = body
            .validation_errors
            .iter()
            .map(|e| e.code.as_str())
            .collect();
        assert_eq!(codes, vec!["MIN_LENGTH", "INVALID_PHONE", "INVALID_EMAIL"]);
    }

    #[test]
    fn test_group_by_field() {
        let grouped = group_by_field(&failed_result());
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["name"].len(), 1);
        assert_eq!(grouped["phone"].len(), 2);
    }

    #[test]
    fn test_empty_result_formats_empty() {
        let ok = ValidationResult::from_errors(vec![]);
        assert!(format(&ok).validation_errors.is_empty());
        assert!(group_by_field(&ok).is_empty());
    }

    #[test]
    fn test_error_without_captured_value() {
        let result = ValidationResult::from_errors(vec![ValidationError::required("name")]);
        let body = format(&result);
        assert_eq!(body.validation_errors[0].value, None);
        let json = serde_json::to_value(&body).unwrap();
        // Absent value is omitted from the wire entirely
        assert!(json["validationErrors"][0].get("value").is_none());
        assert_eq!(json["validationErrors"][0]["code"], json!("REQUIRED_FIELD"));
    }
}
