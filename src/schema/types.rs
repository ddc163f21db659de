//! Record schema type definitions.
//!
//! A record type (Student, Guardian, SchoolClass, ...) is described by an
//! ordered list of field descriptors. Descriptors are the single source of
//! truth for validation: required flag, primitive kind, length/range bounds,
//! pattern, uniqueness, and foreign-key target. They are immutable once
//! registered and never consulted for anything but reads during a request.

use serde::{Deserialize, Serialize};

/// Primitive field kinds supported by the validation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// Boolean
    Boolean,
    /// Calendar date or timestamp (RFC 3339 or `YYYY-MM-DD`)
    DateTime,
}

impl FieldKind {
    /// Returns the kind name used in error messages and `INVALID_TYPE` context.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Int => "int",
            FieldKind::Float => "float",
            FieldKind::Boolean => "boolean",
            FieldKind::DateTime => "datetime",
        }
    }
}

/// Well-known value patterns for string fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    /// No pattern constraint
    #[default]
    None,
    /// RFC-lite email address
    Email,
    /// International phone number, 10-15 digits with optional leading `+`
    Phone,
}

/// Validation metadata for a single field of a record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name as it appears in payloads
    pub name: String,
    /// Whether the field must be present on create
    pub required: bool,
    /// Primitive kind the value must coerce to
    pub kind: FieldKind,
    /// Minimum string length (string fields only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum string length (string fields only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Minimum numeric value (int/float fields only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Maximum numeric value (int/float fields only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Whether the value must be unique across stored records
    #[serde(default)]
    pub unique: bool,
    /// Pattern constraint (string fields only)
    #[serde(default, skip_serializing_if = "is_default_pattern")]
    pub pattern: Pattern,
    /// Record type an id value must reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,
}

fn is_default_pattern(p: &Pattern) -> bool {
    *p == Pattern::None
}

impl FieldDescriptor {
    /// Create a descriptor with the given name and kind, no constraints.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            required: false,
            kind,
            min_length: None,
            max_length: None,
            min: None,
            max: None,
            unique: false,
            pattern: Pattern::None,
            foreign_key: None,
        }
    }

    /// Create a required string field.
    pub fn required_string(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String).required()
    }

    /// Create an optional string field.
    pub fn optional_string(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String)
    }

    /// Create a required int field.
    pub fn required_int(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Int).required()
    }

    /// Create an optional int field.
    pub fn optional_int(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Int)
    }

    /// Create a required float field.
    pub fn required_float(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Float).required()
    }

    /// Create an optional float field.
    pub fn optional_float(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Float)
    }

    /// Create a required boolean field.
    pub fn required_boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean).required()
    }

    /// Create an optional boolean field.
    pub fn optional_boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    /// Create a required datetime field.
    pub fn required_datetime(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::DateTime).required()
    }

    /// Create an optional datetime field.
    pub fn optional_datetime(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::DateTime)
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field as unique across stored records.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Set string length bounds.
    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    /// Set the minimum string length.
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Set the maximum string length.
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Set numeric bounds.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Set the minimum numeric value.
    pub fn min_value(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the maximum numeric value.
    pub fn max_value(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Constrain the field to a well-known pattern.
    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Require the value to reference an existing record of the given type.
    pub fn references(mut self, record_type: impl Into<String>) -> Self {
        self.foreign_key = Some(record_type.into());
        self
    }
}

/// Complete schema for one record type: an ordered descriptor list.
///
/// Descriptor order is declaration order and is preserved through
/// registration, serialization, and validation output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSchema {
    /// Record type name (e.g. "Guardian")
    pub record_type: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered field definitions
    pub fields: Vec<FieldDescriptor>,
}

impl RecordSchema {
    /// Create a new record schema.
    pub fn new(record_type: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            record_type: record_type.into(),
            description: None,
            fields,
        }
    }

    /// Attach a description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Look up a descriptor by field name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|d| d.name == name)
    }

    /// Validates the schema definition itself (not a payload).
    ///
    /// Checks that the type name is non-empty, field names are unique, and
    /// constraints match the field kind (length bounds on strings, numeric
    /// bounds on numbers, patterns on strings).
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.record_type.is_empty() {
            return Err("Record type name must not be empty".into());
        }
        if self.fields.is_empty() {
            return Err(format!("Record type '{}' has no fields", self.record_type));
        }

        for (i, desc) in self.fields.iter().enumerate() {
            if desc.name.is_empty() {
                return Err(format!("Field #{} has an empty name", i));
            }
            if self.fields[..i].iter().any(|d| d.name == desc.name) {
                return Err(format!("Duplicate field name '{}'", desc.name));
            }

            let is_string = desc.kind == FieldKind::String;
            let is_numeric = matches!(desc.kind, FieldKind::Int | FieldKind::Float);

            if (desc.min_length.is_some() || desc.max_length.is_some()) && !is_string {
                return Err(format!(
                    "Field '{}': length bounds require a string field",
                    desc.name
                ));
            }
            if (desc.min.is_some() || desc.max.is_some()) && !is_numeric {
                return Err(format!(
                    "Field '{}': numeric bounds require an int or float field",
                    desc.name
                ));
            }
            if desc.pattern != Pattern::None && !is_string {
                return Err(format!(
                    "Field '{}': patterns require a string field",
                    desc.name
                ));
            }
            if desc.foreign_key.is_some() && !is_string {
                return Err(format!(
                    "Field '{}': foreign keys require a string id field",
                    desc.name
                ));
            }
            if let (Some(min), Some(max)) = (desc.min_length, desc.max_length) {
                if min > max {
                    return Err(format!("Field '{}': min_length > max_length", desc.name));
                }
            }
            if let (Some(min), Some(max)) = (desc.min, desc.max) {
                if min > max {
                    return Err(format!("Field '{}': min > max", desc.name));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> RecordSchema {
        RecordSchema::new(
            "Guardian",
            vec![
                FieldDescriptor::required_string("name").min_length(2),
                FieldDescriptor::optional_string("phone").pattern(Pattern::Phone),
                FieldDescriptor::required_string("email")
                    .pattern(Pattern::Email)
                    .unique(),
            ],
        )
    }

    #[test]
    fn test_schema_structure_valid() {
        assert!(sample_schema().validate_structure().is_ok());
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let schema = RecordSchema::new(
            "Guardian",
            vec![
                FieldDescriptor::required_string("name"),
                FieldDescriptor::optional_string("name"),
            ],
        );
        let result = schema.validate_structure();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Duplicate"));
    }

    #[test]
    fn test_length_bounds_require_string() {
        let schema = RecordSchema::new(
            "Student",
            vec![FieldDescriptor::required_int("age").min_length(2)],
        );
        assert!(schema.validate_structure().is_err());
    }

    #[test]
    fn test_numeric_bounds_require_number() {
        let schema = RecordSchema::new(
            "Student",
            vec![FieldDescriptor::required_string("name").min_value(1.0)],
        );
        assert!(schema.validate_structure().is_err());
    }

    #[test]
    fn test_foreign_key_requires_string_kind() {
        let schema = RecordSchema::new(
            "Attendance",
            vec![FieldDescriptor::required_int("student_id").references("Student")],
        );
        assert!(schema.validate_structure().is_err());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let schema = RecordSchema::new(
            "Student",
            vec![FieldDescriptor::required_string("name").length(10, 2)],
        );
        assert!(schema.validate_structure().is_err());
    }

    #[test]
    fn test_field_lookup_and_order() {
        let schema = sample_schema();
        assert_eq!(schema.field("phone").unwrap().pattern, Pattern::Phone);
        assert!(schema.field("missing").is_none());
        let names: Vec<_> = schema.fields.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["name", "phone", "email"]);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(FieldKind::String.kind_name(), "string");
        assert_eq!(FieldKind::Int.kind_name(), "int");
        assert_eq!(FieldKind::Float.kind_name(), "float");
        assert_eq!(FieldKind::Boolean.kind_name(), "boolean");
        assert_eq!(FieldKind::DateTime.kind_name(), "datetime");
    }

    #[test]
    fn test_schema_json_roundtrip() {
        let schema = sample_schema();
        let json = serde_json::to_string(&schema).unwrap();
        let back: RecordSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(schema, back);
    }
}
