//! Built-in record schemas for the campus administration backend.
//!
//! One schema per REST resource the service layer persists. Field order is
//! declaration order and drives the order of accumulated validation errors,
//! so it mirrors the order forms render their inputs.

use super::registry::SchemaRegistry;
use super::types::{FieldDescriptor, Pattern, RecordSchema};

/// Guardian contact record.
pub fn guardian() -> RecordSchema {
    RecordSchema::new(
        "Guardian",
        vec![
            FieldDescriptor::required_string("name").length(2, 120),
            FieldDescriptor::optional_string("phone").pattern(Pattern::Phone),
            FieldDescriptor::required_string("email")
                .pattern(Pattern::Email)
                .unique(),
            FieldDescriptor::optional_string("address").max_length(250),
        ],
    )
    .describe("Parent or legal guardian of a student")
}

/// Enrolled student record.
pub fn student() -> RecordSchema {
    RecordSchema::new(
        "Student",
        vec![
            FieldDescriptor::required_string("first_name").length(2, 60),
            FieldDescriptor::required_string("last_name").length(2, 60),
            FieldDescriptor::optional_string("email")
                .pattern(Pattern::Email)
                .unique(),
            FieldDescriptor::required_datetime("date_of_birth"),
            FieldDescriptor::required_string("guardian_id").references("Guardian"),
            FieldDescriptor::optional_string("class_id").references("SchoolClass"),
            FieldDescriptor::optional_boolean("active"),
        ],
    )
    .describe("Student enrolled at the center")
}

/// Class (group) record.
pub fn school_class() -> RecordSchema {
    RecordSchema::new(
        "SchoolClass",
        vec![
            FieldDescriptor::required_string("name").length(1, 80).unique(),
            FieldDescriptor::optional_int("capacity").range(1.0, 200.0),
            FieldDescriptor::optional_string("teacher_id").references("Employee"),
        ],
    )
    .describe("Class or group of students")
}

/// Taught subject record.
pub fn subject() -> RecordSchema {
    RecordSchema::new(
        "Subject",
        vec![
            FieldDescriptor::required_string("name").length(2, 80).unique(),
            FieldDescriptor::optional_string("description").max_length(500),
        ],
    )
}

/// Employee (teacher or staff) record.
pub fn employee() -> RecordSchema {
    RecordSchema::new(
        "Employee",
        vec![
            FieldDescriptor::required_string("first_name").length(2, 60),
            FieldDescriptor::required_string("last_name").length(2, 60),
            FieldDescriptor::required_string("email")
                .pattern(Pattern::Email)
                .unique(),
            FieldDescriptor::optional_string("phone").pattern(Pattern::Phone),
            FieldDescriptor::required_datetime("hired_at"),
            FieldDescriptor::optional_float("salary").min_value(0.0),
        ],
    )
}

/// Daily attendance record.
pub fn attendance() -> RecordSchema {
    RecordSchema::new(
        "Attendance",
        vec![
            FieldDescriptor::required_string("student_id").references("Student"),
            FieldDescriptor::required_datetime("date"),
            FieldDescriptor::required_boolean("present"),
            FieldDescriptor::optional_string("note").max_length(250),
        ],
    )
}

/// Payroll entry for an employee.
pub fn payroll_entry() -> RecordSchema {
    RecordSchema::new(
        "PayrollEntry",
        vec![
            FieldDescriptor::required_string("employee_id").references("Employee"),
            FieldDescriptor::required_datetime("period_start"),
            FieldDescriptor::required_datetime("period_end"),
            FieldDescriptor::required_float("gross_amount").min_value(0.0),
            FieldDescriptor::optional_float("deductions").min_value(0.0),
        ],
    )
}

/// Banking transaction record.
pub fn transaction() -> RecordSchema {
    RecordSchema::new(
        "Transaction",
        vec![
            FieldDescriptor::required_string("reference").length(4, 64).unique(),
            FieldDescriptor::required_float("amount"),
            FieldDescriptor::required_datetime("posted_at"),
            FieldDescriptor::optional_string("description").max_length(250),
        ],
    )
}

/// Internal message record.
pub fn message() -> RecordSchema {
    RecordSchema::new(
        "Message",
        vec![
            FieldDescriptor::required_string("sender_id").references("Employee"),
            FieldDescriptor::required_string("subject").length(1, 200),
            FieldDescriptor::required_string("body").length(1, 5000),
            FieldDescriptor::optional_datetime("sent_at"),
        ],
    )
}

/// Builds a registry pre-loaded with every built-in record schema.
pub fn builtin_registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    for schema in [
        guardian(),
        student(),
        school_class(),
        subject(),
        employee(),
        attendance(),
        payroll_entry(),
        transaction(),
        message(),
    ] {
        // Built-in definitions are checked by tests; registration cannot
        // collide because each helper uses a distinct record type name.
        registry
            .register(schema)
            .unwrap_or_else(|e| panic!("built-in schema invalid: {}", e));
    }
    registry
}
