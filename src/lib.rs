//! campus-validate - Schema-driven validation for the campus
//! administration backend.
//!
//! A CRUD service layer calls [`validate::ValidationEngine::validate`]
//! before creating or updating a record. Rules are derived from one
//! registered [`schema::RecordSchema`] per record type, every violation
//! is accumulated in a single pass, and the result formats directly into
//! the wire and form-grouped shapes clients consume.

pub mod observe;
pub mod schema;
pub mod store;
pub mod validate;

pub use schema::{FieldDescriptor, FieldKind, Pattern, RecordSchema, SchemaRegistry};
pub use store::{MemoryStore, RecordStore};
pub use validate::{
    ErrorCode, OperationMode, ValidationContext, ValidationEngine, ValidationError,
    ValidationResult,
};
