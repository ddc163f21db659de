//! Record schemas and the registry that serves them.
//!
//! The registry is the descriptor provider for the validation engine: one
//! immutable, ordered field descriptor list per record type, registered
//! explicitly or loaded from JSON schema files.

pub mod catalog;
pub mod errors;
pub mod registry;
pub mod types;

pub use errors::{SchemaError, SchemaErrorCode, SchemaResult, Severity};
pub use registry::SchemaRegistry;
pub use types::{FieldDescriptor, FieldKind, Pattern, RecordSchema};
