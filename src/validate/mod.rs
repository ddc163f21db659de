//! The validation engine: rule chain, orchestrator, and error formatting.
//!
//! Call shape: [`ValidationEngine::validate`] takes a record type, a raw
//! payload, and a [`ValidationContext`], and returns every violation in
//! one pass. Validation failures are data; configuration and store faults
//! abort the call as [`EngineError`].

pub mod engine;
pub mod errors;
pub mod format;
pub mod rules;
pub mod value;

pub use engine::{OperationMode, ValidationContext, ValidationEngine};
pub use errors::{EngineError, EngineResult, ErrorCode, ValidationError, ValidationResult};
pub use format::{format, group_by_field, WireErrorBody, WireValidationError};
pub use value::{CoerceError, FieldValue};
