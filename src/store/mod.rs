//! Read-only persistence seam for uniqueness and foreign-key checks.
//!
//! Validation never writes. The engine only needs two lookups, expressed
//! here as a trait so the service layer can back them with whatever stores
//! the records. A lookup failure is an infrastructure error and aborts the
//! validation call; it is never folded into the validation error list.
//!
//! A uniqueness check that passes here can still lose a race to a
//! concurrent insert before the actual write. That is accepted: the
//! persistence layer's own unique constraint is the final authority, and
//! this check is a fast-fail aid for form clients.

pub mod memory;

use serde_json::Value;
use thiserror::Error;

pub use memory::MemoryStore;

/// Result type for store lookups.
pub type StoreResult<T> = Result<T, StoreError>;

/// Infrastructure errors raised by store lookups.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The backing store cannot be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A lookup failed for a backend-specific reason
    #[error("Store lookup failed: {0}")]
    Lookup(String),
}

/// Read-only record lookups used during validation.
pub trait RecordStore {
    /// Returns the id of a record of `record_type` whose `field` equals
    /// `value`, if one exists. Used by uniqueness checks; which record is
    /// returned when several match is unspecified.
    fn find_id_by_field(
        &self,
        record_type: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Option<String>>;

    /// Returns whether a record of `record_type` with the given id exists.
    /// Used by foreign-key checks.
    fn record_exists(&self, record_type: &str, id: &str) -> StoreResult<bool>;
}
