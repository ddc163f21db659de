//! Validation orchestrator.
//!
//! One call validates one payload against one record type. Descriptors are
//! walked in the registry's declared order; every field runs its full rule
//! chain and all failures are accumulated. A caller sees every violation
//! in one round trip, never one at a time. Calls are stateless and may run
//! concurrently; the only shared resource is the read-only record store.

use serde_json::{Map, Value};

use crate::observe::Logger;
use crate::schema::SchemaRegistry;
use crate::store::RecordStore;

use super::errors::{EngineResult, ValidationError, ValidationResult};
use super::rules::{self, Patterns};
use super::value::FieldValue;

/// Whether the payload creates a record or updates an existing one.
///
/// Updates are partial: absent fields are skipped entirely, and the record
/// being updated is excluded from its own uniqueness checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    Create,
    Update,
}

/// Per-call validation context.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// Create or update semantics
    pub mode: OperationMode,
    /// On update, the id of the record being updated
    pub excluded_record_id: Option<String>,
}

impl ValidationContext {
    /// Context for validating a create payload.
    pub fn create() -> Self {
        Self {
            mode: OperationMode::Create,
            excluded_record_id: None,
        }
    }

    /// Context for validating an update to the given record.
    pub fn update(record_id: impl Into<String>) -> Self {
        Self {
            mode: OperationMode::Update,
            excluded_record_id: Some(record_id.into()),
        }
    }
}

/// The validation engine: registry for rules, store for lookups.
///
/// Holds no per-call state; a single engine can serve concurrent calls.
pub struct ValidationEngine<'a> {
    registry: &'a SchemaRegistry,
    store: &'a dyn RecordStore,
    patterns: Patterns,
}

impl<'a> ValidationEngine<'a> {
    /// Creates an engine over a registry and a record store.
    pub fn new(registry: &'a SchemaRegistry, store: &'a dyn RecordStore) -> Self {
        Self {
            registry,
            store,
            patterns: Patterns::new(),
        }
    }

    /// Validates a payload against a record type.
    ///
    /// Returns `Ok` with the accumulated result for any user-input
    /// outcome, including total failure. Returns `Err` only for
    /// configuration or infrastructure faults: an unregistered record
    /// type, or a store lookup that fails mid-call.
    pub fn validate(
        &self,
        record_type: &str,
        payload: &Map<String, Value>,
        context: &ValidationContext,
    ) -> EngineResult<ValidationResult> {
        let schema = self.registry.describe(record_type)?;

        let mut errors: Vec<ValidationError> = Vec::new();

        for descriptor in &schema.fields {
            let raw = payload.get(&descriptor.name);
            let check = rules::check_field(descriptor, raw, context.mode, &self.patterns);

            // Uniqueness and foreign-key checks only run on a clean,
            // present value; a field that already failed stops at its own
            // later steps, never the accumulation across fields.
            let clean = check.clean_value().cloned();
            errors.extend(check.errors);

            let Some(value) = clean else {
                continue;
            };

            if descriptor.unique {
                if let Some(err) =
                    self.check_unique(record_type, &descriptor.name, &value, context)?
                {
                    errors.push(err);
                }
            }

            if let Some(target) = &descriptor.foreign_key {
                if let Some(err) = self.check_reference(&descriptor.name, target, &value)? {
                    errors.push(err);
                }
            }
        }

        Ok(ValidationResult::from_errors(errors))
    }

    /// Uniqueness check against the store, excluding the updated record
    /// from colliding with itself.
    fn check_unique(
        &self,
        record_type: &str,
        field: &str,
        value: &FieldValue,
        context: &ValidationContext,
    ) -> EngineResult<Option<ValidationError>> {
        let json_value = value.to_json();

        let existing = self
            .store
            .find_id_by_field(record_type, field, &json_value)
            .map_err(|e| {
                let reason = e.to_string();
                Logger::error(
                    "store_lookup_failed",
                    &[
                        ("check", "unique"),
                        ("field", field),
                        ("reason", reason.as_str()),
                        ("record_type", record_type),
                    ],
                );
                e
            })?;

        let Some(existing_id) = existing else {
            return Ok(None);
        };

        let is_self = context.mode == OperationMode::Update
            && context.excluded_record_id.as_deref() == Some(existing_id.as_str());

        if is_self {
            Ok(None)
        } else {
            Ok(Some(ValidationError::duplicate(field, json_value)))
        }
    }

    /// Foreign-key existence check against the store.
    fn check_reference(
        &self,
        field: &str,
        target: &str,
        value: &FieldValue,
    ) -> EngineResult<Option<ValidationError>> {
        // Structure checks pin foreign-key fields to the string kind
        let FieldValue::Str(id) = value else {
            return Ok(None);
        };

        let exists = self.store.record_exists(target, id).map_err(|e| {
            let reason = e.to_string();
            Logger::error(
                "store_lookup_failed",
                &[
                    ("check", "foreign_key"),
                    ("field", field),
                    ("reason", reason.as_str()),
                    ("target", target),
                ],
            );
            e
        })?;

        if exists {
            Ok(None)
        } else {
            Ok(Some(ValidationError::foreign_key(field, target, id)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{catalog, FieldDescriptor, RecordSchema, SchemaRegistry};
    use crate::store::{MemoryStore, StoreError, StoreResult};
    use crate::validate::errors::EngineError;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_valid_create_passes() {
        let registry = catalog::builtin_registry();
        let store = MemoryStore::new();
        let engine = ValidationEngine::new(&registry, &store);

        let result = engine
            .validate(
                "Guardian",
                &payload(json!({
                    "name": "Ada Lovelace",
                    "phone": "+15551234567",
                    "email": "ada@example.com"
                })),
                &ValidationContext::create(),
            )
            .unwrap();

        assert!(result.ok());
    }

    #[test]
    fn test_unknown_record_type_aborts() {
        let registry = SchemaRegistry::new();
        let store = MemoryStore::new();
        let engine = ValidationEngine::new(&registry, &store);

        let result = engine.validate(
            "Ghost",
            &Map::new(),
            &ValidationContext::create(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_errors_follow_declaration_order() {
        let mut registry = SchemaRegistry::new();
        registry
            .register(RecordSchema::new(
                "Thing",
                vec![
                    FieldDescriptor::required_string("alpha"),
                    FieldDescriptor::required_string("beta"),
                    FieldDescriptor::required_string("gamma"),
                ],
            ))
            .unwrap();
        let store = MemoryStore::new();
        let engine = ValidationEngine::new(&registry, &store);

        let result = engine
            .validate("Thing", &Map::new(), &ValidationContext::create())
            .unwrap();

        let fields: Vec<_> = result.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["alpha", "beta", "gamma"]);
    }

    struct BrokenStore;

    impl RecordStore for BrokenStore {
        fn find_id_by_field(
            &self,
            _record_type: &str,
            _field: &str,
            _value: &Value,
        ) -> StoreResult<Option<String>> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        fn record_exists(&self, _record_type: &str, _id: &str) -> StoreResult<bool> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    #[test]
    fn test_store_failure_aborts_instead_of_accumulating() {
        let registry = catalog::builtin_registry();
        let store = BrokenStore;
        let engine = ValidationEngine::new(&registry, &store);

        let result = engine.validate(
            "Guardian",
            &payload(json!({
                "name": "Ada Lovelace",
                "email": "ada@example.com"
            })),
            &ValidationContext::create(),
        );

        assert!(matches!(result, Err(EngineError::Store(_))));
    }

    #[test]
    fn test_store_not_consulted_when_field_dirty() {
        // BrokenStore would abort the call, so a pattern failure on the
        // unique email field must keep the store out of the picture
        let registry = catalog::builtin_registry();
        let store = BrokenStore;
        let engine = ValidationEngine::new(&registry, &store);

        let result = engine
            .validate(
                "Guardian",
                &payload(json!({
                    "name": "Ada Lovelace",
                    "email": "not-an-email"
                })),
                &ValidationContext::create(),
            )
            .unwrap();

        assert!(!result.ok());
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].code.as_str(), "INVALID_EMAIL");
    }
}
