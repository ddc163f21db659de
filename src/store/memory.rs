//! In-memory record store.
//!
//! Backs the engine in tests and small embeddings. Records are flat JSON
//! objects grouped by record type; ids are minted as v4 UUIDs on insert.

use std::collections::HashMap;

use serde_json::{Map, Value};
use uuid::Uuid;

use super::{RecordStore, StoreResult};

/// A stored record: an id plus its field values.
#[derive(Debug, Clone)]
pub struct StoredRecord {
    /// Record id
    pub id: String,
    /// Field values as submitted
    pub fields: Map<String, Value>,
}

/// HashMap-backed record store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<String, Vec<StoredRecord>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record and returns its minted id.
    pub fn insert(&mut self, record_type: &str, fields: Map<String, Value>) -> String {
        let id = Uuid::new_v4().to_string();
        self.insert_with_id(record_type, &id, fields);
        id
    }

    /// Inserts a record under a caller-chosen id.
    pub fn insert_with_id(&mut self, record_type: &str, id: &str, fields: Map<String, Value>) {
        self.records
            .entry(record_type.to_string())
            .or_default()
            .push(StoredRecord {
                id: id.to_string(),
                fields,
            });
    }

    /// Returns a record by id.
    pub fn get(&self, record_type: &str, id: &str) -> Option<&StoredRecord> {
        self.records
            .get(record_type)?
            .iter()
            .find(|r| r.id == id)
    }

    /// Returns the number of records of the given type.
    pub fn count(&self, record_type: &str) -> usize {
        self.records.get(record_type).map_or(0, |v| v.len())
    }
}

impl RecordStore for MemoryStore {
    fn find_id_by_field(
        &self,
        record_type: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Option<String>> {
        let Some(records) = self.records.get(record_type) else {
            return Ok(None);
        };
        Ok(records
            .iter()
            .find(|r| r.fields.get(field) == Some(value))
            .map(|r| r.id.clone()))
    }

    fn record_exists(&self, record_type: &str, id: &str) -> StoreResult<bool> {
        Ok(self.get(record_type, id).is_some())
    }
}
