//! Schema registry: the single source of truth for validation rules.
//!
//! Record types are registered explicitly (a static registration table at
//! startup, typically via [`crate::schema::catalog`]) or loaded from JSON
//! schema files at `<dir>/schema_<record_type>.json`. Once registered a
//! schema is immutable; `describe` hands out the same ordered descriptor
//! list on every call.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::observe::{Logger, Severity as LogSeverity};

use super::errors::{SchemaError, SchemaResult};
use super::types::RecordSchema;

/// Registry of record schemas indexed by record type name.
pub struct SchemaRegistry {
    schemas: HashMap<String, RecordSchema>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
        }
    }

    /// Registers a schema.
    ///
    /// Fails with `DUPLICATE_RECORD_TYPE` if the type is already registered
    /// and `MALFORMED_SCHEMA` if the definition fails its structure check.
    pub fn register(&mut self, schema: RecordSchema) -> SchemaResult<()> {
        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed_schema("<in-memory>", e))?;

        if self.schemas.contains_key(&schema.record_type) {
            return Err(SchemaError::duplicate_record_type(&schema.record_type));
        }

        self.schemas.insert(schema.record_type.clone(), schema);
        Ok(())
    }

    /// Returns the schema for a record type.
    ///
    /// Fails with `UNKNOWN_RECORD_TYPE` for unregistered types; this is a
    /// configuration fault, not a validation failure.
    pub fn describe(&self, record_type: &str) -> SchemaResult<&RecordSchema> {
        self.schemas
            .get(record_type)
            .ok_or_else(|| SchemaError::unknown_record_type(record_type))
    }

    /// Checks whether a record type is registered.
    pub fn contains(&self, record_type: &str) -> bool {
        self.schemas.contains_key(record_type)
    }

    /// Returns all registered schemas (arbitrary order).
    pub fn all_schemas(&self) -> impl Iterator<Item = &RecordSchema> {
        self.schemas.values()
    }

    /// Returns the number of registered record types.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Loads every `.json` file from a directory as a schema definition.
    ///
    /// The directory is expected to contain nothing but schema files
    /// (`save_schema` names them `schema_<record_type>.json`, but any
    /// `.json` name is accepted). A missing directory is not an error
    /// (there is simply nothing to load); an unreadable or invalid file
    /// is fatal.
    pub fn load_dir(&mut self, dir: &Path) -> SchemaResult<()> {
        if !dir.exists() {
            return Ok(());
        }

        let entries = fs::read_dir(dir).map_err(|e| {
            SchemaError::malformed_schema(
                dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed_schema(
                    dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;
            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            paths.push(path);
        }

        // Deterministic load order regardless of directory iteration order
        paths.sort();

        for path in paths {
            self.load_schema_file(&path)?;
        }

        Ok(())
    }

    /// Loads a single schema file.
    fn load_schema_file(&mut self, path: &Path) -> SchemaResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;

        let schema: RecordSchema = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Invalid JSON: {}", e),
            )
        })?;

        let record_type = schema.record_type.clone();
        self.register(schema)?;

        let path_str = path.display().to_string();
        Logger::log(
            LogSeverity::Info,
            "schema_loaded",
            &[
                ("path", path_str.as_str()),
                ("record_type", record_type.as_str()),
            ],
        );

        Ok(())
    }

    /// Saves a schema to `<dir>/schema_<record_type>.json`.
    ///
    /// Refuses to overwrite an existing file (schemas are immutable).
    pub fn save_schema(&self, dir: &Path, record_type: &str) -> SchemaResult<PathBuf> {
        let schema = self.describe(record_type)?;

        let path = dir.join(format!("schema_{}.json", schema.record_type));
        if path.exists() {
            return Err(SchemaError::duplicate_record_type(&schema.record_type));
        }

        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| {
                SchemaError::malformed_schema(
                    dir.display().to_string(),
                    format!("Failed to create schema directory: {}", e),
                )
            })?;
        }

        let content = serde_json::to_string_pretty(schema).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to serialize schema: {}", e),
            )
        })?;

        fs::write(&path, content).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to write file: {}", e),
            )
        })?;

        Ok(path)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
