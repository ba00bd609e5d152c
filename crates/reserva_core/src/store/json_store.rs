//! JSON file store.
//!
//! # Responsibility
//! - Map one file path to an ordered sequence of JSON object records.
//! - Keep well-formed records and drop malformed elements on read.
//!
//! # Invariants
//! - Every call re-reads or rewrites the file from disk; nothing is cached.
//! - A missing backing file reads as an empty sequence, not an error.
//! - Writes are full-file rewrites with pretty-printed JSON.

use super::{Record, StoreError, StoreResult};
use log::error;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File store holding one entity kind's records as a JSON array of objects.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path owned by this store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all well-formed records in file order.
    ///
    /// Degrades to an empty sequence when the file is missing, unreadable,
    /// not valid JSON, or not a top-level array. Elements that are not JSON
    /// objects are skipped with a logged error; the rest are kept.
    pub fn read(&self) -> Vec<Record> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                error!(
                    "event=store_read module=store status=error path={} error_code=unreadable error={err}",
                    self.path.display()
                );
                return Vec::new();
            }
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                error!(
                    "event=store_read module=store status=error path={} error_code=invalid_json error={err}",
                    self.path.display()
                );
                return Vec::new();
            }
        };

        let items = match value {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => {
                error!(
                    "event=store_read module=store status=error path={} error_code=not_a_list got={}",
                    self.path.display(),
                    json_type_name(&other)
                );
                return Vec::new();
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match item {
                Value::Object(record) => records.push(record),
                other => {
                    error!(
                        "event=store_read module=store status=skip path={} error_code=not_an_object index={index} got={}",
                        self.path.display(),
                        json_type_name(&other)
                    );
                }
            }
        }
        records
    }

    /// Rewrites the whole backing file from `records`.
    ///
    /// Creates parent directories as needed. The record element type already
    /// guarantees every element is a well-formed mapping.
    pub fn write(&self, records: &[Record]) -> StoreResult<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        let body = serde_json::to_string_pretty(records).map_err(|source| {
            StoreError::Serialize {
                path: self.path.clone(),
                source,
            }
        })?;

        fs::write(&self.path, body).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
