//! Generic file-backed repository.
//!
//! # Responsibility
//! - Provide `all`/`get`/`create`/`update`/`delete` for one entity kind.
//! - Skip (and log) records that fail conversion instead of aborting scans.
//!
//! # Invariants
//! - `create` rejects an id that is already present in the file.
//! - `update` replaces the first matching record in place, preserving its
//!   position in file order.
//! - When the file carries duplicate ids, the last occurrence wins during
//!   indexing.

use super::{RepoError, RepoResult};
use crate::model::Entity;
use crate::store::{JsonStore, Record};
use log::{error, warn};
use serde_json::Value;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Typed CRUD view over one entity kind's storage file.
pub struct Repository<E: Entity> {
    store: JsonStore,
    _entity: PhantomData<E>,
}

impl<E: Entity> Repository<E> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonStore::new(path),
            _entity: PhantomData,
        }
    }

    /// Backing file path exclusively owned by this repository.
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Loads every record, skipping (with a logged error) any that fails
    /// entity conversion.
    pub fn all(&self) -> Vec<E> {
        let mut items = Vec::new();
        for record in self.store.read() {
            match E::from_record(&record) {
                Ok(entity) => items.push(entity),
                Err(err) => {
                    error!(
                        "event=repo_all module=repo status=skip kind={} error={err}",
                        E::KIND
                    );
                }
            }
        }
        items
    }

    /// Returns the first entity whose record id matches, or `None` when the
    /// id is absent or the matching record fails conversion.
    pub fn get(&self, id: &str) -> RepoResult<Option<E>> {
        require_id(id)?;

        for record in self.store.read() {
            if record_id(&record) == Some(id) {
                return match E::from_record(&record) {
                    Ok(entity) => Ok(Some(entity)),
                    Err(err) => {
                        error!(
                            "event=repo_get module=repo status=error kind={} id={id} error={err}",
                            E::KIND
                        );
                        Ok(None)
                    }
                };
            }
        }
        Ok(None)
    }

    /// Validates and appends a new entity; fails when its id already exists.
    pub fn create(&self, entity: &E) -> RepoResult<()> {
        entity.validate()?;

        let mut records = self.store.read();
        let index = self.index_by_id(&records);

        if index.contains_key(entity.id()) {
            return Err(RepoError::AlreadyExists {
                kind: E::KIND,
                id: entity.id().to_string(),
            });
        }

        records.push(entity.to_record());
        self.store.write(&records)?;
        Ok(())
    }

    /// Validates and replaces the stored record with the same id; fails when
    /// no such record exists.
    pub fn update(&self, entity: &E) -> RepoResult<()> {
        entity.validate()?;

        let mut records = self.store.read();
        let position = records
            .iter()
            .position(|record| record_id(record) == Some(entity.id()));

        match position {
            Some(position) => {
                records[position] = entity.to_record();
                self.store.write(&records)?;
                Ok(())
            }
            None => Err(RepoError::NotFound {
                kind: E::KIND,
                id: entity.id().to_string(),
            }),
        }
    }

    /// Removes all records with the given id. Deleting an id that is not
    /// present is not an error.
    pub fn delete(&self, id: &str) -> RepoResult<()> {
        require_id(id)?;

        let mut records = self.store.read();
        records.retain(|record| record_id(record) != Some(id));
        self.store.write(&records)?;
        Ok(())
    }

    /// Maps id to file position. Last occurrence wins when the file carries
    /// duplicate ids; records without a usable id are skipped with a warning.
    fn index_by_id(&self, records: &[Record]) -> BTreeMap<String, usize> {
        let mut index = BTreeMap::new();
        for (position, record) in records.iter().enumerate() {
            match record_id(record) {
                Some(id) if !id.trim().is_empty() => {
                    index.insert(id.to_string(), position);
                }
                _ => {
                    warn!(
                        "event=repo_index module=repo status=skip kind={} position={position} reason=missing_or_blank_id",
                        E::KIND
                    );
                }
            }
        }
        index
    }
}

fn record_id(record: &Record) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

fn require_id(id: &str) -> RepoResult<()> {
    if id.trim().is_empty() {
        return Err(RepoError::InvalidId);
    }
    Ok(())
}
