//! Repository layer: typed CRUD over one entity kind's storage file.
//!
//! # Responsibility
//! - Enforce identifier uniqueness and entity validation on every write.
//! - Keep file-format details inside the store; keep entity semantics here.
//!
//! # Invariants
//! - Write paths call `Entity::validate()` before persisting.
//! - Each repository exclusively owns its backing file; every operation is
//!   a full read-modify-write of that file.

use crate::model::ValidationError;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod entity_repo;

pub use entity_repo::Repository;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entity persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Store(StoreError),
    /// Caller passed a blank identifier.
    InvalidId,
    AlreadyExists {
        kind: &'static str,
        id: String,
    },
    NotFound {
        kind: &'static str,
        id: String,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::InvalidId => write!(f, "entity id must be a non-empty string"),
            Self::AlreadyExists { kind, id } => {
                write!(f, "{kind} with id `{id}` already exists")
            }
            Self::NotFound { kind, id } => write!(f, "{kind} with id `{id}` does not exist"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::InvalidId | Self::AlreadyExists { .. } | Self::NotFound { .. } => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}
