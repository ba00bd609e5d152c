//! File-backed record storage.
//!
//! # Responsibility
//! - Persist ordered sequences of opaque records, one JSON file per entity
//!   kind.
//! - Recover locally from missing or corrupt files so callers keep operating
//!   on partial or empty data.
//!
//! # Invariants
//! - `read` never fails: corrupt content degrades to an empty sequence with
//!   a logged error.
//! - `write` replaces the whole file; there is no append path and no cache.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod json_store;

pub use json_store::JsonStore;

/// Opaque persisted record: an ordered mapping of field name to JSON value.
///
/// Semantics of the fields belong to the entity layer; the store only
/// guarantees shape.
pub type Record = serde_json::Map<String, serde_json::Value>;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer failure: the backing file is unwritable or records cannot
/// be encoded.
#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "storage I/O failure on `{}`: {source}", path.display())
            }
            Self::Serialize { path, source } => {
                write!(
                    f,
                    "failed to encode records for `{}`: {source}",
                    path.display()
                )
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize { source, .. } => Some(source),
        }
    }
}
