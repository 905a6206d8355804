use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use natours_core::{DomainError, Fields, IdCheck, Record, RecordId};

/// Record store operation error.
///
/// These are **infrastructure errors** (disk, serialization, locking). An
/// unknown id is not an error: lookups return `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt record file {}: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("record store lock poisoned")]
    Poisoned,

    /// The table refused the mutation (e.g. no id left to assign).
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Ordered, id-assigning storage for one resource type.
///
/// Every mutation is atomic with respect to other calls on the same store:
/// id assignment and append happen under one exclusive lock.
pub trait RecordStore: Send + Sync {
    /// All records in insertion order.
    fn list(&self) -> Result<Vec<Record>, StoreError>;

    /// The record carrying `id`, if any.
    fn get(&self, id: RecordId) -> Result<Option<Record>, StoreError>;

    /// Whether `id` should be answered with "Invalid ID" under `check`.
    fn is_invalid(&self, id: RecordId, check: IdCheck) -> Result<bool, StoreError>;

    /// Append a record built from `fields` with the next sequential id.
    fn create(&self, fields: Fields) -> Result<Record, StoreError>;

    /// Shallow-merge `patch` into the record carrying `id`.
    ///
    /// Returns the merged record, or `None` if no record has `id`.
    fn update(&self, id: RecordId, patch: Fields) -> Result<Option<Record>, StoreError>;

    /// Remove the record carrying `id`, returning it.
    fn delete(&self, id: RecordId) -> Result<Option<Record>, StoreError>;
}

impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    fn list(&self) -> Result<Vec<Record>, StoreError> {
        (**self).list()
    }

    fn get(&self, id: RecordId) -> Result<Option<Record>, StoreError> {
        (**self).get(id)
    }

    fn is_invalid(&self, id: RecordId, check: IdCheck) -> Result<bool, StoreError> {
        (**self).is_invalid(id, check)
    }

    fn create(&self, fields: Fields) -> Result<Record, StoreError> {
        (**self).create(fields)
    }

    fn update(&self, id: RecordId, patch: Fields) -> Result<Option<Record>, StoreError> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: RecordId) -> Result<Option<Record>, StoreError> {
        (**self).delete(id)
    }
}
