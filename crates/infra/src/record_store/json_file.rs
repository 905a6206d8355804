//! Record store persisted as one JSON array file.
//!
//! The file is read once at open. Each mutation rewrites the whole array via
//! `<file>.tmp` + rename, then commits the new table in memory. A failed write
//! leaves both the file and the in-memory table as they were.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde_json::Value as JsonValue;
use tracing::{debug, info};

use natours_core::{Fields, IdCheck, Record, RecordId, RecordTable};

use super::r#trait::{RecordStore, StoreError};

#[derive(Debug)]
pub struct JsonFileRecordStore {
    path: PathBuf,
    table: RwLock<RecordTable>,
}

impl JsonFileRecordStore {
    /// Load the records stored at `path`. The file must exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let bytes = fs::read(&path).map_err(|e| StoreError::io(&path, e))?;
        let table = parse_table(&path, &bytes)?;
        info!(path = %path.display(), records = table.len(), "loaded record file");
        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    /// Start a new file at `path` holding `table`, replacing whatever is there.
    pub fn init(path: impl Into<PathBuf>, table: RecordTable) -> Result<Self, StoreError> {
        let path = path.into();
        write_atomically(&path, &table)?;
        Ok(Self {
            path,
            table: RwLock::new(table),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `op` to a copy of the table; persist and commit only if it
    /// changed something (`Some`).
    fn mutate<T>(&self, op: impl FnOnce(&mut RecordTable) -> Option<T>) -> Result<Option<T>, StoreError> {
        let mut table = self.table.write().map_err(|_| StoreError::Poisoned)?;
        let mut next = table.clone();
        let Some(out) = op(&mut next) else {
            return Ok(None);
        };
        self.commit(&mut table, next)?;
        Ok(Some(out))
    }

    fn commit(&self, current: &mut RecordTable, next: RecordTable) -> Result<(), StoreError> {
        write_atomically(&self.path, &next)?;
        debug!(path = %self.path.display(), records = next.len(), "rewrote record file");
        *current = next;
        Ok(())
    }
}

fn parse_table(path: &Path, bytes: &[u8]) -> Result<RecordTable, StoreError> {
    let values: Vec<JsonValue> = serde_json::from_slice(bytes)
        .map_err(|e| StoreError::corrupt(path, format!("expected a JSON array of objects: {e}")))?;

    let records = values
        .into_iter()
        .enumerate()
        .map(|(idx, value)| {
            Record::from_json(value).map_err(|e| StoreError::corrupt(path, format!("record {idx}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    RecordTable::from_records(records).map_err(|e| StoreError::corrupt(path, e.to_string()))
}

fn write_atomically(path: &Path, table: &RecordTable) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec(table.list())?;
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, bytes).map_err(|e| StoreError::io(&temp_path, e))?;
    fs::rename(&temp_path, path).map_err(|e| StoreError::io(path, e))?;
    Ok(())
}

impl RecordStore for JsonFileRecordStore {
    fn list(&self) -> Result<Vec<Record>, StoreError> {
        let table = self.table.read().map_err(|_| StoreError::Poisoned)?;
        Ok(table.list().to_vec())
    }

    fn get(&self, id: RecordId) -> Result<Option<Record>, StoreError> {
        let table = self.table.read().map_err(|_| StoreError::Poisoned)?;
        Ok(table.find_by_id(id).cloned())
    }

    fn is_invalid(&self, id: RecordId, check: IdCheck) -> Result<bool, StoreError> {
        let table = self.table.read().map_err(|_| StoreError::Poisoned)?;
        Ok(table.is_invalid(id, check))
    }

    fn create(&self, fields: Fields) -> Result<Record, StoreError> {
        let mut table = self.table.write().map_err(|_| StoreError::Poisoned)?;
        let mut next = table.clone();
        let created = next.append(fields)?;
        self.commit(&mut table, next)?;
        Ok(created)
    }

    fn update(&self, id: RecordId, patch: Fields) -> Result<Option<Record>, StoreError> {
        self.mutate(|table| table.merge(id, patch).cloned())
    }

    fn delete(&self, id: RecordId) -> Result<Option<Record>, StoreError> {
        self.mutate(|table| table.remove(id))
    }
}
