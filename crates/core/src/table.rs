//! Ordered record sequence with sequential id assignment.

use std::collections::HashSet;

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::id::RecordId;
use crate::record::{Fields, Record};

/// How a requested id is judged before a handler acts on it.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum IdCheck {
    /// Valid iff a record with that id exists.
    #[default]
    Membership,
    /// Legacy length-based bound: valid iff `1 <= id <= len`.
    ///
    /// Accepts ids that fall into gaps left by deletions and rejects ids
    /// beyond the current length even when such a record exists.
    Bounds,
}

impl core::str::FromStr for IdCheck {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "membership" => Ok(IdCheck::Membership),
            "bounds" => Ok(IdCheck::Bounds),
            other => Err(DomainError::validation(format!(
                "id check must be 'membership' or 'bounds', got '{other}'"
            ))),
        }
    }
}

/// Records of one resource type in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    records: Vec<Record>,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from already-identified records (e.g. loaded from disk).
    ///
    /// Rejects duplicate ids.
    pub fn from_records(records: Vec<Record>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(DomainError::validation(format!("duplicate id {}", record.id())));
            }
        }
        Ok(Self { records })
    }

    pub fn list(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find_by_id(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    fn position(&self, id: RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    /// `max(id) + 1`, or [`RecordId::FIRST`] when empty.
    ///
    /// Fails once the largest id is `u64::MAX`; ids are never reused.
    pub fn next_id(&self) -> DomainResult<RecordId> {
        match self.records.iter().map(Entity::id).max() {
            Some(max) => max.next().ok_or(DomainError::IdsExhausted(max.get())),
            None => Ok(RecordId::FIRST),
        }
    }

    /// Append a new record built from `fields` under a freshly assigned id.
    ///
    /// The table is left untouched when no id is available.
    pub fn append(&mut self, fields: Fields) -> DomainResult<Record> {
        let record = Record::new(self.next_id()?, fields);
        self.records.push(record.clone());
        Ok(record)
    }

    /// Swap the record carrying `id` for `replacement` (which keeps `id`).
    ///
    /// Returns the previous record, or `None` if no record has `id`.
    pub fn replace(&mut self, id: RecordId, replacement: Fields) -> Option<Record> {
        let idx = self.position(id)?;
        let previous = std::mem::replace(&mut self.records[idx], Record::new(id, replacement));
        Some(previous)
    }

    /// Shallow-merge `patch` into the record carrying `id`.
    pub fn merge(&mut self, id: RecordId, patch: Fields) -> Option<&Record> {
        let idx = self.position(id)?;
        let record = &mut self.records[idx];
        record.merge(patch);
        Some(record)
    }

    /// Remove the record carrying `id`, keeping the order of the others.
    pub fn remove(&mut self, id: RecordId) -> Option<Record> {
        let idx = self.position(id)?;
        Some(self.records.remove(idx))
    }

    /// Whether handlers should answer "Invalid ID" for `id`.
    pub fn is_invalid(&self, id: RecordId, check: IdCheck) -> bool {
        match check {
            IdCheck::Membership => self.find_by_id(id).is_none(),
            IdCheck::Bounds => id.get() < 1 || id.get() > self.records.len() as u64,
        }
    }
}
