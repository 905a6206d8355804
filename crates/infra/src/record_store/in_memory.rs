use std::sync::RwLock;

use natours_core::{Fields, IdCheck, Record, RecordId, RecordTable};

use super::r#trait::{RecordStore, StoreError};

/// Process-lifetime record store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    table: RwLock<RecordTable>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: RecordTable) -> Self {
        Self {
            table: RwLock::new(table),
        }
    }
}

impl RecordStore for InMemoryRecordStore {
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
        table.append(fields).map_err(StoreError::from)
    }

    fn update(&self, id: RecordId, patch: Fields) -> Result<Option<Record>, StoreError> {
        let mut table = self.table.write().map_err(|_| StoreError::Poisoned)?;
        Ok(table.merge(id, patch).cloned())
    }

    fn delete(&self, id: RecordId) -> Result<Option<Record>, StoreError> {
        let mut table = self.table.write().map_err(|_| StoreError::Poisoned)?;
        Ok(table.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use natours_core::Entity;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("test fixture must be an object"),
        }
    }

    #[test]
    fn users_lifecycle_create_update_delete() {
        let store = InMemoryRecordStore::new();

        let ann = store.create(fields(json!({"name": "Ann", "role": "user"}))).unwrap();
        let bob = store.create(fields(json!({"name": "Bob"}))).unwrap();
        assert_eq!(ann.id(), RecordId::new(1));
        assert_eq!(bob.id(), RecordId::new(2));

        let updated = store
            .update(ann.id(), fields(json!({"role": "admin"})))
            .unwrap()
            .expect("ann exists");
        assert_eq!(updated.get("name"), Some(&json!("Ann")));
        assert_eq!(updated.get("role"), Some(&json!("admin")));
        assert_eq!(store.get(ann.id()).unwrap(), Some(updated));

        assert!(store.delete(ann.id()).unwrap().is_some());
        assert!(store.delete(ann.id()).unwrap().is_none());
        assert_eq!(store.list().unwrap(), vec![bob]);
    }

    #[test]
    fn create_reports_exhausted_ids_and_keeps_serving() {
        let table = RecordTable::from_records(vec![Record::new(RecordId::new(u64::MAX), Fields::new())]).unwrap();
        let store = InMemoryRecordStore::with_table(table);

        for _ in 0..2 {
            match store.create(Fields::new()) {
                Err(StoreError::Domain(natours_core::DomainError::IdsExhausted(max))) => assert_eq!(max, u64::MAX),
                other => panic!("expected IdsExhausted, got {other:?}"),
            }
        }
        assert_eq!(store.list().unwrap().len(), 1);
        assert!(store.get(RecordId::new(u64::MAX)).unwrap().is_some());
    }

    #[test]
    fn concurrent_creates_get_distinct_ids() {
        let store = std::sync::Arc::new(InMemoryRecordStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..25)
                        .map(|_| store.create(Fields::new()).unwrap().id())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .map(RecordId::get)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=200).collect::<Vec<_>>());
    }
}
