//! Schemaless records: an integer id plus arbitrary JSON fields.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::id::RecordId;

/// The user-supplied part of a record (everything except `id`).
pub type Fields = Map<String, JsonValue>;

/// Name of the identifier key in the JSON representation.
pub const ID_KEY: &str = "id";

/// A stored record.
///
/// Serializes as one flat JSON object with `id` first, followed by the fields
/// in insertion order. `fields` never contains an `id` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: RecordId,
    #[serde(flatten)]
    fields: Fields,
}

impl Record {
    /// Build a record, discarding any `id` key the caller put in `fields`.
    pub fn new(id: RecordId, mut fields: Fields) -> Self {
        fields.remove(ID_KEY);
        Self { id, fields }
    }

    /// Parse a record out of an arbitrary JSON value (used when loading files).
    pub fn from_json(value: JsonValue) -> DomainResult<Self> {
        let JsonValue::Object(mut fields) = value else {
            return Err(DomainError::validation("record must be a JSON object"));
        };
        let id = match fields.remove(ID_KEY) {
            Some(JsonValue::Number(n)) => n
                .as_u64()
                .map(RecordId::new)
                .ok_or_else(|| DomainError::invalid_id(format!("id must be a non-negative integer, got {n}")))?,
            Some(other) => {
                return Err(DomainError::invalid_id(format!("id must be a number, got {other}")));
            }
            None => return Err(DomainError::validation("record has no id")),
        };
        Ok(Self { id, fields })
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.fields.get(key)
    }

    /// Shallow-merge `patch` into this record. The id is left untouched.
    pub fn merge(&mut self, patch: Fields) {
        shallow_merge(&mut self.fields, patch);
    }
}

impl Entity for Record {
    type Id = RecordId;

    fn id(&self) -> RecordId {
        self.id
    }
}

/// Overwrite `target` with each top-level entry of `source`.
///
/// Keys absent from `source` are preserved; nested objects are replaced
/// wholesale, never merged. An `id` key in `source` is ignored.
pub fn shallow_merge(target: &mut Fields, source: Fields) {
    for (key, value) in source {
        if key == ID_KEY {
            continue;
        }
        target.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: JsonValue) -> Fields {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("test fixture must be an object"),
        }
    }

    #[test]
    fn serializes_flat_with_id_first() {
        let record = Record::new(RecordId::new(3), fields(json!({"name": "The Forest Hiker", "price": 397})));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":3,"name":"The Forest Hiker","price":397}"#);
    }

    #[test]
    fn new_drops_caller_supplied_id() {
        let record = Record::new(RecordId::new(5), fields(json!({"id": 99, "name": "x"})));
        assert_eq!(record.id(), RecordId::new(5));
        assert!(record.get("id").is_none());
    }

    #[test]
    fn from_json_requires_object_with_integer_id() {
        assert!(Record::from_json(json!([1, 2])).is_err());
        assert!(Record::from_json(json!({"name": "no id"})).is_err());
        assert!(Record::from_json(json!({"id": "1"})).is_err());
        assert!(Record::from_json(json!({"id": -1})).is_err());

        let record = Record::from_json(json!({"id": 2, "name": "ok"})).unwrap();
        assert_eq!(record.id(), RecordId::new(2));
        assert_eq!(record.get("name"), Some(&json!("ok")));
    }

    #[test]
    fn deserializes_back_into_the_same_record() {
        let original = Record::new(RecordId::new(1), fields(json!({"difficulty": "easy"})));
        let text = serde_json::to_string(&original).unwrap();
        let parsed: Record = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn merge_overwrites_present_keys_and_keeps_the_rest() {
        let mut record = Record::new(
            RecordId::new(1),
            fields(json!({"name": "Ann", "role": "user", "meta": {"a": 1, "b": 2}})),
        );
        record.merge(fields(json!({"role": "admin", "meta": {"a": 9}, "id": 77})));

        assert_eq!(record.id(), RecordId::new(1));
        assert_eq!(record.get("name"), Some(&json!("Ann")));
        assert_eq!(record.get("role"), Some(&json!("admin")));
        // Nested objects are replaced, not merged.
        assert_eq!(record.get("meta"), Some(&json!({"a": 9})));
    }
}
