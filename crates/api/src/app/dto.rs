//! Response envelopes.
//!
//! Every body is `{"status": ..., ...}`; success payloads sit under `data`
//! keyed by the resource name (`tours`/`tour`, `users`/`user`).

use serde_json::{Map, Value as JsonValue, json};

use natours_core::Record;

use crate::app::routes::records::Resource;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_FAIL: &str = "fail";
pub const STATUS_ERROR: &str = "error";

/// `{status, results, data: {<collection>: [...]}}`
pub fn list_body(resource: Resource, records: &[Record]) -> JsonValue {
    let mut data = Map::new();
    data.insert(resource.collection.to_string(), json!(records));
    json!({
        "status": STATUS_SUCCESS,
        "results": records.len(),
        "data": data,
    })
}

/// `{status, data: {<singular>: record}}`; `None` renders as `null`.
pub fn record_body(resource: Resource, record: Option<&Record>) -> JsonValue {
    let mut data = Map::new();
    data.insert(resource.singular.to_string(), json!(record));
    json!({
        "status": STATUS_SUCCESS,
        "data": data,
    })
}
