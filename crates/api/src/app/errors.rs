use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use natours_core::RecordId;
use natours_infra::StoreError;

use crate::app::dto::{STATUS_ERROR, STATUS_FAIL};

pub const INVALID_ID_MESSAGE: &str = "Invalid ID";

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    tracing::error!(error = %err, "record store failure");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, STATUS_ERROR, err.to_string())
}

/// 404 "Invalid ID", the answer for unparseable, out-of-range and unknown ids alike.
pub fn invalid_id() -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, STATUS_FAIL, INVALID_ID_MESSAGE)
}

pub fn json_error(
    status: StatusCode,
    envelope_status: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "status": envelope_status,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_record_id(raw: &str) -> Result<RecordId, axum::response::Response> {
    raw.parse::<RecordId>().map_err(|e| {
        tracing::debug!(raw, error = %e, "rejecting path id");
        invalid_id()
    })
}
