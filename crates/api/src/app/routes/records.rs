//! CRUD handlers shared by every resource.
//!
//! Tours and users expose the same five operations; a [`ResourceContext`]
//! attached to each nested router tells the handlers which store to use and
//! how to name things in the response.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::info;

use natours_core::{Entity, Fields, IdCheck, RecordId};
use natours_infra::RecordStore;

use crate::app::{dto, errors};
use crate::context::RequestTime;

/// Naming of one resource in URLs, envelopes and log lines.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Resource {
    pub collection: &'static str,
    pub singular: &'static str,
    pub label: &'static str,
}

impl Resource {
    pub const TOURS: Resource = Resource {
        collection: "tours",
        singular: "tour",
        label: "Tour",
    };

    pub const USERS: Resource = Resource {
        collection: "users",
        singular: "user",
        label: "User",
    };
}

#[derive(Clone)]
pub struct ResourceContext {
    pub resource: Resource,
    pub store: Arc<dyn RecordStore>,
    pub id_check: IdCheck,
}

impl ResourceContext {
    pub fn new(resource: Resource, store: Arc<dyn RecordStore>, id_check: IdCheck) -> Self {
        Self {
            resource,
            store,
            id_check,
        }
    }

    /// Parse the path id and apply the configured validity check.
    fn checked_id(&self, raw: &str) -> Result<RecordId, axum::response::Response> {
        let id = errors::parse_record_id(raw)?;
        match self.store.is_invalid(id, self.id_check) {
            Ok(false) => Ok(id),
            Ok(true) => Err(errors::invalid_id()),
            Err(e) => Err(errors::store_error_to_response(e)),
        }
    }

    /// Response for an id that passed the check but has no record.
    ///
    /// The bounds check lets gap ids through; they answer `null` like the
    /// legacy API did. Under the membership check this only happens when a
    /// concurrent delete won the race, which is reported as an invalid id.
    fn missing_record(&self) -> axum::response::Response {
        match self.id_check {
            IdCheck::Bounds => (StatusCode::OK, Json(dto::record_body(self.resource, None))).into_response(),
            IdCheck::Membership => errors::invalid_id(),
        }
    }
}

pub fn router(ctx: ResourceContext) -> Router {
    Router::new()
        .route("/", get(list_records).post(create_record))
        .route("/:id", get(get_record).patch(update_record).delete(delete_record))
        .layer(Extension(ctx))
}

pub async fn list_records(
    Extension(ctx): Extension<ResourceContext>,
    Extension(requested_at): Extension<RequestTime>,
) -> axum::response::Response {
    info!(
        resource = ctx.resource.collection,
        requested_at = %requested_at.to_iso8601(),
        "listing records"
    );

    match ctx.store.list() {
        Ok(records) => (StatusCode::OK, Json(dto::list_body(ctx.resource, &records))).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_record(
    Extension(ctx): Extension<ResourceContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match ctx.checked_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };

    match ctx.store.get(id) {
        Ok(Some(record)) => (StatusCode::OK, Json(dto::record_body(ctx.resource, Some(&record)))).into_response(),
        Ok(None) => ctx.missing_record(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_record(
    Extension(ctx): Extension<ResourceContext>,
    Json(body): Json<Fields>,
) -> axum::response::Response {
    match ctx.store.create(body) {
        Ok(record) => {
            info!(resource = ctx.resource.collection, id = %record.id(), "created record");
            (StatusCode::CREATED, Json(dto::record_body(ctx.resource, Some(&record)))).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_record(
    Extension(ctx): Extension<ResourceContext>,
    Path(id): Path<String>,
    Json(body): Json<Fields>,
) -> axum::response::Response {
    let id = match ctx.checked_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };

    match ctx.store.update(id, body) {
        Ok(Some(record)) => {
            info!(resource = ctx.resource.collection, id = %id, "updated record");
            (StatusCode::OK, Json(dto::record_body(ctx.resource, Some(&record)))).into_response()
        }
        Ok(None) => ctx.missing_record(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn delete_record(
    Extension(ctx): Extension<ResourceContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match ctx.checked_id(&id) {
        Ok(id) => id,
        Err(res) => return res,
    };

    match ctx.store.delete(id) {
        Ok(Some(_)) => {
            info!(resource = ctx.resource.collection, id = %id, "{} deleted successfully", ctx.resource.label);
            StatusCode::NO_CONTENT.into_response()
        }
        // Gap ids under the bounds check: nothing to remove, same answer.
        Ok(None) if ctx.id_check == IdCheck::Bounds => StatusCode::NO_CONTENT.into_response(),
        Ok(None) => errors::invalid_id(),
        Err(e) => errors::store_error_to_response(e),
    }
}
