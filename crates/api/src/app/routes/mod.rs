use axum::Router;

use crate::app::services::AppServices;

pub mod records;
pub mod system;

/// Router for the versioned resource endpoints (nested under `/api/v1`).
pub fn router(services: &AppServices) -> Router {
    Router::new()
        .nest("/tours", records::router(services.tours_context()))
        .nest("/users", records::router(services.users_context()))
}
