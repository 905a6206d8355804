//! HTTP API application wiring (Axum router + store wiring).
//!
//! - `services.rs`: the record stores handlers operate on
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: response envelopes
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Router, routing::get};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Versioned prefix of every resource route.
pub const API_PREFIX: &str = "/api/v1";

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .nest(API_PREFIX, routes::router(&services))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::log_requests))
                .layer(axum::middleware::from_fn(middleware::greet))
                .layer(axum::middleware::from_fn(middleware::stamp_request_time)),
        )
}
