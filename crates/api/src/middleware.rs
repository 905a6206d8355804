//! Middleware chain applied to every request.
//!
//! Order, outermost first: [`log_requests`], [`greet`], [`stamp_request_time`].
//! None of them rejects a request.

use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::info;

use crate::context::RequestTime;

/// Access log line per request: method, path, status and latency.
pub async fn log_requests(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let res = next.run(req).await;

    info!(
        method = %method,
        path = %path,
        status = res.status().as_u16(),
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "request completed"
    );
    res
}

/// Fixed diagnostic line, emitted for every request at the default filter.
pub async fn greet(req: Request<Body>, next: Next) -> Response {
    info!("Hello from the middleware 👋");
    next.run(req).await
}

pub async fn stamp_request_time(mut req: Request<Body>, next: Next) -> Response {
    req.extensions_mut().insert(RequestTime::now());
    next.run(req).await
}
