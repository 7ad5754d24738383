//! HTTP routing configuration
//!
//! - POST /webhook - GitHub webhook deliveries
//! - GET  /health  - Health check

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::{handlers, middleware as api_middleware, AppState};

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;

/// Create the router with all routes and middleware configured.
pub fn create_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new())
        .on_response(DefaultOnResponse::new());

    // Deliveries are acknowledged before dispatch, so this only bounds
    // signature checks and payload parsing.
    let timeout_layer = TimeoutLayer::new(Duration::from_secs(10));

    Router::new()
        .route("/webhook", post(handlers::receive_webhook))
        .route("/health", get(handlers::health_check))
        .layer(middleware::from_fn(api_middleware::request_id_middleware))
        .layer(timeout_layer)
        .layer(trace_layer)
        .with_state(state)
}
