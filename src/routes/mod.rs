//! HTTP route handlers for the marketing site API.
//!
//! The surface is intentionally small: two liveness endpoints, a store
//! diagnostics endpoint, and the audit submission endpoint. Every route
//! answers JSON; the frontend is served elsewhere, so the router carries a
//! permissive CORS layer for the browser.
//!
//! Request tracing is enabled via middleware that generates a unique request
//! ID for each incoming request, allowing correlation of all logs within a
//! request.

pub mod audit;
pub mod diagnostics;
pub mod health;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes, CORS, and request tracing.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health::index))
        .route("/api/hello", get(health::hello))
        .route("/test", get(diagnostics::report))
        .route("/api/audit", post(audit::submit))
        .with_state(state)
        .layer(cors)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
