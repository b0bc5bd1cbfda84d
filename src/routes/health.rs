//! Liveness endpoints.
//!
//! Two trivial probes: the root path, hit by uptime monitors, and the
//! `/api/hello` path the frontend pings during development.

use axum::Json;
use serde::Serialize;

/// Body of the liveness endpoints.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

/// GET /
pub async fn index() -> Json<Message> {
    Json(Message {
        message: "AI Agency API running",
    })
}

/// GET /api/hello
pub async fn hello() -> Json<Message> {
    Json(Message {
        message: "Hello from the backend API!",
    })
}
