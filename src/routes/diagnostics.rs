//! Document store diagnostics.
//!
//! Deploy-time debugging endpoint reporting whether the store backend is
//! configured and reachable. It never fails the request: every probe error
//! is folded into a descriptive status string instead of an HTTP error.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::instrument;

use crate::config::{DIAGNOSTIC_COLLECTION_LIMIT, DIAGNOSTIC_DETAIL_MAX_CHARS};
use crate::error::truncate_detail;
use crate::state::AppState;

/// Snapshot returned by GET /test.
#[derive(Debug, Serialize)]
pub struct DiagnosticsReport {
    pub backend: &'static str,
    pub database: String,
    pub database_url: &'static str,
    pub database_name: &'static str,
    pub connection_status: &'static str,
    pub collections: Vec<String>,
}

/// GET /test
#[instrument(name = "diagnostics", skip(state))]
pub async fn report(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    let status = state.probe.status().await;

    let database = if !status.available {
        "not configured".to_string()
    } else if !status.connected {
        match &status.detail {
            Some(detail) => format!(
                "error: {}",
                truncate_detail(detail, DIAGNOSTIC_DETAIL_MAX_CHARS)
            ),
            None => "not connected".to_string(),
        }
    } else if let Some(detail) = &status.detail {
        format!(
            "connected but degraded: {}",
            truncate_detail(detail, DIAGNOSTIC_DETAIL_MAX_CHARS)
        )
    } else {
        "connected".to_string()
    };

    let mut collections = status.collections;
    collections.truncate(DIAGNOSTIC_COLLECTION_LIMIT);

    Json(DiagnosticsReport {
        backend: "running",
        database,
        database_url: configured_marker(state.config.store.url.is_some()),
        database_name: configured_marker(state.config.store.database.is_some()),
        connection_status: if status.connected {
            "connected"
        } else {
            "not connected"
        },
        collections,
    })
}

fn configured_marker(set: bool) -> &'static str {
    if set {
        "configured"
    } else {
        "not set"
    }
}
