//! Mini audit submission endpoint.
//!
//! The submission path is validate → persist → respond. Nothing is written
//! unless the whole payload validates, and a store failure after validation
//! surfaces as a server error without a retry.

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::config::{AUDIT_COLLECTION, AUDIT_CONFIRMATION_MESSAGE};
use crate::error::AppError;
use crate::schema;
use crate::state::AppState;

/// Success envelope for an accepted submission.
#[derive(Debug, Serialize)]
pub struct SubmissionReceipt {
    pub status: &'static str,
    pub id: String,
    pub message: &'static str,
}

/// POST /api/audit
#[instrument(name = "audit::submit", skip(state, payload))]
pub async fn submit(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<SubmissionReceipt>, AppError> {
    let record = schema::validate(&payload).map_err(AppError::Validation)?;

    // A derived struct of strings and vecs always serializes.
    let document = serde_json::to_value(&record).expect("audit record serializes");

    let id = state.store.create_document(AUDIT_COLLECTION, document).await?;

    tracing::info!(id = %id, company = %record.company_name, "Audit submission stored");

    Ok(Json(SubmissionReceipt {
        status: "success",
        id,
        message: AUDIT_CONFIRMATION_MESSAGE,
    }))
}
