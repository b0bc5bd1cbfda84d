use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::config::ERROR_DETAIL_MAX_CHARS;
use crate::schema::FieldError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid audit submission: {}", format_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("document store error: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, format_field_errors(errors))
            }
            AppError::Store(error) => {
                tracing::error!("Store error: {:?}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    truncate_detail(&error.to_string(), ERROR_DETAIL_MAX_CHARS),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Join field errors into a single human-readable detail string.
fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| error.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Cap diagnostic text before it leaves the process, so internal error
/// messages are not forwarded to callers in full.
pub fn truncate_detail(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_detail_caps_long_text() {
        let long = "x".repeat(500);
        assert_eq!(truncate_detail(&long, 50).chars().count(), 50);
    }

    #[test]
    fn truncate_detail_keeps_short_text() {
        assert_eq!(truncate_detail("connection refused", 50), "connection refused");
    }
}
