use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ingest::IngestError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::Ingest(IngestError::ExtractionFailed { format, reason }) => {
                tracing::warn!("Extraction failed for {format} upload: {reason}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_FAILED",
                    format!("Could not read the uploaded {format} file"),
                )
            }
            AppError::Ingest(IngestError::ExtractionMalformed { reason, excerpt }) => {
                // The excerpt is for operators; it never goes into the response.
                tracing::error!("Malformed model response: {reason}; excerpt: {excerpt}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EXTRACTION_MALFORMED",
                    "The resume could not be parsed".to_string(),
                )
            }
            AppError::Ingest(IngestError::ExtractionServiceUnavailable(msg)) => {
                tracing::error!("Extraction service unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "EXTRACTION_SERVICE_UNAVAILABLE",
                    "The resume parsing service is unavailable, try again later".to_string(),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
