//! Axum route handlers for the Ingest API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::ingest::document::UploadedDocument;
use crate::ingest::pipeline::ingest_resume;
use crate::models::resume::FinalRecord;
use crate::state::AppState;

/// Multipart field that carries the resume.
const FILE_FIELD: &str = "file";

/// POST /api/v1/resumes/parse
///
/// Accepts one multipart file, runs extract → parse → normalize → assemble
/// and returns the final record. Nothing is persisted here.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<FinalRecord>, AppError> {
    let document = read_upload(&mut multipart).await?;
    let record = ingest_resume(document, state.extractor.as_ref(), state.pipeline_settings()).await?;
    Ok(Json(record))
}

async fn read_upload(multipart: &mut Multipart) -> Result<UploadedDocument, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| AppError::Validation("uploaded file must have a filename".to_string()))?;
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok(UploadedDocument::new(bytes, filename));
    }

    Err(AppError::Validation(format!(
        "multipart field '{FILE_FIELD}' is required"
    )))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("invalid multipart upload: {}", err.body_text()))
    }
}
