//! Resume ingestion. Drives one upload through every stage.
//!
//! Flow: extract → parse (model call) → normalize → assemble.
//!
//! Strictly linear and single-shot: the first fatal error ends the run and
//! nothing partial is returned. Runs share no state; the injected extractor
//! is the only collaborator. The model call is the only await point that
//! waits on the network, extraction is moved onto a blocking thread.

use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::ingest::assemble::assemble;
use crate::ingest::document::UploadedDocument;
use crate::ingest::error::{IngestError, PipelineStage};
use crate::ingest::extractor::extract;
use crate::ingest::normalize::{normalize, NormalizeContext};
use crate::ingest::parser::StructuredExtractor;
use crate::models::resume::{FinalRecord, QualityWarning};

#[derive(Debug, Clone, Copy)]
pub struct PipelineSettings {
    /// Characters of extracted text echoed into `raw_data.original_text`.
    pub retention_chars: usize,
}

/// Runs the full ingestion pipeline for one upload.
pub async fn ingest_resume(
    document: UploadedDocument,
    extractor: &dyn StructuredExtractor,
    settings: PipelineSettings,
) -> Result<FinalRecord, IngestError> {
    let upload_id = Uuid::new_v4();
    let span = info_span!("resume_ingest", %upload_id, filename = %document.filename);

    async move {
        let result = run_stages(document, extractor, settings).await;
        if let Err(e) = &result {
            warn!(stage = %e.stage(), "Resume ingestion aborted: {e}");
        }
        result
    }
    .instrument(span)
    .await
}

async fn run_stages(
    document: UploadedDocument,
    extractor: &dyn StructuredExtractor,
    settings: PipelineSettings,
) -> Result<FinalRecord, IngestError> {
    debug!(stage = %PipelineStage::Received, bytes = document.size(), "Upload received");

    // Step 1: Extract text off the async executor
    let format = document.kind.as_str().to_string();
    let (document, extracted) = tokio::task::spawn_blocking(move || {
        let extracted = extract(&document);
        (document, extracted)
    })
    .await
    .map_err(|e| IngestError::extraction_failed(format, e))?;
    let extracted = extracted?;

    let mut warnings = Vec::new();
    if extracted.is_blank() {
        warnings.push(QualityWarning::EmptyText);
    }
    debug!(
        stage = %PipelineStage::TextExtracted,
        chars = extracted.char_count(),
        method = ?extracted.method,
        "Text extracted"
    );

    // Step 2: Query the model
    let raw = extractor.parse(&extracted.text, &document.filename).await?;
    debug!(stage = %PipelineStage::ModelQueried, keys = raw.len(), "Model responded");

    // Step 3: Normalize
    let normalized = normalize(
        &raw,
        NormalizeContext {
            original_text: &extracted.text,
            filename: &document.filename,
            parsing_model: extractor.model_name(),
            retention_chars: settings.retention_chars,
        },
    )?;
    warnings.extend(normalized.warnings);
    debug!(
        stage = %PipelineStage::Normalized,
        experience = normalized.record.experience.len(),
        "Record normalized"
    );

    // Step 4: Assemble
    let record = assemble(normalized.record, &document, warnings);
    info!(
        stage = %PipelineStage::Assembled,
        experience = record.record.experience.len(),
        current_roles = record.record.experience.iter().filter(|e| e.is_ongoing()).count(),
        needs_review = record.needs_review,
        "Resume ingestion complete"
    );

    Ok(record)
}
