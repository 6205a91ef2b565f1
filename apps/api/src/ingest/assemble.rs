use crate::ingest::document::UploadedDocument;
use crate::models::resume::{FinalRecord, ParsedResumeRecord, QualityWarning};

/// Merges the normalized record with upload metadata. Pure; cannot fail.
pub fn assemble(
    record: ParsedResumeRecord,
    document: &UploadedDocument,
    quality_warnings: Vec<QualityWarning>,
) -> FinalRecord {
    FinalRecord {
        record,
        original_filename: document.filename.clone(),
        file_type: document.kind.as_str().to_string(),
        file_size: document.size(),
        needs_review: !quality_warnings.is_empty(),
        quality_warnings,
    }
}
