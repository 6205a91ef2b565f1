use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Longest model-output excerpt kept on an `ExtractionMalformed` error.
pub const MALFORMED_EXCERPT_CHARS: usize = 500;

/// Where a pipeline run currently is. A run only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Received,
    TextExtracted,
    ModelQueried,
    Normalized,
    Assembled,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Received => "received",
            PipelineStage::TextExtracted => "text_extracted",
            PipelineStage::ModelQueried => "model_queried",
            PipelineStage::Normalized => "normalized",
            PipelineStage::Assembled => "assembled",
        };
        f.write_str(name)
    }
}

/// Fatal outcomes of a pipeline run. Callers must handle each kind.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Text could not be pulled out of a recognized binary format.
    #[error("could not extract text from {format} file: {reason}")]
    ExtractionFailed { format: String, reason: String },

    /// The model answered, but not with a usable JSON object.
    /// `excerpt` is for operators only and must never reach the end user.
    #[error("model response could not be parsed: {reason}")]
    ExtractionMalformed { reason: String, excerpt: String },

    /// Network, auth, rate-limit or server failure talking to the model.
    #[error("extraction service unavailable: {0}")]
    ExtractionServiceUnavailable(String),
}

impl IngestError {
    pub fn extraction_failed(format: impl Into<String>, reason: impl fmt::Display) -> Self {
        IngestError::ExtractionFailed {
            format: format.into(),
            reason: reason.to_string(),
        }
    }

    pub fn malformed(reason: impl fmt::Display, raw: &str) -> Self {
        IngestError::ExtractionMalformed {
            reason: reason.to_string(),
            excerpt: truncate_chars(raw, MALFORMED_EXCERPT_CHARS),
        }
    }

    /// The last stage the run reached before failing.
    pub fn stage(&self) -> PipelineStage {
        match self {
            IngestError::ExtractionFailed { .. } => PipelineStage::Received,
            IngestError::ExtractionMalformed { .. } => PipelineStage::ModelQueried,
            IngestError::ExtractionServiceUnavailable(_) => PipelineStage::TextExtracted,
        }
    }
}

/// Keeps the first `max_chars` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_respects_multibyte() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn test_malformed_excerpt_is_bounded() {
        let raw = "x".repeat(MALFORMED_EXCERPT_CHARS * 3);
        match IngestError::malformed("bad", &raw) {
            IngestError::ExtractionMalformed { excerpt, .. } => {
                assert_eq!(excerpt.len(), MALFORMED_EXCERPT_CHARS)
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_stage_for_each_kind() {
        assert_eq!(
            IngestError::extraction_failed("pdf", "broken").stage(),
            PipelineStage::Received
        );
        assert_eq!(
            IngestError::malformed("bad", "not json").stage(),
            PipelineStage::ModelQueried
        );
        assert_eq!(
            IngestError::ExtractionServiceUnavailable("timeout".into()).stage(),
            PipelineStage::TextExtracted
        );
    }

    #[test]
    fn test_display_names_format() {
        let err = IngestError::extraction_failed("docx", "zip header missing");
        assert_eq!(
            err.to_string(),
            "could not extract text from docx file: zip header missing"
        );
    }
}
