//! Structured Extraction Client: resume text in, raw JSON document out.
//!
//! One model round trip per upload, no caching, no retry. The pipeline talks
//! to the model through `StructuredExtractor` so the client is injected
//! rather than reached through a global; `AppState` carries an
//! `Arc<dyn StructuredExtractor>`.

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::ingest::error::IngestError;
use crate::ingest::prompts::{RESUME_PARSE_PROMPT, RESUME_PARSE_SYSTEM};
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, MISSING_FIELDS_INSTRUCTION};
use crate::llm_client::{CompletionOptions, LlmClient, LlmError};

/// Low temperature: extraction favours determinism over creativity.
const PARSE_TEMPERATURE: f32 = 0.1;

/// The model output before normalization. Always a JSON object.
pub type RawJsonDocument = serde_json::Map<String, Value>;

#[async_trait]
pub trait StructuredExtractor: Send + Sync {
    async fn parse(&self, text: &str, filename: &str) -> Result<RawJsonDocument, IngestError>;

    /// Identifier recorded as `raw_data.parsing_model`.
    fn model_name(&self) -> &str;
}

/// Production extractor backed by the hosted chat-completions model.
pub struct LlmStructuredExtractor {
    llm: LlmClient,
}

impl LlmStructuredExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl StructuredExtractor for LlmStructuredExtractor {
    async fn parse(&self, text: &str, filename: &str) -> Result<RawJsonDocument, IngestError> {
        let system = build_system_prompt();
        let prompt = RESUME_PARSE_PROMPT.replace("{resume_text}", text);

        info!(filename, model = self.llm.model(), "Requesting structured resume extraction");

        let value: Value = self
            .llm
            .call_json(&prompt, &system, CompletionOptions::json(PARSE_TEMPERATURE))
            .await
            .map_err(map_llm_error)?;

        into_document(value)
    }

    fn model_name(&self) -> &str {
        self.llm.model()
    }
}

fn build_system_prompt() -> String {
    format!("{RESUME_PARSE_SYSTEM}\n\n{MISSING_FIELDS_INSTRUCTION}\n{JSON_ONLY_SYSTEM}")
}

fn map_llm_error(err: LlmError) -> IngestError {
    match err {
        LlmError::Parse { source, raw } => IngestError::malformed(source, &raw),
        other => IngestError::ExtractionServiceUnavailable(other.to_string()),
    }
}

/// Accepts only a top-level JSON object; anything else violates the schema.
pub fn into_document(value: Value) -> Result<RawJsonDocument, IngestError> {
    match value {
        Value::Object(map) => Ok(map),
        other => {
            let raw = other.to_string();
            Err(IngestError::malformed(
                format!("expected a JSON object, got {}", json_kind(&other)),
                &raw,
            ))
        }
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
