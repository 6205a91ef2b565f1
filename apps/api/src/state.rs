use std::sync::Arc;

use crate::config::Config;
use crate::ingest::pipeline::PipelineSettings;
use crate::ingest::StructuredExtractor;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; holds no per-request mutable state.
#[derive(Clone)]
pub struct AppState {
    /// Resume field extractor. Default: `LlmStructuredExtractor` over `llm`.
    pub extractor: Arc<dyn StructuredExtractor>,
    /// Used directly by the enhancement endpoints.
    pub llm: LlmClient,
    pub config: Config,
}

impl AppState {
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            retention_chars: self.config.raw_text_retention_chars,
        }
    }
}
