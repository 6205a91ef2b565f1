//! Resume ingestion pipeline.
//! Received → TextExtracted → ModelQueried → Normalized → Assembled.
//! Every model call goes through llm_client via the StructuredExtractor seam.

pub mod assemble;
pub mod document;
pub mod error;
pub mod extractor;
pub mod handlers;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod prompts;

pub use error::IngestError;
pub use parser::{LlmStructuredExtractor, StructuredExtractor};
