//! Resume enhancement: ATS insights, skill suggestions and description rewrites.
//! All LLM calls go through llm_client; nothing here talks HTTP directly.

pub mod handlers;
pub mod prompts;
pub mod service;
