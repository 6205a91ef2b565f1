//! LLM Client: the single point of entry for all hosted-model calls.
//!
//! ARCHITECTURAL RULE: No other module may call the completion API directly.
//! All model interactions MUST go through this module.
//!
//! Speaks the OpenAI chat-completions wire format. The base URL is
//! configurable so any compatible endpoint (or a local mock) can be used.
//! Calls are made exactly once: there is no retry or backoff here, callers
//! that need resilience wrap the client themselves.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
        /// The model output that failed to parse.
        raw: String,
    },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Per-call sampling settings.
#[derive(Debug, Clone, Copy)]
pub struct CompletionOptions {
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    /// Ask the service to constrain output to a single JSON object.
    pub json_object: bool,
}

impl CompletionOptions {
    pub fn json(temperature: f32) -> Self {
        Self {
            temperature,
            max_tokens: None,
            json_object: true,
        }
    }

    pub fn text(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens: Some(max_tokens),
            json_object: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The single LLM client used by all services.
/// Cheap to clone: the underlying `reqwest::Client` is reference counted.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: &str, model: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes one call to the chat-completions endpoint, returning the full response object.
    pub async fn call(
        &self,
        prompt: &str,
        system: &str,
        options: CompletionOptions,
    ) -> Result<LlmResponse, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            response_format: options.json_object.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        debug!(
            model = %self.model,
            system_chars = system.chars().count(),
            prompt_chars = prompt.chars().count(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        if let Some(usage) = &llm_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(llm_response)
    }

    /// Calls the model and returns the trimmed text of the first choice.
    pub async fn call_text(
        &self,
        prompt: &str,
        system: &str,
        options: CompletionOptions,
    ) -> Result<String, LlmError> {
        let response = self.call(prompt, system, options).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        Ok(text.trim().to_string())
    }

    /// Convenience method that calls the LLM and deserializes the text response as JSON.
    /// The prompt must instruct the model to return valid JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
        options: CompletionOptions,
    ) -> Result<T, LlmError> {
        let text = self.call_text(prompt, system, options).await?;

        // Strip markdown code fences if the model wraps JSON in them
        let json = strip_json_fences(&text);

        serde_json::from_str(json).map_err(|source| LlmError::Parse {
            source,
            raw: text.clone(),
        })
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> LlmClient {
        LlmClient::new(
            "test-key".to_string(),
            &server.base_url(),
            "gpt-test".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "choices": [{"message": {"role": "assistant", "content": content}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5}
        })
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[tokio::test]
    async fn test_call_json_sends_json_object_format() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .json_body_partial(r#"{"response_format": {"type": "json_object"}}"#);
                then.status(200).json_body(completion(r#"{"name": "Jane"}"#));
            })
            .await;

        let value: serde_json::Value = client_for(&server)
            .call_json("prompt", "system", CompletionOptions::json(0.1))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(value["name"], "Jane");
    }

    #[tokio::test]
    async fn test_call_json_keeps_raw_output_on_parse_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).json_body(completion("not json"));
            })
            .await;

        let err = client_for(&server)
            .call_json::<serde_json::Value>("prompt", "system", CompletionOptions::json(0.1))
            .await
            .unwrap_err();

        match err {
            LlmError::Parse { raw, .. } => assert_eq!(raw, "not json"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_api_error_message_is_unwrapped_and_not_retried() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(429)
                    .json_body(json!({"error": {"message": "Rate limit reached"}}));
            })
            .await;

        let err = client_for(&server)
            .call_text("prompt", "system", CompletionOptions::text(0.7, 100))
            .await
            .unwrap_err();

        mock.assert_hits_async(1).await;
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Rate limit reached");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_choice_is_empty_content() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(200).json_body(json!({"choices": []}));
            })
            .await;

        let err = client_for(&server)
            .call_text("prompt", "system", CompletionOptions::text(0.7, 100))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }
}
