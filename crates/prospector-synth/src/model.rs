//! Generative-text backends.
//!
//! [`TextModel`] is the seam the orchestrator calls through. Two HTTP
//! implementations are provided: [`AnthropicClient`] (Messages API) for
//! single analyses and [`OpenAiClient`] (Chat Completions) for batch emails.
//! Each `invoke` performs exactly one HTTP request; there is no retry.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::error::ModelError;
use crate::prompt::PromptPair;

pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// A backend that turns one prompt pair into raw response text.
#[async_trait]
pub trait TextModel: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ModelError`] classified by cause: credentials, rate limit,
    /// transport, or a malformed response envelope.
    async fn invoke(&self, prompt: &PromptPair, max_tokens: u32) -> Result<String, ModelError>;
}

fn build_http_client(backend: &'static str, timeout_secs: u64) -> Result<Client, ModelError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| transport(backend, &e))
}

fn transport(backend: &'static str, err: &reqwest::Error) -> ModelError {
    ModelError::Transport {
        backend,
        message: err.to_string(),
    }
}

fn missing_key(backend: &'static str) -> ModelError {
    ModelError::Auth {
        backend,
        message: "API key not configured".to_string(),
    }
}

fn retry_after_secs(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
}

/// Map a response status to a [`ModelError`], then decode the 2xx body as JSON.
async fn read_envelope(backend: &'static str, response: Response) -> Result<Value, ModelError> {
    let status = response.status();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            return Err(ModelError::Auth {
                backend,
                message: format!("HTTP {}", status.as_u16()),
            });
        }
        StatusCode::TOO_MANY_REQUESTS => {
            return Err(ModelError::RateLimited {
                backend,
                retry_after_secs: retry_after_secs(response.headers()),
            });
        }
        s if !s.is_success() => {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(backend, status = s.as_u16(), body = %body, "model API error");
            return Err(ModelError::Transport {
                backend,
                message: format!("HTTP {}", s.as_u16()),
            });
        }
        _ => {}
    }

    let body = response.text().await.map_err(|e| transport(backend, &e))?;
    serde_json::from_str(&body).map_err(|e| ModelError::Envelope {
        backend,
        message: format!("body is not JSON: {e}"),
    })
}

fn text_at(backend: &'static str, envelope: &Value, pointer: &str) -> Result<String, ModelError> {
    envelope
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ModelError::Envelope {
            backend,
            message: format!("missing {pointer}"),
        })
}

// ---------------------------------------------------------------------------
// Anthropic
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Anthropic Messages API client.
pub struct AnthropicClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    url: String,
}

impl AnthropicClient {
    const BACKEND: &'static str = "anthropic";

    /// # Errors
    ///
    /// Returns [`ModelError::Transport`] if the HTTP client cannot be built.
    pub fn new(api_key: Option<String>, model: &str, timeout_secs: u64) -> Result<Self, ModelError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_ANTHROPIC_BASE_URL)
    }

    /// Creates a client against a custom base URL (for wiremock tests).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Transport`] if the HTTP client cannot be built.
    pub fn with_base_url(
        api_key: Option<String>,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            client: build_http_client(Self::BACKEND, timeout_secs)?,
            api_key,
            model: model.to_string(),
            url: format!("{}/v1/messages", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl TextModel for AnthropicClient {
    async fn invoke(&self, prompt: &PromptPair, max_tokens: u32) -> Result<String, ModelError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| missing_key(Self::BACKEND))?;

        let request = MessagesRequest {
            model: &self.model,
            max_tokens,
            system: &prompt.system,
            messages: [ChatMessage {
                role: "user",
                content: &prompt.user,
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport(Self::BACKEND, &e))?;

        let envelope = read_envelope(Self::BACKEND, response).await?;
        text_at(Self::BACKEND, &envelope, "/content/0/text")
    }
}

// ---------------------------------------------------------------------------
// OpenAI
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 2],
}

/// OpenAI Chat Completions client.
pub struct OpenAiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    url: String,
}

impl OpenAiClient {
    const BACKEND: &'static str = "openai";

    /// # Errors
    ///
    /// Returns [`ModelError::Transport`] if the HTTP client cannot be built.
    pub fn new(api_key: Option<String>, model: &str, timeout_secs: u64) -> Result<Self, ModelError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_OPENAI_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`ModelError::Transport`] if the HTTP client cannot be built.
    pub fn with_base_url(
        api_key: Option<String>,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            client: build_http_client(Self::BACKEND, timeout_secs)?,
            api_key,
            model: model.to_string(),
            url: format!("{}/v1/chat/completions", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl TextModel for OpenAiClient {
    async fn invoke(&self, prompt: &PromptPair, max_tokens: u32) -> Result<String, ModelError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| missing_key(Self::BACKEND))?;

        let request = ChatCompletionRequest {
            model: &self.model,
            max_tokens,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport(Self::BACKEND, &e))?;

        let envelope = read_envelope(Self::BACKEND, response).await?;
        text_at(Self::BACKEND, &envelope, "/choices/0/message/content")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_retry_after() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::RETRY_AFTER,
            reqwest::header::HeaderValue::from_static(" 12 "),
        );
        assert_eq!(retry_after_secs(&headers), Some(12));
    }

    #[test]
    fn http_date_retry_after_is_ignored() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::RETRY_AFTER,
            reqwest::header::HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
        );
        assert_eq!(retry_after_secs(&headers), None);
    }

    #[test]
    fn text_at_reports_missing_pointer() {
        let envelope = serde_json::json!({ "content": [] });
        let err = text_at("anthropic", &envelope, "/content/0/text").unwrap_err();
        assert!(matches!(err, ModelError::Envelope { .. }));
    }
}
