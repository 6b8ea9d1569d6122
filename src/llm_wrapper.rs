use crate::schemas::chat::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat,
};
use crate::settings::Settings;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Failures of a single upstream chat-completion call.
///
/// These carry vendor detail (status codes, error bodies) and must never be
/// shown to HTTP callers; the service layer logs them and replaces them with
/// a generic failure.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("api error ({status}): {body}")]
    Api { status: StatusCode, body: String },

    #[error("malformed response: no completion choices returned")]
    EmptyChoices,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
///
/// Credentials, endpoint and model are bound at construction; one call maps
/// to one upstream request with no retry or backoff.
#[derive(Clone)]
pub struct LlmClient {
    inner: Arc<Client>,
    api_url: String,
    api_key: String,
    model: String,
}

impl LlmClient {
    pub fn new(settings: &Settings) -> Result<Self, LlmError> {
        let inner = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self {
            inner: Arc::new(inner),
            api_url: settings.api_url.clone(),
            api_key: settings.openai_api_key.clone(),
            model: settings.model.clone(),
        })
    }

    /// Sends a system + user message pair and asks for a JSON-formatted
    /// answer, returning the first choice's text content verbatim.
    ///
    /// The content is opaque to this service: it is not parsed or validated
    /// as JSON, that is left to the caller.
    pub async fn chat_json(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            response_format: Some(ResponseFormat::json_object()),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
        };

        let response = self
            .inner
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response body".to_string());
            tracing::warn!(%status, "chat completion request rejected upstream");
            return Err(LlmError::Api { status, body });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmError::EmptyChoices)
    }
}
