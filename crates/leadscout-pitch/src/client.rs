//! Minimal chat-completions client.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::error::PitchError;
use crate::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat};

/// Longest upstream error body kept in [`PitchError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct ChatClient {
    http: Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
}

impl ChatClient {
    /// Builds a client that posts to `{base_url}/chat/completions`.
    ///
    /// # Errors
    ///
    /// Returns [`PitchError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`PitchError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(config: ChatConfig) -> Result<Self, PitchError> {
        let base = config.base_url.trim_end_matches('/');
        reqwest::Url::parse(base).map_err(|e| PitchError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{base}/chat/completions"),
            api_key: config.api_key,
            model: config.model,
            temperature: config.temperature,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one chat-completions request and returns the first choice's text.
    ///
    /// # Errors
    ///
    /// - [`PitchError::Http`] on network failure or timeout.
    /// - [`PitchError::Status`] on a non-2xx response.
    /// - [`PitchError::Deserialize`] if the body is not a completion.
    /// - [`PitchError::EmptyCompletion`] if no choice carries content.
    pub async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String, PitchError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            temperature: self.temperature,
            messages,
            response_format: Some(ResponseFormat::json_object()),
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| PitchError::Deserialize {
                context: "chat/completions".to_string(),
                source: e,
            })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(PitchError::EmptyCompletion)?;

        if choice.finish_reason.as_deref() == Some("length") {
            tracing::warn!(model = %self.model, "pitch completion was truncated by the token limit");
        }

        choice
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or(PitchError::EmptyCompletion)
    }
}

fn status_error(status: StatusCode, body: &str) -> PitchError {
    let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    PitchError::Status {
        status: status.as_u16(),
        body,
    }
}
