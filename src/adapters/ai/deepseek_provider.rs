//! DeepSeek Provider - ChatProvider backed by DeepSeek's chat API.
//!
//! Talks to the OpenAI-compatible `/v1/chat/completions` endpoint with
//! bearer authentication. Workspace context, when supplied, is folded into
//! a system message ahead of the user's text.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{ChatContext, ChatError, ChatProvider};

/// Configuration for the DeepSeek provider.
#[derive(Debug, Clone)]
pub struct DeepSeekConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Sampling temperature.
    pub temperature: f32,
    /// Completion length cap.
    pub max_tokens: u32,
}

impl DeepSeekConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "deepseek-chat".to_string(),
            base_url: "https://api.deepseek.com".to_string(),
            timeout: Duration::from_secs(30),
            temperature: 0.7,
            max_tokens: 1000,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// DeepSeek chat completion provider.
pub struct DeepSeekProvider {
    config: DeepSeekConfig,
    client: Client,
}

impl DeepSeekProvider {
    /// Creates a new provider with the given configuration.
    pub fn new(config: DeepSeekConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url)
    }

    /// Converts the relay's request into DeepSeek's wire format.
    fn to_request(&self, text: &str, context: Option<&ChatContext>) -> DeepSeekRequest {
        let mut messages = Vec::new();

        if let Some(context) = context.filter(|c| !c.is_empty()) {
            let mut system = String::from("Relevant notes from the user's workspace:\n");
            for snippet in &context.snippets {
                system.push_str("- ");
                system.push_str(snippet);
                system.push('\n');
            }
            messages.push(DeepSeekMessage {
                role: "system".to_string(),
                content: system,
            });
        }

        messages.push(DeepSeekMessage {
            role: "user".to_string(),
            content: text.to_string(),
        });

        DeepSeekRequest {
            model: self.config.model.clone(),
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    /// Maps transport-level failures to port errors.
    fn map_send_error(&self, err: reqwest::Error) -> ChatError {
        if err.is_timeout() {
            ChatError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if err.is_connect() {
            ChatError::upstream(format!("connection failed: {}", err))
        } else {
            ChatError::upstream(err.to_string())
        }
    }

    /// Maps non-success statuses to port errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, ChatError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(ChatError::AuthenticationFailed),
            _ => Err(ChatError::upstream(format!(
                "status {}: {}",
                status, error_body
            ))),
        }
    }
}

#[async_trait]
impl ChatProvider for DeepSeekProvider {
    async fn generate(
        &self,
        text: &str,
        context: Option<&ChatContext>,
    ) -> Result<String, ChatError> {
        let request = self.to_request(text, context);

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let response = self.handle_response_status(response).await?;

        let parsed: DeepSeekResponse = response
            .json()
            .await
            .map_err(|e| ChatError::upstream(format!("malformed response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ChatError::upstream("response contained no choices"))
    }

    fn supports_context(&self) -> bool {
        true
    }
}

#[derive(Debug, Serialize)]
struct DeepSeekRequest {
    model: String,
    messages: Vec<DeepSeekMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct DeepSeekMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct DeepSeekResponse {
    choices: Vec<DeepSeekChoice>,
}

#[derive(Debug, Deserialize)]
struct DeepSeekChoice {
    message: DeepSeekChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct DeepSeekChoiceMessage {
    content: String,
}
