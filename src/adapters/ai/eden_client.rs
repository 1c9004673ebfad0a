//! Eden Client - Eden AI text generation and sentiment analysis.
//!
//! One client covers both ports: `/v2/text/generation` for chat replies
//! (answers relayed through Eden's `openai` provider) and
//! `/v2/text/sentiment_analysis` for the amazon/google sentiment pass.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    ChatContext, ChatError, ChatProvider, SentimentAnalyzer, SentimentError, SentimentReport,
    VendorSentiment,
};

/// Configuration for the Eden AI client.
#[derive(Debug, Clone)]
pub struct EdenConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Sampling temperature for text generation.
    pub temperature: f32,
    /// Completion length cap for text generation.
    pub max_tokens: u32,
}

impl EdenConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "https://api.edenai.run/v2".to_string(),
            timeout: Duration::from_secs(30),
            temperature: 0.3,
            max_tokens: 150,
        }
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

/// Underlying provider Eden relays generation requests to.
const GENERATION_PROVIDERS: &str = "openai";

/// Vendors requested for sentiment analysis.
const SENTIMENT_PROVIDERS: &str = "amazon,google";

/// Eden AI client implementing both chat generation and sentiment analysis.
pub struct EdenClient {
    config: EdenConfig,
    client: Client,
}

impl EdenClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: EdenConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn generation_url(&self) -> String {
        format!("{}/text/generation", self.config.base_url)
    }

    fn sentiment_url(&self) -> String {
        format!("{}/text/sentiment_analysis", self.config.base_url)
    }

    async fn post_json<B: Serialize>(&self, url: String, body: &B) -> Result<Response, SendError> {
        self.client
            .post(url)
            .bearer_auth(self.config.api_key())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SendError::Timeout(self.config.timeout.as_secs())
                } else {
                    SendError::Other(e.to_string())
                }
            })
    }

    async fn require_success(response: Response) -> Result<Response, SendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(SendError::Auth),
            _ => Err(SendError::Other(format!("status {}: {}", status, error_body))),
        }
    }
}

/// Transport outcome shared by both ports before conversion into their
/// respective error enums.
enum SendError {
    Timeout(u64),
    Auth,
    Other(String),
}

impl From<SendError> for ChatError {
    fn from(err: SendError) -> Self {
        match err {
            SendError::Timeout(timeout_secs) => ChatError::Timeout { timeout_secs },
            SendError::Auth => ChatError::AuthenticationFailed,
            SendError::Other(detail) => ChatError::Upstream(detail),
        }
    }
}

impl From<SendError> for SentimentError {
    fn from(err: SendError) -> Self {
        match err {
            SendError::Timeout(timeout_secs) => SentimentError::Timeout { timeout_secs },
            SendError::Auth => SentimentError::AuthenticationFailed,
            SendError::Other(detail) => SentimentError::Upstream(detail),
        }
    }
}

#[async_trait]
impl ChatProvider for EdenClient {
    async fn generate(
        &self,
        text: &str,
        _context: Option<&ChatContext>,
    ) -> Result<String, ChatError> {
        let request = EdenGenerationRequest {
            providers: GENERATION_PROVIDERS,
            text,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self.post_json(self.generation_url(), &request).await?;
        let response = Self::require_success(response).await?;

        let parsed: EdenGenerationResponse = response
            .json()
            .await
            .map_err(|e| ChatError::upstream(format!("malformed response: {}", e)))?;

        parsed
            .openai
            .and_then(|vendor| vendor.generated_text)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| ChatError::upstream("no valid response from providers"))
    }

    // Eden's generation endpoint takes a single text field; workspace
    // context has nowhere to go.
    fn supports_context(&self) -> bool {
        false
    }
}

#[async_trait]
impl SentimentAnalyzer for EdenClient {
    async fn analyze(&self, text: &str) -> Result<SentimentReport, SentimentError> {
        let request = EdenSentimentRequest {
            providers: SENTIMENT_PROVIDERS,
            text,
        };

        let response = self.post_json(self.sentiment_url(), &request).await?;
        let response = Self::require_success(response).await?;

        let parsed: EdenSentimentResponse = response
            .json()
            .await
            .map_err(|e| SentimentError::upstream(format!("malformed response: {}", e)))?;

        Ok(parsed.into_report())
    }
}

#[derive(Debug, Serialize)]
struct EdenGenerationRequest<'a> {
    providers: &'static str,
    text: &'a str,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct EdenGenerationResponse {
    openai: Option<EdenGeneratedText>,
}

#[derive(Debug, Deserialize)]
struct EdenGeneratedText {
    generated_text: Option<String>,
}

#[derive(Debug, Serialize)]
struct EdenSentimentRequest<'a> {
    providers: &'static str,
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct EdenSentimentResponse {
    amazon: Option<EdenVendorSentiment>,
    google: Option<EdenVendorSentiment>,
}

#[derive(Debug, Deserialize)]
struct EdenVendorSentiment {
    general_sentiment: Option<String>,
    general_sentiment_rate: Option<f64>,
}

impl EdenSentimentResponse {
    /// Keeps only vendors that returned both a label and a confidence.
    fn into_report(self) -> SentimentReport {
        let mut report = SentimentReport::new();
        for (vendor, verdict) in [("amazon", self.amazon), ("google", self.google)] {
            if let Some(EdenVendorSentiment {
                general_sentiment: Some(sentiment),
                general_sentiment_rate: Some(rate),
            }) = verdict
            {
                report.insert(vendor.to_string(), VendorSentiment::new(sentiment, rate));
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_match_vendor_contract() {
        let config = EdenConfig::new("key");
        assert_eq!(config.base_url, "https://api.edenai.run/v2");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.temperature, 0.3);
        assert_eq!(config.max_tokens, 150);
    }

    #[test]
    fn urls_append_endpoints() {
        let client = EdenClient::new(EdenConfig::new("key"));
        assert_eq!(
            client.generation_url(),
            "https://api.edenai.run/v2/text/generation"
        );
        assert_eq!(
            client.sentiment_url(),
            "https://api.edenai.run/v2/text/sentiment_analysis"
        );
    }

    #[test]
    fn generation_does_not_use_context() {
        let client = EdenClient::new(EdenConfig::new("key"));
        assert!(!client.supports_context());
    }

    #[test]
    fn sentiment_report_keeps_only_complete_vendors() {
        let json = r#"{
            "amazon": {"general_sentiment": "Positive", "general_sentiment_rate": 0.91},
            "google": {"general_sentiment_rate": 0.5}
        }"#;
        let parsed: EdenSentimentResponse = serde_json::from_str(json).unwrap();
        let report = parsed.into_report();

        assert_eq!(report.len(), 1);
        assert_eq!(report["amazon"].sentiment, "Positive");
        assert!((report["amazon"].confidence - 0.91).abs() < f64::EPSILON);
    }

    #[test]
    fn sentiment_report_may_be_empty() {
        let parsed: EdenSentimentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.into_report().is_empty());
    }

    #[test]
    fn generation_response_extracts_openai_text() {
        let json = r#"{"openai": {"generated_text": "  hello  "}}"#;
        let parsed: EdenGenerationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.openai.unwrap().generated_text.unwrap().trim(),
            "hello"
        );
    }
}
