//! Mock AI adapters for testing.
//!
//! Configurable implementations of the `ChatProvider` and
//! `SentimentAnalyzer` ports, allowing tests to run without calling real
//! vendor APIs.
//!
//! # Features
//!
//! - Pre-configured replies (consumed in order)
//! - Simulated delays for timeout testing
//! - Error injection for resilience testing
//! - Call tracking for verification

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    ChatContext, ChatError, ChatProvider, SentimentAnalyzer, SentimentError, SentimentReport,
    VendorSentiment,
};

/// A configured mock chat reply.
#[derive(Debug, Clone)]
enum MockReply {
    Success(String),
    Timeout { timeout_secs: u64 },
    AuthFailed,
    Upstream(String),
}

impl MockReply {
    fn into_result(self) -> Result<String, ChatError> {
        match self {
            MockReply::Success(text) => Ok(text),
            MockReply::Timeout { timeout_secs } => Err(ChatError::Timeout { timeout_secs }),
            MockReply::AuthFailed => Err(ChatError::AuthenticationFailed),
            MockReply::Upstream(detail) => Err(ChatError::Upstream(detail)),
        }
    }
}

/// Mock chat provider.
///
/// Replies are consumed in configuration order; when the queue is empty a
/// fixed fallback reply is returned so tests that don't care about content
/// keep working.
#[derive(Clone)]
pub struct MockChatProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<(String, Option<ChatContext>)>>>,
    delay: Duration,
    supports_context: bool,
}

impl Default for MockChatProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockChatProvider {
    /// Creates a mock with no queued replies.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
            supports_context: false,
        }
    }

    /// Queues a successful reply.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Success(text.into()));
        self
    }

    /// Queues a timeout error.
    pub fn with_timeout(self, timeout_secs: u64) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Timeout { timeout_secs });
        self
    }

    /// Queues an authentication failure.
    pub fn with_auth_failure(self) -> Self {
        self.replies.lock().unwrap().push_back(MockReply::AuthFailed);
        self
    }

    /// Queues an upstream error.
    pub fn with_upstream_error(self, detail: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Upstream(detail.into()));
        self
    }

    /// Adds simulated latency to every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Makes the mock advertise context support.
    pub fn with_context_support(mut self) -> Self {
        self.supports_context = true;
        self
    }

    /// Number of generate calls observed.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// All observed calls (text, context).
    pub fn calls(&self) -> Vec<(String, Option<ChatContext>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn generate(
        &self,
        text: &str,
        context: Option<&ChatContext>,
    ) -> Result<String, ChatError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), context.cloned()));

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(reply) => reply.into_result(),
            None => Ok(format!("mock reply to: {}", text)),
        }
    }

    fn supports_context(&self) -> bool {
        self.supports_context
    }
}

/// Mock sentiment analyzer.
#[derive(Clone, Default)]
pub struct MockSentimentAnalyzer {
    results: Arc<Mutex<VecDeque<Result<SentimentReport, String>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockSentimentAnalyzer {
    /// Creates a mock with no queued results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a report built from `(vendor, sentiment, confidence)` triples.
    pub fn with_report(self, verdicts: &[(&str, &str, f64)]) -> Self {
        let mut report = SentimentReport::new();
        for (vendor, sentiment, confidence) in verdicts {
            report.insert(
                vendor.to_string(),
                VendorSentiment::new(*sentiment, *confidence),
            );
        }
        self.results.lock().unwrap().push_back(Ok(report));
        self
    }

    /// Queues an upstream failure.
    pub fn with_failure(self, detail: impl Into<String>) -> Self {
        self.results.lock().unwrap().push_back(Err(detail.into()));
        self
    }

    /// Number of analyze calls observed.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SentimentAnalyzer for MockSentimentAnalyzer {
    async fn analyze(&self, text: &str) -> Result<SentimentReport, SentimentError> {
        self.calls.lock().unwrap().push(text.to_string());

        let result = self.results.lock().unwrap().pop_front();
        match result {
            Some(Ok(report)) => Ok(report),
            Some(Err(detail)) => Err(SentimentError::Upstream(detail)),
            None => Ok(SentimentReport::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let mock = MockChatProvider::new()
            .with_reply("first")
            .with_reply("second");

        assert_eq!(mock.generate("a", None).await.unwrap(), "first");
        assert_eq!(mock.generate("b", None).await.unwrap(), "second");
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn empty_queue_falls_back_to_canned_reply() {
        let mock = MockChatProvider::new();
        let reply = mock.generate("ping", None).await.unwrap();
        assert!(reply.contains("ping"));
    }

    #[tokio::test]
    async fn queued_errors_surface_as_port_errors() {
        let mock = MockChatProvider::new().with_timeout(30).with_auth_failure();

        assert!(matches!(
            mock.generate("x", None).await,
            Err(ChatError::Timeout { timeout_secs: 30 })
        ));
        assert!(matches!(
            mock.generate("y", None).await,
            Err(ChatError::AuthenticationFailed)
        ));
    }

    #[tokio::test]
    async fn context_is_recorded() {
        let mock = MockChatProvider::new().with_context_support();
        let context = ChatContext::new().with_snippet("note");
        mock.generate("q", Some(&context)).await.unwrap();

        let calls = mock.calls();
        assert_eq!(calls[0].1.as_ref().unwrap().snippets, vec!["note"]);
    }

    #[tokio::test]
    async fn sentiment_mock_queues_reports_and_failures() {
        let mock = MockSentimentAnalyzer::new()
            .with_report(&[("amazon", "Positive", 0.9)])
            .with_failure("down");

        let report = mock.analyze("nice").await.unwrap();
        assert_eq!(report["amazon"].sentiment, "Positive");

        assert!(matches!(
            mock.analyze("nice").await,
            Err(SentimentError::Upstream(_))
        ));
        assert_eq!(mock.call_count(), 2);
    }
}
