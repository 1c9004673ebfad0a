//! Sentiment Analyzer Port - one-shot sentiment scoring over text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One vendor's verdict over a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorSentiment {
    /// Label such as "Positive", "Negative" or "Neutral".
    pub sentiment: String,
    /// Confidence in the label, `0.0..=1.0`.
    pub confidence: f64,
}

impl VendorSentiment {
    /// Creates a vendor verdict.
    pub fn new(sentiment: impl Into<String>, confidence: f64) -> Self {
        Self {
            sentiment: sentiment.into(),
            confidence,
        }
    }
}

/// Vendor name mapped to its verdict.
///
/// Vendors missing from the upstream response are simply absent; callers
/// render only the keys that are present. Ordered so reports render
/// deterministically.
pub type SentimentReport = BTreeMap<String, VendorSentiment>;

/// Port for sentiment analysis.
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    /// Scores `text`, returning per-vendor verdicts.
    async fn analyze(&self, text: &str) -> Result<SentimentReport, SentimentError>;
}

/// Sentiment analysis errors.
#[derive(Debug, thiserror::Error)]
pub enum SentimentError {
    /// The request exceeded its deadline.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// API key or permissions were rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Any other failure from the vendor.
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl SentimentError {
    /// Creates an upstream error.
    pub fn upstream(message: impl Into<String>) -> Self {
        SentimentError::Upstream(message.into())
    }

    /// True when the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, SentimentError::Timeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_iterates_in_vendor_order() {
        let mut report = SentimentReport::new();
        report.insert("google".to_string(), VendorSentiment::new("Positive", 0.9));
        report.insert("amazon".to_string(), VendorSentiment::new("Neutral", 0.6));

        let vendors: Vec<_> = report.keys().cloned().collect();
        assert_eq!(vendors, vec!["amazon", "google"]);
    }

    #[test]
    fn timeout_classification() {
        assert!(SentimentError::Timeout { timeout_secs: 30 }.is_timeout());
        assert!(!SentimentError::upstream("boom").is_timeout());
    }
}
