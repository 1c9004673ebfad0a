//! AI vendor adapters.
//!
//! Implementations of the `ChatProvider` and `SentimentAnalyzer` ports:
//!
//! - `DeepSeekProvider` - DeepSeek chat completions
//! - `EdenClient` - Eden AI text generation and sentiment analysis
//! - `MockChatProvider` / `MockSentimentAnalyzer` - configurable test doubles

mod deepseek_provider;
mod eden_client;
mod mock_provider;

pub use deepseek_provider::{DeepSeekConfig, DeepSeekProvider};
pub use eden_client::{EdenClient, EdenConfig};
pub use mock_provider::{MockChatProvider, MockSentimentAnalyzer};
