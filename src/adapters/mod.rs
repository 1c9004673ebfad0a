//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the relay core to external systems:
//!
//! - `ai` - DeepSeek and Eden AI clients, plus configurable mocks
//! - `workspace` - Notion-style workspace client and an in-memory double
//! - `locale` - heuristic locale detection
//!
//! In-memory doubles ship as ordinary adapters so integration tests and
//! single-process deployments can run without external services.

pub mod ai;
pub mod locale;
pub mod workspace;

pub use ai::{
    DeepSeekConfig, DeepSeekProvider, EdenClient, EdenConfig, MockChatProvider,
    MockSentimentAnalyzer,
};
pub use locale::{FixedLocaleDetector, HeuristicLocaleDetector};
pub use workspace::{InMemoryWorkspace, NotionConfig, NotionWorkspace};
