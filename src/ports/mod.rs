//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! relay core and the outside world. Adapters implement these ports.
//!
//! - `ChatProvider` - AI text-generation backends
//! - `SentimentAnalyzer` - sentiment scoring over a piece of text
//! - `Workspace` - the document workspace notes are saved to
//! - `LocaleDetector` - guesses the locale used to pick message templates
//!
//! Collaborators are stateless with respect to session data: they receive
//! plain parameters and return plain results.

mod chat_provider;
mod locale_detector;
mod sentiment_analyzer;
mod workspace;

pub use chat_provider::{ChatContext, ChatError, ChatProvider};
pub use locale_detector::{Locale, LocaleDetector};
pub use sentiment_analyzer::{SentimentAnalyzer, SentimentError, SentimentReport, VendorSentiment};
pub use workspace::{
    Collection, CollectionSchema, CreatedEntry, Entry, Workspace, WorkspaceError, MAX_BODY_CHARS,
    SEARCH_RESULT_CAP,
};
