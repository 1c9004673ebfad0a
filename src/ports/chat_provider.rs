//! Chat Provider Port - contract for AI text-generation backends.
//!
//! One implementation exists per [`crate::domain::Provider`] variant; the
//! dispatcher selects the instance from a provider-to-client map instead of
//! branching on the enum at each call site.

use async_trait::async_trait;

/// Opaque contextual material attached to a generation request.
///
/// Assembled by the caller from workspace content. Backends that support
/// context fold the snippets into the prompt; the rest ignore it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatContext {
    /// Short background snippets, most relevant first.
    pub snippets: Vec<String>,
}

impl ChatContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a snippet.
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippets.push(snippet.into());
        self
    }

    /// True when no snippets were collected.
    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}

/// Port for AI text generation.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Generates a reply to `text`.
    ///
    /// The reply is returned verbatim to the end user, so implementations
    /// must not include transport or vendor framing.
    async fn generate(
        &self,
        text: &str,
        context: Option<&ChatContext>,
    ) -> Result<String, ChatError>;

    /// Whether [`generate`](Self::generate) makes use of [`ChatContext`].
    ///
    /// Callers skip context assembly entirely for backends that ignore it.
    fn supports_context(&self) -> bool {
        false
    }
}

/// Chat provider errors.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// The request exceeded its deadline.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// API key or permissions were rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Any other failure from the backend.
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl ChatError {
    /// Creates an upstream error.
    pub fn upstream(message: impl Into<String>) -> Self {
        ChatError::Upstream(message.into())
    }

    /// True when the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ChatError::Timeout { .. })
    }
}
