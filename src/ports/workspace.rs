//! Workspace Port - the document workspace the relay stores notes in.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Upper bound on note body length. Longer bodies are stored cut at this
/// many characters; the cut is reported through [`CreatedEntry::truncated`],
/// never as an error.
pub const MAX_BODY_CHARS: usize = 2000;

/// Search results are capped at this many entries by policy.
pub const SEARCH_RESULT_CAP: usize = 5;

/// A collection (database) of entries in the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    /// Workspace-assigned identifier.
    pub id: String,
    /// Collection title, `"Untitled"` when the workspace has none.
    pub title: String,
    /// Free-form description.
    pub description: String,
}

/// A single entry returned from a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Workspace-assigned identifier.
    pub id: String,
    /// Entry title.
    pub title: String,
    /// Link to open the entry.
    pub url: String,
    /// Last modification time.
    pub last_edited: DateTime<Utc>,
}

/// Result of creating a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEntry {
    /// Workspace-assigned identifier.
    pub id: String,
    /// Link to open the note.
    pub url: String,
    /// Title the note was created with.
    pub title: String,
    /// True when the stored body was cut at [`MAX_BODY_CHARS`].
    pub truncated: bool,
}

/// Shape of one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSchema {
    /// Workspace-assigned identifier.
    pub id: String,
    /// Collection title.
    pub title: String,
    /// Names of the collection's fields.
    pub field_names: Vec<String>,
}

/// Port for the document workspace.
#[async_trait]
pub trait Workspace: Send + Sync {
    /// Lists all collections the integration can reach.
    async fn list_collections(&self) -> Result<Vec<Collection>, WorkspaceError>;

    /// Full-text search, newest first, at most [`SEARCH_RESULT_CAP`] entries.
    async fn search(&self, query: &str) -> Result<Vec<Entry>, WorkspaceError>;

    /// Creates a note in the configured default collection.
    ///
    /// Bodies longer than [`MAX_BODY_CHARS`] are stored cut to that length;
    /// the flag on the result reports the cut.
    async fn create_entry(&self, title: &str, body: &str)
        -> Result<CreatedEntry, WorkspaceError>;

    /// Retrieves the shape of one collection. Unknown ids are
    /// [`WorkspaceError::NotFound`].
    async fn collection_schema(&self, id: &str) -> Result<CollectionSchema, WorkspaceError>;
}

/// Workspace errors.
///
/// Variants carry enough detail to log; user-facing rendering happens in
/// the formatter, which never echoes the detail for auth/not-found/upstream
/// cases.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    /// The request exceeded its deadline.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Token or permissions were rejected.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// A referenced resource (typically a collection id) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other failure from the workspace.
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl WorkspaceError {
    /// Creates an authentication error.
    pub fn auth(detail: impl Into<String>) -> Self {
        WorkspaceError::AuthenticationFailed(detail.into())
    }

    /// Creates a not-found error.
    pub fn not_found(detail: impl Into<String>) -> Self {
        WorkspaceError::NotFound(detail.into())
    }

    /// Creates an upstream error.
    pub fn upstream(detail: impl Into<String>) -> Self {
        WorkspaceError::Upstream(detail.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_constructors_pick_variants() {
        assert!(matches!(
            WorkspaceError::auth("bad token"),
            WorkspaceError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            WorkspaceError::not_found("db-123"),
            WorkspaceError::NotFound(_)
        ));
        assert!(matches!(
            WorkspaceError::upstream("500"),
            WorkspaceError::Upstream(_)
        ));
    }
}
