//! In-memory workspace implementation.
//!
//! Implements the Workspace port against process memory. Useful for
//! integration tests and offline runs; honours the same truncation and
//! search-cap policy as the real adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::Mutex;
use uuid::Uuid;

use crate::ports::{
    Collection, CollectionSchema, CreatedEntry, Entry, Workspace, WorkspaceError, MAX_BODY_CHARS,
    SEARCH_RESULT_CAP,
};

#[derive(Debug, Clone)]
struct StoredEntry {
    id: String,
    title: String,
    body: String,
    url: String,
    last_edited: DateTime<Utc>,
}

/// In-memory implementation of the Workspace port.
///
/// Thread-safe via internal mutexes. Supports error injection and call
/// counting for tests.
#[derive(Default)]
pub struct InMemoryWorkspace {
    collections: Mutex<Vec<Collection>>,
    entries: Mutex<Vec<StoredEntry>>,
    injected_errors: Mutex<VecDeque<WorkspaceError>>,
    create_calls: Mutex<Vec<(String, String)>>,
}

impl InMemoryWorkspace {
    /// Creates an empty workspace with a single default collection.
    pub fn new() -> Self {
        let workspace = Self::default();
        workspace.collections.lock().unwrap().push(Collection {
            id: "default".to_string(),
            title: "Notes".to_string(),
            description: "Default notes collection".to_string(),
        });
        workspace
    }

    /// Adds a collection.
    pub fn with_collection(
        self,
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.collections.lock().unwrap().push(Collection {
            id: id.into(),
            title: title.into(),
            description: description.into(),
        });
        self
    }

    /// Seeds an entry so searches have something to find.
    pub fn with_entry(
        self,
        title: impl Into<String>,
        body: impl Into<String>,
        last_edited: DateTime<Utc>,
    ) -> Self {
        let id = Uuid::new_v4().to_string();
        self.entries.lock().unwrap().push(StoredEntry {
            url: format!("https://workspace.local/{}", id),
            id,
            title: title.into(),
            body: body.into(),
            last_edited,
        });
        self
    }

    /// Queues an error; the next operation fails with it.
    pub fn with_failure(self, error: WorkspaceError) -> Self {
        self.injected_errors.lock().unwrap().push_back(error);
        self
    }

    /// Titles and bodies passed to `create_entry`, in call order.
    pub fn created(&self) -> Vec<(String, String)> {
        self.create_calls.lock().unwrap().clone()
    }

    /// Number of `create_entry` calls observed.
    pub fn create_count(&self) -> usize {
        self.create_calls.lock().unwrap().len()
    }

    /// Stored body of the most recently created entry.
    pub fn last_body(&self) -> Option<String> {
        self.entries
            .lock()
            .unwrap()
            .last()
            .map(|entry| entry.body.clone())
    }

    fn take_injected(&self) -> Option<WorkspaceError> {
        self.injected_errors.lock().unwrap().pop_front()
    }
}

#[async_trait]
impl Workspace for InMemoryWorkspace {
    async fn list_collections(&self) -> Result<Vec<Collection>, WorkspaceError> {
        if let Some(error) = self.take_injected() {
            return Err(error);
        }
        Ok(self.collections.lock().unwrap().clone())
    }

    async fn search(&self, query: &str) -> Result<Vec<Entry>, WorkspaceError> {
        if let Some(error) = self.take_injected() {
            return Err(error);
        }

        let needle = query.to_lowercase();
        let mut matches: Vec<_> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| {
                entry.title.to_lowercase().contains(&needle)
                    || entry.body.to_lowercase().contains(&needle)
            })
            .map(|entry| Entry {
                id: entry.id.clone(),
                title: entry.title.clone(),
                url: entry.url.clone(),
                last_edited: entry.last_edited,
            })
            .collect();

        matches.sort_by(|a, b| b.last_edited.cmp(&a.last_edited));
        matches.truncate(SEARCH_RESULT_CAP);
        Ok(matches)
    }

    async fn create_entry(
        &self,
        title: &str,
        body: &str,
    ) -> Result<CreatedEntry, WorkspaceError> {
        self.create_calls
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));

        if let Some(error) = self.take_injected() {
            return Err(error);
        }

        let truncated = body.chars().count() > MAX_BODY_CHARS;
        let stored: String = body.chars().take(MAX_BODY_CHARS).collect();

        let id = Uuid::new_v4().to_string();
        let url = format!("https://workspace.local/{}", id);
        self.entries.lock().unwrap().push(StoredEntry {
            id: id.clone(),
            title: title.to_string(),
            body: stored,
            url: url.clone(),
            last_edited: Utc::now(),
        });

        Ok(CreatedEntry {
            id,
            url,
            title: title.to_string(),
            truncated,
        })
    }

    async fn collection_schema(&self, id: &str) -> Result<CollectionSchema, WorkspaceError> {
        if let Some(error) = self.take_injected() {
            return Err(error);
        }

        self.collections
            .lock()
            .unwrap()
            .iter()
            .find(|collection| collection.id == id)
            .map(|collection| CollectionSchema {
                id: collection.id.clone(),
                title: collection.title.clone(),
                field_names: vec!["Name".to_string(), "Content".to_string()],
            })
            .ok_or_else(|| WorkspaceError::not_found(format!("collection {}", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_truncates_long_bodies_and_reports_it() {
        let workspace = InMemoryWorkspace::new();
        let long = "a".repeat(MAX_BODY_CHARS + 100);

        let created = workspace.create_entry("Long", &long).await.unwrap();
        assert!(created.truncated);
        assert_eq!(
            workspace.last_body().unwrap().chars().count(),
            MAX_BODY_CHARS
        );
    }

    #[tokio::test]
    async fn create_at_limit_is_not_truncated() {
        let workspace = InMemoryWorkspace::new();
        let exact = "b".repeat(MAX_BODY_CHARS);

        let created = workspace.create_entry("Exact", &exact).await.unwrap();
        assert!(!created.truncated);
    }

    #[tokio::test]
    async fn search_caps_results_and_sorts_newest_first() {
        let mut workspace = InMemoryWorkspace::new();
        for n in 0..8 {
            let edited = Utc::now() - chrono::Duration::days(n);
            workspace = workspace.with_entry(format!("meeting {}", n), "agenda", edited);
        }

        let results = workspace.search("meeting").await.unwrap();
        assert_eq!(results.len(), SEARCH_RESULT_CAP);
        assert_eq!(results[0].title, "meeting 0");
    }

    #[tokio::test]
    async fn unknown_schema_id_is_not_found() {
        let workspace = InMemoryWorkspace::new();
        assert!(matches!(
            workspace.collection_schema("missing").await,
            Err(WorkspaceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn injected_errors_fire_once() {
        let workspace =
            InMemoryWorkspace::new().with_failure(WorkspaceError::auth("expired token"));

        assert!(workspace.list_collections().await.is_err());
        assert!(workspace.list_collections().await.is_ok());
    }
}
