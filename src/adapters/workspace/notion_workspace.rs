//! Notion Workspace - Workspace port backed by the Notion API.
//!
//! Notes are created as pages in a configured default database with a
//! `Name` title property and a `Content` rich-text property. Search and
//! listing go through `/v1/search`; schemas through `/v1/databases/{id}`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde_json::{json, Value};
use std::time::Duration;

use crate::ports::{
    Collection, CollectionSchema, CreatedEntry, Entry, Workspace, WorkspaceError, MAX_BODY_CHARS,
    SEARCH_RESULT_CAP,
};

/// Notion API version header value.
const NOTION_API_VERSION: &str = "2022-06-28";

/// Configuration for the Notion workspace adapter.
#[derive(Debug, Clone)]
pub struct NotionConfig {
    /// Integration token.
    token: Secret<String>,
    /// Base URL for the API.
    pub base_url: String,
    /// Database that new notes are created in.
    pub default_collection: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl NotionConfig {
    /// Creates a new configuration.
    pub fn new(token: impl Into<String>, default_collection: impl Into<String>) -> Self {
        Self {
            token: Secret::new(token.into()),
            base_url: "https://api.notion.com".to_string(),
            default_collection: default_collection.into(),
            timeout: Duration::from_secs(30),
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

    fn token(&self) -> &str {
        self.token.expose_secret()
    }
}

/// Notion-backed workspace.
pub struct NotionWorkspace {
    config: NotionConfig,
    client: Client,
}

impl NotionWorkspace {
    /// Creates a new adapter with the given configuration.
    pub fn new(config: NotionConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Response, WorkspaceError> {
        let response = request
            .bearer_auth(self.config.token())
            .header("Notion-Version", NOTION_API_VERSION)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WorkspaceError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else {
                    WorkspaceError::upstream(e.to_string())
                }
            })?;

        Self::require_success(response).await
    }

    async fn require_success(response: Response) -> Result<Response, WorkspaceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(WorkspaceError::auth(error_body)),
            404 => Err(WorkspaceError::not_found(error_body)),
            // Notion reports unknown database ids on create as 400 validation errors
            400 if error_body.contains("Could not find") => {
                Err(WorkspaceError::not_found(error_body))
            }
            _ => Err(WorkspaceError::upstream(format!(
                "status {}: {}",
                status, error_body
            ))),
        }
    }

    async fn parse_body(response: Response) -> Result<Value, WorkspaceError> {
        response
            .json()
            .await
            .map_err(|e| WorkspaceError::upstream(format!("malformed response: {}", e)))
    }
}

#[async_trait]
impl Workspace for NotionWorkspace {
    async fn list_collections(&self) -> Result<Vec<Collection>, WorkspaceError> {
        let body = json!({
            "filter": { "property": "object", "value": "database" }
        });
        let response = self
            .send(self.client.post(self.url("/v1/search")).json(&body))
            .await?;
        let parsed = Self::parse_body(response).await?;

        Ok(results(&parsed).iter().map(collection_from).collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<Entry>, WorkspaceError> {
        let body = json!({
            "query": query,
            "sort": { "direction": "descending", "timestamp": "last_edited_time" }
        });
        let response = self
            .send(self.client.post(self.url("/v1/search")).json(&body))
            .await?;
        let parsed = Self::parse_body(response).await?;

        Ok(results(&parsed)
            .iter()
            .take(SEARCH_RESULT_CAP)
            .map(entry_from)
            .collect())
    }

    async fn create_entry(
        &self,
        title: &str,
        body: &str,
    ) -> Result<CreatedEntry, WorkspaceError> {
        let (stored, truncated) = truncate_body(body);

        let payload = json!({
            "parent": { "database_id": self.config.default_collection },
            "properties": {
                "Name": { "title": [ { "text": { "content": title } } ] },
                "Content": { "rich_text": [ { "text": { "content": stored } } ] }
            }
        });

        let response = self
            .send(self.client.post(self.url("/v1/pages")).json(&payload))
            .await?;
        let parsed = Self::parse_body(response).await?;

        Ok(CreatedEntry {
            id: str_field(&parsed, "id"),
            url: str_field(&parsed, "url"),
            title: title.to_string(),
            truncated,
        })
    }

    async fn collection_schema(&self, id: &str) -> Result<CollectionSchema, WorkspaceError> {
        let response = self
            .send(self.client.get(self.url(&format!("/v1/databases/{}", id))))
            .await?;
        let parsed = Self::parse_body(response).await?;

        let field_names = parsed["properties"]
            .as_object()
            .map(|props| props.keys().cloned().collect())
            .unwrap_or_default();

        Ok(CollectionSchema {
            id: str_field(&parsed, "id"),
            title: title_text(&parsed["title"]).unwrap_or_else(|| "Untitled".to_string()),
            field_names,
        })
    }
}

/// Cuts `body` at [`MAX_BODY_CHARS`] characters, reporting whether a cut
/// happened.
fn truncate_body(body: &str) -> (String, bool) {
    if body.chars().count() <= MAX_BODY_CHARS {
        return (body.to_string(), false);
    }
    (body.chars().take(MAX_BODY_CHARS).collect(), true)
}

fn results(value: &Value) -> Vec<Value> {
    value["results"].as_array().cloned().unwrap_or_default()
}

fn str_field(value: &Value, field: &str) -> String {
    value[field].as_str().unwrap_or_default().to_string()
}

/// Joins the plain text of a Notion rich-text array.
fn title_text(value: &Value) -> Option<String> {
    let parts = value.as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part["plain_text"].as_str())
        .collect();
    (!text.is_empty()).then_some(text)
}

/// Title of a search result, whether it is a database or a page.
fn result_title(value: &Value) -> String {
    if let Some(title) = title_text(&value["title"]) {
        return title;
    }
    // Pages carry their title inside a title-typed property
    if let Some(props) = value["properties"].as_object() {
        for prop in props.values() {
            if let Some(title) = title_text(&prop["title"]) {
                return title;
            }
        }
    }
    "Untitled".to_string()
}

fn collection_from(value: &Value) -> Collection {
    Collection {
        id: str_field(value, "id"),
        title: result_title(value),
        description: title_text(&value["description"])
            .unwrap_or_else(|| "No description".to_string()),
    }
}

fn entry_from(value: &Value) -> Entry {
    let last_edited = value["last_edited_time"]
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    Entry {
        id: str_field(value, "id"),
        title: result_title(value),
        url: str_field(value, "url"),
        last_edited,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_cuts_at_limit() {
        let long = "x".repeat(MAX_BODY_CHARS + 1);
        let (stored, truncated) = truncate_body(&long);
        assert!(truncated);
        assert_eq!(stored.chars().count(), MAX_BODY_CHARS);
    }

    #[test]
    fn truncate_body_keeps_bodies_at_limit() {
        let exact = "y".repeat(MAX_BODY_CHARS);
        let (stored, truncated) = truncate_body(&exact);
        assert!(!truncated);
        assert_eq!(stored, exact);
    }

    #[test]
    fn truncate_body_counts_characters_not_bytes() {
        let long: String = "é".repeat(MAX_BODY_CHARS + 5);
        let (stored, truncated) = truncate_body(&long);
        assert!(truncated);
        assert_eq!(stored.chars().count(), MAX_BODY_CHARS);
    }

    #[test]
    fn collection_mapping_defaults_missing_fields() {
        let value = json!({ "id": "db-1", "title": [], "description": [] });
        let collection = collection_from(&value);
        assert_eq!(collection.id, "db-1");
        assert_eq!(collection.title, "Untitled");
        assert_eq!(collection.description, "No description");
    }

    #[test]
    fn database_title_is_extracted_from_rich_text() {
        let value = json!({
            "id": "db-2",
            "title": [ { "plain_text": "Projects" } ]
        });
        assert_eq!(result_title(&value), "Projects");
    }

    #[test]
    fn page_title_is_extracted_from_title_property() {
        let value = json!({
            "id": "page-1",
            "properties": {
                "Name": { "title": [ { "plain_text": "My Note" } ] }
            }
        });
        assert_eq!(result_title(&value), "My Note");
    }

    #[test]
    fn entry_mapping_parses_last_edited_time() {
        let value = json!({
            "id": "page-2",
            "url": "https://notion.so/page-2",
            "last_edited_time": "2024-03-01T12:00:00.000Z",
            "properties": { "Name": { "title": [ { "plain_text": "T" } ] } }
        });
        let entry = entry_from(&value);
        assert_eq!(entry.url, "https://notion.so/page-2");
        assert_eq!(entry.last_edited.to_rfc3339(), "2024-03-01T12:00:00+00:00");
    }
}
