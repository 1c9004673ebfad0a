//! Document workspace configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Document workspace configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceConfig {
    /// Integration token.
    pub token: Secret<String>,

    /// Collection (database) new notes are created in.
    pub default_collection: String,

    /// Request timeout in seconds for workspace calls.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl WorkspaceConfig {
    /// Get timeout as Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Exposes the integration token (for building the client).
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }

    /// Validate workspace configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.token().is_empty() {
            return Err(ValidationError::MissingRequired(
                "CONCIERGE__WORKSPACE__TOKEN",
            ));
        }
        if self.default_collection.is_empty() {
            return Err(ValidationError::MissingRequired(
                "CONCIERGE__WORKSPACE__DEFAULT_COLLECTION",
            ));
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    30
}
