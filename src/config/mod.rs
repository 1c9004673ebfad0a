//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `CONCIERGE` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use concierge::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod workspace;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use workspace::WorkspaceConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// AI vendor configuration (DeepSeek/Eden keys, timeout).
    #[serde(default)]
    pub ai: AiConfig,

    /// Document workspace configuration (token, default collection).
    pub workspace: WorkspaceConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file if present (for development), then reads
    /// environment variables with the `CONCIERGE` prefix:
    ///
    /// - `CONCIERGE__AI__DEEPSEEK_API_KEY=...` -> `ai.deepseek_api_key`
    /// - `CONCIERGE__WORKSPACE__TOKEN=...` -> `workspace.token`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CONCIERGE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values semantically.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.workspace.validate()?;
        Ok(())
    }
}
