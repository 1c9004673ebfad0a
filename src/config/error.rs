//! Configuration error types

use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The underlying loader failed (missing variable, bad type).
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors raised by semantic validation of loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required value is absent or empty.
    #[error("missing required configuration: {0}")]
    MissingRequired(&'static str),

    /// No AI vendor has a usable API key.
    #[error("no AI provider is configured; set a DeepSeek or Eden API key")]
    NoProviderConfigured,

    /// A value is present but unusable.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Which field failed.
        field: &'static str,
        /// Why it failed.
        reason: String,
    },
}
