//! AI vendor configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// AI vendor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// DeepSeek API key.
    pub deepseek_api_key: Option<Secret<String>>,

    /// Eden AI API key (text generation and sentiment analysis).
    pub eden_api_key: Option<Secret<String>>,

    /// Request timeout in seconds for vendor calls.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// DeepSeek key, if a non-empty one is configured.
    pub fn deepseek_api_key(&self) -> Option<&str> {
        self.deepseek_api_key
            .as_ref()
            .map(|key| key.expose_secret().as_str())
            .filter(|key| !key.is_empty())
    }

    /// Eden key, if a non-empty one is configured.
    pub fn eden_api_key(&self) -> Option<&str> {
        self.eden_api_key
            .as_ref()
            .map(|key| key.expose_secret().as_str())
            .filter(|key| !key.is_empty())
    }

    /// Validate AI configuration.
    ///
    /// Both vendors are load-bearing: DeepSeek is the default chat
    /// provider, Eden also serves the sentiment pass.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.deepseek_api_key().is_none() && self.eden_api_key().is_none() {
            return Err(ValidationError::NoProviderConfigured);
        }
        if self.deepseek_api_key().is_none() {
            return Err(ValidationError::MissingRequired(
                "CONCIERGE__AI__DEEPSEEK_API_KEY",
            ));
        }
        if self.eden_api_key().is_none() {
            return Err(ValidationError::MissingRequired(
                "CONCIERGE__AI__EDEN_API_KEY",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidValue {
                field: "ai.timeout_secs",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            deepseek_api_key: None,
            eden_api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_keys(deepseek: Option<&str>, eden: Option<&str>) -> AiConfig {
        AiConfig {
            deepseek_api_key: deepseek.map(|k| Secret::new(k.to_string())),
            eden_api_key: eden.map(|k| Secret::new(k.to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn default_timeout_is_thirty_seconds() {
        assert_eq!(AiConfig::default().timeout(), Duration::from_secs(30));
    }

    #[test]
    fn empty_keys_count_as_missing() {
        let config = with_keys(Some(""), Some("k"));
        assert!(config.deepseek_api_key().is_none());
        assert!(config.eden_api_key().is_some());
    }

    #[test]
    fn validation_requires_both_vendors() {
        assert_eq!(
            with_keys(None, None).validate(),
            Err(ValidationError::NoProviderConfigured)
        );
        assert!(matches!(
            with_keys(None, Some("e")).validate(),
            Err(ValidationError::MissingRequired(_))
        ));
        assert!(matches!(
            with_keys(Some("d"), None).validate(),
            Err(ValidationError::MissingRequired(_))
        ));
        assert!(with_keys(Some("d"), Some("e")).validate().is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = AiConfig {
            timeout_secs: 0,
            ..with_keys(Some("d"), Some("e"))
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidValue { .. })
        ));
    }
}
