//! Configuration for the assistant router

use crate::endpoint::{DEFAULT_API_BASE, DEFAULT_API_VERSIONS, DEFAULT_MODELS};
use crate::{LlmError, Result};
use std::time::Duration;

const DEFAULT_TEMPERATURE: f64 = 0.2;
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 512;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the assistant router
///
/// Passed explicitly to [`crate::AssistantRouter`]; the only environment
/// lookup happens in [`AssistantConfig::from_env`].
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Credential for the generation API
    ///
    /// A key starting with `AIza` is sent as the `key` query parameter,
    /// anything else as a bearer token. `None` disables remote calls.
    pub api_key: Option<String>,

    /// Base URL of the generation API (default: "https://generativelanguage.googleapis.com")
    pub api_base: String,

    /// API versions to try, outer loop (default: v1beta2, v1)
    pub api_versions: Vec<String>,

    /// Model names to try, inner loop (default: text-bison-001, models/text-bison-001)
    pub models: Vec<String>,

    /// Sampling temperature (default: 0.2)
    pub temperature: f64,

    /// Maximum tokens to generate (default: 512)
    pub max_output_tokens: u32,

    /// Per-request timeout (default: 30s)
    pub timeout: Duration,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            api_versions: DEFAULT_API_VERSIONS.iter().map(ToString::to_string).collect(),
            models: DEFAULT_MODELS.iter().map(ToString::to_string).collect(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AssistantConfig {
    /// Create a config with the given credential and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: normalize_key(Some(api_key.into())),
            ..Self::default()
        }
    }

    /// Create a new configuration builder
    pub fn builder() -> AssistantConfigBuilder {
        AssistantConfigBuilder::default()
    }

    /// Create config from environment variables
    ///
    /// Reads the credential from `GEMINI_API_KEY` and optionally the base URL
    /// from `GEMINI_API_BASE`. A missing or blank key is not an error: the
    /// router then answers with the not-configured message.
    pub fn from_env() -> Self {
        let mut config = Self {
            api_key: normalize_key(std::env::var("GEMINI_API_KEY").ok()),
            ..Self::default()
        };
        if let Ok(api_base) = std::env::var("GEMINI_API_BASE") {
            config.api_base = api_base;
        }
        config
    }

    /// Whether a credential is present
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_base.trim().is_empty() {
            return Err(LlmError::ConfigurationError(
                "api_base must not be empty".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(LlmError::ConfigurationError(format!(
                "temperature must be within 0.0..=1.0, got {}",
                self.temperature
            )));
        }

        if self.max_output_tokens == 0 {
            return Err(LlmError::ConfigurationError(
                "max_output_tokens must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Blank keys count as absent; anything else is kept verbatim
fn normalize_key(key: Option<String>) -> Option<String> {
    key.filter(|k| !k.trim().is_empty())
}

/// Builder for AssistantConfig
#[derive(Debug, Default)]
pub struct AssistantConfigBuilder {
    api_key: Option<String>,
    api_base: Option<String>,
    api_versions: Option<Vec<String>>,
    models: Option<Vec<String>>,
    temperature: Option<f64>,
    max_output_tokens: Option<u32>,
    timeout: Option<Duration>,
}

impl AssistantConfigBuilder {
    /// Set the API credential
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the API base URL
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set the API versions to try, in priority order
    pub fn api_versions<I, S>(mut self, versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.api_versions = Some(versions.into_iter().map(Into::into).collect());
        self
    }

    /// Set the model names to try, in priority order
    pub fn models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.models = Some(models.into_iter().map(Into::into).collect());
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of output tokens
    pub fn max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = Some(tokens);
        self
    }

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AssistantConfig> {
        let defaults = AssistantConfig::default();

        let config = AssistantConfig {
            api_key: normalize_key(self.api_key),
            api_base: self.api_base.unwrap_or(defaults.api_base),
            api_versions: self.api_versions.unwrap_or(defaults.api_versions),
            models: self.models.unwrap_or(defaults.models),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            max_output_tokens: self.max_output_tokens.unwrap_or(defaults.max_output_tokens),
            timeout: self.timeout.unwrap_or(defaults.timeout),
        };

        config.validate()?;
        Ok(config)
    }
}
