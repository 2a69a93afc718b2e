//! Configuration for market price fetching

use crate::error::{MarketError, Result};
use std::time::Duration;

const DEFAULT_API_BASE: &str = "https://api.data.gov.in/resource";

/// Configuration for the market price pipeline
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// data.gov.in API key (optional; fetches report not-configured without it)
    pub api_key: Option<String>,

    /// Resource (dataset) identifier (optional, same as above)
    pub resource_id: Option<String>,

    /// Base URL of the resource API
    pub api_base: String,

    /// Maximum records per fetch
    pub limit: u32,

    /// Request budget per minute
    pub requests_per_minute: u32,

    /// Request timeout duration
    pub request_timeout: Duration,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            resource_id: None,
            api_base: DEFAULT_API_BASE.to_string(),
            limit: 100,
            requests_per_minute: 30,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl MarketConfig {
    /// Create a new configuration builder
    pub fn builder() -> MarketConfigBuilder {
        MarketConfigBuilder::default()
    }

    /// Load credentials from `DATA_GOV_API_KEY`, `DATA_GOV_RESOURCE_ID` and
    /// optionally `DATA_GOV_API_BASE`
    pub fn from_env() -> Self {
        let mut config = Self {
            api_key: non_blank(std::env::var("DATA_GOV_API_KEY").ok()),
            resource_id: non_blank(std::env::var("DATA_GOV_RESOURCE_ID").ok()),
            ..Self::default()
        };
        if let Ok(api_base) = std::env::var("DATA_GOV_API_BASE") {
            config.api_base = api_base;
        }
        config
    }

    /// Whether both the API key and the resource id are present
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.resource_id.is_some()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_base.trim().is_empty() {
            return Err(MarketError::ConfigError(
                "api_base must not be empty".to_string(),
            ));
        }

        if self.limit == 0 {
            return Err(MarketError::ConfigError(
                "limit must be greater than 0".to_string(),
            ));
        }

        if self.requests_per_minute == 0 {
            return Err(MarketError::ConfigError(
                "requests_per_minute must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Builder for MarketConfig
#[derive(Debug, Default)]
pub struct MarketConfigBuilder {
    api_key: Option<String>,
    resource_id: Option<String>,
    api_base: Option<String>,
    limit: Option<u32>,
    requests_per_minute: Option<u32>,
    request_timeout: Option<Duration>,
}

impl MarketConfigBuilder {
    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the resource id
    pub fn resource_id(mut self, id: impl Into<String>) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    /// Set the API base URL
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set the record limit
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the request budget per minute
    pub fn requests_per_minute(mut self, rpm: u32) -> Self {
        self.requests_per_minute = Some(rpm);
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<MarketConfig> {
        let defaults = MarketConfig::default();

        let config = MarketConfig {
            api_key: non_blank(self.api_key),
            resource_id: non_blank(self.resource_id),
            api_base: self.api_base.unwrap_or(defaults.api_base),
            limit: self.limit.unwrap_or(defaults.limit),
            requests_per_minute: self.requests_per_minute.unwrap_or(defaults.requests_per_minute),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}
