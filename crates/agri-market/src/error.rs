//! Error types for market price operations

use thiserror::Error;

/// Market price pipeline errors
///
/// These are turned into the `error` string of a
/// [`crate::MarketSnapshot`]; they never escape `fetch_and_normalize`.
#[derive(Debug, Error)]
pub enum MarketError {
    /// API key or resource id missing
    #[error("Market API not configured.")]
    NotConfigured,

    /// Provider answered with a non-success status
    #[error("API error: {0}")]
    ApiError(String),

    /// Response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Network, URL or serialization failure
    #[error("Network error: {0}")]
    Transport(#[from] agri_core::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for market operations
pub type Result<T> = std::result::Result<T, MarketError>;

impl From<url::ParseError> for MarketError {
    fn from(err: url::ParseError) -> Self {
        MarketError::Transport(err.into())
    }
}
