//! Error types for assistant operations
//!
//! These never reach the caller of [`crate::AssistantRouter::resolve`]; they
//! describe why a single endpoint attempt failed so it can be logged.

use thiserror::Error;

/// Result type for assistant operations
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur while talking to a generation endpoint
#[derive(Error, Debug)]
pub enum LlmError {
    /// No credential was configured
    #[error("AI credential not configured")]
    NotConfigured,

    /// API request failed
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Invalid API key or authentication failed
    #[error("Invalid API key or authentication failed")]
    AuthenticationFailed,

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Model not found at this endpoint
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Every endpoint candidate failed
    #[error("All {attempts} endpoint attempts failed")]
    AllEndpointsFailed { attempts: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Transport-level failure
    #[error(transparent)]
    Transport(#[from] agri_core::Error),
}

impl From<url::ParseError> for LlmError {
    fn from(err: url::ParseError) -> Self {
        LlmError::Transport(err.into())
    }
}
