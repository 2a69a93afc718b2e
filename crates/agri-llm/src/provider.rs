//! Text provider trait definition

use crate::{EndpointCandidate, Result};
use async_trait::async_trait;

/// A successful remote answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// Extracted answer text
    pub text: String,
    /// Endpoint that produced it
    pub endpoint: EndpointCandidate,
}

/// Trait for remote text generation backends
///
/// Implementations own their retry/fallback policy across endpoints and
/// report only the final outcome.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate an answer for `prompt`
    ///
    /// # Arguments
    ///
    /// * `prompt` - The user's query, passed through unchanged
    ///
    /// # Returns
    ///
    /// The first successful generation, or an error when no endpoint answered
    async fn generate(&self, prompt: &str) -> Result<Generation>;

    /// Get the provider name
    fn name(&self) -> &str;
}
