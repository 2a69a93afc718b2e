//! Assistant router
//!
//! Decides how a query is answered:
//!
//! 1. No credential configured: [`NOT_CONFIGURED`], no network call
//! 2. Local query: [`LOCAL_RESPONSES`]
//! 3. Remote query: the provider's endpoint chain, then
//!    [`REMOTE_FALLBACK_RESPONSES`] when every endpoint failed
//!
//! Every path ends in a string; nothing is returned as an error.

use crate::{
    AssistantConfig, LOCAL_RESPONSES, NOT_CONFIGURED, PalmProvider, REMOTE_FALLBACK_RESPONSES,
    Result, TextProvider,
};
use agri_core::HttpTransport;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Queries mentioning any of these need remote knowledge
const REMOTE_KEYWORDS: &[&str] = &["crop", "paddy", "rice", "maize", "wheat"];

/// Where a query should be answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryRoute {
    /// Ask the remote generation endpoints
    Remote,
    /// Answer from the local keyword table
    Local,
}

/// Classify a query by case-insensitive substring match on [`REMOTE_KEYWORDS`]
pub fn classify(query: &str) -> QueryRoute {
    let query = query.to_lowercase();
    if REMOTE_KEYWORDS.iter().any(|kw| query.contains(kw)) {
        QueryRoute::Remote
    } else {
        QueryRoute::Local
    }
}

/// Which path produced an answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerSource {
    /// No credential configured
    NotConfigured,
    /// Local keyword table
    Local,
    /// A remote endpoint answered
    Remote { api_version: String, model: String },
    /// Remote keyword table after every endpoint failed
    RemoteFallback,
}

/// An answer and how it was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub text: String,
    pub source: AnswerSource,
}

impl Resolution {
    fn new(text: impl Into<String>, source: AnswerSource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }
}

/// Routes farming questions to remote generation or local answers
///
/// Stateless between calls; safe to share behind an `Arc`.
pub struct AssistantRouter {
    provider: Option<Arc<dyn TextProvider>>,
}

impl AssistantRouter {
    /// Create a router that sends remote queries through `transport`
    ///
    /// Without a credential in `config` the router never issues a request.
    pub fn new(config: AssistantConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        if !config.has_credential() {
            return Ok(Self::unconfigured());
        }
        let provider = PalmProvider::new(config, transport)?;
        Ok(Self::with_provider(Arc::new(provider)))
    }

    /// Create a router backed by a reqwest client
    pub fn from_config(config: AssistantConfig) -> Result<Self> {
        if !config.has_credential() {
            return Ok(Self::unconfigured());
        }
        let provider = PalmProvider::from_config(config)?;
        Ok(Self::with_provider(Arc::new(provider)))
    }

    /// Create a router around an existing provider
    pub fn with_provider(provider: Arc<dyn TextProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Create a router with no credential
    pub fn unconfigured() -> Self {
        Self { provider: None }
    }

    /// Whether remote generation is available
    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Answer a query
    pub async fn resolve(&self, query: &str) -> String {
        self.resolve_detailed(query).await.text
    }

    /// Answer a query and report which path answered
    #[instrument(skip(self, query), fields(query_len = query.len()))]
    pub async fn resolve_detailed(&self, query: &str) -> Resolution {
        let Some(provider) = &self.provider else {
            warn!("AI credential not set; skipping remote generation");
            return Resolution::new(NOT_CONFIGURED, AnswerSource::NotConfigured);
        };

        let route = classify(query);
        debug!("Query classified as {:?}", route);

        if route == QueryRoute::Local {
            return Resolution::new(LOCAL_RESPONSES.respond(query), AnswerSource::Local);
        }

        match provider.generate(query).await {
            Ok(generation) => {
                info!("Remote answer from {} via {}", generation.endpoint, provider.name());
                Resolution::new(
                    generation.text,
                    AnswerSource::Remote {
                        api_version: generation.endpoint.api_version,
                        model: generation.endpoint.model,
                    },
                )
            }
            Err(e) => {
                warn!("Remote generation failed, using local fallback: {}", e);
                Resolution::new(
                    REMOTE_FALLBACK_RESPONSES.respond(query),
                    AnswerSource::RemoteFallback,
                )
            }
        }
    }
}
