//! Assistant query router for agri-assist
//!
//! This crate answers free-text farming questions. Queries that need remote
//! knowledge are sent to a text generation API, trying each configured
//! (API version, model) endpoint in priority order. When every endpoint
//! fails, or the query is local to begin with, fixed keyword tables answer
//! instead. Callers always get a string back.
//!
//! - Query classification (remote vs. local)
//! - Endpoint candidates and credential handling
//! - Generation request/response wire types
//! - Provider trait and the generative-language implementation
//! - Keyword responders used as fallbacks

pub mod completion;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod provider;
pub mod providers;
pub mod responder;
pub mod router;

// Re-export main types
pub use completion::{GenerateRequest, extract_text};
pub use config::{AssistantConfig, AssistantConfigBuilder};
pub use endpoint::{Credential, EndpointCandidate};
pub use error::{LlmError, Result};
pub use provider::{Generation, TextProvider};
pub use providers::PalmProvider;
pub use responder::{KeywordTable, LOCAL_RESPONSES, NOT_CONFIGURED, REMOTE_FALLBACK_RESPONSES};
pub use router::{AnswerSource, AssistantRouter, QueryRoute, Resolution, classify};
