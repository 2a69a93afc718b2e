//! Endpoint candidates and credential handling

use std::fmt;
use url::Url;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_API_VERSIONS: &[&str] = &["v1beta2", "v1"];
pub const DEFAULT_MODELS: &[&str] = &["text-bison-001", "models/text-bison-001"];

/// Raw API keys carry this prefix; anything else is treated as an OAuth token
const API_KEY_PREFIX: &str = "AIza";

/// One (API version, model) pair to try
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointCandidate {
    pub api_version: String,
    pub model: String,
}

impl EndpointCandidate {
    pub fn new(api_version: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
            model: model.into(),
        }
    }

    /// All pairs in priority order: versions outer, models inner
    pub fn cross_product(versions: &[String], models: &[String]) -> Vec<Self> {
        versions
            .iter()
            .flat_map(|version| models.iter().map(move |model| Self::new(version, model)))
            .collect()
    }

    /// Path of the generate method relative to the API base
    ///
    /// Model names that already carry a path segment (`models/...`) are used
    /// as-is; bare names are placed under `models/`.
    pub fn path(&self) -> String {
        if self.model.contains('/') {
            format!("{}/{}:generate", self.api_version, self.model)
        } else {
            format!("{}/models/{}:generate", self.api_version, self.model)
        }
    }

    /// Full URL of the generate method under `api_base`
    pub fn url(&self, api_base: &str) -> String {
        format!("{}/{}", api_base.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for EndpointCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.api_version, self.model)
    }
}

/// How the credential is attached to each request
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Raw API key, sent as the `key` query parameter
    ApiKey(String),
    /// Anything else, sent as `Authorization: Bearer <token>`
    Bearer(String),
}

impl Credential {
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw.starts_with(API_KEY_PREFIX) {
            Self::ApiKey(raw)
        } else {
            Self::Bearer(raw)
        }
    }

    /// Apply the credential to a request URL
    ///
    /// Returns the final URL and, for bearer tokens, the Authorization header
    /// value.
    pub fn authorize(&self, url: &str) -> Result<(String, Option<String>), url::ParseError> {
        match self {
            Self::ApiKey(key) => {
                let mut url = Url::parse(url)?;
                url.query_pairs_mut().append_pair("key", key);
                Ok((url.into(), None))
            }
            Self::Bearer(token) => Ok((url.to_string(), Some(format!("Bearer {token}")))),
        }
    }
}

// Keep secrets out of logs
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(***)"),
            Self::Bearer(_) => f.write_str("Bearer(***)"),
        }
    }
}
