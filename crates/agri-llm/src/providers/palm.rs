//! Generative Language (text-bison) provider
//!
//! Implements [`TextProvider`] over the `:generate` method, walking every
//! configured (API version, model) pair in order until one answers.

use crate::completion::{GenerateRequest, extract_text};
use crate::{AssistantConfig, Credential, EndpointCandidate, Generation, LlmError, Result, TextProvider};
use agri_core::{HttpRequest, HttpTransport, ReqwestTransport, first_success};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Provider for Google's Generative Language API
pub struct PalmProvider {
    transport: Arc<dyn HttpTransport>,
    config: AssistantConfig,
    credential: Credential,
    endpoints: Vec<EndpointCandidate>,
}

impl PalmProvider {
    /// Create a provider that sends requests through `transport`
    ///
    /// Fails with [`LlmError::NotConfigured`] when the config has no
    /// credential.
    pub fn new(config: AssistantConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        config.validate()?;

        let credential = config
            .api_key
            .as_deref()
            .map(Credential::from_raw)
            .ok_or(LlmError::NotConfigured)?;

        let endpoints = EndpointCandidate::cross_product(&config.api_versions, &config.models);

        Ok(Self {
            transport,
            config,
            credential,
            endpoints,
        })
    }

    /// Create a provider backed by a reqwest client
    pub fn from_config(config: AssistantConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Self::new(config, Arc::new(transport))
    }

    /// Endpoints in the order they are tried
    pub fn endpoints(&self) -> &[EndpointCandidate] {
        &self.endpoints
    }

    fn build_request(&self, endpoint: &EndpointCandidate, prompt: &str) -> Result<HttpRequest> {
        let payload = GenerateRequest::new(
            prompt,
            self.config.temperature,
            self.config.max_output_tokens,
        );
        let body = serde_json::to_value(&payload).map_err(agri_core::Error::from)?;

        let (url, authorization) = self
            .credential
            .authorize(&endpoint.url(&self.config.api_base))?;

        let mut request = HttpRequest::post_json(url, body);
        if let Some(value) = authorization {
            request = request.header("Authorization", value);
        }
        Ok(request)
    }

    async fn try_endpoint(&self, endpoint: &EndpointCandidate, prompt: &str) -> Result<String> {
        let request = self.build_request(endpoint, prompt)?;
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(match response.status {
                401 | 403 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimitExceeded(response.body),
                404 => LlmError::ModelNotFound(endpoint.model.clone()),
                status => LlmError::RequestFailed(format!("HTTP {status}")),
            });
        }

        let body: Value = response.json().map_err(|e| {
            LlmError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        Ok(extract_text(&body))
    }
}

#[async_trait]
impl TextProvider for PalmProvider {
    #[instrument(skip(self, prompt), fields(endpoints = self.endpoints.len()))]
    async fn generate(&self, prompt: &str) -> Result<Generation> {
        debug!("Sending prompt to generation endpoints");

        let outcome = first_success("generate", &self.endpoints, |endpoint| {
            self.try_endpoint(endpoint, prompt)
        })
        .await;

        match outcome {
            Ok(success) => {
                let endpoint = self.endpoints[success.index].clone();
                info!("Answered by endpoint {}", endpoint);
                Ok(Generation {
                    text: success.value,
                    endpoint,
                })
            }
            Err(exhausted) => Err(LlmError::AllEndpointsFailed {
                attempts: exhausted.attempts(),
            }),
        }
    }

    fn name(&self) -> &str {
        "generative-language"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agri_core::HttpResponse;
    use mockall::{Sequence, mock};
    use serde_json::json;

    mock! {
        pub Transport {}

        #[async_trait]
        impl HttpTransport for Transport {
            async fn send(&self, request: HttpRequest) -> agri_core::Result<HttpResponse>;
        }
    }

    const BASE: &str = "https://example.test";

    fn config(key: &str) -> AssistantConfig {
        AssistantConfig::builder()
            .api_key(key)
            .api_base(BASE)
            .build()
            .unwrap()
    }

    #[test]
    fn test_requires_credential() {
        let result = PalmProvider::new(AssistantConfig::default(), Arc::new(MockTransport::new()));
        assert!(matches!(result, Err(LlmError::NotConfigured)));
    }

    #[test]
    fn test_provider_creation() {
        let provider = PalmProvider::from_config(config("AIzaKey")).unwrap();
        assert_eq!(provider.name(), "generative-language");
        assert_eq!(provider.endpoints().len(), 4);
    }

    #[test]
    fn test_request_body_and_key_param() {
        let provider = PalmProvider::new(config("AIzaKey"), Arc::new(MockTransport::new())).unwrap();
        let request = provider
            .build_request(&provider.endpoints()[0], "rice yield")
            .unwrap();

        assert_eq!(
            request.url,
            "https://example.test/v1beta2/models/text-bison-001:generate?key=AIzaKey"
        );
        assert!(request.header_value("Authorization").is_none());
        assert_eq!(request.header_value("Content-Type"), Some("application/json"));
        assert_eq!(
            request.body,
            Some(json!({
                "prompt": {"text": "rice yield"},
                "temperature": 0.2,
                "maxOutputTokens": 512
            }))
        );
    }

    #[tokio::test]
    async fn test_falls_through_to_last_endpoint() {
        let mut transport = MockTransport::new();
        let mut seq = Sequence::new();

        let failing = [
            "https://example.test/v1beta2/models/text-bison-001:generate?key=AIzaKey",
            "https://example.test/v1beta2/models/text-bison-001:generate?key=AIzaKey",
            "https://example.test/v1/models/text-bison-001:generate?key=AIzaKey",
        ];
        for url in failing {
            transport
                .expect_send()
                .withf(move |r| r.url == url)
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(HttpResponse::new(500, "internal")));
        }
        transport
            .expect_send()
            .withf(|r| r.url == "https://example.test/v1/models/text-bison-001:generate?key=AIzaKey")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Ok(HttpResponse::new(
                    200,
                    r#"{"candidates":[{"content":[{"text":"ok"}]}]}"#,
                ))
            });

        let provider = PalmProvider::new(config("AIzaKey"), Arc::new(transport)).unwrap();
        let generation = provider.generate("rice yield").await.unwrap();

        assert_eq!(generation.text, "ok");
        assert_eq!(
            generation.endpoint,
            EndpointCandidate::new("v1", "models/text-bison-001")
        );
    }

    #[tokio::test]
    async fn test_transport_and_parse_errors_are_skipped() {
        let mut transport = MockTransport::new();
        let mut seq = Sequence::new();

        transport
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(agri_core::Error::Generic("connection refused".to_string())));
        transport
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(HttpResponse::new(200, "<html>not json</html>")));
        transport
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(HttpResponse::new(200, r#"{"output":[{"content":[{"text":"third"}]}]}"#)));

        let provider = PalmProvider::new(config("AIzaKey"), Arc::new(transport)).unwrap();
        let generation = provider.generate("wheat").await.unwrap();

        assert_eq!(generation.text, "third");
        assert_eq!(generation.endpoint, EndpointCandidate::new("v1", "text-bison-001"));
    }

    #[tokio::test]
    async fn test_all_endpoints_fail() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(4)
            .returning(|_| Ok(HttpResponse::new(404, "not found")));

        let provider = PalmProvider::new(config("AIzaKey"), Arc::new(transport)).unwrap();
        let result = provider.generate("maize").await;

        assert!(matches!(result, Err(LlmError::AllEndpointsFailed { attempts: 4 })));
    }

    #[tokio::test]
    async fn test_bearer_token_header() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|r| {
                r.url == "https://example.test/v1beta2/models/text-bison-001:generate"
                    && r.header_value("Authorization") == Some("Bearer oauth-token")
            })
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, r#"{"candidates":[{"content":[{"text":"hi"}]}]}"#)));

        let provider = PalmProvider::new(config("oauth-token"), Arc::new(transport)).unwrap();
        assert_eq!(provider.generate("paddy").await.unwrap().text, "hi");
    }

    #[tokio::test]
    async fn test_reconfigured_lists_limit_attempts() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Ok(HttpResponse::new(503, "")));

        let config = AssistantConfig::builder()
            .api_key("AIzaKey")
            .api_base(BASE)
            .api_versions(["v1"])
            .models(["text-bison-001"])
            .build()
            .unwrap();

        let provider = PalmProvider::new(config, Arc::new(transport)).unwrap();
        let result = provider.generate("crop").await;
        assert!(matches!(result, Err(LlmError::AllEndpointsFailed { attempts: 1 })));
    }
}
