//! data.gov.in resource API client

use crate::config::MarketConfig;
use crate::error::{MarketError, Result};
use crate::fields::RawPriceRecord;
use agri_core::{HttpRequest, HttpTransport};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use serde::Deserialize;
use serde_json::Value;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, instrument};
use url::Url;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Client for one tabular resource on data.gov.in
#[derive(Clone)]
pub struct DataGovClient {
    transport: Arc<dyn HttpTransport>,
    api_base: String,
    api_key: String,
    resource_id: String,
    limit: u32,
    rate_limiter: SharedRateLimiter,
}

#[derive(Debug, Deserialize)]
struct RecordsResponse {
    records: Vec<Value>,
}

impl DataGovClient {
    /// Create a client from `config`
    ///
    /// Fails with [`MarketError::NotConfigured`] unless both the API key and
    /// the resource id are set.
    pub fn new(config: &MarketConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        let (Some(api_key), Some(resource_id)) = (&config.api_key, &config.resource_id) else {
            return Err(MarketError::NotConfigured);
        };

        let quota = Quota::per_minute(
            NonZeroU32::new(config.requests_per_minute).unwrap_or(NonZeroU32::MIN),
        );

        Ok(Self {
            transport,
            api_base: config.api_base.clone(),
            api_key: api_key.clone(),
            resource_id: resource_id.clone(),
            limit: config.limit,
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// URL for one fetch; the district filter is added only when non-empty
    pub fn request_url(&self, district: &str) -> Result<String> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            self.resource_id
        ))?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("api-key", &self.api_key)
                .append_pair("format", "json")
                .append_pair("limit", &self.limit.to_string());
            let district = district.trim();
            if !district.is_empty() {
                query.append_pair("filters[district.keyword]", district);
            }
        }

        Ok(url.into())
    }

    /// Fetch the raw records for `district`
    ///
    /// Entries that are not JSON objects come back as empty records so a
    /// single odd row does not fail the batch.
    #[instrument(skip(self))]
    pub async fn fetch_records(&self, district: &str) -> Result<Vec<RawPriceRecord>> {
        self.rate_limiter.until_ready().await;

        let request = HttpRequest::get(self.request_url(district)?);
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(MarketError::ApiError(format!("HTTP {}", response.status)));
        }

        let data: RecordsResponse = response
            .json()
            .map_err(|e| MarketError::UnexpectedResponse(e.to_string()))?;

        debug!("Fetched {} raw records", data.records.len());

        Ok(data
            .records
            .into_iter()
            .map(|value| match value {
                Value::Object(map) => map,
                _ => RawPriceRecord::new(),
            })
            .collect())
    }
}
