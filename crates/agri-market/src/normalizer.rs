//! Price normalization pipeline
//!
//! Turns heterogeneous provider records into [`NormalizedPriceRecord`]s with
//! a single per-kilogram price. Records are handled independently; a
//! malformed record only loses the fields it could not supply.

use crate::api::DataGovClient;
use crate::config::MarketConfig;
use crate::error::{MarketError, Result};
use crate::fields::{Field, RawPriceRecord};
use crate::record::{MarketSnapshot, NormalizedPriceRecord};
use crate::units::{PerKg, to_per_kg};
use agri_core::{HttpTransport, ReqwestTransport, first_available};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Source figures available for picking a price
#[derive(Debug, Clone, Copy, Default)]
struct QuotedPrices {
    modal: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
}

/// Ways to derive the canonical price, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PriceBasis {
    Modal,
    MinMaxMean,
    MinOnly,
}

const PRICE_PRIORITY: &[PriceBasis] = &[PriceBasis::Modal, PriceBasis::MinMaxMean, PriceBasis::MinOnly];

impl PriceBasis {
    /// Per-kg price on this basis, if its inputs are present
    ///
    /// Each quoted figure is converted on its own before averaging.
    fn select(self, prices: &QuotedPrices, unit: Option<&str>) -> Option<PerKg> {
        match self {
            Self::Modal => prices.modal.map(|p| to_per_kg(p, unit)),
            Self::MinMaxMean => {
                let (min, max) = (prices.min?, prices.max?);
                let (min, max) = (to_per_kg(min, unit), to_per_kg(max, unit));
                Some(PerKg {
                    value: (min.value + max.value) / 2.0,
                    approximate: min.approximate || max.approximate,
                })
            }
            Self::MinOnly => prices.min.map(|p| to_per_kg(p, unit)),
        }
    }
}

/// Normalize a single raw record
pub fn normalize_record(raw: &RawPriceRecord) -> NormalizedPriceRecord {
    let unit = Field::Unit.text(raw);
    let prices = QuotedPrices {
        modal: Field::ModalPrice.number(raw),
        min: Field::MinPrice.number(raw),
        max: Field::MaxPrice.number(raw),
    };

    let per_kg = first_available(PRICE_PRIORITY, |basis| basis.select(&prices, unit.as_deref()))
        .filter(|p| p.value.is_finite() && p.value >= 0.0);

    NormalizedPriceRecord {
        commodity: Field::Commodity.text(raw).unwrap_or_default(),
        variety: Field::Variety.text(raw).unwrap_or_default(),
        state: Field::State.text(raw).unwrap_or_default(),
        district: Field::District.text(raw).unwrap_or_default(),
        market: Field::Market.text(raw).unwrap_or_default(),
        min_price: prices.min,
        max_price: prices.max,
        modal_price: prices.modal,
        unit: unit.unwrap_or_default(),
        arrival_date: Field::ArrivalDate.date(raw),
        price_per_kg: per_kg.map(|p| p.value),
        approximate: per_kg.is_some_and(|p| p.approximate),
    }
}

/// Normalize a batch, one output record per input record
pub fn normalize_records(raw: &[RawPriceRecord]) -> Vec<NormalizedPriceRecord> {
    raw.iter().map(normalize_record).collect()
}

/// Fetches a district's prices and normalizes them
///
/// Without an API key and resource id every fetch returns the
/// not-configured snapshot without touching the network.
#[derive(Clone)]
pub struct PriceNormalizer {
    client: Option<DataGovClient>,
}

impl PriceNormalizer {
    /// Create a normalizer that fetches through `transport`
    pub fn new(config: MarketConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
        config.validate()?;

        let client = match DataGovClient::new(&config, transport) {
            Ok(client) => Some(client),
            Err(MarketError::NotConfigured) => None,
            Err(e) => return Err(e),
        };

        Ok(Self { client })
    }

    /// Create a normalizer backed by a reqwest client
    pub fn from_config(config: MarketConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.request_timeout)?;
        Self::new(config, Arc::new(transport))
    }

    /// Whether fetching is possible
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Normalize records that were obtained elsewhere
    pub fn normalize_records(&self, raw: &[RawPriceRecord]) -> Vec<NormalizedPriceRecord> {
        normalize_records(raw)
    }

    /// Fetch the latest records for `district` and normalize them
    ///
    /// On any failure the snapshot is empty and carries the error message;
    /// stale prices are never returned as current.
    #[instrument(skip(self))]
    pub async fn fetch_and_normalize(&self, district: &str) -> MarketSnapshot {
        let Some(client) = &self.client else {
            warn!("Market API credentials not set");
            return MarketSnapshot::failure(MarketError::NotConfigured.to_string());
        };

        match client.fetch_records(district).await {
            Ok(raw) => {
                let records = normalize_records(&raw);
                info!("Normalized {} price records", records.len());
                MarketSnapshot::success(records)
            }
            Err(e) => {
                warn!("Market fetch failed: {}", e);
                MarketSnapshot::failure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agri_core::{HttpRequest, HttpResponse};
    use async_trait::async_trait;
    use mockall::mock;
    use serde_json::{Value, json};

    mock! {
        pub Transport {}

        #[async_trait]
        impl HttpTransport for Transport {
            async fn send(&self, request: HttpRequest) -> agri_core::Result<HttpResponse>;
        }
    }

    fn raw(value: Value) -> RawPriceRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn normalize_one(value: Value) -> NormalizedPriceRecord {
        normalize_record(&raw(value))
    }

    fn configured() -> MarketConfig {
        MarketConfig::builder()
            .api_key("secret")
            .resource_id("daily-prices")
            .api_base("https://example.test/resource")
            .build()
            .unwrap()
    }

    #[test]
    fn test_modal_per_quintal_string() {
        let record = normalize_one(json!({"modal_price": "4,500", "unit": "Quintal"}));
        assert_eq!(record.price_per_kg, Some(45.0));
        assert!(!record.approximate);
        assert_eq!(record.modal_price, Some(4500.0));
        assert_eq!(record.unit, "Quintal");
    }

    #[test]
    fn test_unitless_large_price_is_approximate() {
        let record = normalize_one(json!({"modal_price": 4500, "unit": ""}));
        assert_eq!(record.price_per_kg, Some(45.0));
        assert!(record.approximate);
    }

    #[test]
    fn test_unitless_small_price_is_exact() {
        let record = normalize_one(json!({"modal_price": 60}));
        assert_eq!(record.price_per_kg, Some(60.0));
        assert!(!record.approximate);
    }

    #[test]
    fn test_mean_of_min_and_max() {
        let record = normalize_one(json!({"min_price": 30, "max_price": 50, "unit": "kg"}));
        assert_eq!(record.price_per_kg, Some(40.0));
        assert!(!record.approximate);
        assert_eq!(record.modal_price, None);
    }

    #[test]
    fn test_unitless_mean_guesses_each_side_separately_and_may_mix_units() {
        let record = normalize_one(json!({"min_price": 800, "max_price": 1200}));
        assert_eq!(record.price_per_kg, Some(406.0));
        assert!(record.approximate);
    }

    #[test]
    fn test_min_only() {
        let record = normalize_one(json!({"min_price": "2,000", "unit": "Rs/Qtl"}));
        assert_eq!(record.price_per_kg, Some(20.0));
    }

    #[test]
    fn test_max_only_has_no_price() {
        let record = normalize_one(json!({"max_price": 50, "unit": "kg"}));
        assert_eq!(record.price_per_kg, None);
        assert_eq!(record.max_price, Some(50.0));
    }

    #[test]
    fn test_modal_beats_min_max() {
        let record = normalize_one(json!({
            "modal_price": 2500, "min_price": 2000, "max_price": 3000, "unit": "quintal"
        }));
        assert_eq!(record.price_per_kg, Some(25.0));
    }

    #[test]
    fn test_tonne_alias_fields() {
        let record = normalize_one(json!({
            "commodity_name": "Maize",
            "modal_price_in_rupees": 21_000,
            "unit_of_price": "Metric Ton"
        }));
        assert_eq!(record.commodity, "Maize");
        assert_eq!(record.price_per_kg, Some(21.0));
    }

    #[test]
    fn test_empty_record() {
        let record = normalize_one(json!({}));
        assert_eq!(record.commodity, "");
        assert_eq!(record.variety, "");
        assert_eq!(record.unit, "");
        assert_eq!(record.min_price, None);
        assert_eq!(record.max_price, None);
        assert_eq!(record.modal_price, None);
        assert_eq!(record.price_per_kg, None);
        assert_eq!(record.arrival_date, None);
        assert!(!record.approximate);
    }

    #[test]
    fn test_negative_price_is_dropped() {
        let record = normalize_one(json!({"modal_price": "-40", "unit": "kg"}));
        assert_eq!(record.modal_price, Some(-40.0));
        assert_eq!(record.price_per_kg, None);
    }

    #[test]
    fn test_malformed_record_does_not_abort_batch() {
        let batch = vec![
            raw(json!({"modal_price": "n/a", "unit": ["kg"]})),
            raw(json!({"commodity": "Onion", "modal_price": 35, "unit": "kg"})),
        ];
        let records = normalize_records(&batch);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].price_per_kg, None);
        assert_eq!(records[1].commodity, "Onion");
        assert_eq!(records[1].price_per_kg, Some(35.0));
    }

    #[test]
    fn test_renormalizing_is_a_fixed_point() {
        let batch = vec![
            raw(json!({"modal_price": "4,500", "unit": "Quintal"})),
            raw(json!({"modal_price": 4500})),
            raw(json!({"min_price": 30, "max_price": 50, "unit": "kg"})),
            raw(json!({"modal_price": 18_500, "unit": "tonne"})),
        ];

        for first in normalize_records(&batch) {
            let second = normalize_record(&first.to_canonical_raw());
            assert_eq!(second.price_per_kg, first.price_per_kg);
            assert!(!second.approximate);
        }
    }

    #[tokio::test]
    async fn test_not_configured_snapshot() {
        let normalizer =
            PriceNormalizer::new(MarketConfig::default(), Arc::new(MockTransport::new())).unwrap();

        assert!(!normalizer.is_configured());
        let snapshot = normalizer.fetch_and_normalize("Salem").await;
        assert!(snapshot.records.is_empty());
        assert_eq!(snapshot.error.as_deref(), Some("Market API not configured."));
    }

    #[tokio::test]
    async fn test_fetch_and_normalize() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|r| r.url.contains("filters%5Bdistrict.keyword%5D=Salem"))
            .times(1)
            .returning(|_| {
                Ok(HttpResponse::new(
                    200,
                    json!({
                        "records": [
                            {
                                "district": "Salem",
                                "commodity": "Paddy(Dhan)(Common)",
                                "arrival_date": "07/03/2024",
                                "min_price": "2000",
                                "max_price": "2400",
                                "modal_price": "2200"
                            },
                            {}
                        ]
                    })
                    .to_string(),
                ))
            });

        let normalizer = PriceNormalizer::new(configured(), Arc::new(transport)).unwrap();
        let snapshot = normalizer.fetch_and_normalize("Salem").await;

        assert!(snapshot.is_success());
        assert!(snapshot.last_updated.is_some());
        assert_eq!(snapshot.records.len(), 2);
        assert_eq!(snapshot.records[0].price_per_kg, Some(22.0));
        assert!(snapshot.records[0].approximate);
        assert_eq!(snapshot.records[1].price_per_kg, None);
    }

    #[tokio::test]
    async fn test_fetch_failure_clears_records() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Err(agri_core::Error::Generic("dns failure".to_string())));

        let normalizer = PriceNormalizer::new(configured(), Arc::new(transport)).unwrap();
        let snapshot = normalizer.fetch_and_normalize("Salem").await;

        assert!(snapshot.records.is_empty());
        assert!(snapshot.last_updated.is_none());
        assert_eq!(snapshot.error.as_deref(), Some("Network error: dns failure"));
    }

    #[tokio::test]
    async fn test_fetch_parse_failure() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, "<html>maintenance</html>")));

        let normalizer = PriceNormalizer::new(configured(), Arc::new(transport)).unwrap();
        let snapshot = normalizer.fetch_and_normalize("").await;

        assert!(snapshot.records.is_empty());
        assert!(snapshot.error.unwrap().starts_with("Unexpected response"));
    }
}
