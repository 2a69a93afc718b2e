//! Normalized price records and fetch snapshots

use crate::fields::RawPriceRecord;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One price observation in canonical form
///
/// `min_price`, `max_price` and `modal_price` are the source figures in the
/// source `unit`. `price_per_kg` is the canonical value: when present it is
/// finite, non-negative and in currency per kilogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPriceRecord {
    pub commodity: String,
    pub variety: String,
    pub state: String,
    pub district: String,
    pub market: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub modal_price: Option<f64>,
    pub unit: String,
    pub arrival_date: Option<NaiveDate>,
    pub price_per_kg: Option<f64>,
    /// The per-kg value rests on a guessed unit
    pub approximate: bool,
}

impl NormalizedPriceRecord {
    /// Re-emit this record as raw provider input quoted per kilogram
    ///
    /// Normalizing the result again yields the same `price_per_kg`.
    pub fn to_canonical_raw(&self) -> RawPriceRecord {
        let mut raw = RawPriceRecord::new();
        raw.insert("commodity".to_string(), Value::from(self.commodity.clone()));
        raw.insert("variety".to_string(), Value::from(self.variety.clone()));
        raw.insert("state".to_string(), Value::from(self.state.clone()));
        raw.insert("district".to_string(), Value::from(self.district.clone()));
        raw.insert("market".to_string(), Value::from(self.market.clone()));
        if let Some(price) = self.price_per_kg {
            raw.insert("modal_price".to_string(), Value::from(price));
        }
        raw.insert("unit".to_string(), Value::from("kg"));
        if let Some(date) = self.arrival_date {
            raw.insert(
                "arrival_date".to_string(),
                Value::from(date.format("%d/%m/%Y").to_string()),
            );
        }
        raw
    }
}

/// Result of one fetch-and-normalize run
///
/// A failed run carries no records, no timestamp and an error message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub records: Vec<NormalizedPriceRecord>,
    pub last_updated: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl MarketSnapshot {
    /// A successful batch stamped with the current time
    pub fn success(records: Vec<NormalizedPriceRecord>) -> Self {
        Self {
            records,
            last_updated: Some(Utc::now()),
            error: None,
        }
    }

    /// An empty batch with an error message
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            last_updated: None,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
