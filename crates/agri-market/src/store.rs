//! Display-side price store
//!
//! [`PriceSink`] is the narrow interface the feed writes through; the
//! application decides where the prices end up. [`MarketStore`] is an
//! in-memory implementation mirroring the market slice of the app state.

use crate::record::{MarketSnapshot, NormalizedPriceRecord};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Receiver of fetch results
#[async_trait]
pub trait PriceSink: Send + Sync {
    /// Replace the current prices wholesale
    async fn set_prices(&self, snapshot: MarketSnapshot);

    /// Mark a fetch as running or finished
    async fn set_loading(&self, loading: bool);
}

/// Market slice state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketState {
    pub prices: Vec<NormalizedPriceRecord>,
    pub loading: bool,
    pub last_updated: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

/// Shared in-memory market state
#[derive(Debug, Clone, Default)]
pub struct MarketStore {
    state: Arc<RwLock<MarketState>>,
}

impl MarketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> MarketState {
        self.state.read().await.clone()
    }
}

#[async_trait]
impl PriceSink for MarketStore {
    async fn set_prices(&self, snapshot: MarketSnapshot) {
        let mut state = self.state.write().await;
        state.prices = snapshot.records;
        state.last_updated = snapshot.last_updated;
        state.error = snapshot.error;
    }

    async fn set_loading(&self, loading: bool) {
        self.state.write().await.loading = loading;
    }
}
