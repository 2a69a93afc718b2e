//! Fetch-and-publish loop for the price screen

use crate::normalizer::PriceNormalizer;
use crate::store::PriceSink;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// Publishes normalized prices to a [`PriceSink`]
///
/// Each refresh takes a ticket. Only the most recently issued ticket may
/// publish, so a slow response for an earlier district never overwrites a
/// newer one. Issuing a ticket and publishing both happen under `latest`,
/// so a refresh cannot start while another one is publishing.
pub struct MarketFeed {
    normalizer: PriceNormalizer,
    sink: Arc<dyn PriceSink>,
    latest: Mutex<u64>,
}

impl MarketFeed {
    pub fn new(normalizer: PriceNormalizer, sink: Arc<dyn PriceSink>) -> Self {
        Self {
            normalizer,
            sink,
            latest: Mutex::new(0),
        }
    }

    /// Fetch prices for `district` and publish them
    ///
    /// Returns `false` when a newer refresh superseded this one and the
    /// result was dropped.
    #[instrument(skip(self))]
    pub async fn refresh(&self, district: &str) -> bool {
        let ticket = {
            let mut latest = self.latest.lock().await;
            *latest += 1;
            self.sink.set_loading(true).await;
            *latest
        };

        let snapshot = self.normalizer.fetch_and_normalize(district).await;

        let latest = self.latest.lock().await;
        if *latest != ticket {
            debug!("Dropping superseded price response (ticket {})", ticket);
            return false;
        }

        self.sink.set_prices(snapshot).await;
        self.sink.set_loading(false).await;
        true
    }
}
