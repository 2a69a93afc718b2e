//! Market price pipeline for agri-assist
//!
//! Fetches mandi price records for a district and normalizes them so every
//! record carries one comparable price in currency per kilogram.
//!
//! - Alias-based field extraction over heterogeneous provider columns
//! - Tolerant numeric and date parsing
//! - Unit normalization (kg, 100 kg, quintal, tonne, guessed)
//! - Price selection (modal, min/max mean, min)
//! - data.gov.in client with request rate limiting
//! - A price store and a feed that publishes fetch results to it
//!
//! # Example
//!
//! ```rust,ignore
//! use agri_market::{MarketConfig, PriceNormalizer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let normalizer = PriceNormalizer::from_config(MarketConfig::from_env())?;
//!     let snapshot = normalizer.fetch_and_normalize("Salem").await;
//!     for record in &snapshot.records {
//!         println!("{}: {:?}/kg", record.commodity, record.price_per_kg);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod feed;
pub mod fields;
pub mod normalizer;
pub mod parse;
pub mod record;
pub mod store;
pub mod units;

pub use api::DataGovClient;
pub use config::{MarketConfig, MarketConfigBuilder};
pub use error::{MarketError, Result};
pub use feed::MarketFeed;
pub use fields::{Field, RawPriceRecord};
pub use normalizer::{PriceNormalizer, normalize_record, normalize_records};
pub use record::{MarketSnapshot, NormalizedPriceRecord};
pub use store::{MarketState, MarketStore, PriceSink};
pub use units::{PerKg, UnitRule, to_per_kg};
