//! API clients for market price providers

pub mod data_gov;

pub use data_gov::DataGovClient;
