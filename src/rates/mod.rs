//! Exchange rate retrieval and the cache/fetch lifecycle.

pub mod exchange_rate_api;
pub mod service;

pub use exchange_rate_api::ExchangeRateApiProvider;
pub use service::{RateService, RatesSnapshot};

use crate::core::currency::RatesTable;
use anyhow::Result;
use async_trait::async_trait;

/// A freshly retrieved rates table, anchored to the base currency.
#[derive(Debug, Clone)]
pub struct FetchedTable {
    pub base: String,
    pub rates: RatesTable,
}

#[async_trait]
pub trait RateTableProvider: Send + Sync {
    async fn fetch_table(&self) -> Result<FetchedTable>;
}
