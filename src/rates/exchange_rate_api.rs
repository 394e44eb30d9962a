use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

use crate::core::currency::BASE_CURRENCY;
use crate::rates::{FetchedTable, RateTableProvider};

// ExchangeRateApiProvider implementation for RateTableProvider
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    // "success" on a usable payload; anything else is a soft failure even
    // on HTTP 200.
    result: String,
    base_code: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    conversion_rates: Option<HashMap<String, f64>>,
}

#[async_trait]
impl RateTableProvider for ExchangeRateApiProvider {
    #[instrument(name = "RateTableFetch", skip(self))]
    async fn fetch_table(&self) -> Result<FetchedTable> {
        let url = format!(
            "{}/v6/{}/latest/{}",
            self.base_url, self.api_key, BASE_CURRENCY
        );
        debug!("Requesting exchange rates");

        let client = reqwest::Client::builder()
            .user_agent("billfold/0.1")
            .build()?;
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for rate table", e))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} from rate service",
                response.status()
            ));
        }

        let text = response.text().await?;

        let data: RatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse rate service response: {}", e))?;

        if data.result != "success" {
            return Err(anyhow!(
                "Rate service reported failure: {}",
                data.error_type.as_deref().unwrap_or("unknown")
            ));
        }

        let rates = data
            .conversion_rates
            .ok_or_else(|| anyhow!("Rate service response missing conversion rates"))?;
        let base = data
            .base_code
            .unwrap_or_else(|| BASE_CURRENCY.to_string());
        if base != BASE_CURRENCY {
            warn!(base, "Rate table anchored to unexpected base currency");
        }

        debug!("Fetched {} rates", rates.len());
        Ok(FetchedTable { base, rates })
    }
}
