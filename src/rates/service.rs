//! Lifecycle of the persisted rates table: cache read, freshness
//! short-circuit, network fetch, cache write, stale fallback.

use crate::core::currency::{CachedRates, RatesTable};
use crate::rates::RateTableProvider;
use crate::store::BlobStore;
use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const RATES_CACHE_KEY: &str = "exchange_rates_cache";

/// The rates available to the rest of the app at a point in time.
///
/// `rates` is `None` only when there is no cache and the fetch failed; the
/// balance aggregation degrades rather than erroring. `error` can be set
/// alongside a usable (stale) table.
#[derive(Debug, Clone)]
pub struct RatesSnapshot {
    pub rates: Option<RatesTable>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub stale: bool,
    pub error: Option<String>,
}

/// Owns the cached rates table and its refresh cycle.
pub struct RateService<P: RateTableProvider> {
    provider: P,
    store: Arc<dyn BlobStore>,
    // At most one fetch in flight per service instance.
    fetch_guard: Mutex<()>,
}

impl<P: RateTableProvider> RateService<P> {
    pub fn new(provider: P, store: Arc<dyn BlobStore>) -> Self {
        RateService {
            provider,
            store,
            fetch_guard: Mutex::new(()),
        }
    }

    /// The activation path: a fresh cache entry is served without touching
    /// the network; otherwise fetch with stale fallback.
    pub async fn current(&self) -> RatesSnapshot {
        if let Some(cached) = self.read_cache() {
            if cached.is_fresh(Utc::now()) {
                debug!("Serving fresh cached rates");
                return Self::snapshot_from_cache(cached, false, None);
            }
        }
        self.fetch_with_fallback(true).await
    }

    /// Manual re-fetch: always goes to the network, bypassing the
    /// freshness short-circuit.
    pub async fn refresh(&self) -> RatesSnapshot {
        self.fetch_with_fallback(false).await
    }

    async fn fetch_with_fallback(&self, allow_fresh_cache: bool) -> RatesSnapshot {
        let _in_flight = self.fetch_guard.lock().await;

        // A fetch that completed while this one waited on the guard may
        // have refreshed the cache already.
        if allow_fresh_cache {
            if let Some(cached) = self.read_cache() {
                if cached.is_fresh(Utc::now()) {
                    debug!("Cache refreshed while waiting, skipping fetch");
                    return Self::snapshot_from_cache(cached, false, None);
                }
            }
        }

        match self.provider.fetch_table().await {
            Ok(fetched) => {
                let entry = CachedRates {
                    rates: fetched.rates,
                    timestamp: Utc::now().timestamp_millis(),
                };
                if let Err(e) = self.write_cache(&entry) {
                    warn!(error = %e, "Failed to persist rate cache");
                }
                Self::snapshot_from_cache(entry, false, None)
            }
            Err(e) => {
                warn!(error = %e, "Rate fetch failed");
                match self.read_cache() {
                    Some(cached) => {
                        debug!("Falling back to cached rates");
                        Self::snapshot_from_cache(cached, true, Some(e.to_string()))
                    }
                    None => RatesSnapshot {
                        rates: None,
                        fetched_at: None,
                        stale: true,
                        error: Some(e.to_string()),
                    },
                }
            }
        }
    }

    fn snapshot_from_cache(
        entry: CachedRates,
        stale: bool,
        error: Option<String>,
    ) -> RatesSnapshot {
        RatesSnapshot {
            fetched_at: Utc.timestamp_millis_opt(entry.timestamp).single(),
            rates: Some(entry.rates),
            stale,
            error,
        }
    }

    fn read_cache(&self) -> Option<CachedRates> {
        let bytes = match self.store.get(RATES_CACHE_KEY) {
            Ok(bytes) => bytes?,
            Err(e) => {
                warn!(error = %e, "Failed to read rate cache");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(cached) => Some(cached),
            Err(e) => {
                warn!(error = %e, "Discarding undecodable rate cache");
                None
            }
        }
    }

    fn write_cache(&self, entry: &CachedRates) -> Result<()> {
        self.store.set(RATES_CACHE_KEY, &serde_json::to_vec(entry)?)
    }
}
