//! Currency conversion and the cached rates table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All rate tables are anchored to this currency; its factor is always 1.
pub const BASE_CURRENCY: &str = "USD";

/// How long a fetched table stays fresh. 24 hours.
pub const CACHE_TTL_MS: i64 = 24 * 60 * 60 * 1000;

/// Currency code to conversion factor, relative to [`BASE_CURRENCY`].
pub type RatesTable = HashMap<String, f64>;

/// A rates table together with the time it was fetched, persisted as one
/// blob and superseded wholesale on each successful refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedRates {
    pub rates: RatesTable,
    /// Fetch time in epoch milliseconds.
    pub timestamp: i64,
}

impl CachedRates {
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now.timestamp_millis() - self.timestamp < CACHE_TTL_MS
    }
}

/// Converts `amount` from one currency to another using a table anchored to
/// [`BASE_CURRENCY`]: divide into the base, multiply out of it.
///
/// Without a table, or for a zero amount, the result is 0. An identity
/// conversion returns the amount untouched, as does a conversion where
/// either code is missing from the table (fail-open).
pub fn convert(amount: f64, from: &str, to: &str, rates: Option<&RatesTable>) -> f64 {
    let Some(rates) = rates else {
        return 0.0;
    };
    if amount == 0.0 {
        return 0.0;
    }
    if from == to {
        return amount;
    }
    let (Some(from_rate), Some(to_rate)) = (rates.get(from), rates.get(to)) else {
        return amount;
    };

    amount / from_rate * to_rate
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> RatesTable {
        HashMap::from([
            ("USD".to_string(), 1.0),
            ("EUR".to_string(), 0.9),
            ("INR".to_string(), 83.2),
        ])
    }

    #[test]
    fn test_identity_conversion() {
        let rates = rates();
        assert_eq!(convert(123.45, "EUR", "EUR", Some(&rates)), 123.45);
        // Identity holds even for codes the table does not know
        assert_eq!(convert(10.0, "XYZ", "XYZ", Some(&rates)), 10.0);
    }

    #[test]
    fn test_no_rates_returns_zero() {
        assert_eq!(convert(100.0, "USD", "EUR", None), 0.0);
        assert_eq!(convert(100.0, "USD", "USD", None), 0.0);
    }

    #[test]
    fn test_zero_amount_returns_zero() {
        let rates = rates();
        assert_eq!(convert(0.0, "USD", "EUR", Some(&rates)), 0.0);
    }

    #[test]
    fn test_missing_rate_fails_open() {
        let rates = rates();
        assert_eq!(convert(55.0, "XYZ", "USD", Some(&rates)), 55.0);
        assert_eq!(convert(55.0, "USD", "XYZ", Some(&rates)), 55.0);
    }

    #[test]
    fn test_converts_through_base_currency() {
        let rates = rates();
        assert_eq!(convert(100.0, "USD", "EUR", Some(&rates)), 90.0);
        assert!((convert(90.0, "EUR", "USD", Some(&rates)) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        let rates = rates();
        let there = convert(250.0, "INR", "EUR", Some(&rates));
        let back = convert(there, "EUR", "INR", Some(&rates));
        assert!((back - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let rates = rates();
        let first = convert(77.77, "EUR", "INR", Some(&rates));
        let second = convert(77.77, "EUR", "INR", Some(&rates));
        assert_eq!(first, second);
    }

    #[test]
    fn test_cache_freshness_window() {
        let now = Utc::now();
        let fresh = CachedRates {
            rates: rates(),
            timestamp: now.timestamp_millis() - CACHE_TTL_MS + 1000,
        };
        assert!(fresh.is_fresh(now));

        let stale = CachedRates {
            rates: rates(),
            timestamp: now.timestamp_millis() - CACHE_TTL_MS,
        };
        assert!(!stale.is_fresh(now));
    }
}
