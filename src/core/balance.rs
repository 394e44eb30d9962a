//! Signed balance aggregation across heterogeneous-currency records.

use crate::core::currency::{RatesTable, convert};
use crate::core::record::{Record, RecordKind};

/// Sums all records into a single signed total in `display_currency`.
///
/// Income adds, expense subtracts, each record converted from its own
/// currency first. Without a rates table only records already denominated
/// in the display currency contribute; cross-currency records count as 0.
pub fn balance(records: &[Record], display_currency: &str, rates: Option<&RatesTable>) -> f64 {
    let mut total = 0.0;
    for record in records {
        let amount = record.amount_value();
        let converted = match rates {
            Some(_) => convert(amount, &record.currency, display_currency, rates),
            None if record.currency == display_currency => amount,
            None => 0.0,
        };
        match record.kind {
            RecordKind::Income => total += converted,
            RecordKind::Expense => total -= converted,
        }
    }
    total
}

/// Display form of a balance: exactly two decimal places.
pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(amount: &str, kind: RecordKind, currency: &str) -> Record {
        Record {
            id: "1700000000000".to_string(),
            description: String::new(),
            amount: amount.to_string(),
            kind,
            category: "Other".to_string(),
            subcategory: "Other".to_string(),
            currency: currency.to_string(),
            payment_method: "Cash".to_string(),
            place: String::new(),
            date: String::new(),
            time: String::new(),
        }
    }

    #[test]
    fn test_signed_total_same_currency() {
        let records = vec![
            record("50.00", RecordKind::Expense, "USD"),
            record("20.00", RecordKind::Income, "USD"),
        ];
        let rates = HashMap::from([("USD".to_string(), 1.0)]);

        let total = balance(&records, "USD", Some(&rates));
        assert_eq!(format_amount(total), "-30.00");
    }

    #[test]
    fn test_converts_before_accumulating() {
        let records = vec![
            record("90.00", RecordKind::Income, "EUR"),
            record("50.00", RecordKind::Expense, "USD"),
        ];
        let rates = HashMap::from([("USD".to_string(), 1.0), ("EUR".to_string(), 0.9)]);

        // 90 EUR = 100 USD income, minus 50 USD expense
        let total = balance(&records, "USD", Some(&rates));
        assert_eq!(format_amount(total), "50.00");
    }

    #[test]
    fn test_degraded_mode_counts_only_display_currency() {
        let records = vec![
            record("50.00", RecordKind::Expense, "USD"),
            record("20.00", RecordKind::Income, "USD"),
            record("99.00", RecordKind::Income, "EUR"),
        ];

        let total = balance(&records, "USD", None);
        assert_eq!(format_amount(total), "-30.00");
    }

    #[test]
    fn test_unparsable_amount_counts_as_zero() {
        let mut broken = record("oops", RecordKind::Income, "USD");
        broken.amount = "oops".to_string();
        let records = vec![broken, record("10.00", RecordKind::Expense, "USD")];

        let total = balance(&records, "USD", None);
        assert_eq!(format_amount(total), "-10.00");
    }

    #[test]
    fn test_empty_list_is_zero() {
        assert_eq!(format_amount(balance(&[], "USD", None)), "0.00");
    }

    #[test]
    fn test_format_rounds_to_two_decimals() {
        assert_eq!(format_amount(1.005), "1.00");
        assert_eq!(format_amount(2.675), "2.67");
        assert_eq!(format_amount(-0.004), "-0.00");
        assert_eq!(format_amount(10.996), "11.00");
    }
}
