use crate::core::catalog;
use crate::core::config::AppConfig;
use crate::core::record::{DATE_FORMAT, NewEntry, Record, RecordKind, TIME_FORMAT};
use crate::store::RecordStore;
use anyhow::{Result, ensure};
use chrono::{Local, Utc};
use tracing::debug;

pub fn run(
    store: &mut RecordStore,
    entry: NewEntry,
    kind: RecordKind,
    config: &AppConfig,
) -> Result<()> {
    ensure!(
        entry.amount >= 0.0,
        "Amount must be non-negative; the entry kind carries the sign"
    );

    let currency = entry
        .currency
        .map(|c| c.to_uppercase())
        .unwrap_or_else(|| config.currency.clone());
    ensure!(
        catalog::is_supported_currency(&currency),
        "Unsupported currency: {currency}"
    );

    let categories = catalog::categories_for(kind);
    let category = entry.category.unwrap_or_else(|| "Other".to_string());
    ensure!(
        categories.contains(&category.as_str()),
        "Unknown {kind} category: {category} (expected one of {categories:?})"
    );

    let subcategory = entry.subcategory.unwrap_or_else(|| "Other".to_string());
    ensure!(
        catalog::SUBCATEGORIES.contains(&subcategory.as_str()),
        "Unknown subcategory: {subcategory} (expected one of {:?})",
        catalog::SUBCATEGORIES
    );

    let payment_method = entry.payment_method.unwrap_or_else(|| "Cash".to_string());
    ensure!(
        catalog::PAYMENT_METHODS.contains(&payment_method.as_str()),
        "Unknown payment method: {payment_method} (expected one of {:?})",
        catalog::PAYMENT_METHODS
    );

    // Income entries carry no place
    let place = match kind {
        RecordKind::Income => String::new(),
        RecordKind::Expense => entry.place.unwrap_or_default(),
    };

    let now = Local::now();
    let record = Record {
        id: Utc::now().timestamp_millis().to_string(),
        description: entry.description,
        amount: format!("{:.2}", entry.amount),
        kind,
        category,
        subcategory,
        currency,
        payment_method,
        place,
        date: now.format(DATE_FORMAT).to_string(),
        time: now.format(TIME_FORMAT).to_string(),
    };
    debug!(id = %record.id, "Adding {kind}");

    let id = record.id.clone();
    let amount = record.amount.clone();
    let record_currency = record.currency.clone();
    store.add(record)?;

    println!("Recorded {kind} of {record_currency} {amount} (id {id})");
    Ok(())
}
