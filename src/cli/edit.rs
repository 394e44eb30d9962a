use crate::core::catalog;
use crate::core::record::RecordPatch;
use crate::store::RecordStore;
use anyhow::{Result, bail, ensure};
use tracing::debug;

pub fn run(store: &mut RecordStore, id: &str, mut patch: RecordPatch) -> Result<()> {
    let Some(existing) = store.find(id) else {
        bail!("No entry with id {id}");
    };
    let kind = existing.kind;

    if let Some(amount) = &patch.amount {
        let value: f64 = amount
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid amount: {amount}"))?;
        ensure!(
            value >= 0.0,
            "Amount must be non-negative; the entry kind carries the sign"
        );
    }
    if let Some(currency) = patch.currency.take() {
        let currency = currency.to_uppercase();
        ensure!(
            catalog::is_supported_currency(&currency),
            "Unsupported currency: {currency}"
        );
        patch.currency = Some(currency);
    }
    if let Some(category) = &patch.category {
        let categories = catalog::categories_for(kind);
        ensure!(
            categories.contains(&category.as_str()),
            "Unknown {kind} category: {category} (expected one of {categories:?})"
        );
    }
    if let Some(subcategory) = &patch.subcategory {
        ensure!(
            catalog::SUBCATEGORIES.contains(&subcategory.as_str()),
            "Unknown subcategory: {subcategory} (expected one of {:?})",
            catalog::SUBCATEGORIES
        );
    }
    if let Some(payment_method) = &patch.payment_method {
        ensure!(
            catalog::PAYMENT_METHODS.contains(&payment_method.as_str()),
            "Unknown payment method: {payment_method} (expected one of {:?})",
            catalog::PAYMENT_METHODS
        );
    }

    debug!(id, "Updating record");
    store.update(id, &patch)?;
    println!("Updated {id}");
    Ok(())
}
