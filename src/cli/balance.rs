use super::ui;
use crate::core::balance::{balance, format_amount};
use crate::core::record::Record;
use crate::rates::{RateService, RateTableProvider};
use anyhow::Result;

pub async fn run<P: RateTableProvider>(
    records: &[Record],
    service: &RateService<P>,
    display_currency: &str,
) -> Result<()> {
    let spinner = ui::new_spinner("Fetching exchange rates...");
    let snapshot = service.current().await;
    spinner.finish_and_clear();

    let total = balance(records, display_currency, snapshot.rates.as_ref());
    let formatted = format_amount(total);

    let total_style = if total < 0.0 {
        ui::StyleType::Error
    } else {
        ui::StyleType::TotalValue
    };
    println!(
        "Total Balance ({}): {}",
        ui::style_text(display_currency, ui::StyleType::TotalLabel),
        ui::style_text(&formatted, total_style)
    );

    if snapshot.rates.is_none() {
        println!(
            "{}",
            ui::style_text(
                &format!("No exchange rates available; only {display_currency} entries are counted."),
                ui::StyleType::Error
            )
        );
    } else if snapshot.stale {
        let fetched = snapshot
            .fetched_at
            .map_or("unknown time".to_string(), |t| t.to_rfc2822());
        println!(
            "{}",
            ui::style_text(
                &format!("Using cached rates from {fetched}."),
                ui::StyleType::Subtle
            )
        );
    }
    if let Some(error) = &snapshot.error {
        println!(
            "{}",
            ui::style_text(&format!("Rate refresh failed: {error}"), ui::StyleType::Subtle)
        );
    }

    Ok(())
}
