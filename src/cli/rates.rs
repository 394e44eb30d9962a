use super::ui;
use crate::core::catalog;
use crate::core::currency::BASE_CURRENCY;
use crate::rates::{RateService, RateTableProvider};
use anyhow::Result;
use comfy_table::Cell;

pub async fn run<P: RateTableProvider>(service: &RateService<P>, refresh: bool) -> Result<()> {
    let spinner = ui::new_spinner("Fetching exchange rates...");
    let snapshot = if refresh {
        service.refresh().await
    } else {
        service.current().await
    };
    spinner.finish_and_clear();

    let Some(rates) = &snapshot.rates else {
        println!(
            "{}",
            ui::style_text(
                &format!(
                    "No exchange rates available: {}",
                    snapshot.error.as_deref().unwrap_or("no cache")
                ),
                ui::StyleType::Error
            )
        );
        return Ok(());
    };

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Per 1 {BASE_CURRENCY}")),
    ]);
    // The remote table covers far more currencies than the app offers;
    // display only the supported set.
    for currency in catalog::CURRENCIES {
        let rate = rates
            .get(currency.code)
            .map_or("N/A".to_string(), |r| format!("{r:.4}"));
        table.add_row(vec![
            Cell::new(currency.code),
            Cell::new(currency.name),
            Cell::new(rate),
        ]);
    }
    println!("{table}");

    let fetched = snapshot
        .fetched_at
        .map_or("unknown time".to_string(), |t| t.to_rfc2822());
    let freshness = if snapshot.stale { "stale" } else { "fresh" };
    println!(
        "{}",
        ui::style_text(
            &format!("Last updated {fetched} ({freshness})."),
            ui::StyleType::Subtle
        )
    );
    if let Some(error) = &snapshot.error {
        println!(
            "{}",
            ui::style_text(&format!("Rate refresh failed: {error}"), ui::StyleType::Subtle)
        );
    }

    Ok(())
}
