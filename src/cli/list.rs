use super::ui;
use crate::core::group::{filter_by_category, group_by_month};
use crate::core::record::Record;
use anyhow::Result;
use comfy_table::Cell;

pub fn run(records: &[Record], category: Option<&str>) -> Result<()> {
    let filtered = match category {
        Some(category) => filter_by_category(records, category),
        None => records.to_vec(),
    };
    let sections = group_by_month(&filtered);

    if sections.is_empty() {
        println!("No entries recorded yet.");
        return Ok(());
    }

    for section in &sections {
        println!("{}", ui::style_text(&section.title, ui::StyleType::Title));

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Id"),
            ui::header_cell("Date"),
            ui::header_cell("Description"),
            ui::header_cell("Category"),
            ui::header_cell("Payment"),
            ui::header_cell("Amount"),
        ]);

        for record in &section.records {
            let when = if record.date.is_empty() {
                "-".to_string()
            } else {
                format!("{} {}", record.date, record.time)
            };
            let category = if record.place.is_empty() {
                format!("{} / {}", record.category, record.subcategory)
            } else {
                format!(
                    "{} / {} @ {}",
                    record.category, record.subcategory, record.place
                )
            };

            table.add_row(vec![
                Cell::new(&record.id),
                Cell::new(when),
                Cell::new(&record.description),
                Cell::new(category),
                Cell::new(&record.payment_method),
                ui::amount_cell(
                    record.kind,
                    &format!("{} {}", record.currency, record.amount),
                ),
            ]);
        }

        println!("{table}\n");
    }

    Ok(())
}
