//! Derives the month-grouped display structure from the record list.

use crate::core::record::Record;
use tracing::warn;

/// A month-labeled group of records, most recent first.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedSection {
    pub title: String,
    pub records: Vec<Record>,
}

/// Groups records into month sections ordered by descending recency.
///
/// Records are sorted descending by their own date/time (identifier
/// fallback, see [`Record::sort_key`]); the sort is stable, so records with
/// equal timestamps keep their relative order. Sections then fall out of
/// processing order: each new month label opens a new section. A record
/// whose date, time and identifier all fail to parse is skipped.
///
/// This is a pure re-derivation over the full list; callers re-run it
/// whenever the record list changes.
pub fn group_by_month(records: &[Record]) -> Vec<GroupedSection> {
    let mut dated: Vec<(chrono::DateTime<chrono::Utc>, &Record)> =
        Vec::with_capacity(records.len());
    for record in records {
        match record.sort_key() {
            Some(key) => dated.push((key, record)),
            None => {
                warn!(id = %record.id, "Record has no parsable date or identifier, skipping");
            }
        }
    }

    dated.sort_by(|a, b| b.0.cmp(&a.0));

    let mut sections: Vec<GroupedSection> = Vec::new();
    for (key, record) in dated {
        let title = key.format("%B %Y").to_string();
        match sections.iter_mut().find(|s| s.title == title) {
            Some(section) => section.records.push(record.clone()),
            None => sections.push(GroupedSection {
                title,
                records: vec![record.clone()],
            }),
        }
    }
    sections
}

/// The category filter used by the list views. `"All"` passes everything.
pub fn filter_by_category(records: &[Record], category: &str) -> Vec<Record> {
    if category == "All" {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| record.category == category)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::RecordKind;

    fn record(id: &str, date: &str, time: &str, category: &str) -> Record {
        Record {
            id: id.to_string(),
            description: format!("entry {id}"),
            amount: "10.00".to_string(),
            kind: RecordKind::Expense,
            category: category.to_string(),
            subcategory: "Other".to_string(),
            currency: "USD".to_string(),
            payment_method: "Cash".to_string(),
            place: String::new(),
            date: date.to_string(),
            time: time.to_string(),
        }
    }

    #[test]
    fn test_groups_by_month_descending() {
        let records = vec![
            record("1", "15/01/2024", "10:00", "Food"),
            record("2", "20/01/2024", "10:00", "Food"),
            record("3", "03/02/2024", "10:00", "Food"),
        ];

        let sections = group_by_month(&records);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "February 2024");
        assert_eq!(sections[1].title, "January 2024");

        assert_eq!(sections[0].records.len(), 1);
        assert_eq!(sections[0].records[0].id, "3");

        // Within a section, most recent first
        assert_eq!(sections[1].records.len(), 2);
        assert_eq!(sections[1].records[0].id, "2");
        assert_eq!(sections[1].records[1].id, "1");
    }

    #[test]
    fn test_identifier_fallback_grouping() {
        // 1700000000000 ms = 14 November 2023
        let records = vec![record("1700000000000", "", "", "Food")];

        let sections = group_by_month(&records);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "November 2023");
    }

    #[test]
    fn test_unparsable_record_is_skipped() {
        let records = vec![
            record("abc", "", "", "Food"),
            record("1", "15/01/2024", "10:00", "Food"),
        ];

        let sections = group_by_month(&records);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].records.len(), 1);
        assert_eq!(sections[0].records[0].id, "1");
    }

    #[test]
    fn test_equal_timestamps_keep_input_order() {
        let records = vec![
            record("first", "15/01/2024", "10:00", "Food"),
            record("second", "15/01/2024", "10:00", "Food"),
            record("third", "15/01/2024", "10:00", "Food"),
        ];

        let sections = group_by_month(&records);
        assert_eq!(sections.len(), 1);
        let ids: Vec<&str> = sections[0]
            .records
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_month(&[]).is_empty());
    }

    #[test]
    fn test_filter_by_category() {
        let records = vec![
            record("1", "15/01/2024", "10:00", "Food"),
            record("2", "16/01/2024", "10:00", "Transport"),
        ];

        let food = filter_by_category(&records, "Food");
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].id, "1");

        assert_eq!(filter_by_category(&records, "All").len(), 2);
        assert!(filter_by_category(&records, "Pets").is_empty());
    }
}
