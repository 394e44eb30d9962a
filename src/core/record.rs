//! Financial entry types and their persisted shape.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::warn;

pub const DATE_FORMAT: &str = "%d/%m/%Y";
pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Expense,
    Income,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Expense => write!(f, "expense"),
            RecordKind::Income => write!(f, "income"),
        }
    }
}

/// A single income or expense entry.
///
/// The identifier is the creation time in epoch milliseconds and never
/// changes. The amount is non-negative, fixed 2-decimal text; the sign of a
/// record's contribution to a balance comes from `kind`, not from the amount.
/// Field names in the persisted JSON are camelCase to stay compatible with
/// lists written by earlier versions of the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub description: String,
    pub amount: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub category: String,
    #[serde(default = "default_subcategory")]
    pub subcategory: String,
    pub currency: String,
    pub payment_method: String,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
}

fn default_subcategory() -> String {
    "Other".to_string()
}

impl Record {
    /// Point in time used for ordering and month grouping.
    ///
    /// Parses the record's own `date` and `time` fields. Records persisted by
    /// earlier versions carried neither; their identifier is the creation
    /// timestamp in epoch milliseconds and serves as a fallback.
    pub fn sort_key(&self) -> Option<DateTime<Utc>> {
        if let (Ok(date), Ok(time)) = (
            NaiveDate::parse_from_str(&self.date, DATE_FORMAT),
            NaiveTime::parse_from_str(&self.time, TIME_FORMAT),
        ) {
            return Some(date.and_time(time).and_utc());
        }

        self.id
            .parse::<i64>()
            .ok()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
    }

    /// The stored amount as a number. An unparsable amount counts as zero.
    pub fn amount_value(&self) -> f64 {
        match self.amount.parse::<f64>() {
            Ok(value) => value,
            Err(_) => {
                warn!(id = %self.id, amount = %self.amount, "Unparsable amount treated as zero");
                0.0
            }
        }
    }
}

/// Partial update applied to an existing record by its identifier.
/// Absent fields keep their current value; `id`, `kind`, `date` and `time`
/// are immutable once created.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub description: Option<String>,
    pub amount: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub currency: Option<String>,
    pub payment_method: Option<String>,
    pub place: Option<String>,
}

impl RecordPatch {
    pub fn apply(&self, record: &mut Record) {
        if let Some(description) = &self.description {
            record.description = description.clone();
        }
        if let Some(amount) = &self.amount {
            record.amount = amount.clone();
        }
        if let Some(category) = &self.category {
            record.category = category.clone();
        }
        if let Some(subcategory) = &self.subcategory {
            record.subcategory = subcategory.clone();
        }
        if let Some(currency) = &self.currency {
            record.currency = currency.clone();
        }
        if let Some(payment_method) = &self.payment_method {
            record.payment_method = payment_method.clone();
        }
        if let Some(place) = &self.place {
            record.place = place.clone();
        }
    }
}

/// Input for a new entry before defaults and validation are applied.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub description: String,
    pub amount: f64,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub currency: Option<String>,
    pub payment_method: Option<String>,
    pub place: Option<String>,
}
