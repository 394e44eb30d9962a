//! The canonical record list and its persistence.

use crate::core::record::{Record, RecordPatch};
use crate::store::BlobStore;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::debug;

pub const RECORDS_KEY: &str = "records";

/// Owns the full list of financial entries.
///
/// The list is loaded once and rewritten wholesale on every mutation. A
/// failed write is reported to the caller, but the in-memory list stays
/// authoritative for the rest of the session.
pub struct RecordStore {
    store: Arc<dyn BlobStore>,
    records: Vec<Record>,
}

impl RecordStore {
    pub fn load(store: Arc<dyn BlobStore>) -> Result<Self> {
        let records: Vec<Record> = match store.get(RECORDS_KEY)? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .context("Failed to decode persisted records")?,
            None => Vec::new(),
        };
        debug!("Loaded {} records", records.len());
        Ok(Self { store, records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Adds a new record at the front of the list, matching the order new
    /// entries appear in the app.
    pub fn add(&mut self, record: Record) -> Result<()> {
        self.records.insert(0, record);
        self.persist()
    }

    /// Applies a partial update to the record with the given identifier.
    /// Returns false if no such record exists.
    pub fn update(&mut self, id: &str, patch: &RecordPatch) -> Result<bool> {
        let Some(record) = self.records.iter_mut().find(|r| r.id == id) else {
            return Ok(false);
        };
        patch.apply(record);
        self.persist()?;
        Ok(true)
    }

    /// Removes the record with the given identifier. Returns false if no
    /// such record exists.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        if self.records.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    pub fn find(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    fn persist(&self) -> Result<()> {
        let bytes = serde_json::to_vec(&self.records)?;
        self.store
            .set(RECORDS_KEY, &bytes)
            .context("Failed to persist records")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::RecordKind;
    use crate::store::MemoryStore;

    fn record(id: &str) -> Record {
        Record {
            id: id.to_string(),
            description: format!("entry {id}"),
            amount: "10.00".to_string(),
            kind: RecordKind::Expense,
            category: "Food".to_string(),
            subcategory: "Other".to_string(),
            currency: "USD".to_string(),
            payment_method: "Cash".to_string(),
            place: String::new(),
            date: "15/01/2024".to_string(),
            time: "09:30".to_string(),
        }
    }

    #[test]
    fn test_add_prepends_and_persists() {
        let blobs = Arc::new(MemoryStore::new());
        let mut store = RecordStore::load(Arc::clone(&blobs) as Arc<dyn BlobStore>).unwrap();

        store.add(record("1")).unwrap();
        store.add(record("2")).unwrap();
        assert_eq!(store.records()[0].id, "2");
        assert_eq!(store.records()[1].id, "1");

        // The full list round-trips through the persisted blob
        let reloaded = RecordStore::load(blobs as Arc<dyn BlobStore>).unwrap();
        assert_eq!(reloaded.records().len(), 2);
        assert_eq!(reloaded.records()[0].id, "2");
    }

    #[test]
    fn test_update_by_id() {
        let blobs = Arc::new(MemoryStore::new());
        let mut store = RecordStore::load(Arc::clone(&blobs) as Arc<dyn BlobStore>).unwrap();
        store.add(record("1")).unwrap();

        let patch = RecordPatch {
            amount: Some("12.50".to_string()),
            ..RecordPatch::default()
        };
        assert!(store.update("1", &patch).unwrap());
        assert_eq!(store.records()[0].amount, "12.50");
        // Identifier is untouched
        assert_eq!(store.records()[0].id, "1");

        assert!(!store.update("missing", &patch).unwrap());

        let reloaded = RecordStore::load(blobs as Arc<dyn BlobStore>).unwrap();
        assert_eq!(reloaded.records()[0].amount, "12.50");
    }

    #[test]
    fn test_delete_by_id() {
        let blobs = Arc::new(MemoryStore::new());
        let mut store = RecordStore::load(Arc::clone(&blobs) as Arc<dyn BlobStore>).unwrap();
        store.add(record("1")).unwrap();
        store.add(record("2")).unwrap();

        assert!(store.delete("1").unwrap());
        assert_eq!(store.records().len(), 1);
        assert!(!store.delete("1").unwrap());

        let reloaded = RecordStore::load(blobs as Arc<dyn BlobStore>).unwrap();
        assert_eq!(reloaded.records().len(), 1);
        assert_eq!(reloaded.records()[0].id, "2");
    }

    #[test]
    fn test_empty_store_loads_empty_list() {
        let blobs = Arc::new(MemoryStore::new());
        let store = RecordStore::load(blobs as Arc<dyn BlobStore>).unwrap();
        assert!(store.records().is_empty());
    }
}
