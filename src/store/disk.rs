use crate::store::BlobStore;
use anyhow::Result;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle};
use std::path::Path;
use tracing::debug;

/// Durable blob store backed by a fjall partition under the app data
/// directory.
pub struct FjallStore {
    // The keyspace owns the journal; keep it alive as long as the partition.
    _keyspace: Keyspace,
    partition: PartitionHandle,
}

impl FjallStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)?;

        let keyspace = fjall::Config::new(path).open()?;
        let partition =
            keyspace.open_partition("billfold", PartitionCreateOptions::default())?;
        Ok(Self {
            _keyspace: keyspace,
            partition,
        })
    }
}

impl BlobStore for FjallStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self.partition.get(key)?.map(|slice| slice.to_vec());
        if value.is_some() {
            debug!("Store HIT for key: {key}");
        } else {
            debug!("Store MISS for key: {key}");
        }
        Ok(value)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        debug!("Store SET for key: {key}");
        self.partition.insert(key, value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        debug!("Store REMOVE for key: {key}");
        self.partition.remove(key)?;
        Ok(())
    }
}
