use crate::store::BlobStore;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

/// In-memory blob store backed by a HashMap.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let blobs = self.inner.read().unwrap_or_else(|e| e.into_inner());
        let value = blobs.get(key).cloned();
        if value.is_some() {
            debug!("Store HIT for key: {key}");
        } else {
            debug!("Store MISS for key: {key}");
        }
        Ok(value)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut blobs = self.inner.write().unwrap_or_else(|e| e.into_inner());
        debug!("Store SET for key: {key}");
        blobs.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut blobs = self.inner.write().unwrap_or_else(|e| e.into_inner());
        debug!("Store REMOVE for key: {key}");
        blobs.remove(key);
        Ok(())
    }
}
