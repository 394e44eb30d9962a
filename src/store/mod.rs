pub mod disk;
pub mod memory;
pub mod records;

pub use disk::FjallStore;
pub use memory::MemoryStore;
pub use records::RecordStore;

use anyhow::Result;

/// Key-value blob persistence shared by the record list and the rate cache.
///
/// Each key holds one serialized blob that is rewritten wholesale on every
/// mutation; the last successful write is authoritative.
pub trait BlobStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}
