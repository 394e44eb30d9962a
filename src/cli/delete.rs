use crate::store::RecordStore;
use anyhow::{Result, bail};
use tracing::debug;

pub fn run(store: &mut RecordStore, id: &str) -> Result<()> {
    debug!(id, "Deleting record");
    if !store.delete(id)? {
        bail!("No entry with id {id}");
    }
    println!("Deleted {id}");
    Ok(())
}
