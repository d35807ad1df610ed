//! Expiry Reaper Task
//!
//! Background task that periodically removes expired entries from every
//! collection.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically sweeps expired cache entries.
///
/// The task sleeps for `interval`, then takes the write lock once, sweeps all
/// collections and releases the lock. The lock is never held across an await,
/// so aborting the handle can only happen between sweeps.
///
/// Must be called from within a tokio runtime.
///
/// # Example
/// ```ignore
/// let store = Arc::new(RwLock::new(CacheStore::new()));
/// let reaper = spawn_reaper(store.clone(), Duration::from_secs(60));
/// // Later, during teardown:
/// reaper.abort();
/// ```
pub fn spawn_reaper(store: Arc<RwLock<CacheStore>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting expiry reaper with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut guard = store.write();
                let removed = guard.sweep_expired();
                (removed, guard.len())
            };

            if removed > 0 {
                info!(
                    "Expiry sweep: removed {} expired entries, {} remain",
                    removed, remaining
                );
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}
