//! Subsystem Handle
//!
//! The thread-safe entry point the host application talks to.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{ttl_from_secs, CacheStats, CacheStore};
use crate::config::Config;
use crate::error::{item_context, Result};
use crate::tasks::spawn_reaper;
use crate::value::{CacheRecord, CacheValue, Record, TypedValue};

/// Shared cache handle.
///
/// Clones share the same store and reaper. A single reader-writer lock guards
/// every collection: `get*`, `count` and `stats` take it shared, everything
/// that mutates takes it exclusively. Reads always return copies.
#[derive(Clone, Default)]
pub struct Hippocache {
    /// Thread-safe cache store
    store: Arc<RwLock<CacheStore>>,
    /// Running expiry reaper, if any
    reaper: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Hippocache {
    /// Creates an empty cache without a reaper.
    pub fn new() -> Self {
        Self::default()
    }

    // == Lifecycle ==
    /// Creates the cache and starts the expiry reaper on the current tokio
    /// runtime.
    ///
    /// Without a runtime the cache still works, but expired entries are only
    /// removed by explicit [`Hippocache::sweep_expired`] calls. The reaper
    /// outlives dropped handles; call [`Hippocache::deinitialize`] at teardown.
    pub fn initialize(config: &Config) -> Self {
        let cache = Self::new();

        if !config.reaper_enabled {
            info!("Hippocache: expiry reaper disabled by configuration");
        } else if cache.start_reaper(config.cleanup_interval_duration()) {
            info!(
                "Hippocache: expiry reaper started ({} second interval)",
                config.cleanup_interval
            );
        } else {
            warn!("Hippocache: failed to start expiry reaper - no tokio runtime available");
        }

        cache
    }

    /// Starts (or restarts) the reaper with the given interval.
    ///
    /// Returns `false` when called outside a tokio runtime.
    pub fn start_reaper(&self, interval: Duration) -> bool {
        if Handle::try_current().is_err() {
            return false;
        }

        let handle = spawn_reaper(self.store.clone(), interval);
        if let Some(previous) = self.reaper.lock().replace(handle) {
            previous.abort();
        }
        true
    }

    pub fn is_reaper_running(&self) -> bool {
        self.reaper
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stops the reaper and drops every collection.
    pub fn deinitialize(&self) {
        if let Some(handle) = self.reaper.lock().take() {
            handle.abort();
            info!("Hippocache: expiry reaper stopped");
        }

        let cleared = self.store.write().clear_all();
        info!("Hippocache: cleared {} data collections", cleared);
    }

    // == Set ==
    /// Stores `value` forever.
    pub fn set<T: CacheValue>(&self, collection: &str, key: &str, value: T) -> Result<()> {
        self.set_value(collection, key, value.into_typed(), Duration::ZERO)
    }

    pub fn set_with_ttl<T: CacheValue>(
        &self,
        collection: &str,
        key: &str,
        value: T,
        ttl: Duration,
    ) -> Result<()> {
        self.set_value(collection, key, value.into_typed(), ttl)
    }

    /// Stores `value` with a TTL given in seconds; `0.0` stores forever.
    pub fn set_with_ttl_secs<T: CacheValue>(
        &self,
        collection: &str,
        key: &str,
        value: T,
        ttl_secs: f64,
    ) -> Result<()> {
        let ttl = ttl_from_secs(ttl_secs).map_err(|err| {
            let context = format!("{}, {}", item_context(collection, key), err.context());
            err.with_context(context)
        })?;
        self.set_value(collection, key, value.into_typed(), ttl)
    }

    pub fn set_value(
        &self,
        collection: &str,
        key: &str,
        value: TypedValue,
        ttl: Duration,
    ) -> Result<()> {
        self.store.write().set(collection, key, value, ttl)
    }

    /// Serializes `record` and stores it forever.
    pub fn set_record<R: CacheRecord>(&self, collection: &str, key: &str, record: &R) -> Result<()> {
        self.set_record_with_ttl(collection, key, record, Duration::ZERO)
    }

    pub fn set_record_with_ttl<R: CacheRecord>(
        &self,
        collection: &str,
        key: &str,
        record: &R,
        ttl: Duration,
    ) -> Result<()> {
        let encoded = Record::encode(record)
            .map_err(|err| err.with_context(item_context(collection, key)))?;
        self.set_value(collection, key, TypedValue::Record(encoded), ttl)
    }

    // == Get ==
    /// Returns the value as `T`, or `TypeMismatch` if another kind is stored.
    pub fn get<T: CacheValue>(&self, collection: &str, key: &str) -> Result<T> {
        self.store.read().get_as(collection, key)
    }

    pub fn get_value(&self, collection: &str, key: &str) -> Result<TypedValue> {
        self.store.read().get(collection, key)
    }

    /// Returns the raw record stored under `type_id`.
    pub fn get_raw_record(&self, collection: &str, key: &str, type_id: &str) -> Result<Record> {
        self.store.read().get_record(collection, key, type_id)
    }

    /// Returns the stored record decoded as `R`.
    pub fn get_record<R: CacheRecord>(&self, collection: &str, key: &str) -> Result<R> {
        let record = self.get_raw_record(collection, key, R::TYPE_ID)?;
        record
            .decode()
            .map_err(|err| err.with_context(item_context(collection, key)))
    }

    // == Remove / Clear / Count ==
    pub fn remove(&self, collection: &str, key: &str) -> Result<()> {
        self.store.write().remove(collection, key)
    }

    /// Empties a collection.
    pub fn clear(&self, collection: &str) -> Result<()> {
        let cleared = self.store.write().clear(collection)?;
        info!(
            "Hippocache: cleared {} items from collection '{}'",
            cleared, collection
        );
        Ok(())
    }

    /// Entry count, including expired entries not yet swept.
    pub fn count(&self, collection: &str) -> Result<usize> {
        self.store.read().count(collection)
    }

    // == Maintenance ==
    /// Runs one expiry sweep immediately; returns the number removed.
    pub fn sweep_expired(&self) -> usize {
        let removed = self.store.write().sweep_expired();
        debug!("Hippocache: manual sweep removed {} entries", removed);
        removed
    }

    pub fn stats(&self) -> CacheStats {
        self.store.read().stats()
    }
}

impl std::fmt::Debug for Hippocache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hippocache")
            .field("stats", &self.stats())
            .field("reaper_running", &self.is_reaper_running())
            .finish()
    }
}
