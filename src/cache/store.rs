//! Cache Store Module
//!
//! Main cache engine: named collections of TTL-bound typed entries.
//! The store is not synchronized; [`crate::Hippocache`] wraps it in a lock.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::cache::{validate_collection, validate_key, CacheEntry, CacheStats, Collection};
use crate::error::{item_context, CacheError, ErrorCode, Result};
use crate::value::{CacheValue, Name, Record, TypedValue};

// == Cache Store ==
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Collections by name; created on first write
    collections: HashMap<Name, Collection>,
    /// Sweep counters
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Set ==
    /// Stores `value` under `collection`/`key`, overwriting unconditionally.
    ///
    /// A zero `ttl` stores the entry forever. The collection is created on
    /// first use.
    pub fn set(&mut self, collection: &str, key: &str, value: TypedValue, ttl: Duration) -> Result<()> {
        validate_collection(collection)?;
        validate_key(collection, key)?;
        if !value.is_valid() {
            return Err(CacheError::new(
                ErrorCode::InvalidValue,
                "Record value is invalid",
                item_context(collection, key),
            ));
        }

        let entry = CacheEntry::new(value, ttl);
        match self.collections.get_mut(collection) {
            Some(bucket) => {
                bucket.insert(key.to_string(), entry);
            }
            None => {
                let mut bucket = Collection::new();
                bucket.insert(key.to_string(), entry);
                self.collections.insert(Name::from(collection), bucket);
            }
        }

        Ok(())
    }

    // == Get ==
    /// Returns a copy of the live value.
    ///
    /// Expired entries yield `ItemExpired` and are left in place for the
    /// next sweep.
    pub fn get(&self, collection: &str, key: &str) -> Result<TypedValue> {
        let entry = self.live_entry(collection, key)?;
        Ok(entry.value().clone())
    }

    /// Returns the live value as `T`, or `TypeMismatch`.
    pub fn get_as<T: CacheValue>(&self, collection: &str, key: &str) -> Result<T> {
        let entry = self.live_entry(collection, key)?;
        entry
            .value()
            .as_type::<T>()
            .map_err(|err| err.with_context(item_context(collection, key)))
    }

    /// Returns the live record if its type id is `type_id`.
    pub fn get_record(&self, collection: &str, key: &str, type_id: &str) -> Result<Record> {
        let entry = self.live_entry(collection, key)?;
        entry
            .value()
            .clone()
            .into_record(type_id)
            .map_err(|err| err.with_context(item_context(collection, key)))
    }

    fn live_entry(&self, collection: &str, key: &str) -> Result<&CacheEntry> {
        validate_collection(collection)?;
        validate_key(collection, key)?;

        let bucket = self
            .collections
            .get(collection)
            .ok_or_else(|| CacheError::collection_not_found(collection))?;
        let entry = bucket
            .get(key)
            .ok_or_else(|| CacheError::item_not_found(collection, key))?;

        let now = Instant::now();
        if entry.has_expired_at(now) {
            return Err(CacheError::item_expired(collection, key));
        }
        entry.touch_at(now);
        Ok(entry)
    }

    // == Remove ==
    /// Deletes one entry.
    pub fn remove(&mut self, collection: &str, key: &str) -> Result<()> {
        validate_collection(collection)?;
        validate_key(collection, key)?;

        let bucket = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| CacheError::collection_not_found(collection))?;
        bucket
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| CacheError::item_not_found(collection, key))
    }

    // == Clear ==
    /// Empties one collection; the collection itself stays.
    ///
    /// Returns the number of entries removed.
    pub fn clear(&mut self, collection: &str) -> Result<usize> {
        validate_collection(collection)?;

        let bucket = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| CacheError::collection_not_found(collection))?;
        Ok(bucket.clear())
    }

    // == Count ==
    /// Number of entries in a collection.
    ///
    /// Expired entries are counted until a sweep removes them.
    pub fn count(&self, collection: &str) -> Result<usize> {
        validate_collection(collection)?;

        self.collections
            .get(collection)
            .map(Collection::len)
            .ok_or_else(|| CacheError::collection_not_found(collection))
    }

    // == Sweep Expired ==
    /// Removes every expired entry from every collection.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        self.sweep_expired_at(Instant::now())
    }

    pub fn sweep_expired_at(&mut self, now: Instant) -> usize {
        let removed = self
            .collections
            .values_mut()
            .map(|bucket| bucket.purge_expired(now))
            .sum();
        self.stats.record_sweep(removed);
        removed
    }

    // == Clear All ==
    /// Drops every collection; returns how many there were.
    pub fn clear_all(&mut self) -> usize {
        let count = self.collections.len();
        self.collections.clear();
        count
    }

    // == Introspection ==
    pub fn contains_collection(&self, collection: &str) -> bool {
        self.collections.contains_key(collection)
    }

    pub fn collection_names(&self) -> Vec<Name> {
        self.collections.keys().cloned().collect()
    }

    /// Total entries across all collections.
    pub fn len(&self) -> usize {
        self.collections.values().map(Collection::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.values().all(Collection::is_empty)
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_sizes(self.collections.len(), self.len());
        stats
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Vector3;
    use std::thread::sleep;

    const FOREVER: Duration = Duration::ZERO;

    #[test]
    fn test_store_new() {
        let store = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert!(store.collection_names().is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new();

        store.set("Players", "hp", 100i32.into(), FOREVER).unwrap();

        assert_eq!(store.get("Players", "hp").unwrap(), TypedValue::Int32(100));
        assert_eq!(store.get_as::<i32>("Players", "hp").unwrap(), 100);
        assert_eq!(store.count("Players").unwrap(), 1);
    }

    #[test]
    fn test_store_get_missing_collection() {
        let store = CacheStore::new();

        let err = store.get("Nowhere", "key").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ItemNotFound);
        assert_eq!(err.message(), "Collection not found");
        assert_eq!(err.context(), "Collection: Nowhere");
    }

    #[test]
    fn test_store_get_missing_key() {
        let mut store = CacheStore::new();
        store.set("Players", "hp", 1i32.into(), FOREVER).unwrap();

        let err = store.get("Players", "mana").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ItemNotFound);
        assert_eq!(err.context(), "Collection: Players, Key: mana");
    }

    #[test]
    fn test_store_invalid_names_checked_first() {
        let mut store = CacheStore::new();

        for name in ["", "None", "none"] {
            let err = store.set(name, "k", 1i32.into(), FOREVER).unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidCollection);
            assert_eq!(store.get(name, "").unwrap_err().code(), ErrorCode::InvalidCollection);
            assert_eq!(store.remove(name, "k").unwrap_err().code(), ErrorCode::InvalidCollection);
            assert_eq!(store.clear(name).unwrap_err().code(), ErrorCode::InvalidCollection);
            assert_eq!(store.count(name).unwrap_err().code(), ErrorCode::InvalidCollection);
        }

        let err = store.set("Players", "", 1i32.into(), FOREVER).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidKey);
        assert_eq!(err.context(), "Collection: Players");
        assert_eq!(store.get("Missing", "").unwrap_err().code(), ErrorCode::InvalidKey);

        assert!(store.is_empty());
        assert!(!store.contains_collection("Players"));
    }

    #[test]
    fn test_store_rejects_invalid_record() {
        let mut store = CacheStore::new();

        let err = store
            .set("Records", "bad", TypedValue::from_record("", vec![1]), FOREVER)
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidValue);
        assert!(!store.contains_collection("Records"));
    }

    #[test]
    fn test_store_remove() {
        let mut store = CacheStore::new();

        store.set("Players", "hp", 1i32.into(), FOREVER).unwrap();
        store.remove("Players", "hp").unwrap();

        assert_eq!(store.get("Players", "hp").unwrap_err().code(), ErrorCode::ItemNotFound);
        assert_eq!(store.remove("Players", "hp").unwrap_err().code(), ErrorCode::ItemNotFound);
        assert_eq!(store.remove("Ghosts", "hp").unwrap_err().code(), ErrorCode::ItemNotFound);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::new();

        store.set("Players", "name", "alice".into(), FOREVER).unwrap();
        store.set("Players", "name", "bob".into(), FOREVER).unwrap();

        assert_eq!(store.get_as::<String>("Players", "name").unwrap(), "bob");
        assert_eq!(store.count("Players").unwrap(), 1);
    }

    #[test]
    fn test_store_overwrite_changes_kind() {
        let mut store = CacheStore::new();

        store.set("Players", "slot", 1i32.into(), FOREVER).unwrap();
        store.set("Players", "slot", Vector3::new(1.0, 0.0, 0.0).into(), FOREVER).unwrap();

        assert!(store.get_as::<i32>("Players", "slot").is_err());
        assert_eq!(
            store.get_as::<Vector3>("Players", "slot").unwrap(),
            Vector3::new(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_store_type_mismatch() {
        let mut store = CacheStore::new();
        store.set("Players", "hp", 100i32.into(), FOREVER).unwrap();

        let err = store.get_as::<String>("Players", "hp").unwrap_err();
        assert_eq!(err.code(), ErrorCode::TypeMismatch);
        assert_eq!(err.context(), "Collection: Players, Key: hp");
    }

    #[test]
    fn test_store_get_record() {
        let mut store = CacheStore::new();
        store
            .set("Saves", "slot1", TypedValue::from_record("game.Save", vec![4, 5, 6]), FOREVER)
            .unwrap();

        let record = store.get_record("Saves", "slot1", "game.Save").unwrap();
        assert_eq!(record.bytes(), &[4, 5, 6]);

        let err = store.get_record("Saves", "slot1", "game.Other").unwrap_err();
        assert_eq!(err.code(), ErrorCode::TypeMismatch);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = CacheStore::new();

        store.set("Session", "token", "abc".into(), Duration::from_millis(50)).unwrap();
        assert!(store.get("Session", "token").is_ok());

        sleep(Duration::from_millis(120));

        let err = store.get("Session", "token").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ItemExpired);
        // Get leaves the expired entry for the sweep.
        assert_eq!(store.count("Session").unwrap(), 1);
    }

    #[test]
    fn test_store_expired_beats_type_mismatch() {
        let mut store = CacheStore::new();
        store.set("Session", "token", 1i32.into(), Duration::from_millis(20)).unwrap();

        sleep(Duration::from_millis(60));

        let err = store.get_as::<String>("Session", "token").unwrap_err();
        assert_eq!(err.code(), ErrorCode::ItemExpired);
    }

    #[test]
    fn test_store_clear_keeps_collection() {
        let mut store = CacheStore::new();
        store.set("A", "k1", 1i32.into(), FOREVER).unwrap();
        store.set("A", "k2", 2i32.into(), FOREVER).unwrap();
        store.set("B", "k1", 3i32.into(), FOREVER).unwrap();

        assert_eq!(store.clear("A").unwrap(), 2);

        assert_eq!(store.count("A").unwrap(), 0);
        assert!(store.contains_collection("A"));
        assert_eq!(store.get_as::<i32>("B", "k1").unwrap(), 3);
        assert_eq!(store.clear("Never").unwrap_err().code(), ErrorCode::ItemNotFound);
    }

    #[test]
    fn test_store_sweep_expired() {
        let mut store = CacheStore::new();
        store.set("A", "short", 1i32.into(), Duration::from_millis(20)).unwrap();
        store.set("A", "long", 2i32.into(), Duration::from_secs(3600)).unwrap();
        store.set("B", "short", 3i32.into(), Duration::from_millis(20)).unwrap();
        store.set("B", "forever", 4i32.into(), FOREVER).unwrap();

        sleep(Duration::from_millis(60));

        assert_eq!(store.sweep_expired(), 2);
        assert_eq!(store.count("A").unwrap(), 1);
        assert_eq!(store.count("B").unwrap(), 1);
        assert!(store.get("A", "long").is_ok());

        let stats = store.stats();
        assert_eq!(stats.sweeps, 1);
        assert_eq!(stats.swept_entries, 2);
        assert_eq!(stats.collections, 2);
        assert_eq!(stats.total_entries, 2);
    }

    #[test]
    fn test_store_sweep_at_instant() {
        let mut store = CacheStore::new();
        store.set("A", "k", 1i32.into(), Duration::from_secs(5)).unwrap();

        assert_eq!(store.sweep_expired_at(Instant::now()), 0);
        assert_eq!(store.sweep_expired_at(Instant::now() + Duration::from_secs(6)), 1);
        assert!(store.contains_collection("A"));
    }

    #[test]
    fn test_store_clear_all() {
        let mut store = CacheStore::new();
        store.set("A", "k", 1i32.into(), FOREVER).unwrap();
        store.set("B", "k", 1i32.into(), FOREVER).unwrap();

        assert_eq!(store.clear_all(), 2);
        assert!(store.collection_names().is_empty());
        assert_eq!(store.count("A").unwrap_err().code(), ErrorCode::ItemNotFound);
    }
}
