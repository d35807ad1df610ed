//! Collection Module
//!
//! A named bucket of key to entry mappings.

use std::collections::HashMap;
use std::time::Instant;

use crate::cache::CacheEntry;

// == Collection ==
#[derive(Debug, Default)]
pub struct Collection {
    entries: HashMap<String, CacheEntry>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites, returning the replaced entry.
    pub fn insert(&mut self, key: String, entry: CacheEntry) -> Option<CacheEntry> {
        self.entries.insert(key, entry)
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        self.entries.remove(key)
    }

    /// Removes every entry and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Drops entries expired at `now`; returns the number removed.
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.has_expired_at(now));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
