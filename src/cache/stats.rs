//! Cache Statistics Module
//!
//! Store-wide counters. There are no per-item statistics.

use serde::Serialize;

// == Cache Stats ==
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of collections, including empty ones
    pub collections: usize,
    /// Entries across all collections, expired or not
    pub total_entries: usize,
    /// Completed expiry sweeps
    pub sweeps: u64,
    /// Entries removed by sweeps
    pub swept_entries: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Sweep ==
    pub fn record_sweep(&mut self, removed: usize) {
        self.sweeps += 1;
        self.swept_entries += removed as u64;
    }

    // == Update Sizes ==
    pub fn set_sizes(&mut self, collections: usize, total_entries: usize) {
        self.collections = collections;
        self.total_entries = total_entries;
    }
}
