//! Cache Entry Module
//!
//! Binds a typed value to its TTL and answers expiration queries.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::value::TypedValue;

// == Cache Entry ==
/// A stored value plus TTL metadata.
#[derive(Debug)]
pub struct CacheEntry {
    /// The stored value
    value: TypedValue,
    /// Time to live; zero means the entry never expires
    ttl: Duration,
    /// Monotonic creation instant
    created_at: Instant,
    /// Nanoseconds after `created_at` of the last read
    last_accessed_ns: AtomicU64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stamped with the current instant.
    pub fn new(value: TypedValue, ttl: Duration) -> Self {
        Self::new_at(value, ttl, Instant::now())
    }

    pub fn new_at(value: TypedValue, ttl: Duration, created_at: Instant) -> Self {
        Self {
            value,
            ttl,
            created_at,
            last_accessed_ns: AtomicU64::new(0),
        }
    }

    pub fn value(&self) -> &TypedValue {
        &self.value
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    // == Expiration ==
    /// True once more than `ttl` has elapsed since creation.
    ///
    /// A zero TTL never expires. At exactly `created_at + ttl` the entry is
    /// still live.
    pub fn has_expired_at(&self, now: Instant) -> bool {
        !self.ttl.is_zero() && now.saturating_duration_since(self.created_at) > self.ttl
    }

    pub fn is_expired(&self) -> bool {
        self.has_expired_at(Instant::now())
    }

    /// Remaining lifetime, or `None` for entries that never expire.
    ///
    /// Returns `Some(Duration::ZERO)` once expired.
    pub fn ttl_remaining(&self, now: Instant) -> Option<Duration> {
        if self.ttl.is_zero() {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.created_at);
        Some(self.ttl.saturating_sub(elapsed))
    }

    // == Access Tracking ==
    /// Records a read. Does not affect expiry.
    pub fn touch_at(&self, now: Instant) {
        let offset = now.saturating_duration_since(self.created_at).as_nanos();
        let offset = u64::try_from(offset).unwrap_or(u64::MAX);
        self.last_accessed_ns.fetch_max(offset, Ordering::Relaxed);
    }

    pub fn touch(&self) {
        self.touch_at(Instant::now());
    }

    pub fn last_accessed_at(&self) -> Instant {
        self.created_at + Duration::from_nanos(self.last_accessed_ns.load(Ordering::Relaxed))
    }
}
