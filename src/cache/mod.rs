//! Cache Module
//!
//! Provides named collections of typed values with TTL expiration.

mod collection;
mod entry;
mod stats;
mod store;


use std::time::Duration;

use crate::error::{CacheError, ErrorCode, Result};
use crate::value::is_none_name;

// Re-export public types
pub use collection::Collection;
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Interval between expiry sweeps when none is configured.
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 60;

// == Validation ==
pub(crate) fn validate_collection(collection: &str) -> Result<()> {
    if is_none_name(collection) {
        return Err(CacheError::invalid_collection());
    }
    Ok(())
}

pub(crate) fn validate_key(collection: &str, key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::invalid_key(collection));
    }
    Ok(())
}

// == TTL Conversion ==
/// Converts a TTL in seconds to a duration; `0.0` means "store forever".
///
/// Negative, NaN, infinite and out-of-range values are `InvalidValue`.
pub fn ttl_from_secs(ttl_secs: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(ttl_secs).map_err(|_| {
        CacheError::new(
            ErrorCode::InvalidValue,
            "TTL must be a finite, non-negative number of seconds",
            format!("TTL: {}", ttl_secs),
        )
    })
}
