//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::cache::DEFAULT_CLEANUP_INTERVAL_SECS;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Seconds between expiry sweeps
    pub cleanup_interval: u64,
    /// Whether `Hippocache::initialize` starts the expiry reaper
    pub reaper_enabled: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `HIPPOCACHE_CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 60, must be > 0)
    /// - `HIPPOCACHE_REAPER_ENABLED` - `true` or `false` (default: true)
    pub fn from_env() -> Self {
        Self {
            cleanup_interval: env::var("HIPPOCACHE_CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_CLEANUP_INTERVAL_SECS),
            reaper_enabled: env::var("HIPPOCACHE_REAPER_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }

    pub fn cleanup_interval_duration(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL_SECS,
            reaper_enabled: true,
        }
    }
}
