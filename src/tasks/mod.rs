//! Background Tasks Module
//!
//! Contains background tasks that run periodically for the lifetime of the
//! cache.
//!
//! # Tasks
//! - Expiry reaper: removes expired entries at the configured interval

mod reaper;

pub use reaper::spawn_reaper;
