//! Hippocache - An embeddable in-memory cache
//!
//! Named collections of typed values with per-item TTL expiry and a periodic
//! expiry reaper.

pub mod cache;
pub mod config;
pub mod error;
pub mod subsystem;
pub mod tasks;
pub mod value;

pub use config::Config;
pub use error::{CacheError, ErrorCode, Outcome, Result};
pub use subsystem::Hippocache;
pub use tasks::spawn_reaper;
pub use value::{CacheRecord, CacheValue, Name, Record, TypedValue, ValueKind};
