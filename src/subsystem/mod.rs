//! Subsystem Module
//!
//! Lifecycle and thread-safe access for the embedding host.
//!
//! # Operations
//! - `set*` - Store a typed value or record, optionally with a TTL
//! - `get*` - Retrieve a value, checked against the requested type
//! - `remove` / `clear` / `count` - Per-key and per-collection maintenance
//! - `initialize` / `deinitialize` - Start and stop the expiry reaper

mod handle;

pub use handle::Hippocache;
