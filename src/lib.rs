//! TTL-LRU Cache - a bounded in-memory cache server
//!
//! Fixed-capacity store with least-recently-used eviction and lazy per-entry
//! expiration, exposed over a small HTTP API.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{CacheStore, SharedCache};
pub use config::Config;
pub use error::CacheError;
