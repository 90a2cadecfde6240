//! Cache Module
//!
//! Provides a bounded in-memory cache with LRU eviction and lazy TTL expiration.

mod entry;
mod lru;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruList;
pub use shared::SharedCache;
pub use stats::CacheStats;
pub use store::CacheStore;
