//! Cache Store Module
//!
//! Main cache engine combining a key index with the LRU list and lazy TTL expiration.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, LruList};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Bounded cache with LRU eviction and lazy per-entry TTL.
///
/// Expired entries are never returned, but they keep their slot until a
/// `get` finds them or capacity pressure evicts them. Capacity eviction always
/// takes the least recently touched entry, expired or not.
///
/// The store is single-threaded; share it through [`SharedCache`].
///
/// [`SharedCache`]: crate::cache::SharedCache
#[derive(Debug)]
pub struct CacheStore {
    /// Key to slot in `lru`
    index: HashMap<String, usize>,
    /// Entries in recency order
    lru: LruList,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        Ok(Self {
            index: HashMap::with_capacity(capacity),
            lru: LruList::with_capacity(capacity),
            stats: CacheStats::new(capacity),
            capacity,
        })
    }

    // == Get ==
    /// Retrieves a copy of the value stored under `key`.
    ///
    /// Returns `None` if the key is absent or has expired. An expired entry
    /// is removed on the spot; a live one becomes the most recently used.
    pub fn get(&mut self, key: &str) -> Option<String> {
        self.get_at(key, Instant::now())
    }

    /// [`get`](Self::get) evaluated as of `now`.
    pub fn get_at(&mut self, key: &str, now: Instant) -> Option<String> {
        let Some(&idx) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };

        let expired = self.lru.get(idx).map_or(true, |e| e.is_expired_at(now));
        if expired {
            self.remove(key);
            self.stats.record_expiration();
            debug!(key, "Reclaimed expired entry");
            return None;
        }

        self.lru.move_to_front(idx);
        self.stats.record_hit();
        self.lru.get(idx).map(|e| e.value.clone())
    }

    // == Set ==
    /// Stores `value` under `key`, expiring `ttl` from now.
    ///
    /// An existing key, expired or not, is overwritten in place and becomes
    /// the most recently used; this never evicts. A new key is inserted as
    /// most recently used, and if that takes the store over capacity the
    /// least recently used entry is evicted.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>, ttl: Duration) {
        self.set_at(key, value, ttl, Instant::now());
    }

    /// [`set`](Self::set) evaluated as of `now`.
    pub fn set_at(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
        ttl: Duration,
        now: Instant,
    ) {
        let key = key.into();
        let value = value.into();

        if let Some(&idx) = self.index.get(&key) {
            if let Some(entry) = self.lru.get_mut(idx) {
                entry.refresh(value, ttl, now);
            }
            self.lru.move_to_front(idx);
            return;
        }

        let idx = self
            .lru
            .push_front(CacheEntry::new(key.clone(), value, ttl, now));
        self.index.insert(key, idx);

        if self.lru.len() > self.capacity {
            self.evict_oldest();
        }
    }

    // == Evict Oldest ==
    /// Evicts the least recently used entry and returns its key.
    fn evict_oldest(&mut self) -> Option<String> {
        let idx = self.lru.back()?;
        let entry = self.lru.remove(idx)?;
        self.index.remove(&entry.key);
        self.stats.record_eviction();
        debug!(key = %entry.key, "Evicted least recently used entry");
        Some(entry.key)
    }

    // == Remove ==
    /// Unlinks `key` from both the index and the LRU list.
    fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        let idx = self.index.remove(key)?;
        self.lru.remove(idx)
    }

    // == Length ==
    /// Number of entries held, including expired ones not yet reclaimed.
    pub fn len(&self) -> usize {
        self.lru.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lru.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Keys By Recency ==
    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<String> {
        self.lru.iter().map(|e| e.key.clone()).collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.len();
        stats
    }

    // == Consistency Check ==
    /// Verifies the structural invariants: the entry count is within
    /// capacity, and the index and the LRU list hold exactly the same keys.
    pub fn check_consistency(&self) -> Result<()> {
        if self.len() > self.capacity {
            return Err(CacheError::Internal(format!(
                "{} entries exceed capacity {}",
                self.len(),
                self.capacity
            )));
        }
        if self.index.len() != self.lru.len() {
            return Err(CacheError::Internal(format!(
                "index has {} keys, list has {} entries",
                self.index.len(),
                self.lru.len()
            )));
        }
        for (key, &idx) in &self.index {
            match self.lru.get(idx) {
                Some(entry) if entry.key == *key => {}
                Some(entry) => {
                    return Err(CacheError::Internal(format!(
                        "index maps '{key}' to slot {idx} holding '{}'",
                        entry.key
                    )))
                }
                None => {
                    return Err(CacheError::Internal(format!(
                        "index maps '{key}' to empty slot {idx}"
                    )))
                }
            }
        }
        self.lru.check_links().map_err(CacheError::Internal)
    }
}
