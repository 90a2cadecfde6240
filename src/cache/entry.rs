//! Cache Entry Module
//!
//! Defines a single cache entry and its expiration check.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// One cached mapping.
///
/// Entries live in the slots of the recency list; `prev` and `next` are slot
/// indices of the neighbouring entries rather than pointers.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The key, fixed for the life of the entry
    pub key: String,
    /// The stored value
    pub value: String,
    /// Instant at which the entry stops being visible
    pub expires_at: Instant,
    /// Slot of the next more recently touched entry
    pub prev: Option<usize>,
    /// Slot of the next less recently touched entry
    pub next: Option<usize>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an unlinked entry that expires `ttl` after `now`.
    pub fn new(key: String, value: String, ttl: Duration, now: Instant) -> Self {
        Self {
            key,
            value,
            expires_at: expiry(now, ttl),
            prev: None,
            next: None,
        }
    }

    // == Refresh ==
    /// Overwrites value and expiration in place.
    pub fn refresh(&mut self, value: String, ttl: Duration, now: Instant) {
        self.value = value;
        self.expires_at = expiry(now, ttl);
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of `now`.
    ///
    /// An entry is expired once `now` reaches `expires_at`, so a zero TTL
    /// yields an entry that is already expired on the next access.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Adds `ttl` to `now`, saturating far in the future instead of panicking on
/// absurd TTLs.
fn expiry(now: Instant, ttl: Duration) -> Instant {
    now.checked_add(ttl)
        .unwrap_or_else(|| now + Duration::from_secs(100 * 365 * 24 * 60 * 60))
}
