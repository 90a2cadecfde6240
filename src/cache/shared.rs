//! Shared Cache Module
//!
//! Thread-safe handle over a single [`CacheStore`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::cache::{CacheStats, CacheStore};
use crate::error::Result;

// == Shared Cache ==
/// Cloneable handle to one store behind one store-wide mutex.
///
/// Every operation holds the lock for its whole critical section and never
/// across an await point, so concurrent calls are linearizable. Values are
/// handed out as owned copies.
#[derive(Debug, Clone)]
pub struct SharedCache {
    inner: Arc<Mutex<CacheStore>>,
}

impl SharedCache {
    /// Creates a handle to a new, empty store.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`](crate::error::CacheError::InvalidCapacity)
    /// when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self::from_store(CacheStore::new(capacity)?))
    }

    pub fn from_store(store: CacheStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    // Store methods leave it consistent before returning, so a poisoned
    // guard still holds a valid store.
    fn lock(&self) -> MutexGuard<'_, CacheStore> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key)
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>, ttl: Duration) {
        self.lock().set(key, value, ttl);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    pub fn keys_by_recency(&self) -> Vec<String> {
        self.lock().keys_by_recency()
    }

    pub fn check_consistency(&self) -> Result<()> {
        self.lock().check_consistency()
    }
}
