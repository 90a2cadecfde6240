//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming query strings and request bodies.

use std::time::Duration;

use serde::Deserialize;

/// Parameters of the SET operation.
///
/// Accepted either as a query string on `POST /set` (`key`, `value`, `exp`)
/// or as a JSON body on `PUT /set` (`key`, `value`, `ttl`).
///
/// Empty keys and values are valid. A negative TTL is accepted and stored as
/// zero, which makes the entry expired on its next access.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: String,
    /// Time to live in seconds
    #[serde(alias = "exp")]
    pub ttl: i64,
}

impl SetRequest {
    /// TTL as a duration, negative values clamped to zero.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl.max(0).unsigned_abs())
    }
}

/// Query parameters of the GET operation (`GET /get?key=...`).
#[derive(Debug, Clone, Deserialize)]
pub struct GetRequest {
    /// The cache key
    pub key: String,
}
