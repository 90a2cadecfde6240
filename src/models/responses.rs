//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the GET operation (GET /get)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The stored value
    pub value: String,
}

impl GetResponse {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Response body for the SET operation (POST/PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub expirations: u64,
    pub evictions: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    pub capacity: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expirations: stats.expirations,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            capacity: stats.capacity,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_response_serialize() {
        let json = serde_json::to_value(GetResponse::new("test_value")).unwrap();
        assert_eq!(json, serde_json::json!({ "value": "test_value" }));
    }

    #[test]
    fn test_set_response_serialize() {
        let json = serde_json::to_string(&SetResponse::new("my_key")).unwrap();
        assert!(json.contains("my_key"));
        assert!(json.contains("successfully"));
    }

    #[test]
    fn test_stats_response_from_stats() {
        let mut stats = CacheStats::new(10);
        for _ in 0..4 {
            stats.record_hit();
        }
        stats.record_expiration();
        stats.total_entries = 3;

        let resp = StatsResponse::from(stats);
        assert_eq!(resp.hits, 4);
        assert_eq!(resp.misses, 1);
        assert_eq!(resp.expirations, 1);
        assert_eq!(resp.capacity, 10);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::healthy()).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let json = serde_json::to_string(&ErrorResponse::new("Something went wrong")).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
