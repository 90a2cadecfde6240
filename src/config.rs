//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Default number of entries the cache holds.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Default HTTP listen port.
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1024)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    ///
    /// Values that fail to parse fall back to their defaults. A capacity of
    /// zero is passed through and rejected when the store is built.
    pub fn from_env() -> Self {
        Self {
            capacity: env_or("CACHE_CAPACITY", DEFAULT_CAPACITY),
            server_port: env_or("SERVER_PORT", DEFAULT_SERVER_PORT),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
