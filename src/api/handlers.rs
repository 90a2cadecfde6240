//! API Handlers
//!
//! HTTP request handlers translating each endpoint into one cache operation.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use tracing::debug;

use crate::cache::SharedCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    GetRequest, GetResponse, HealthResponse, SetRequest, SetResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// Holds the one cache instance the server was composed with.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache handle
    pub cache: SharedCache,
}

impl AppState {
    /// Creates a new AppState around an existing cache handle.
    pub fn new(cache: SharedCache) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    ///
    /// # Errors
    /// Fails when the configured capacity is zero.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(SharedCache::new(config.capacity)?))
    }
}

/// Handler for POST /set?key=..&value=..&exp=..
pub async fn set_query_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<SetRequest>, QueryRejection>,
) -> Result<Json<SetResponse>> {
    let Query(req) = query.map_err(|rejection| CacheError::InvalidRequest(rejection.body_text()))?;
    Ok(Json(store_entry(&state, req)))
}

/// Handler for PUT /set with a JSON body
pub async fn set_json_handler(
    State(state): State<AppState>,
    body: std::result::Result<Json<SetRequest>, JsonRejection>,
) -> Result<Json<SetResponse>> {
    let Json(req) = body.map_err(|rejection| CacheError::InvalidRequest(rejection.body_text()))?;
    Ok(Json(store_entry(&state, req)))
}

fn store_entry(state: &AppState, req: SetRequest) -> SetResponse {
    let ttl = req.ttl();
    debug!(key = %req.key, ttl_secs = ttl.as_secs(), "Setting cache entry");
    state.cache.set(req.key.clone(), req.value, ttl);
    SetResponse::new(req.key)
}

/// Handler for GET /get?key=..
///
/// Responds 404 when the key is absent or has expired.
pub async fn get_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<GetRequest>, QueryRejection>,
) -> Result<Json<GetResponse>> {
    let Query(req) = query.map_err(|rejection| CacheError::InvalidRequest(rejection.body_text()))?;

    match state.cache.get(&req.key) {
        Some(value) => Ok(Json(GetResponse::new(value))),
        None => Err(CacheError::NotFound(req.key)),
    }
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
