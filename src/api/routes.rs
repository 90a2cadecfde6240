//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    get_handler, health_handler, set_json_handler, set_query_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /set?key=..&value=..&exp=..` - Store a key-value pair
/// - `PUT /set` - Store a key-value pair from a JSON body
/// - `GET /get?key=..` - Retrieve a value by key
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", post(set_query_handler).put(set_json_handler))
        .route("/get", get(get_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
