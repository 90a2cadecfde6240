//! API Module
//!
//! HTTP handlers and routing for the cache server.
//!
//! # Endpoints
//! - `POST /set` - Store a key-value pair from query parameters
//! - `PUT /set` - Store a key-value pair from a JSON body
//! - `GET /get` - Retrieve a value by key
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
