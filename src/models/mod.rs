//! Request and Response models for the cache server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! deserializing requests and serializing HTTP response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{GetRequest, SetRequest};
pub use responses::{ErrorResponse, GetResponse, HealthResponse, SetResponse, StatsResponse};
