//! Error types for the cache server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache and its HTTP adapter.
///
/// The store itself only ever produces `InvalidCapacity` (at construction)
/// and `Internal` (from a failed consistency check). A cache miss is a plain
/// `None` from the store; handlers turn it into `NotFound`.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key absent or expired
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Malformed request at the transport level
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Store constructed with a capacity that cannot hold anything
    #[error("Invalid capacity: {0} (must be greater than zero)")]
    InvalidCapacity(usize),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::InvalidCapacity(_) | CacheError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_error_status_codes() {
        let cases = vec![
            (CacheError::NotFound("k".into()), StatusCode::NOT_FOUND),
            (CacheError::InvalidRequest("bad".into()), StatusCode::BAD_REQUEST),
            (CacheError::InvalidCapacity(0), StatusCode::INTERNAL_SERVER_ERROR),
            (CacheError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_error_body_is_json() {
        let response = CacheError::NotFound("missing".into()).into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["error"], "Key not found: missing");
    }

    #[test]
    fn test_invalid_capacity_message() {
        let err = CacheError::InvalidCapacity(0);
        assert!(err.to_string().contains("greater than zero"));
    }
}
