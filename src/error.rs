//! Error types for the cache.
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
/// Unified error type for the cache.
///
/// `Clone` is required so a single deduplicated load can hand the same
/// failure to every waiter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    /// Key was empty; rejected before any cache or loader interaction
    #[error("key must not be empty")]
    EmptyKey,

    /// No group registered under this name
    #[error("group not found: {0}")]
    GroupNotFound(String),

    /// The loader could not produce a value for this key
    #[error("key not found: {0}")]
    NotFound(String),

    /// Loader failed for a reason other than a missing record
    #[error("loader error: {0}")]
    Loader(String),

    /// Peer fetch failed (network, non-OK status, bad body)
    #[error("peer error: {0}")]
    Peer(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::EmptyKey => StatusCode::BAD_REQUEST,
            CacheError::GroupNotFound(_) => StatusCode::NOT_FOUND,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::Loader(_) => StatusCode::BAD_GATEWAY,
            CacheError::Peer(_) => StatusCode::BAD_GATEWAY,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_error_body_has_error_response_shape() {
        let response = CacheError::NotFound("k".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "key not found: k");
    }

    #[tokio::test]
    async fn test_empty_key_maps_to_bad_request() {
        let response = CacheError::EmptyKey.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
