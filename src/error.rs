//! Error types for the proxy
//!
//! Provides unified error handling using thiserror.
//!
//! The cache engine itself has no failure modes: its operations are total.
//! Errors only arise in the forwarding glue, and a failed forwarding attempt
//! never touches the cache.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Proxy Error Enum ==
/// Unified error type for the forwarding layer.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Inbound request body could not be read
    #[error("failed to read request body: {0}")]
    BodyRead(#[from] axum::Error),

    /// Request to the origin failed at the transport level
    #[error("origin request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProxyError::BodyRead(_) => StatusCode::BAD_REQUEST,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the forwarding layer.
pub type Result<T> = std::result::Result<T, ProxyError>;
