//! Cached Response Payload
//!
//! The typed payload the proxy stores in the cache: a complete origin
//! response captured for replay, plus the HIT/MISS marker added to every
//! response the proxy returns.

use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::Result;

/// Marker header distinguishing cache hits from forwarded responses.
pub const X_CACHE: &str = "x-cache";

// == Cache Status ==
/// Whether a response was served from the cache or fetched from the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    /// Header value for the marker.
    pub fn as_str(self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

// == Cached Response ==
/// A complete origin response: status, replayable headers, and body bytes.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    /// Origin status code
    pub status: StatusCode,
    /// Origin headers, hop-by-hop headers already stripped
    pub headers: HeaderMap,
    /// Full response body
    pub body: Bytes,
}

impl CachedResponse {
    // == Capture ==
    /// Captures an origin response, reading the body to completion.
    ///
    /// Hop-by-hop headers and the content length are dropped at capture
    /// time; the length is recomputed from the stored body on replay.
    pub async fn capture(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = replayable_headers(response.headers());
        let body = response.bytes().await?;

        Ok(Self {
            status,
            headers,
            body,
        })
    }

    // == Replay ==
    /// Converts into an HTTP response carrying the given cache marker.
    pub fn into_response_with(self, status: CacheStatus) -> Response {
        let mut headers = self.headers;
        headers.insert(
            HeaderName::from_static(X_CACHE),
            HeaderValue::from_static(status.as_str()),
        );
        (self.status, headers, self.body).into_response()
    }
}

// == Header Filtering ==
/// Copies headers, dropping those that describe the original connection or
/// transfer rather than the entity being replayed.
fn replayable_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        if is_replayable(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

fn is_replayable(name: &HeaderName) -> bool {
    !matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
            | "content-length"
    )
}
