//! Proxy Handlers
//!
//! The catch-all forwarding handler: consults the cache for safe methods,
//! forwards to the origin on a miss, and stores the captured response.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Bytes},
    extract::{Request, State},
    http::Method,
    response::Response,
};
use tracing::debug;

use crate::cache::Cache;
use crate::config::Config;
use crate::error::Result;
use crate::proxy::key::derive_key;
use crate::proxy::response::{CacheStatus, CachedResponse};

// == App State ==
/// State shared across all proxied requests.
#[derive(Clone)]
pub struct AppState {
    /// Shared response cache
    pub cache: Arc<Cache<CachedResponse>>,
    /// Reused client connection pool for origin requests
    pub client: reqwest::Client,
    /// Origin base URL, normalized without a trailing slash
    pub origin: String,
}

impl AppState {
    /// Creates state around an existing cache.
    pub fn new(cache: Cache<CachedResponse>, origin: impl Into<String>) -> Self {
        let origin = origin.into().trim_end_matches('/').to_string();
        Self {
            cache: Arc::new(cache),
            client: reqwest::Client::new(),
            origin,
        }
    }

    /// Creates state from configuration, constructing the cache and its
    /// cleanup task.
    pub fn from_config(config: &Config) -> Self {
        let cache = Cache::new(
            config.default_ttl(),
            config.cleanup_interval(),
            config.capacity_bound(),
        );
        Self::new(cache, config.origin.clone())
    }
}

// == Cacheability ==
/// Only safe methods consult or populate the cache; everything else always
/// goes to the origin.
fn is_cacheable(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD)
}

// == Forward Handler ==
/// Handles every inbound request.
///
/// Derives the cache key, serves a still-valid cached response with an
/// `X-Cache: HIT` marker, and otherwise forwards to the origin, stores the
/// captured response for safe methods, and replies with `X-Cache: MISS`.
/// A failed forward never stores anything.
pub async fn forward_handler(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response> {
    let (parts, body) = request.into_parts();
    let body = to_bytes(body, usize::MAX).await?;

    let target_url = format!("{}{}", state.origin, parts.uri.path());
    let query = parts.uri.query().unwrap_or("");
    let key = derive_key(&parts.method, &target_url, query, &body);
    let cacheable = is_cacheable(&parts.method);

    if cacheable {
        if let Some(cached) = state.cache.get(&key) {
            debug!(method = %parts.method, path = %parts.uri.path(), "cache hit");
            return Ok(cached.into_response_with(CacheStatus::Hit));
        }
    }

    let upstream = forward_to_origin(&state, parts.method.clone(), &target_url, query, body).await?;
    let captured = CachedResponse::capture(upstream).await?;
    debug!(
        method = %parts.method,
        path = %parts.uri.path(),
        status = %captured.status,
        "cache miss, forwarded to origin"
    );

    if cacheable {
        // No explicit TTL: the cache's configured default applies
        state.cache.set(key, captured.clone(), None);
    }

    Ok(captured.into_response_with(CacheStatus::Miss))
}

/// Sends the request to the origin, relaying method, URL, raw query, and
/// body.
async fn forward_to_origin(
    state: &AppState,
    method: Method,
    target_url: &str,
    query: &str,
    body: Bytes,
) -> Result<reqwest::Response> {
    let url = if query.is_empty() {
        target_url.to_string()
    } else {
        format!("{}?{}", target_url, query)
    };

    let response = state.client.request(method, url).body(body).send().await?;
    Ok(response)
}
