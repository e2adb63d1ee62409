//! Proxy Routes
//!
//! Configures the Axum router. A forward proxy has no fixed routes: every
//! path and method lands on the catch-all forwarding handler.

use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers::{forward_handler, AppState};

/// Creates the proxy router.
///
/// # Middleware
/// - Tracing: logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .fallback(forward_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Cache;
    use crate::proxy::response::X_CACHE;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use std::time::Duration;
    use tower::util::ServiceExt;

    async fn spawn_origin() -> String {
        let app = Router::new().route("/anything", get(|| async { "ok" }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_router_forwards_any_path() {
        let origin = spawn_origin().await;
        let cache = Cache::new(Some(Duration::from_secs(60)), Duration::ZERO, None);
        let app = create_router(AppState::new(cache, origin));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/anything")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(X_CACHE).unwrap(), "MISS");
    }

    #[tokio::test]
    async fn test_router_relays_origin_status() {
        let origin = spawn_origin().await;
        let cache = Cache::new(Some(Duration::from_secs(60)), Duration::ZERO, None);
        let app = create_router(AppState::new(cache, origin));

        // The stub origin has no such route, so it answers 404
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
