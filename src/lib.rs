//! Caching Proxy - an HTTP forwarding layer with an embedded response cache
//!
//! Serves previously-seen origin responses while they are still valid and
//! forwards everything else, with TTL expiration, background reclamation,
//! and size-bounded random eviction.

pub mod cache;
pub mod config;
pub mod error;
pub mod proxy;
pub mod tasks;

pub use cache::Cache;
pub use config::Config;
pub use proxy::{create_router, AppState};
pub use tasks::spawn_cleanup_task;
