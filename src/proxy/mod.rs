//! Proxy Module
//!
//! HTTP forwarding glue around the cache: key derivation, the catch-all
//! forwarding handler, and the typed response payload.
//!
//! # Behavior
//! - Safe methods (GET, HEAD) consult the cache and store their responses
//! - All other methods always go to the origin
//! - Every response carries an `X-Cache: HIT|MISS` marker

pub mod handlers;
pub mod key;
pub mod response;
pub mod routes;

pub use handlers::{forward_handler, AppState};
pub use key::derive_key;
pub use response::{CacheStatus, CachedResponse, X_CACHE};
pub use routes::create_router;
