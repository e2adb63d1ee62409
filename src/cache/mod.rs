//! Cache Module
//!
//! In-memory response caching with TTL expiration, background reclamation,
//! and size-bounded random eviction.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::{CacheStats, StatsCounters};
pub use store::CacheStore;

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::tasks::{spawn_cleanup_task, CleanupHandle};

// == Cache ==
/// Facade composing the store with its background cleanup task.
///
/// Exposes the store operations directly and owns the cleanup task's
/// lifecycle. Must be constructed inside a tokio runtime when the cleanup
/// interval is positive; a zero interval disables background reclamation
/// entirely, leaving expired entries to lazy expiration on read, explicit
/// deletes, and capacity eviction.
#[derive(Debug)]
pub struct Cache<V> {
    store: Arc<CacheStore<V>>,
    cleanup: Mutex<Option<CleanupHandle>>,
}

impl<V: Clone + Send + Sync + 'static> Cache<V> {
    // == Constructor ==
    /// Creates a cache and, when `cleanup_interval` is positive, starts its
    /// cleanup task.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL applied when `set` passes no explicit TTL;
    ///   `None` means such entries never expire
    /// * `cleanup_interval` - background sweep period; zero disables it
    /// * `capacity` - maximum entry count; `None` or `Some(0)` = unbounded
    pub fn new(
        default_ttl: Option<Duration>,
        cleanup_interval: Duration,
        capacity: Option<usize>,
    ) -> Self {
        let store = Arc::new(CacheStore::new(capacity, default_ttl));
        let cleanup = if cleanup_interval.is_zero() {
            None
        } else {
            Some(spawn_cleanup_task(Arc::clone(&store), cleanup_interval))
        };

        Self {
            store,
            cleanup: Mutex::new(cleanup),
        }
    }

    /// Retrieves a value by key; `None` if absent or expired.
    pub fn get(&self, key: &str) -> Option<V> {
        self.store.get(key)
    }

    /// Stores a key-value pair with an optional TTL.
    pub fn set(&self, key: String, value: V, ttl: Option<Duration>) {
        self.store.set(key, value, ttl);
    }

    /// Removes an entry by key. No-op if absent.
    pub fn delete(&self, key: &str) {
        self.store.delete(key);
    }

    /// Drops every entry.
    pub fn flush_all(&self) {
        self.store.flush_all();
    }

    /// Physical entry count, including not-yet-reclaimed expired entries.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Snapshot of hit/miss/eviction/expired counters.
    pub fn stats(&self) -> CacheStats {
        self.store.stats()
    }

    // == Shutdown ==
    /// Stops the cleanup task and waits for it to finish.
    ///
    /// Idempotent; a cache without a cleanup task returns immediately.
    /// Dropping the cache without calling this also ends the task, just
    /// without waiting for it.
    pub async fn shutdown(&self) {
        let handle = self
            .cleanup
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.stop().await;
        }
    }
}
