//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

// == Cleanup Handle ==
/// Handle to a running cleanup task.
///
/// Holds the shutdown side of a watch channel; the task exits as soon as
/// the sender is dropped, so dropping the handle (or the cache that owns
/// it) never leaks the task.
#[derive(Debug)]
pub struct CleanupHandle {
    shutdown: watch::Sender<()>,
    task: JoinHandle<()>,
}

impl CleanupHandle {
    /// Stops the cleanup task and waits for it to finish.
    ///
    /// Deterministic: once this returns, no further sweeps will run.
    pub async fn stop(self) {
        drop(self.shutdown);
        let _ = self.task.await;
    }

    /// Returns true once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

// == Spawn ==
/// Spawns a background task that sweeps expired entries from `store` every
/// `interval`.
///
/// Each sweep runs the store's two-phase purge: a shared-lock scan followed
/// by an exclusive-lock delete. The task sleeps between sweeps and wakes
/// early only to shut down.
pub fn spawn_cleanup_task<V>(store: Arc<CacheStore<V>>, interval: Duration) -> CleanupHandle
where
    V: Clone + Send + Sync + 'static,
{
    let (shutdown, mut signal) = watch::channel(());

    let task = tokio::spawn(async move {
        info!("cleanup task started, sweep interval {:?}", interval);

        loop {
            tokio::select! {
                _ = tokio::time::sleep(interval) => {
                    let removed = store.purge_expired();
                    if removed > 0 {
                        info!("cleanup sweep removed {} expired entries", removed);
                    } else {
                        debug!("cleanup sweep found no expired entries");
                    }
                }
                _ = signal.changed() => {
                    debug!("cleanup task stopping");
                    break;
                }
            }
        }
    });

    CleanupHandle { shutdown, task }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let store: Arc<CacheStore<String>> = Arc::new(CacheStore::new(None, None));

        store.set(
            "expire_soon".to_string(),
            "value".to_string(),
            Some(Duration::from_millis(50)),
        );

        let handle = spawn_cleanup_task(Arc::clone(&store), Duration::from_millis(100));

        // Entry must be physically gone within two sweep intervals of expiry
        tokio::time::sleep(Duration::from_millis(250)).await;

        assert_eq!(store.len(), 0);

        handle.stop().await;
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let store: Arc<CacheStore<String>> = Arc::new(CacheStore::new(None, None));

        store.set(
            "long_lived".to_string(),
            "value".to_string(),
            Some(Duration::from_secs(3600)),
        );
        store.set("permanent".to_string(), "value".to_string(), None);

        let handle = spawn_cleanup_task(Arc::clone(&store), Duration::from_millis(50));

        tokio::time::sleep(Duration::from_millis(150)).await;

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("long_lived"), Some("value".to_string()));
        assert_eq!(store.get("permanent"), Some("value".to_string()));

        handle.stop().await;
    }

    #[tokio::test]
    async fn test_cleanup_task_stop_is_deterministic() {
        let store: Arc<CacheStore<String>> = Arc::new(CacheStore::new(None, None));

        let handle = spawn_cleanup_task(Arc::clone(&store), Duration::from_millis(20));
        handle.stop().await;

        // No sweeps run after stop returns
        store.set(
            "expired".to_string(),
            "value".to_string(),
            Some(Duration::from_millis(10)),
        );
        tokio::time::sleep(Duration::from_millis(80)).await;

        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_cleanup_task_exits_when_handle_dropped() {
        let store: Arc<CacheStore<String>> = Arc::new(CacheStore::new(None, None));

        let handle = spawn_cleanup_task(Arc::clone(&store), Duration::from_secs(3600));
        let task = handle.task;
        drop(handle.shutdown);

        // The dropped sender wakes the task out of its sleep immediately
        let _ = tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("cleanup task should exit promptly after shutdown");
    }
}
