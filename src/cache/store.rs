//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with TTL expiration and
//! size-bounded random eviction. The store owns its reader/writer lock, so
//! lookups run concurrently under the shared lock while mutations serialize
//! on the exclusive lock.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use rand::Rng;

use crate::cache::{CacheEntry, CacheStats, StatsCounters};

// == Cache Store ==
/// In-memory key-value store with per-entry TTL and an optional capacity
/// bound enforced by uniform random eviction.
///
/// All operations are total: `get` and `delete` ignore missing keys, and
/// `set` resolves capacity pressure by evicting rather than rejecting.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage behind the store-owned lock
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    /// Maximum number of entries, None = unbounded
    capacity: Option<usize>,
    /// TTL applied when `set` is called without an explicit TTL,
    /// None = such entries never expire
    default_ttl: Option<Duration>,
    /// Performance counters
    stats: StatsCounters,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore.
    ///
    /// # Arguments
    /// * `capacity` - Maximum entry count; `None` or `Some(0)` means unbounded
    /// * `default_ttl` - TTL substituted when `set` receives no explicit TTL
    pub fn new(capacity: Option<usize>, default_ttl: Option<Duration>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            // A literal zero bound would make the capacity invariant
            // unsatisfiable, so it is normalized to unbounded.
            capacity: capacity.filter(|c| *c > 0),
            default_ttl,
            stats: StatsCounters::new(),
        }
    }

    // == Set ==
    /// Stores a key-value pair, overwriting any existing entry for the key.
    ///
    /// A `None` TTL falls back to the configured default; a zero TTL (or an
    /// absent default) makes the entry permanent. When the store is bounded,
    /// at capacity, and the key is new, one existing entry chosen uniformly
    /// at random is evicted first. Overwriting an existing key never evicts.
    pub fn set(&self, key: String, value: V, ttl: Option<Duration>) {
        let entry = CacheEntry::new(value, ttl.or(self.default_ttl));

        let mut entries = self.write_entries();
        if let Some(capacity) = self.capacity {
            if !entries.contains_key(&key) && entries.len() >= capacity {
                if Self::evict_random(&mut entries).is_some() {
                    self.stats.record_eviction();
                }
            }
        }
        entries.insert(key, entry);
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns `None` if the key is absent or the entry has expired. Lazy
    /// expiration: an expired entry reads as absent but is left in place for
    /// the cleanup task, so `get` only ever takes the shared lock.
    pub fn get(&self, key: &str) -> Option<V> {
        let entries = self.read_entries();
        match entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Delete ==
    /// Removes an entry by key. No-op if the key is absent.
    pub fn delete(&self, key: &str) {
        self.write_entries().remove(key);
    }

    // == Flush ==
    /// Atomically replaces the entire mapping with an empty one.
    pub fn flush_all(&self) {
        let mut entries = self.write_entries();
        *entries = HashMap::new();
    }

    // == Purge Expired ==
    /// Removes all expired entries and returns how many were removed.
    ///
    /// Two-phase sweep: expired keys are collected under the shared lock,
    /// then removed under the exclusive lock, so the exclusive lock is never
    /// held for the full scan. Each key is re-checked before removal; an
    /// entry overwritten between the phases is no longer expired at the scan
    /// instant and must survive.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();

        let expired: Vec<String> = {
            let entries = self.read_entries();
            entries
                .iter()
                .filter(|(_, entry)| entry.is_expired_at(now))
                .map(|(key, _)| key.clone())
                .collect()
        };

        if expired.is_empty() {
            return 0;
        }

        let mut entries = self.write_entries();
        let mut removed = 0;
        for key in expired {
            if let Some(entry) = entries.get(&key) {
                if entry.is_expired_at(now) {
                    entries.remove(&key);
                    removed += 1;
                }
            }
        }

        self.stats.record_expired(removed as u64);
        removed
    }

    // == Length ==
    /// Returns the physical entry count, including expired entries that the
    /// cleanup task has not removed yet.
    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.read_entries().is_empty()
    }

    // == Stats ==
    /// Returns a snapshot of the performance counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    // == Eviction ==
    /// Removes one entry chosen uniformly at random among current keys.
    ///
    /// Deliberately not an LRU approximation: uniform choice keeps `set`
    /// free of recency bookkeeping, and the TTL already bounds staleness.
    fn evict_random(entries: &mut HashMap<String, CacheEntry<V>>) -> Option<String> {
        if entries.is_empty() {
            return None;
        }

        let index = rand::thread_rng().gen_range(0..entries.len());
        let victim = entries.keys().nth(index).cloned()?;
        entries.remove(&victim);
        Some(victim)
    }

    // == Lock Helpers ==
    // No operation panics while holding the lock, so a poisoned guard still
    // wraps a structurally valid map and can be recovered.
    fn read_entries(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
