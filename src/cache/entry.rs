//! Cache Entry Module
//!
//! Defines the structure of individual cache entries and their expiry rules.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached value plus its temporal metadata.
///
/// The payload type is generic so the store can hold structured responses
/// or any other cloneable value without downcasting.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant the entry was inserted
    pub created_at: Instant,
    /// Absolute expiration instant, None = never expires
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry with an optional TTL.
    ///
    /// A `None` or zero TTL produces an entry that never expires. Otherwise
    /// `expires_at` is fixed to `created_at + ttl` here and never recomputed
    /// on read.
    pub fn new(value: V, ttl: Option<Duration>) -> Self {
        let created_at = Instant::now();
        let expires_at = match ttl {
            Some(ttl) if !ttl.is_zero() => Some(created_at + ttl),
            _ => None,
        };

        Self {
            value,
            created_at,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired as of now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Checks whether the entry has expired as of `now`.
    ///
    /// The comparison is strict: an entry is still valid at its exact
    /// expiration instant and only counts as expired once `now` is past it.
    ///
    /// # Returns
    /// - `true` if the entry has an expiration and `now > expires_at`
    /// - `false` if the entry never expires or the TTL has not elapsed
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now > expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or None if the entry never expires.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` once the expiration instant has passed
    /// - `Some(remaining)` while the entry is still live
    /// - `None` if the entry has no expiration
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}
