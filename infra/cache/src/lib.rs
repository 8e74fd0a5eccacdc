//! # Cache Store
//!
//! A keyed JSON store with TTL expiry. This is the backing store for the
//! assistant's cache mirror: denormalized snapshots of select tables are
//! written under well-known keys and expire after the configured TTL.
//!
//! Entries are `Arc<serde_json::Value>` so reads never clone the payload.
//!
//! ## Example
//!
//! ```rust
//! use ihub_cache::CacheStore;
//! use std::time::Duration;
//!
//! let store = CacheStore::builder()
//!     .ttl(Duration::from_secs(300))
//!     .capacity(64)
//!     .build();
//!
//! store.insert("mirror:customers", serde_json::json!([{"id": "c1"}]));
//! assert!(store.get("mirror:customers").is_some());
//! ```

use chrono::{DateTime, Utc};
use moka::sync::Cache;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

const DEFAULT_TTL: Duration = Duration::from_secs(300);
const DEFAULT_CAPACITY: u64 = 1_000;

/// A cached value together with the instant it was written.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    pub value: Arc<Value>,
    pub stored_at: DateTime<Utc>,
}

impl StoredEntry {
    /// Number of records if the entry holds a JSON array, otherwise 1.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.value.as_array().map_or(1, Vec::len)
    }
}

/// Thread-safe keyed JSON store with uniform TTL expiry.
#[derive(Debug, Clone)]
pub struct CacheStore {
    entries: Cache<String, StoredEntry>,
    ttl: Duration,
}

impl CacheStore {
    /// Creates a new [`CacheStoreBuilder`].
    #[must_use]
    pub fn builder() -> CacheStoreBuilder {
        CacheStoreBuilder::default()
    }

    /// Writes `value` under `key`, replacing any previous entry and resetting its TTL.
    pub fn insert(&self, key: impl Into<String>, value: Value) {
        let key = key.into();
        trace!(%key, "Cache insert");
        self.entries.insert(key, StoredEntry { value: Arc::new(value), stored_at: Utc::now() });
    }

    /// Returns the value under `key`, or `None` if absent or expired.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<Value>> {
        self.entries.get(key).map(|entry| entry.value)
    }

    /// Returns the full entry (value plus write instant) under `key`.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<StoredEntry> {
        self.entries.get(key)
    }

    /// Removes the entry under `key`, if any.
    pub fn invalidate(&self, key: &str) {
        trace!(%key, "Cache invalidate");
        self.entries.invalidate(key);
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// The configured time-to-live of entries.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Approximate number of live entries.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }
}

/// A fluent builder for [`CacheStore`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug)]
pub struct CacheStoreBuilder {
    ttl: Duration,
    capacity: u64,
}

impl Default for CacheStoreBuilder {
    fn default() -> Self {
        Self { ttl: DEFAULT_TTL, capacity: DEFAULT_CAPACITY }
    }
}

impl CacheStoreBuilder {
    /// Sets the entry time-to-live.
    pub const fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the maximum number of entries.
    pub const fn capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Consumes the builder and creates the store.
    pub fn build(self) -> CacheStore {
        let entries = Cache::builder().max_capacity(self.capacity).time_to_live(self.ttl).build();
        CacheStore { entries, ttl: self.ttl }
    }
}
