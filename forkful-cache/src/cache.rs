//! In-memory TTL cache.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use forkful_core::constants::{DEFAULT_TTL_SECONDS, SWEEP_INTERVAL_SECONDS};

use crate::sweeper::SweeperHandle;

/// Cache entry with an absolute expiration instant.
#[derive(Clone)]
struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL used by [`TtlCache::set`], in seconds
    pub default_ttl_seconds: u64,
    /// Interval between background sweeps, in seconds
    pub sweep_interval_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_seconds: DEFAULT_TTL_SECONDS,
            sweep_interval_seconds: SWEEP_INTERVAL_SECONDS,
        }
    }
}

impl CacheConfig {
    /// Default TTL as a `Duration`.
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_seconds)
    }

    /// Sweep interval as a `Duration`.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_seconds)
    }
}

/// Process-local key/value cache with per-entry TTL.
///
/// Values of any serde type can be stored; each key family must be read
/// back with the type it was written with. Clones share the same storage,
/// so the composition root creates one instance and hands out clones.
///
/// Expired entries are invisible to readers and are removed when read, when
/// [`cleanup`](Self::cleanup) runs, or when the background sweeper fires.
#[derive(Clone)]
pub struct TtlCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    config: CacheConfig,
}

impl TtlCache {
    /// Creates a new cache with default configuration.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Returns the configuration this cache was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Gets a live value by key.
    ///
    /// Returns `None` if the key is unknown, expired (the entry is evicted),
    /// or stored with a type that does not deserialize into `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get_value(key)?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(key, error = %e, "Cached value does not match requested type");
                None
            }
        }
    }

    /// Stores a value with the default TTL.
    pub fn set<T: Serialize>(&self, key: impl Into<String>, value: &T) {
        self.set_with_ttl(key, value, self.config.default_ttl());
    }

    /// Stores a value with a custom TTL, replacing any existing entry.
    ///
    /// A zero TTL stores an entry that is already expired on the next read.
    pub fn set_with_ttl<T: Serialize>(&self, key: impl Into<String>, value: &T, ttl: Duration) {
        let key = key.into();
        let value = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                warn!(key = %key, error = %e, "Value not cacheable, skipping");
                return;
            }
        };

        let expires_at = Instant::now() + ttl;
        self.entries.write().insert(key, CacheEntry { value, expires_at });
    }

    /// Returns true if a live entry exists. Evicts the entry if it expired.
    pub fn has(&self, key: &str) -> bool {
        self.get_value(key).is_some()
    }

    /// Removes an entry, expired or not. Returns whether anything was removed.
    pub fn delete(&self, key: &str) -> bool {
        self.entries.write().remove(key).is_some()
    }

    /// Clears all cached entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Removes every entry expired as of now. Returns how many were removed.
    pub fn cleanup(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    /// Returns the number of physically stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Snapshot of physical storage.
    ///
    /// Expired entries nobody has read yet are still counted until a sweep
    /// removes them, so `size` may exceed the number of live entries.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.read();
        let mut keys: Vec<String> = entries.keys().cloned().collect();
        keys.sort();

        CacheStats {
            size: entries.len(),
            keys,
        }
    }

    /// Compute-if-absent.
    ///
    /// On a hit the cached value is returned and `producer` is not called.
    /// On a miss `producer` runs once; its value is stored with `ttl` and
    /// returned. An error from `producer` is returned unchanged and nothing
    /// is stored. Concurrent misses on the same key each run their producer.
    pub async fn with_cache<T, E, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        producer: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.get::<T>(key) {
            debug!(key, "Cache hit");
            return Ok(hit);
        }

        debug!(key, "Cache miss");
        let value = producer().await?;
        self.set_with_ttl(key, &value, ttl);
        Ok(value)
    }

    /// Starts a background task that calls [`cleanup`](Self::cleanup) every
    /// `interval`. Must be called from within a tokio runtime.
    pub fn spawn_sweeper(&self, interval: Duration) -> SweeperHandle {
        SweeperHandle::spawn(self.clone(), interval)
    }

    /// Starts the sweeper with the configured interval.
    pub fn spawn_default_sweeper(&self) -> SweeperHandle {
        self.spawn_sweeper(self.config.sweep_interval())
    }

    fn get_value(&self, key: &str) -> Option<Value> {
        let now = Instant::now();

        {
            let entries = self.entries.read();
            match entries.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired_at(now) => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        // Expired under the read lock; re-check under the write lock since a
        // writer may have refreshed the key in between.
        let mut entries = self.entries.write();
        let expired = match entries.get(key) {
            None => return None,
            Some(entry) => entry.is_expired_at(now),
        };

        if expired {
            entries.remove(key);
            debug!(key, "Evicted expired entry on read");
            return None;
        }

        entries.get(key).map(|entry| entry.value.clone())
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Physically stored entries, including expired ones not yet swept
    pub size: usize,
    /// Stored keys, sorted
    pub keys: Vec<String>,
}
