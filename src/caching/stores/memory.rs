//! # In-Memory Cache Store
//!
//! A process-local cache store with per-entry TTL. Expiry is enforced
//! lazily on read, with a background sweep to keep entries that are never
//! read again from lingering. Suitable for tests and single-instance
//! deployments; multi-instance deployments share a Redis backend instead.

use super::{CacheEntry, CacheStore, CacheStoreStats};
use crate::caching::CacheResult;
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::debug;

/// In-memory cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InMemoryCacheConfig {
    /// Interval between background sweeps of expired entries
    #[serde(with = "humantime_serde")]
    pub cleanup_interval: Duration,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            cleanup_interval: Duration::from_secs(60),
        }
    }
}

/// In-memory cache implementation
pub struct InMemoryCache {
    /// Cache entries
    entries: Arc<DashMap<String, CacheEntry>>,

    /// Statistics counters
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    expired_cleanups: Arc<AtomicU64>,

    /// Background sweep task, aborted on drop
    _cleanup_task: tokio::task::JoinHandle<()>,
}

impl InMemoryCache {
    /// Create a new in-memory cache and start its sweep task
    pub fn new(config: InMemoryCacheConfig) -> Self {
        let entries: Arc<DashMap<String, CacheEntry>> = Arc::new(DashMap::new());
        let expired_cleanups = Arc::new(AtomicU64::new(0));

        let cleanup_task = {
            let entries = entries.clone();
            let expired_cleanups = expired_cleanups.clone();
            let cleanup_interval = config.cleanup_interval;

            tokio::spawn(async move {
                let mut interval = interval(cleanup_interval);
                loop {
                    interval.tick().await;
                    Self::sweep_expired(&entries, &expired_cleanups);
                }
            })
        };

        Self {
            entries,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            expired_cleanups,
            _cleanup_task: cleanup_task,
        }
    }

    /// Remove every expired entry
    fn sweep_expired(entries: &DashMap<String, CacheEntry>, expired_cleanups: &AtomicU64) {
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired());
        let removed = before.saturating_sub(entries.len());

        if removed > 0 {
            expired_cleanups.fetch_add(removed as u64, Ordering::Relaxed);
            debug!("swept {} expired cache entries", removed);
        }
    }
}

impl Drop for InMemoryCache {
    fn drop(&mut self) {
        self._cleanup_task.abort();
    }
}

#[async_trait]
impl CacheStore for InMemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                drop(entry);
                if self.entries.remove(key).is_some() {
                    self.expired_cleanups.fetch_add(1, Ordering::Relaxed);
                }
                self.misses.fetch_add(1, Ordering::Relaxed);
                return Ok(None);
            }

            let value = entry.value.clone();
            self.hits.fetch_add(1, Ordering::Relaxed);
            Ok(Some(value))
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            Ok(None)
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> CacheResult<()> {
        self.entries
            .insert(key.to_string(), CacheEntry::new(value.to_vec(), ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    async fn stats(&self) -> CacheResult<CacheStoreStats> {
        Ok(CacheStoreStats {
            entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expired_cleanups: self.expired_cleanups.load(Ordering::Relaxed),
        })
    }
}
