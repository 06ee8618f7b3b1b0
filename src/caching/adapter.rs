//! # Cache Adapter
//!
//! `CatalogCache` is the boundary between the fallible store backends and
//! the read/write paths. Above this line a cache problem does not exist:
//! a backend error, a timeout, or an undecodable entry all degrade to a
//! miss (reads) or a no-op (writes), logged at warn. The read path already
//! has, or can fetch, a correct value from the authoritative collection, so
//! failing the caller over a cache hiccup would invert the design.
//!
//! Invalidation failures are logged but do not block the write path; the
//! per-entry TTL bounds how long a missed invalidation can serve stale data.

use super::stores::CacheStore;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Adapter-level cache statistics
///
/// `degraded` counts operations that failed or timed out and were absorbed;
/// tests use `hits` as the observable signal that a read was served from
/// cache.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub degraded: u64,
}

/// Cache adapter for the catalog read/write paths
pub struct CatalogCache {
    /// The backing store, shared across all request tasks
    store: Arc<dyn CacheStore>,

    /// Budget per store call; exceeded means miss/no-op, never a stall
    operation_timeout: Duration,

    hits: AtomicU64,
    misses: AtomicU64,
    degraded: AtomicU64,
}

impl CatalogCache {
    /// Create an adapter over a store backend
    pub fn new(store: Arc<dyn CacheStore>, operation_timeout: Duration) -> Self {
        Self {
            store,
            operation_timeout,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            degraded: AtomicU64::new(0),
        }
    }

    /// Fetch and decode a cached value; any failure is a miss
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match timeout(self.operation_timeout, self.store.get(key)).await {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(e)) => {
                warn!("cache get degraded to miss for key {}: {}", key, e);
                self.degraded.fetch_add(1, Ordering::Relaxed);
                return None;
            }
            Err(_) => {
                warn!("cache get timed out for key {}, treating as miss", key);
                self.degraded.fetch_add(1, Ordering::Relaxed);
                return None;
            }
        };

        let Some(bytes) = bytes else {
            debug!("cache miss for key {}", key);
            self.misses.fetch_add(1, Ordering::Relaxed);
            return None;
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => {
                debug!("cache hit for key {}", key);
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(value)
            }
            Err(e) => {
                warn!("discarding undecodable cache entry for key {}: {}", key, e);
                self.degraded.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Encode and store a value with a TTL, best effort
    pub async fn put_json<T: Serialize>(&self, key: &str, value: &T, ttl: Duration) {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("skipping cache write for key {}: {}", key, e);
                self.degraded.fetch_add(1, Ordering::Relaxed);
                return;
            }
        };

        match timeout(self.operation_timeout, self.store.set(key, &bytes, ttl)).await {
            Ok(Ok(())) => {
                debug!("cached key {} with ttl {:?}", key, ttl);
            }
            Ok(Err(e)) => {
                warn!("cache write failed for key {}: {}", key, e);
                self.degraded.fetch_add(1, Ordering::Relaxed);
            }
            Err(_) => {
                warn!("cache write timed out for key {}", key);
                self.degraded.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Delete a cache entry, best effort
    ///
    /// A failed delete leaves a stale entry behind; its TTL bounds how long
    /// that can last, so the write path that triggered this never blocks on
    /// it.
    pub async fn invalidate(&self, key: &str) -> bool {
        match timeout(self.operation_timeout, self.store.delete(key)).await {
            Ok(Ok(deleted)) => {
                debug!("invalidated cache key {} (existed: {})", key, deleted);
                deleted
            }
            Ok(Err(e)) => {
                warn!(
                    "cache invalidation failed for key {}: {} (entry expires by ttl)",
                    key, e
                );
                self.degraded.fetch_add(1, Ordering::Relaxed);
                false
            }
            Err(_) => {
                warn!(
                    "cache invalidation timed out for key {} (entry expires by ttl)",
                    key
                );
                self.degraded.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    /// Snapshot the adapter counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            degraded: self.degraded.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caching::stores::{CacheStoreStats, InMemoryCache, InMemoryCacheConfig};
    use crate::caching::{CacheError, CacheResult};
    use async_trait::async_trait;

    /// Store double whose every operation fails
    struct FailingStore;

    #[async_trait]
    impl CacheStore for FailingStore {
        async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
            Err(CacheError::Store {
                message: "backend down".to_string(),
            })
        }

        async fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) -> CacheResult<()> {
            Err(CacheError::Store {
                message: "backend down".to_string(),
            })
        }

        async fn delete(&self, _key: &str) -> CacheResult<bool> {
            Err(CacheError::Store {
                message: "backend down".to_string(),
            })
        }

        async fn stats(&self) -> CacheResult<CacheStoreStats> {
            Ok(CacheStoreStats::default())
        }
    }

    /// Store double that never answers within any reasonable budget
    struct StalledStore;

    #[async_trait]
    impl CacheStore for StalledStore {
        async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(None)
        }

        async fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) -> CacheResult<()> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }

        async fn delete(&self, _key: &str) -> CacheResult<bool> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(false)
        }

        async fn stats(&self) -> CacheResult<CacheStoreStats> {
            Ok(CacheStoreStats::default())
        }
    }

    fn memory_adapter() -> CatalogCache {
        CatalogCache::new(
            Arc::new(InMemoryCache::new(InMemoryCacheConfig::default())),
            Duration::from_millis(250),
        )
    }

    #[tokio::test]
    async fn test_roundtrip_counts_hit() {
        let cache = memory_adapter();

        cache
            .put_json("k", &vec!["a".to_string()], Duration::from_secs(60))
            .await;
        let value: Option<Vec<String>> = cache.get_json("k").await;

        assert_eq!(value, Some(vec!["a".to_string()]));
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().degraded, 0);
    }

    #[tokio::test]
    async fn test_absent_key_counts_miss() {
        let cache = memory_adapter();

        let value: Option<String> = cache.get_json("nothing").await;

        assert_eq!(value, None);
        assert_eq!(cache.stats().misses, 1);
    }

    #[tokio::test]
    async fn test_failing_backend_degrades_silently() {
        let cache = CatalogCache::new(Arc::new(FailingStore), Duration::from_millis(250));

        cache.put_json("k", &"v", Duration::from_secs(60)).await;
        let value: Option<String> = cache.get_json("k").await;
        let deleted = cache.invalidate("k").await;

        assert_eq!(value, None);
        assert!(!deleted);
        assert_eq!(cache.stats().degraded, 3);
    }

    #[tokio::test]
    async fn test_stalled_backend_times_out_to_miss() {
        let cache = CatalogCache::new(Arc::new(StalledStore), Duration::from_millis(20));

        let start = std::time::Instant::now();
        let value: Option<String> = cache.get_json("k").await;

        assert_eq!(value, None);
        assert!(start.elapsed() < Duration::from_secs(1));
        assert_eq!(cache.stats().degraded, 1);
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_a_miss() {
        let store = Arc::new(InMemoryCache::new(InMemoryCacheConfig::default()));
        store
            .set("k", b"not json at all", Duration::from_secs(60))
            .await
            .unwrap();

        let cache = CatalogCache::new(store, Duration::from_millis(250));
        let value: Option<Vec<String>> = cache.get_json("k").await;

        assert_eq!(value, None);
        assert_eq!(cache.stats().degraded, 1);
    }

    #[tokio::test]
    async fn test_invalidate_removes_entry() {
        let cache = memory_adapter();

        cache.put_json("k", &"v", Duration::from_secs(60)).await;
        assert!(cache.invalidate("k").await);

        let value: Option<String> = cache.get_json("k").await;
        assert_eq!(value, None);
    }
}
