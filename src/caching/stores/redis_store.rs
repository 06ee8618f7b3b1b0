//! # Redis Cache Store
//!
//! The shared cache backend: a Redis instance reachable by every server
//! instance. Entries are written with `SET EX`, so Redis itself enforces the
//! TTL backstop and concurrent access guarantees; this store only prefixes
//! keys and counts hits and misses.

use super::{CacheStore, CacheStoreStats};
use crate::caching::{CacheError, CacheResult};
use crate::core::config::RedisConfig;
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Redis cache implementation
pub struct RedisCache {
    /// Configuration
    config: RedisConfig,

    /// Connection manager; cloned per operation. It multiplexes a single
    /// connection and reconnects internally on failure.
    connection: ConnectionManager,

    /// Statistics counters
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl RedisCache {
    /// Connect to Redis
    pub async fn new(config: RedisConfig) -> CacheResult<Self> {
        let client = Client::open(config.url.as_str()).map_err(CacheError::Redis)?;

        let connection = tokio::time::timeout(
            config.connection_timeout,
            ConnectionManager::new(client),
        )
        .await
        .map_err(|_| CacheError::Timeout)?
        .map_err(CacheError::Redis)?;

        info!("redis cache connected to {}", config.url);

        Ok(Self {
            config,
            connection,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Apply the configured key prefix
    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.config.key_prefix, key)
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        let full_key = self.full_key(key);
        let mut conn = self.connection.clone();

        let value: Option<Vec<u8>> = conn.get(&full_key).await.map_err(CacheError::Redis)?;

        match value {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("redis cache hit for key {}", key);
                Ok(Some(value))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!("redis cache miss for key {}", key);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> CacheResult<()> {
        let full_key = self.full_key(key);
        let mut conn = self.connection.clone();

        conn.set_ex::<_, _, ()>(&full_key, value, ttl.as_secs())
            .await
            .map_err(CacheError::Redis)?;

        debug!("set redis cache key {} with ttl {:?}", key, ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let full_key = self.full_key(key);
        let mut conn = self.connection.clone();

        let deleted: i64 = conn.del(&full_key).await.map_err(CacheError::Redis)?;

        if deleted > 0 {
            debug!("deleted redis cache key {}", key);
        }

        Ok(deleted > 0)
    }

    async fn stats(&self) -> CacheResult<CacheStoreStats> {
        // Entry counts live server-side; only report what this client saw.
        Ok(CacheStoreStats {
            entries: 0,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expired_cleanups: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> RedisConfig {
        RedisConfig {
            url: std::env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            key_prefix: "catalog-test:".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    #[ignore] // Requires a running Redis instance (REDIS_URL)
    async fn test_basic_operations() {
        let cache = RedisCache::new(test_config()).await.unwrap();

        let key = "test_key";
        let value = b"test_value";

        cache.set(key, value, Duration::from_secs(60)).await.unwrap();
        assert_eq!(cache.get(key).await.unwrap(), Some(value.to_vec()));

        assert!(cache.delete(key).await.unwrap());
        assert_eq!(cache.get(key).await.unwrap(), None);
    }

    #[tokio::test]
    #[ignore] // Requires a running Redis instance (REDIS_URL)
    async fn test_ttl_expiration() {
        let cache = RedisCache::new(test_config()).await.unwrap();

        cache
            .set("expire_test", b"expire_value", Duration::from_secs(1))
            .await
            .unwrap();

        assert!(cache.get("expire_test").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_secs(2)).await;

        assert_eq!(cache.get("expire_test").await.unwrap(), None);
    }
}
