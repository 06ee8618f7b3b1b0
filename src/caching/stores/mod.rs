//! # Cache Stores Module
//!
//! Cache store backends: an in-memory store for tests and single-instance
//! deployments, and a Redis store for the shared multi-instance backend.
//! Both expose raw bytes under string keys with a per-entry TTL; value
//! encoding and failure policy live one layer up in the adapter.

pub mod memory;
pub mod redis_store;

pub use memory::{InMemoryCache, InMemoryCacheConfig};
pub use redis_store::RedisCache;

use super::CacheResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Trait for cache store backends
///
/// Implementations must be safe for concurrent use; the catalog core shares
/// one store across all request tasks and never wraps calls in a lock.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Get a value from the cache
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    /// Set a value in the cache with a TTL
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> CacheResult<()>;

    /// Delete a value from the cache, returning whether it existed
    async fn delete(&self, key: &str) -> CacheResult<bool>;

    /// Get store-level statistics
    async fn stats(&self) -> CacheResult<CacheStoreStats>;
}

/// A stored cache entry with its expiry instant (in-memory store)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The cached value
    pub value: Vec<u8>,

    /// Expiry instant as a Unix timestamp in milliseconds
    pub expires_at_ms: u64,
}

impl CacheEntry {
    /// Create a new entry expiring `ttl` from now
    pub fn new(value: Vec<u8>, ttl: Duration) -> Self {
        Self {
            value,
            expires_at_ms: now_ms() + ttl.as_millis() as u64,
        }
    }

    /// Check whether the entry has passed its expiry instant
    pub fn is_expired(&self) -> bool {
        now_ms() > self.expires_at_ms
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Cache store statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStoreStats {
    /// Number of live entries (0 when the backend does not track it)
    pub entries: usize,

    /// Number of reads that found a live entry
    pub hits: u64,

    /// Number of reads that found nothing or an expired entry
    pub misses: u64,

    /// Number of expired entries removed
    pub expired_cleanups: u64,
}
