//! # Configuration Module
//!
//! Configuration for the catalog core. Defaults carry the reference values:
//! 300 second TTL for search envelopes, 3600 seconds for single-entity
//! lookups, and a 250 millisecond budget per cache operation. The TTLs are
//! the staleness backstop — even a lost invalidation self-heals once the
//! entry expires.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level configuration for the catalog core
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Cache behavior and backend settings
    pub cache: CacheConfig,

    /// Default page size when a search query does not specify a limit
    pub default_page_size: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            default_page_size: 10,
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL for cached search result envelopes
    #[serde(with = "humantime_serde")]
    pub search_ttl: Duration,

    /// TTL for cached single-product lookups
    #[serde(with = "humantime_serde")]
    pub product_ttl: Duration,

    /// Per-operation timeout for cache backend calls; operations that exceed
    /// it are treated as a miss/no-op rather than blocking the request
    #[serde(with = "humantime_serde")]
    pub operation_timeout: Duration,

    /// Redis backend settings
    pub redis: RedisConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            search_ttl: Duration::from_secs(300),
            product_ttl: Duration::from_secs(3600),
            operation_timeout: Duration::from_millis(250),
            redis: RedisConfig::default(),
        }
    }
}

/// Redis backend settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Redis connection URL
    pub url: String,

    /// Key prefix applied to every entry, so several applications can share
    /// one backend
    pub key_prefix: String,

    /// Connection timeout
    #[serde(with = "humantime_serde")]
    pub connection_timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            key_prefix: "catalog:".to_string(),
            connection_timeout: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let config = CatalogConfig::default();
        assert_eq!(config.cache.search_ttl, Duration::from_secs(300));
        assert_eq!(config.cache.product_ttl, Duration::from_secs(3600));
        assert_eq!(config.default_page_size, 10);
    }

    #[test]
    fn durations_roundtrip_human_readable() {
        let config = CacheConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: CacheConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.search_ttl, config.search_ttl);
        assert_eq!(parsed.operation_timeout, config.operation_timeout);
    }
}
