//! # Caching Subsystem
//!
//! Read-through caching for product lookups and search results, split the
//! same way at every level:
//!
//! 1. **Keys** ([`keys`]): canonical, namespaced cache keys derived from a
//!    search parameter set or an entity id.
//! 2. **Stores** ([`stores`]): the `CacheStore` trait with in-memory and
//!    Redis backends. Store operations are fallible.
//! 3. **Adapter** ([`adapter`]): the boundary where fallibility ends. Every
//!    failure or timeout below it degrades to a miss/no-op; callers above it
//!    never see a cache error.
//!
//! Cache entries are derived state. Their absence is always safe — it only
//! costs a trip to the authoritative collection — and every entry carries a
//! TTL so staleness is time-bounded even if an invalidation is lost.

pub mod adapter;
pub mod keys;
pub mod stores;

pub use adapter::{CacheStats, CatalogCache};
pub use keys::{product_key, search_key};
pub use stores::{CacheStore, InMemoryCache, RedisCache};

/// Cache operation result
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache-specific error types
///
/// These never cross the adapter boundary; see `adapter` for the
/// degradation policy.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache store error: {message}")]
    Store { message: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("cache operation timed out")]
    Timeout,
}
