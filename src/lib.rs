//! # Product Catalog Core
//!
//! The caching and query core of a price-comparison product catalog backend.
//! This library sits between the HTTP route layer (external) and the document
//! store (external), and owns three concerns:
//!
//! 1. **Read-through caching** of product lookups and search results over a
//!    shared key-value backend, with TTL-bounded staleness and synchronous
//!    invalidation on update.
//! 2. **Search materialization**: text/category filtering, sort-order
//!    computation, and pagination over the product collection.
//! 3. **Latest-price aggregation**: the most recent price observation per
//!    selling platform for a product.
//!
//! The route layer consumes [`CatalogService`] as plain async function calls
//! returning plain data; no framework types cross this boundary. Cache
//! outages degrade to authoritative reads and are never visible to callers
//! beyond latency; store failures propagate as [`CatalogError`].

/// Error types, configuration, domain types, and telemetry setup
pub mod core;

/// Caching subsystem: key derivation, store backends, and the degrading adapter
pub mod caching;

/// Document collection contracts and the in-memory implementations
pub mod store;

/// The catalog operations: search, lookup, update, price aggregation
pub mod catalog;

pub use crate::core::config::{CacheConfig, CatalogConfig};
pub use crate::core::error::{CatalogError, CatalogResult};
pub use crate::core::types::{
    Pagination, PriceObservation, Product, ProductPatch, SearchQuery, SearchResults, SortMode,
};

pub use crate::caching::adapter::CatalogCache;
pub use crate::caching::stores::CacheStore;
pub use crate::catalog::service::CatalogService;
pub use crate::store::{PriceCollection, ProductCollection};
