//! # Catalog Operations
//!
//! The operations exposed to the route layer: cached product search and
//! lookup, product update with cache invalidation, and latest-price
//! aggregation.

pub mod aggregate;
pub mod service;

pub use aggregate::latest_per_group;
pub use service::CatalogService;
