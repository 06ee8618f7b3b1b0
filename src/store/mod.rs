//! # Document Store Boundary
//!
//! Contracts for the externally-owned document collections. The catalog core
//! treats the store as a queryable collection, not something it implements:
//! these traits are the full surface it consumes. The in-memory
//! implementations in [`memory`] back tests and local development; a
//! deployment substitutes its own collection client.
//!
//! Id well-formedness is the collection's call, so the predicate lives on
//! [`ProductCollection`] rather than in the domain types.

pub mod memory;

pub use memory::{InMemoryPriceCollection, InMemoryProductCollection};

use crate::core::error::CatalogResult;
use crate::core::types::{PriceObservation, Product, ProductPatch};
use async_trait::async_trait;

/// A filter over the product collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Free-text match against the searchable text fields
    pub text: Option<String>,

    /// Exact category match
    pub category: Option<String>,
}

/// Sort order for a product query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Text-match relevance score, best first
    Relevance,

    /// Newest first
    CreatedAtDesc,

    /// The collection's natural order
    Unspecified,
}

/// The product collection client contract
#[async_trait]
pub trait ProductCollection: Send + Sync {
    /// Whether `id` is a well-formed entity identifier for this collection
    fn is_valid_id(&self, id: &str) -> bool;

    /// Query products matching `filter`, sorted, with pagination offsets
    async fn find(
        &self,
        filter: &ProductFilter,
        sort: SortOrder,
        skip: u64,
        limit: u64,
    ) -> CatalogResult<Vec<Product>>;

    /// Count products matching `filter`
    async fn count_documents(&self, filter: &ProductFilter) -> CatalogResult<u64>;

    /// Fetch a single product by id
    async fn find_by_id(&self, id: &str) -> CatalogResult<Option<Product>>;

    /// Apply a patch to a product, returning the post-update document
    async fn find_by_id_and_update(
        &self,
        id: &str,
        patch: &ProductPatch,
    ) -> CatalogResult<Option<Product>>;
}

/// The price-observation collection client contract
///
/// Observations are append-only and inserted by an external ingestion
/// process; the catalog core only reads them.
#[async_trait]
pub trait PriceCollection: Send + Sync {
    /// All observations recorded for a product, in the collection's natural
    /// order
    async fn find_by_product(&self, product_id: &str) -> CatalogResult<Vec<PriceObservation>>;
}
