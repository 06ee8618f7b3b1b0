//! # Catalog Service
//!
//! The four catalog operations, wired cache-aside: reads probe the cache and
//! populate it on miss, the update path writes through to the collection and
//! then synchronously deletes the entity's cache entry before acknowledging.
//!
//! Error policy (see `core::error`): store failures propagate, cache
//! failures never do, and malformed ids are "not found" rather than errors —
//! they short-circuit before any cache or store traffic.
//!
//! Coherency is TTL-bounded, not linearizable. Concurrent updates to the
//! same product each invalidate their own entry and may interleave with
//! readers repopulating the cache; the entry TTL caps how long any stale
//! copy can survive. Search envelopes that embed a product are not
//! invalidated when it changes — they age out within the search TTL.

use crate::caching::adapter::{CacheStats, CatalogCache};
use crate::caching::keys::{product_key, search_key};
use crate::caching::stores::CacheStore;
use crate::catalog::aggregate::latest_per_group;
use crate::core::config::CatalogConfig;
use crate::core::error::CatalogResult;
use crate::core::types::{
    Pagination, PriceObservation, Product, ProductPatch, SearchQuery, SearchResults, SortMode,
};
use crate::store::{PriceCollection, ProductCollection, ProductFilter, SortOrder};
use std::sync::Arc;
use tracing::debug;

/// The catalog core's entry point for the route layer
pub struct CatalogService {
    products: Arc<dyn ProductCollection>,
    prices: Arc<dyn PriceCollection>,
    cache: CatalogCache,
    config: CatalogConfig,
}

impl CatalogService {
    /// Assemble the service over its collaborators
    pub fn new(
        products: Arc<dyn ProductCollection>,
        prices: Arc<dyn PriceCollection>,
        cache_store: Arc<dyn CacheStore>,
        config: CatalogConfig,
    ) -> Self {
        let cache = CatalogCache::new(cache_store, config.cache.operation_timeout);
        Self {
            products,
            prices,
            cache,
            config,
        }
    }

    /// Search products with text/category filtering, sorting, and pagination
    ///
    /// The full result envelope is cached under the derived search key; a
    /// hit returns it unmodified. Sorting by price is not implemented — it
    /// would need a cross-collection join against the price data.
    pub async fn search_products(&self, query: &SearchQuery) -> CatalogResult<SearchResults> {
        let key = search_key(&query.to_params());

        if let Some(cached) = self.cache.get_json::<SearchResults>(&key).await {
            return Ok(cached);
        }

        let filter = ProductFilter {
            text: query.q.clone(),
            category: query.category.clone(),
        };

        let sort = match (query.sort_by.unwrap_or_default(), &query.q) {
            (SortMode::Relevance, Some(_)) => SortOrder::Relevance,
            (SortMode::Relevance, None) => SortOrder::Unspecified,
            (SortMode::CreatedAt, _) => SortOrder::CreatedAtDesc,
        };

        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(self.config.default_page_size).max(1);
        let skip = u64::from(page - 1) * u64::from(limit);

        let products = self.products.find(&filter, sort, skip, limit.into()).await?;
        let total_items = self.products.count_documents(&filter).await?;

        let total_pages = total_items.div_ceil(u64::from(limit)) as u32;
        let results = SearchResults {
            products,
            pagination: Pagination {
                total_items,
                total_pages,
                current_page: page,
                has_next_page: page < total_pages,
            },
        };

        self.cache
            .put_json(&key, &results, self.config.cache.search_ttl)
            .await;

        Ok(results)
    }

    /// Fetch a single product, read-through cached
    ///
    /// Absence is never cached: a product could be created later under the
    /// id, so repeated probes for a nonexistent id always reach the store.
    pub async fn get_product_by_id(&self, id: &str) -> CatalogResult<Option<Product>> {
        if !self.products.is_valid_id(id) {
            debug!("rejecting malformed product id {:?}", id);
            return Ok(None);
        }

        let key = product_key(id);

        if let Some(cached) = self.cache.get_json::<Product>(&key).await {
            return Ok(Some(cached));
        }

        let found = self.products.find_by_id(id).await?;

        if let Some(product) = &found {
            self.cache
                .put_json(&key, product, self.config.cache.product_ttl)
                .await;
        }

        Ok(found)
    }

    /// Apply a patch to a product and invalidate its cache entry
    ///
    /// The entity key is deleted synchronously before this returns, so a
    /// read after the acknowledged update never sees the pre-patch cached
    /// copy. Search envelopes that embed the product are left to expire
    /// within the search TTL.
    pub async fn update_product_by_id(
        &self,
        id: &str,
        patch: &ProductPatch,
    ) -> CatalogResult<Option<Product>> {
        if !self.products.is_valid_id(id) {
            debug!("rejecting malformed product id {:?}", id);
            return Ok(None);
        }

        let updated = self.products.find_by_id_and_update(id, patch).await?;

        if updated.is_some() {
            self.cache.invalidate(&product_key(id)).await;
        }

        Ok(updated)
    }

    /// The most recent price observation per platform for a product
    ///
    /// Returns the full observation documents, one per platform observed,
    /// in no particular cross-platform order. Does not touch the cache.
    pub async fn latest_prices_for_product(
        &self,
        id: &str,
    ) -> CatalogResult<Option<Vec<PriceObservation>>> {
        if !self.products.is_valid_id(id) {
            debug!("rejecting malformed product id {:?}", id);
            return Ok(None);
        }

        let observations = self.prices.find_by_product(id).await?;

        Ok(Some(latest_per_group(
            observations,
            |o| o.platform.clone(),
            |o| o.timestamp,
        )))
    }

    /// Snapshot of the cache adapter's hit/miss/degraded counters
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
