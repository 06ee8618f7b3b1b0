//! # In-Memory Document Collections
//!
//! Reference implementations of the collection contracts, used by the test
//! suite and local development. Documents live in insertion order behind an
//! async lock, which doubles as the "natural order" for unsorted queries and
//! tie-breaks.
//!
//! Text search semantics: the query is split into lowercase terms and a
//! product matches when any term occurs in its name or description.
//! Relevance weights name matches over description matches.

use super::{PriceCollection, ProductCollection, ProductFilter, SortOrder};
use crate::core::error::CatalogResult;
use crate::core::types::{PriceObservation, Product, ProductPatch};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// Object id format: 24 lowercase hex characters
fn is_object_id(id: &str) -> bool {
    id.len() == 24 && id.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Counter for minted object ids, unique within the process
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Mint a well-formed object id
pub fn new_object_id() -> String {
    format!("{:024x}", NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

fn matches(filter: &ProductFilter, product: &Product) -> bool {
    if let Some(category) = &filter.category {
        if &product.category != category {
            return false;
        }
    }

    if let Some(text) = &filter.text {
        let name = product.name.to_lowercase();
        let description = product.description.to_lowercase();
        let any_term = text
            .to_lowercase()
            .split_whitespace()
            .any(|term| name.contains(term) || description.contains(term));
        if !any_term {
            return false;
        }
    }

    true
}

/// Relevance score for a matched product: name hits count double
fn relevance(text: &str, product: &Product) -> u32 {
    let name = product.name.to_lowercase();
    let description = product.description.to_lowercase();

    text.to_lowercase()
        .split_whitespace()
        .map(|term| {
            let mut score = 0;
            if name.contains(term) {
                score += 2;
            }
            if description.contains(term) {
                score += 1;
            }
            score
        })
        .sum()
}

/// In-memory product collection
#[derive(Default)]
pub struct InMemoryProductCollection {
    products: RwLock<Vec<Product>>,
}

impl InMemoryProductCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a product with a freshly minted id, returning the document
    pub async fn insert(&self, name: &str, description: &str, category: &str) -> Product {
        let now = Utc::now();
        let product = Product {
            id: new_object_id(),
            name: name.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.products.write().await.push(product.clone());
        product
    }

    /// Insert a fully specified document (for seeding test fixtures)
    pub async fn insert_document(&self, product: Product) {
        self.products.write().await.push(product);
    }
}

#[async_trait]
impl ProductCollection for InMemoryProductCollection {
    fn is_valid_id(&self, id: &str) -> bool {
        is_object_id(id)
    }

    async fn find(
        &self,
        filter: &ProductFilter,
        sort: SortOrder,
        skip: u64,
        limit: u64,
    ) -> CatalogResult<Vec<Product>> {
        let products = self.products.read().await;
        let mut matched: Vec<Product> = products
            .iter()
            .filter(|p| matches(filter, p))
            .cloned()
            .collect();

        match sort {
            SortOrder::Relevance => {
                if let Some(text) = &filter.text {
                    // Stable sort keeps natural order between equal scores.
                    matched.sort_by_key(|p| std::cmp::Reverse(relevance(text, p)));
                }
            }
            SortOrder::CreatedAtDesc => {
                matched.sort_by_key(|p| std::cmp::Reverse(p.created_at));
            }
            SortOrder::Unspecified => {}
        }

        Ok(matched
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_documents(&self, filter: &ProductFilter) -> CatalogResult<u64> {
        let products = self.products.read().await;
        Ok(products.iter().filter(|p| matches(filter, p)).count() as u64)
    }

    async fn find_by_id(&self, id: &str) -> CatalogResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_id_and_update(
        &self,
        id: &str,
        patch: &ProductPatch,
    ) -> CatalogResult<Option<Product>> {
        let mut products = self.products.write().await;
        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        if let Some(name) = &patch.name {
            product.name = name.clone();
        }
        if let Some(description) = &patch.description {
            product.description = description.clone();
        }
        if let Some(category) = &patch.category {
            product.category = category.clone();
        }
        product.updated_at = Utc::now();

        Ok(Some(product.clone()))
    }
}

/// In-memory price-observation collection (append-only)
#[derive(Default)]
pub struct InMemoryPriceCollection {
    observations: RwLock<Vec<PriceObservation>>,
}

impl InMemoryPriceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observation, as the external ingestion process would
    pub async fn insert(&self, observation: PriceObservation) {
        self.observations.write().await.push(observation);
    }
}

#[async_trait]
impl PriceCollection for InMemoryPriceCollection {
    async fn find_by_product(&self, product_id: &str) -> CatalogResult<Vec<PriceObservation>> {
        let observations = self.observations.read().await;
        Ok(observations
            .iter()
            .filter(|o| o.product_id == product_id)
            .cloned()
            .collect())
    }
}
