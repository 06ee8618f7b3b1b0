//! # Core Types Module
//!
//! Plain data types that cross the boundaries of the catalog core: the
//! product and price-observation documents, the search query surface, and
//! the search result envelope. All of these serialize with serde — the
//! search envelope is cached verbatim as JSON, so its shape is part of the
//! cache contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A product document
///
/// The product collection owns the authoritative record; the cache only ever
/// holds copies of this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Document object id, 24 lowercase hex characters
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A partial update applied to a product by an administrative operation
///
/// Fields left as `None` are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// A single price observation for a product on one selling platform
///
/// Observations are append-only: an external ingestion process inserts them
/// and nothing in this core ever updates or deletes one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceObservation {
    pub product_id: String,
    /// Selling platform identifier, e.g. "amazon"
    pub platform: String,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

/// Requested sort order for a product search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortMode {
    /// Text-match relevance; only meaningful when a text query is present
    #[default]
    #[serde(rename = "relevance")]
    Relevance,

    /// Newest first
    #[serde(rename = "createdAt")]
    CreatedAt,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::CreatedAt => "createdAt",
        }
    }
}

/// A product search query as received from the route layer
///
/// Unset fields fall back to defaults when the search executes (page 1,
/// limit 10, relevance sort). Identity for caching purposes is the set of
/// parameters actually present — see [`SearchQuery::to_params`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Free-text query
    pub q: Option<String>,

    /// Exact-match category filter
    pub category: Option<String>,

    /// 1-based page number
    pub page: Option<u32>,

    /// Page size
    pub limit: Option<u32>,

    /// Sort mode
    pub sort_by: Option<SortMode>,
}

impl SearchQuery {
    /// Flatten the query into the parameter map consumed by the cache key
    /// deriver. Only parameters that are actually set appear, so a query
    /// with no parameters maps to the empty set (and the `search:all` key).
    pub fn to_params(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        if let Some(q) = &self.q {
            params.insert("q".to_string(), q.clone());
        }
        if let Some(category) = &self.category {
            params.insert("category".to_string(), category.clone());
        }
        if let Some(page) = self.page {
            params.insert("page".to_string(), page.to_string());
        }
        if let Some(limit) = self.limit {
            params.insert("limit".to_string(), limit.to_string());
        }
        if let Some(sort_by) = self.sort_by {
            params.insert("sortBy".to_string(), sort_by.as_str().to_string());
        }
        params
    }
}

/// Pagination metadata for a search result envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_items: u64,
    pub total_pages: u32,
    pub current_page: u32,
    pub has_next_page: bool,
}

/// The full search result envelope: items plus pagination
///
/// This entire envelope is what gets cached under the search key, so a
/// cache hit returns it unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub products: Vec<Product>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_yields_empty_params() {
        let query = SearchQuery::default();
        assert!(query.to_params().is_empty());
    }

    #[test]
    fn params_include_only_set_fields() {
        let query = SearchQuery {
            q: Some("laptop".to_string()),
            page: Some(2),
            ..Default::default()
        };
        let params = query.to_params();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("q").map(String::as_str), Some("laptop"));
        assert_eq!(params.get("page").map(String::as_str), Some("2"));
        assert!(!params.contains_key("category"));
    }

    #[test]
    fn sort_mode_renders_query_values() {
        assert_eq!(SortMode::Relevance.as_str(), "relevance");
        assert_eq!(SortMode::CreatedAt.as_str(), "createdAt");
    }

    #[test]
    fn search_envelope_roundtrips_json() {
        let envelope = SearchResults {
            products: vec![],
            pagination: Pagination {
                total_items: 0,
                total_pages: 0,
                current_page: 1,
                has_next_page: false,
            },
        };
        let json = serde_json::to_vec(&envelope).unwrap();
        let parsed: SearchResults = serde_json::from_slice(&json).unwrap();
        assert_eq!(parsed, envelope);
    }
}
