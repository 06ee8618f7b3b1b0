//! # Cache Key Derivation
//!
//! Canonical cache keys for the two cached read paths. Search keys and
//! entity keys live in separate namespaces (`search:` vs `product:`) so the
//! two key spaces never collide.

use std::collections::HashMap;

/// Sentinel key for a search with no parameters
const SEARCH_ALL: &str = "search:all";

/// Derive the cache key for a search parameter set
///
/// Parameter names are sorted lexicographically and rendered as
/// `name=value` pairs joined by `&`, so two queries with the same parameters
/// in any insertion order derive the same key. The empty set maps to the
/// fixed sentinel `search:all`.
///
/// Values are used as passed: no case folding or whitespace normalization is
/// performed, so callers must hand in already-normalized values.
pub fn search_key(params: &HashMap<String, String>) -> String {
    if params.is_empty() {
        return SEARCH_ALL.to_string();
    }

    let mut names: Vec<&String> = params.keys().collect();
    names.sort();

    let parts: Vec<String> = names
        .iter()
        .map(|name| format!("{}={}", name, params[*name]))
        .collect();

    format!("search:{}", parts.join("&"))
}

/// Derive the cache key for a single-product lookup
pub fn product_key(id: &str) -> String {
    format!("product:{}", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_params_derive_sentinel() {
        assert_eq!(search_key(&HashMap::new()), "search:all");
    }

    #[test]
    fn params_render_sorted_by_name() {
        let key = search_key(&params(&[("q", "laptop"), ("category", "tech"), ("page", "2")]));
        assert_eq!(key, "search:category=tech&page=2&q=laptop");
    }

    #[test]
    fn insertion_order_does_not_matter() {
        // HashMap iteration order is already arbitrary, but build the two
        // maps from reversed pair lists to make the property explicit.
        let forward = params(&[("q", "phone"), ("page", "1"), ("limit", "10")]);
        let backward = params(&[("limit", "10"), ("page", "1"), ("q", "phone")]);
        assert_eq!(search_key(&forward), search_key(&backward));
    }

    #[test]
    fn differing_params_derive_differing_keys() {
        let base = params(&[("q", "phone")]);
        let other_value = params(&[("q", "laptop")]);
        let other_name = params(&[("category", "phone")]);
        let superset = params(&[("q", "phone"), ("page", "2")]);

        assert_ne!(search_key(&base), search_key(&other_value));
        assert_ne!(search_key(&base), search_key(&other_name));
        assert_ne!(search_key(&base), search_key(&superset));
    }

    #[test]
    fn product_key_is_namespaced() {
        let id = "507f1f77bcf86cd799439011";
        assert_eq!(product_key(id), format!("product:{}", id));
    }

    #[test]
    fn namespaces_never_collide() {
        // Even a pathological id cannot produce a key in the search namespace.
        assert!(product_key("all").starts_with("product:"));
        assert!(search_key(&HashMap::new()).starts_with("search:"));
    }
}
