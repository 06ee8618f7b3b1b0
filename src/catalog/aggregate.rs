//! # Latest-Per-Group Aggregation
//!
//! Selecting, for each distinct value of a grouping key, the single record
//! with the maximum value of an ordering key. The price aggregator uses this
//! to reduce a product's price history to one latest observation per
//! platform, but the operation itself knows nothing about prices or any
//! storage engine, so it can be tested in isolation.

use std::collections::HashMap;
use std::hash::Hash;

/// Reduce `items` to the record with the maximum `order_fn` value per
/// distinct `key_fn` value.
///
/// Comparison is strict, so among records with an equal ordering value the
/// first one in input order wins — deterministic for a fixed input sequence.
/// Output groups appear in first-seen order.
pub fn latest_per_group<T, K, O>(
    items: Vec<T>,
    key_fn: impl Fn(&T) -> K,
    order_fn: impl Fn(&T) -> O,
) -> Vec<T>
where
    K: Eq + Hash,
    O: Ord,
{
    let mut winners: Vec<T> = Vec::new();
    let mut slot_by_key: HashMap<K, usize> = HashMap::new();

    for item in items {
        match slot_by_key.get(&key_fn(&item)) {
            Some(&slot) => {
                if order_fn(&item) > order_fn(&winners[slot]) {
                    winners[slot] = item;
                }
            }
            None => {
                slot_by_key.insert(key_fn(&item), winners.len());
                winners.push(item);
            }
        }
    }

    winners
}
