//! Posting-list set algebra
//!
//! Membership is tracked in a [`ChainedHashMap`], so both operations run in
//! linear time. Results never contain duplicates.

use std::hash::Hash;

use super::chained_map::ChainedHashMap;

/// Members of `second` that also appear in `first`, in `second`'s order
pub fn intersect<T: Hash + Eq + Clone>(first: &[T], second: &[T]) -> Vec<T> {
    let mut emitted: ChainedHashMap<&T, bool> = ChainedHashMap::with_capacity(first.len());
    for item in first {
        emitted.put(item, false);
    }

    let mut result = Vec::new();
    for item in second {
        if let Some(seen) = emitted.get_mut(&item) {
            if !*seen {
                *seen = true;
                result.push(item.clone());
            }
        }
    }
    result
}

/// Members of either operand, each once, in order of first appearance
pub fn union<T: Hash + Eq + Clone>(first: &[T], second: &[T]) -> Vec<T> {
    let mut members: ChainedHashMap<&T, ()> =
        ChainedHashMap::with_capacity(first.len() + second.len());
    let mut result = Vec::new();
    for item in first.iter().chain(second) {
        if members.put(item, ()).is_none() {
            result.push(item.clone());
        }
    }
    result
}

/// Distinct members, in order of first appearance
pub fn dedup<T: Hash + Eq + Clone>(items: &[T]) -> Vec<T> {
    union(items, &[])
}
