//! Shared fixtures for the comprehensive suite

use listmap::{IndexedMultimap, ListMap};

/// Map of `(key, value)` pairs in the given order
pub fn map_of(pairs: &[(&'static str, i32)]) -> ListMap<&'static str, i32> {
    pairs.iter().copied().collect()
}

/// Map whose keys and values are `0..n`
pub fn counting(n: i32) -> ListMap<i32, i32> {
    (0..n).map(|i| (i, i)).collect()
}

/// Keys of any receiver, panicking on error
pub fn keys_of<K: Clone, V, M: IndexedMultimap<K, V>>(map: &M) -> Vec<K> {
    map.keys().expect("keys")
}
