//! Entry: one positional (key, value) pair
//!
//! An entry is identified by its position in the owning sequence, not by its
//! contents. Two entries holding equal keys and values are still distinct.
//!
//! Nullable keys or values are expressed with `Option<T>`; equality then
//! follows `Option`'s `PartialEq`, so `None` matches only `None`.

use serde::{Deserialize, Serialize};

/// A key/value pair with in-place mutable slots
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    /// Create a new entry
    pub fn new(key: K, value: V) -> Self {
        Entry { key, value }
    }

    /// Borrow the key
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Borrow the value
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Replace the key in place, returning the previous key
    pub fn set_key(&mut self, key: K) -> K {
        std::mem::replace(&mut self.key, key)
    }

    /// Replace the value in place, returning the previous value
    pub fn set_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }

    /// Replace both slots, returning the previous pair
    pub fn replace(&mut self, key: K, value: V) -> Entry<K, V> {
        Entry {
            key: self.set_key(key),
            value: self.set_value(value),
        }
    }

    /// Decompose into `(key, value)`
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }

    /// Null-safe key comparison
    pub fn matches_key(&self, key: &K) -> bool
    where
        K: PartialEq,
    {
        self.key == *key
    }

    /// Null-safe value comparison
    pub fn matches_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.value == *value
    }

    /// Key and value both compare equal
    pub fn matches(&self, key: &K, value: &V) -> bool
    where
        K: PartialEq,
        V: PartialEq,
    {
        self.matches_key(key) && self.matches_value(value)
    }
}

impl<K, V> From<(K, V)> for Entry<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Entry::new(key, value)
    }
}

impl<K, V> From<Entry<K, V>> for (K, V) {
    fn from(entry: Entry<K, V>) -> Self {
        entry.into_parts()
    }
}
