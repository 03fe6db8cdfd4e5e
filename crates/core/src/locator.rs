//! Logical addressing requests
//!
//! A [`Locator`] names one entry of a sequence without fixing its physical
//! position: by index, by the first matching key, by the N-th duplicate of a
//! key, or by the N-th duplicate of a key+value pair. Resolution happens in
//! the storage layer, always walking in ascending index order.

/// A logical request resolved to a physical index at access time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator<K, V> {
    /// Plain position
    Index(usize),
    /// First entry whose key matches
    Key(K),
    /// The `occurrence`-th (0-based) entry whose key matches
    KeyOccurrence {
        /// 0-based duplicate number
        occurrence: usize,
        /// Key to match
        key: K,
    },
    /// First entry whose key and value both match
    Entry {
        /// Key to match
        key: K,
        /// Value to match
        value: V,
    },
    /// The `occurrence`-th (0-based) entry whose key and value both match
    EntryOccurrence {
        /// 0-based duplicate number
        occurrence: usize,
        /// Key to match
        key: K,
        /// Value to match
        value: V,
    },
}

impl<K, V> Locator<K, V> {
    /// Locate by position
    pub fn index(index: usize) -> Self {
        Locator::Index(index)
    }

    /// Locate the first entry with `key`
    pub fn key(key: K) -> Self {
        Locator::Key(key)
    }

    /// Locate the `occurrence`-th entry with `key`
    pub fn nth_key(occurrence: usize, key: K) -> Self {
        Locator::KeyOccurrence { occurrence, key }
    }

    /// Locate the first entry equal to `(key, value)`
    pub fn entry(key: K, value: V) -> Self {
        Locator::Entry { key, value }
    }

    /// Locate the `occurrence`-th entry equal to `(key, value)`
    pub fn nth_entry(occurrence: usize, key: K, value: V) -> Self {
        Locator::EntryOccurrence {
            occurrence,
            key,
            value,
        }
    }

    /// True for [`Locator::Index`]
    pub fn is_positional(&self) -> bool {
        matches!(self, Locator::Index(_))
    }
}

impl<K, V> From<usize> for Locator<K, V> {
    fn from(index: usize) -> Self {
        Locator::Index(index)
    }
}
