//! Operations shared by the root store and its views
//!
//! [`IndexedMultimap`] is implemented by [`ListMap`](crate::ListMap) and
//! [`View`]. Every operation is written once against a read or write scope;
//! the implementor only decides which lock to take and which window to read
//! through. Indices are always relative to the receiver: `view.get(0)` is the
//! first entry of the view, wherever it sits in the root store.
//!
//! Lookups by key run a linear scan in ascending index order. The N-th
//! duplicate of a key (0-based) is the N-th match in that scan.

use std::ops::Bound;

use listmap_core::{Entry, Error, Locator, Result};

use crate::addressing;
use crate::cursor::Cursor;
use crate::scope::{ReadScope, WriteScope};
use crate::view::View;

/// Ordered multimap addressed by position, key or key occurrence
pub trait IndexedMultimap<K, V> {
    /// Run `f` under the store's read lock, seeing this receiver's window
    #[doc(hidden)]
    fn read_scope<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(ReadScope<'_, K, V>) -> Result<R>;

    /// Run `f` under the store's write lock, editing through this receiver's window
    #[doc(hidden)]
    fn write_scope<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(WriteScope<'_, K, V>) -> Result<R>;

    // ========================================
    // Size
    // ========================================

    /// Number of entries; 0 for a detached or emptied view
    fn len(&self) -> usize {
        self.read_scope(|scope| Ok(scope.len())).unwrap_or(0)
    }

    /// True when `len() == 0`
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Structural generation of the root store
    fn structural_generation(&self) -> Result<u64> {
        self.read_scope(|scope| Ok(scope.generation()))
    }

    // ========================================
    // Structural edits
    // ========================================

    /// Insert a pair so that it ends up at `index`
    ///
    /// `index == len()` appends. Entries at or after `index` shift right.
    fn insert_at(&self, index: usize, key: K, value: V) -> Result<()> {
        self.write_scope(|mut scope| scope.insert(index, key, value))
    }

    /// Append a pair at the end
    fn push(&self, key: K, value: V) -> Result<()> {
        self.write_scope(|mut scope| {
            let end = scope.len();
            scope.insert(end, key, value)
        })
    }

    /// Append every pair in order
    ///
    /// The iterator is drained before the write lock is taken, so it may read
    /// this map. Pairs inserted before a failure stay in place.
    fn put_all<I>(&self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs: Vec<(K, V)> = pairs.into_iter().collect();
        self.write_scope(|mut scope| {
            for (key, value) in pairs {
                let end = scope.len();
                scope.insert(end, key, value)?;
            }
            Ok(())
        })
    }

    /// Insert every pair starting at `index`, keeping their order
    ///
    /// The iterator is drained before the write lock is taken.
    fn put_all_at<I>(&self, index: usize, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let pairs: Vec<(K, V)> = pairs.into_iter().collect();
        self.write_scope(|mut scope| {
            for (offset, (key, value)) in pairs.into_iter().enumerate() {
                scope.insert(index + offset, key, value)?;
            }
            Ok(())
        })
    }

    /// Remove and return the entry at `index`
    fn remove_at(&self, index: usize) -> Result<Entry<K, V>> {
        self.write_scope(|mut scope| scope.remove(index))
    }

    /// Remove and return the entry a locator resolves to
    fn remove(&self, locator: &Locator<K, V>) -> Result<Entry<K, V>>
    where
        K: PartialEq,
        V: PartialEq,
    {
        self.write_scope(|mut scope| {
            let index = scope.read().locate(locator)?;
            scope.remove(index)
        })
    }

    /// Remove every entry matching `pred`, returning how many were removed
    ///
    /// `pred` runs under the read lock only: it may read this map but must
    /// not edit it. A structural edit landing between the scan and the
    /// removals fails the call with `ConcurrentStructuralChange`.
    fn remove_where<P>(&self, pred: P) -> Result<usize>
    where
        P: Fn(&Entry<K, V>) -> bool,
    {
        let (scanned, doomed) = self.read_scope(|scope| {
            let doomed: Vec<usize> = scope
                .visible()
                .iter()
                .enumerate()
                .filter(|&(_, entry)| pred(entry))
                .map(|(index, _)| index)
                .collect();
            Ok((scope.generation(), doomed))
        })?;
        if doomed.is_empty() {
            return Ok(0);
        }

        self.write_scope(|mut scope| {
            let actual = scope.generation();
            if actual != scanned {
                return Err(Error::ConcurrentStructuralChange {
                    expected: scanned,
                    actual,
                });
            }
            for &index in doomed.iter().rev() {
                scope.remove(index)?;
            }
            Ok(doomed.len())
        })
    }

    /// Remove every entry with `key`
    fn remove_all_by_key(&self, key: &K) -> Result<usize>
    where
        K: PartialEq,
    {
        self.remove_where(|entry| entry.matches_key(key))
    }

    /// Remove every entry equal to `(key, value)`
    fn remove_all_entries(&self, key: &K, value: &V) -> Result<usize>
    where
        K: PartialEq,
        V: PartialEq,
    {
        self.remove_where(|entry| entry.matches(key, value))
    }

    /// Remove every entry
    ///
    /// On the root store this empties every live view. On a view it removes
    /// the view's entries one by one; sibling views stay live.
    fn clear(&self) -> Result<()> {
        self.write_scope(|mut scope| scope.clear())
    }

    // ========================================
    // Reads
    // ========================================

    /// Clone of the entry at `index`
    fn entry_at(&self, index: usize) -> Result<Entry<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        self.read_scope(|scope| scope.entry(index).cloned())
    }

    /// Value at `index`
    fn get(&self, index: usize) -> Result<V>
    where
        V: Clone,
    {
        self.read_scope(|scope| scope.entry(index).map(|entry| entry.value().clone()))
    }

    /// Key at `index`
    fn get_key(&self, index: usize) -> Result<K>
    where
        K: Clone,
    {
        self.read_scope(|scope| scope.entry(index).map(|entry| entry.key().clone()))
    }

    /// Index a locator resolves to
    fn locate(&self, locator: &Locator<K, V>) -> Result<usize>
    where
        K: PartialEq,
        V: PartialEq,
    {
        self.read_scope(|scope| scope.locate(locator))
    }

    /// Value of the entry a locator resolves to
    fn value_of(&self, locator: &Locator<K, V>) -> Result<V>
    where
        K: PartialEq,
        V: PartialEq + Clone,
    {
        self.read_scope(|scope| {
            let index = scope.locate(locator)?;
            scope.entry(index).map(|entry| entry.value().clone())
        })
    }

    /// Value of the first entry with `key`
    fn first_by_key(&self, key: &K) -> Result<V>
    where
        K: PartialEq,
        V: Clone,
    {
        self.read_scope(|scope| {
            let index = addressing::first_match(scope.visible(), |entry| entry.matches_key(key))
                .ok_or(Error::KeyNotFound)?;
            scope.entry(index).map(|entry| entry.value().clone())
        })
    }

    /// Value of the `occurrence`-th (0-based) entry with `key`
    fn nth_by_key(&self, occurrence: usize, key: &K) -> Result<V>
    where
        K: PartialEq,
        V: Clone,
    {
        self.read_scope(|scope| {
            let index =
                addressing::nth_match(scope.visible(), occurrence, |entry| entry.matches_key(key))?;
            scope.entry(index).map(|entry| entry.value().clone())
        })
    }

    /// Value of the first entry with `key`, or `default` when there is none
    fn get_or_default(&self, key: &K, default: V) -> V
    where
        K: PartialEq,
        V: Clone,
    {
        self.first_by_key(key).unwrap_or(default)
    }

    /// True if some entry has `key`
    fn contains_key(&self, key: &K) -> bool
    where
        K: PartialEq,
    {
        self.read_scope(|scope| {
            Ok(addressing::first_match(scope.visible(), |entry| entry.matches_key(key)).is_some())
        })
        .unwrap_or(false)
    }

    /// True if some entry has `value`
    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.read_scope(|scope| {
            Ok(
                addressing::first_match(scope.visible(), |entry| entry.matches_value(value))
                    .is_some(),
            )
        })
        .unwrap_or(false)
    }

    /// Number of entries with `key`
    fn key_frequency(&self, key: &K) -> usize
    where
        K: PartialEq,
    {
        self.read_scope(|scope| {
            Ok(addressing::frequency(scope.visible(), |entry| entry.matches_key(key)))
        })
        .unwrap_or(0)
    }

    /// Number of entries with `value`
    fn value_frequency(&self, value: &V) -> usize
    where
        V: PartialEq,
    {
        self.read_scope(|scope| {
            Ok(addressing::frequency(scope.visible(), |entry| {
                entry.matches_value(value)
            }))
        })
        .unwrap_or(0)
    }

    /// Number of entries equal to `(key, value)`
    fn entry_frequency(&self, key: &K, value: &V) -> usize
    where
        K: PartialEq,
        V: PartialEq,
    {
        self.read_scope(|scope| {
            Ok(addressing::frequency(scope.visible(), |entry| {
                entry.matches(key, value)
            }))
        })
        .unwrap_or(0)
    }

    /// Snapshot of the keys in order
    fn keys(&self) -> Result<Vec<K>>
    where
        K: Clone,
    {
        self.read_scope(|scope| Ok(scope.visible().iter().map(|e| e.key().clone()).collect()))
    }

    /// Snapshot of the values in order
    fn values(&self) -> Result<Vec<V>>
    where
        V: Clone,
    {
        self.read_scope(|scope| Ok(scope.visible().iter().map(|e| e.value().clone()).collect()))
    }

    /// Snapshot of the entries in order
    fn entries(&self) -> Result<Vec<Entry<K, V>>>
    where
        K: Clone,
        V: Clone,
    {
        self.read_scope(|scope| Ok(scope.visible().to_vec()))
    }

    // ========================================
    // In-place replacement (no structural change)
    // ========================================

    /// Replace the value at `index`, returning the previous value
    fn set_value_at(&self, index: usize, value: V) -> Result<V> {
        self.write_scope(|mut scope| Ok(scope.entry_mut(index)?.set_value(value)))
    }

    /// Replace the key at `index`, returning the previous key
    fn replace_key_at(&self, index: usize, key: K) -> Result<K> {
        self.write_scope(|mut scope| Ok(scope.entry_mut(index)?.set_key(key)))
    }

    /// Replace both slots at `index`, returning the previous pair
    fn set_entry_at(&self, index: usize, key: K, value: V) -> Result<Entry<K, V>> {
        self.write_scope(|mut scope| Ok(scope.entry_mut(index)?.replace(key, value)))
    }

    /// Replace the value of the entry a locator resolves to
    fn set_value(&self, locator: &Locator<K, V>, value: V) -> Result<V>
    where
        K: PartialEq,
        V: PartialEq,
    {
        self.write_scope(|mut scope| {
            let index = scope.read().locate(locator)?;
            Ok(scope.entry_mut(index)?.set_value(value))
        })
    }

    /// Replace the key of the entry a locator resolves to
    fn replace_key(&self, locator: &Locator<K, V>, key: K) -> Result<K>
    where
        K: PartialEq,
        V: PartialEq,
    {
        self.write_scope(|mut scope| {
            let index = scope.read().locate(locator)?;
            Ok(scope.entry_mut(index)?.set_key(key))
        })
    }

    /// Replace both slots of the entry a locator resolves to
    fn set_entry(&self, locator: &Locator<K, V>, key: K, value: V) -> Result<Entry<K, V>>
    where
        K: PartialEq,
        V: PartialEq,
    {
        self.write_scope(|mut scope| {
            let index = scope.read().locate(locator)?;
            Ok(scope.entry_mut(index)?.replace(key, value))
        })
    }

    // ========================================
    // Views
    // ========================================

    /// Live view between two endpoints
    ///
    /// Endpoints are resolved against this receiver; an unbounded side
    /// follows this receiver's own edge. The view must cover at least one
    /// entry, otherwise construction fails with `IllegalViewRange`.
    fn view(&self, start: Bound<Locator<K, V>>, end: Bound<Locator<K, V>>) -> Result<View<K, V>>
    where
        K: PartialEq,
        V: PartialEq,
    {
        self.write_scope(|mut scope| {
            let (start, end) = {
                let read = scope.read();
                (read.endpoint(start)?, read.endpoint(end)?)
            };
            scope.derive_view(start, end)
        })
    }

    /// View over `from..=to`
    fn sub_map(&self, from: usize, to: usize) -> Result<View<K, V>> {
        self.write_scope(|mut scope| {
            scope.derive_view(Bound::Included(from), Bound::Included(to))
        })
    }

    /// View over `..to`, following this receiver's start
    fn head_map(&self, to: usize) -> Result<View<K, V>> {
        self.write_scope(|mut scope| scope.derive_view(Bound::Unbounded, Bound::Excluded(to)))
    }

    /// View over `from..`, following this receiver's end
    fn tail_map(&self, from: usize) -> Result<View<K, V>> {
        self.write_scope(|mut scope| scope.derive_view(Bound::Included(from), Bound::Unbounded))
    }

    /// View from the first `from` key through the first `to` key
    fn sub_map_by_key(&self, from: K, to: K) -> Result<View<K, V>>
    where
        K: PartialEq,
        V: PartialEq,
    {
        self.view(
            Bound::Included(Locator::Key(from)),
            Bound::Included(Locator::Key(to)),
        )
    }

    /// View of everything before the first `to` key
    fn head_map_by_key(&self, to: K) -> Result<View<K, V>>
    where
        K: PartialEq,
        V: PartialEq,
    {
        self.view(Bound::Unbounded, Bound::Excluded(Locator::Key(to)))
    }

    /// View of everything from the first `from` key on
    fn tail_map_by_key(&self, from: K) -> Result<View<K, V>>
    where
        K: PartialEq,
        V: PartialEq,
    {
        self.view(Bound::Included(Locator::Key(from)), Bound::Unbounded)
    }

    // ========================================
    // Cursors
    // ========================================

    /// Fail-fast cursor positioned before the first entry
    fn cursor(&self) -> Result<Cursor<'_, K, V, Self>>
    where
        Self: Sized,
    {
        Cursor::new(self, 0)
    }

    /// Fail-fast cursor positioned before `index`
    fn cursor_at(&self, index: usize) -> Result<Cursor<'_, K, V, Self>>
    where
        Self: Sized,
    {
        Cursor::new(self, index)
    }
}
