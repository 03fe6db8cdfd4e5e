//! The root store
//!
//! `ListMap` owns the entry sequence behind an `Arc<RwLock<_>>`. Views hold
//! only a `Weak` reference to it, so dropping the `ListMap` detaches every
//! view derived from it.
//!
//! Every structural edit goes through [`StoreInner::insert`],
//! [`StoreInner::remove`] or [`StoreInner::clear`]. Each one mutates the
//! sequence, bumps the generation and notifies the view registry before the
//! write lock is released, so no reader ever sees a window out of step with
//! the entries.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace, warn};

use listmap_core::{Entry, Error, ListMapConfig, Result};

use crate::multimap::IndexedMultimap;
use crate::registry::{StructuralEdit, ViewRegistry, Window};
use crate::scope::{ReadScope, WriteScope};

/// Entries, generation counter and view registry of one root store
pub(crate) struct StoreInner<K, V> {
    entries: Vec<Entry<K, V>>,
    generation: u64,
    registry: ViewRegistry,
    max_len: Option<usize>,
}

impl<K, V> StoreInner<K, V> {
    pub(crate) fn new(config: &ListMapConfig) -> Self {
        StoreInner {
            entries: Vec::with_capacity(config.initial_capacity),
            generation: 0,
            registry: ViewRegistry::new(),
            max_len: config.max_len,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn entries(&self) -> &[Entry<K, V>] {
        &self.entries
    }

    /// Slot for in-place replacement; not a structural edit
    pub(crate) fn entry_mut(&mut self, index: usize) -> Option<&mut Entry<K, V>> {
        self.entries.get_mut(index)
    }

    pub(crate) fn insert(&mut self, index: usize, entry: Entry<K, V>) -> Result<()> {
        if index > self.entries.len() {
            return Err(Error::out_of_range(index, self.entries.len()));
        }
        if let Some(limit) = self.max_len {
            if self.entries.len() >= limit {
                return Err(Error::CapacityExceeded { limit });
            }
        }

        self.entries.insert(index, entry);
        self.commit(StructuralEdit::Insert(index));
        Ok(())
    }

    pub(crate) fn remove(&mut self, index: usize) -> Result<Entry<K, V>> {
        if index >= self.entries.len() {
            return Err(Error::out_of_range(index, self.entries.len()));
        }

        let removed = self.entries.remove(index);
        self.commit(StructuralEdit::Remove(index));
        Ok(removed)
    }

    pub(crate) fn clear(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        self.commit(StructuralEdit::Clear);
        debug!(
            removed,
            views = self.registry.len(),
            "cleared store, live views emptied"
        );
    }

    fn commit(&mut self, edit: StructuralEdit) {
        self.generation = self.generation.wrapping_add(1);
        trace!(
            ?edit,
            generation = self.generation,
            len = self.entries.len(),
            "structural edit"
        );
        self.registry.notify(edit);
    }

    pub(crate) fn register(&mut self, window: &Arc<Mutex<Window>>) {
        self.registry.register(window);
        let bounds = *window.lock();
        trace!(window = ?bounds, slots = self.registry.len(), "registered view");
    }

    pub(crate) fn registered_views(&self) -> usize {
        self.registry.len()
    }

    pub(crate) fn live_views(&self) -> usize {
        self.registry.live()
    }
}

/// Ordered, duplicate-tolerant map addressed by position or key occurrence
///
/// A `ListMap` is the root store. It is not `Clone`: views reference it
/// weakly and report [`Error::Detached`] once it is dropped.
///
/// All operations are provided by [`IndexedMultimap`], which `ListMap` and
/// [`View`](crate::View) both implement.
///
/// # Example
///
/// ```ignore
/// use listmap_storage::{IndexedMultimap, ListMap};
///
/// let map = ListMap::new();
/// map.push("a", 1)?;
/// map.push("a", 2)?;
/// assert_eq!(map.nth_by_key(1, &"a")?, 2);
/// ```
pub struct ListMap<K, V> {
    inner: Arc<RwLock<StoreInner<K, V>>>,
}

impl<K, V> ListMap<K, V> {
    /// Create an empty map
    pub fn new() -> Self {
        Self::from_inner(StoreInner::new(&ListMapConfig::default()))
    }

    /// Create an empty map with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_inner(StoreInner::new(
            &ListMapConfig::new().with_initial_capacity(capacity),
        ))
    }

    /// Create an empty map from a validated configuration
    pub fn with_config(config: ListMapConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            initial_capacity = config.initial_capacity,
            max_len = ?config.max_len,
            "creating list map"
        );
        Ok(Self::from_inner(StoreInner::new(&config)))
    }

    /// Build a map holding `entries` in order
    pub fn from_entries(entries: Vec<Entry<K, V>>) -> Self {
        let mut inner = StoreInner::new(&ListMapConfig::default());
        inner.entries = entries;
        Self::from_inner(inner)
    }

    fn from_inner(inner: StoreInner<K, V>) -> Self {
        ListMap {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    /// Current structural generation of the store
    ///
    /// Incremented by every insert, remove and clear; value replacement
    /// leaves it unchanged.
    pub fn generation(&self) -> u64 {
        self.inner.read().generation()
    }

    /// Registry slots, including views dropped since the last structural edit
    pub fn registered_views(&self) -> usize {
        self.inner.read().registered_views()
    }

    /// Views that are still held by a caller
    pub fn live_views(&self) -> usize {
        self.inner.read().live_views()
    }

    /// Configured entry limit, if any
    pub fn max_len(&self) -> Option<usize> {
        self.inner.read().max_len
    }

    pub(crate) fn with_entries<R>(&self, f: impl FnOnce(&[Entry<K, V>]) -> R) -> R {
        f(self.inner.read().entries())
    }

    fn handle(&self) -> Weak<RwLock<StoreInner<K, V>>> {
        Arc::downgrade(&self.inner)
    }
}

impl<K, V> IndexedMultimap<K, V> for ListMap<K, V> {
    fn read_scope<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(ReadScope<'_, K, V>) -> Result<R>,
    {
        let store = self.inner.read_recursive();
        f(ReadScope::new(&store, Window::full()))
    }

    fn write_scope<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(WriteScope<'_, K, V>) -> Result<R>,
    {
        let handle = self.handle();
        let mut store = self.inner.write();
        f(WriteScope::new(&mut store, handle, None))
    }
}

impl<K, V> Default for ListMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for ListMap<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let store = self.inner.read();
        f.debug_struct("ListMap")
            .field("entries", &store.entries)
            .field("generation", &store.generation)
            .field("views", &store.registry)
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for ListMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_entries(iter.into_iter().map(Entry::from).collect())
    }
}

impl<K, V> From<Vec<(K, V)>> for ListMap<K, V> {
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> Extend<(K, V)> for ListMap<K, V> {
    /// Append every pair; stops at the configured entry limit
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let mut store = self.inner.write();
        for (key, value) in iter {
            let at = store.len();
            if let Err(e) = store.insert(at, Entry::new(key, value)) {
                warn!(error = %e, len = at, "extend stopped early");
                break;
            }
        }
    }
}
