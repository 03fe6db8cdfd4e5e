//! Live sub-range views
//!
//! A view is a window onto the root store. It owns its window (shared with
//! the store's weak registry) and holds the store itself only weakly.
//! Reads and writes through a view take the store lock first and the window
//! lock second, which is the only order the crate ever uses.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use listmap_core::{Error, Result};

use crate::multimap::IndexedMultimap;
use crate::registry::Window;
use crate::scope::{ReadScope, WriteScope};
use crate::store::StoreInner;

/// Live window onto a [`ListMap`](crate::ListMap)
///
/// Structural edits made anywhere in the store keep the window in step;
/// clearing the root store empties it permanently. Views derived from a view
/// are registered with the root store directly.
pub struct View<K, V> {
    store: Weak<RwLock<StoreInner<K, V>>>,
    window: Arc<Mutex<Window>>,
}

impl<K, V> View<K, V> {
    pub(crate) fn new(store: Weak<RwLock<StoreInner<K, V>>>, window: Arc<Mutex<Window>>) -> Self {
        View { store, window }
    }

    /// Current bounds in root-absolute index space
    pub fn window(&self) -> Window {
        *self.window.lock()
    }

    /// True once the root store has been dropped
    pub fn is_detached(&self) -> bool {
        self.store.strong_count() == 0
    }

    /// True once the root store has been cleared
    pub fn is_emptied(&self) -> bool {
        self.window.lock().is_emptied()
    }

    fn upgrade(&self) -> Result<Arc<RwLock<StoreInner<K, V>>>> {
        self.store.upgrade().ok_or(Error::Detached)
    }
}

impl<K, V> IndexedMultimap<K, V> for View<K, V> {
    fn read_scope<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(ReadScope<'_, K, V>) -> Result<R>,
    {
        let store = self.upgrade()?;
        let guard = store.read_recursive();
        let window = *self.window.lock();
        f(ReadScope::new(&guard, window))
    }

    fn write_scope<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(WriteScope<'_, K, V>) -> Result<R>,
    {
        let store = self.upgrade()?;
        let mut guard = store.write();
        f(WriteScope::new(&mut guard, self.store.clone(), Some(&self.window)))
    }
}

/// Clones share the same window
impl<K, V> Clone for View<K, V> {
    fn clone(&self) -> Self {
        View {
            store: self.store.clone(),
            window: Arc::clone(&self.window),
        }
    }
}

impl<K, V> std::fmt::Debug for View<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("window", &self.window())
            .field("detached", &self.is_detached())
            .finish()
    }
}
