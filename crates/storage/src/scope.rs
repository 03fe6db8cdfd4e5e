//! Scoped access to the store under its lock
//!
//! A scope is the store as seen through one window: the whole sequence for a
//! `ListMap`, or a view's window. Indices passed to a scope are relative to
//! that window and are translated to root positions as `offset + index`.
//!
//! Scopes only exist while the store lock is held, so a lookup and the
//! dependent read or write always observe the same generation.

use std::ops::Bound;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use listmap_core::{Entry, Error, Locator, Result};

use crate::addressing;
use crate::registry::{Edge, Window};
use crate::store::StoreInner;
use crate::view::View;

/// Read-only access to a window of the store
pub struct ReadScope<'a, K, V> {
    entries: &'a [Entry<K, V>],
    offset: usize,
    len: usize,
    generation: u64,
}

impl<'a, K, V> ReadScope<'a, K, V> {
    pub(crate) fn new(store: &'a StoreInner<K, V>, window: Window) -> Self {
        let (offset, len) = window.resolve(store.len());
        ReadScope {
            entries: store.entries(),
            offset,
            len,
            generation: store.generation(),
        }
    }

    /// Nominal window size
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Entries of the window that currently exist in the store
    pub(crate) fn visible(&self) -> &'a [Entry<K, V>] {
        let start = self.offset.min(self.entries.len());
        let end = (self.offset + self.len).min(self.entries.len());
        &self.entries[start..end]
    }

    pub(crate) fn entry(&self, index: usize) -> Result<&'a Entry<K, V>> {
        if index >= self.len {
            return Err(Error::out_of_range(index, self.len));
        }
        let visible = self.visible();
        visible
            .get(index)
            .ok_or_else(|| Error::out_of_range(index, visible.len()))
    }

    pub(crate) fn locate(&self, locator: &Locator<K, V>) -> Result<usize>
    where
        K: PartialEq,
        V: PartialEq,
    {
        addressing::resolve(self.visible(), locator)
    }

    /// Resolve a view endpoint to a window-relative index
    ///
    /// Positional endpoints are taken as given so that range validation can
    /// report them as `IllegalViewRange`.
    pub(crate) fn endpoint(&self, bound: Bound<Locator<K, V>>) -> Result<Bound<usize>>
    where
        K: PartialEq,
        V: PartialEq,
    {
        let resolve = |locator: &Locator<K, V>| match locator {
            Locator::Index(index) => Ok(*index),
            other => self.locate(other),
        };
        Ok(match bound {
            Bound::Unbounded => Bound::Unbounded,
            Bound::Included(locator) => Bound::Included(resolve(&locator)?),
            Bound::Excluded(locator) => Bound::Excluded(resolve(&locator)?),
        })
    }
}

/// Mutable access to a window of the store
pub struct WriteScope<'a, K, V> {
    store: &'a mut StoreInner<K, V>,
    handle: Weak<RwLock<StoreInner<K, V>>>,
    own: Option<&'a Arc<Mutex<Window>>>,
}

impl<'a, K, V> WriteScope<'a, K, V> {
    pub(crate) fn new(
        store: &'a mut StoreInner<K, V>,
        handle: Weak<RwLock<StoreInner<K, V>>>,
        own: Option<&'a Arc<Mutex<Window>>>,
    ) -> Self {
        WriteScope { store, handle, own }
    }

    /// Current window; re-read after every structural edit
    pub(crate) fn window(&self) -> Window {
        match self.own {
            Some(window) => *window.lock(),
            None => Window::full(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.window().resolve(self.store.len()).1
    }

    pub(crate) fn generation(&self) -> u64 {
        self.store.generation()
    }

    pub(crate) fn read(&self) -> ReadScope<'_, K, V> {
        ReadScope::new(self.store, self.window())
    }

    pub(crate) fn insert(&mut self, index: usize, key: K, value: V) -> Result<()> {
        let window = self.window();
        if window.is_emptied() {
            return Err(Error::IllegalState("view was emptied by clear"));
        }
        let (offset, len) = window.resolve(self.store.len());
        if index > len {
            return Err(Error::out_of_range(index, len));
        }

        let at = offset + index;
        self.store.insert(at, Entry::new(key, value))?;

        // Appending at the window's own end is outside it for the sync protocol
        if index == len {
            if let Some(own) = self.own {
                own.lock().extend_to(at + 1);
            }
        }
        Ok(())
    }

    pub(crate) fn remove(&mut self, index: usize) -> Result<Entry<K, V>> {
        let (offset, len) = self.window().resolve(self.store.len());
        if index >= len {
            return Err(Error::out_of_range(index, len));
        }
        self.store.remove(offset + index)
    }

    pub(crate) fn entry_mut(&mut self, index: usize) -> Result<&mut Entry<K, V>> {
        let (offset, len) = self.window().resolve(self.store.len());
        if index >= len {
            return Err(Error::out_of_range(index, len));
        }
        let available = self.store.len().saturating_sub(offset);
        self.store
            .entry_mut(offset + index)
            .ok_or_else(|| Error::out_of_range(index, available))
    }

    /// Clear the whole store, or remove every entry inside a view's window
    pub(crate) fn clear(&mut self) -> Result<()> {
        if self.own.is_none() {
            self.store.clear();
            return Ok(());
        }

        let window = self.window();
        if window.is_emptied() {
            return Ok(());
        }
        let (offset, len) = window.resolve(self.store.len());
        let present = len.min(self.store.len().saturating_sub(offset));
        for _ in 0..present {
            self.store.remove(offset)?;
        }
        Ok(())
    }

    /// Register a new view nested in this scope's window
    ///
    /// `start` and `end` are window-relative; unbounded sides inherit this
    /// scope's edges.
    pub(crate) fn derive_view(&mut self, start: Bound<usize>, end: Bound<usize>) -> Result<View<K, V>> {
        let (parent_start, parent_end) = match self.window() {
            Window::Live { start, end } => (start, end),
            Window::Emptied => {
                if matches!((start, end), (Bound::Unbounded, Bound::Unbounded)) {
                    return Ok(self.register_view(Window::Emptied));
                }
                return Err(Error::IllegalViewRange(
                    "parent view was emptied by clear".to_string(),
                ));
            }
        };
        let (offset, len) = self.window().resolve(self.store.len());

        let low = match start {
            Bound::Unbounded => None,
            Bound::Included(index) => Some(index),
            Bound::Excluded(index) => Some(index.checked_add(1).ok_or_else(|| {
                Error::IllegalViewRange(format!("exclusive start {} has no successor", index))
            })?),
        };
        let high = match end {
            Bound::Unbounded => None,
            Bound::Included(index) => Some(index),
            Bound::Excluded(index) => Some(index.checked_sub(1).ok_or_else(|| {
                Error::IllegalViewRange("exclusive end at 0 leaves no entries".to_string())
            })?),
        };

        if let Some(low) = low {
            if low >= len {
                return Err(Error::IllegalViewRange(format!(
                    "start {} outside 0..{}",
                    low, len
                )));
            }
        }
        if let Some(high) = high {
            if high >= len {
                return Err(Error::IllegalViewRange(format!(
                    "end {} outside 0..{}",
                    high, len
                )));
            }
        }
        if let (Some(low), Some(high)) = (low, high) {
            if high < low {
                return Err(Error::IllegalViewRange(format!(
                    "end {} precedes start {}",
                    high, low
                )));
            }
        }

        let window = Window::Live {
            start: low.map_or(parent_start, |low| Edge::At(offset + low)),
            end: high.map_or(parent_end, |high| Edge::At(offset + high + 1)),
        };
        Ok(self.register_view(window))
    }

    fn register_view(&mut self, window: Window) -> View<K, V> {
        let window = Arc::new(Mutex::new(window));
        self.store.register(&window);
        View::new(self.handle.clone(), window)
    }
}
