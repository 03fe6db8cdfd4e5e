//! Fail-fast bidirectional cursor
//!
//! A cursor sits between two entries of its receiver, like a list iterator.
//! It records the root store's generation when it is created and compares it
//! on every operation. Any structural edit made through another handle fails
//! the next operation with `ConcurrentStructuralChange`. Edits made through the
//! cursor itself re-stamp it.
//!
//! ```text
//!   entries:   [ a ][ b ][ c ]
//!   positions: 0    1    2    3
//!                   ^ next = 1, previous = 0
//! ```

use std::marker::PhantomData;

use tracing::debug;

use listmap_core::{Entry, Error, Result};

use crate::multimap::IndexedMultimap;
use crate::scope::{ReadScope, WriteScope};

/// Where a cursor sits relative to its receiver's entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Before the entry at this index
    Positioned(usize),
    /// After the last entry
    Exhausted,
}

/// Cursor over a [`ListMap`](crate::ListMap) or a [`View`](crate::View)
pub struct Cursor<'a, K, V, M> {
    map: &'a M,
    next: usize,
    current: Option<usize>,
    expected: u64,
    failed: bool,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<'a, K, V, M> Cursor<'a, K, V, M>
where
    M: IndexedMultimap<K, V>,
{
    pub(crate) fn new(map: &'a M, start: usize) -> Result<Self> {
        let (expected, len) = map.read_scope(|scope| Ok((scope.generation(), scope.len())))?;
        if start > len {
            return Err(Error::out_of_range(start, len));
        }
        Ok(Cursor {
            map,
            next: start,
            current: None,
            expected,
            failed: false,
            _marker: PhantomData,
        })
    }

    /// Run `f` under the read lock once the stamp has been validated
    fn read_fenced<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&ReadScope<'_, K, V>) -> Result<R>,
    {
        let expected = self.expected;
        self.map.read_scope(|scope| {
            fence(expected, scope.generation())?;
            f(&scope)
        })
    }

    /// Run `f` under the write lock once the stamp has been validated
    ///
    /// Returns the generation left behind by `f`, read under the same lock.
    fn write_fenced<R, F>(&self, f: F) -> Result<(R, u64)>
    where
        F: FnOnce(&mut WriteScope<'_, K, V>) -> Result<R>,
    {
        let expected = self.expected;
        self.map.write_scope(|mut scope| {
            fence(expected, scope.generation())?;
            let result = f(&mut scope)?;
            Ok((result, scope.generation()))
        })
    }

    /// Position relative to the receiver's entries
    pub fn state(&self) -> CursorState {
        if self.next < self.map.len() {
            CursorState::Positioned(self.next)
        } else {
            CursorState::Exhausted
        }
    }

    /// True if [`advance`](Self::advance) would yield an entry
    pub fn has_next(&self) -> bool {
        self.next < self.map.len()
    }

    /// True if [`retreat`](Self::retreat) would yield an entry
    pub fn has_previous(&self) -> bool {
        self.next > 0
    }

    /// Index the next `advance` would return
    pub fn next_index(&self) -> usize {
        self.next
    }

    /// Index the next `retreat` would return, if any
    pub fn previous_index(&self) -> Option<usize> {
        self.next.checked_sub(1)
    }

    /// Index of the entry last returned by `advance` or `retreat`
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Remove the current entry and keep iterating
    pub fn remove_current(&mut self) -> Result<Entry<K, V>> {
        let index = self
            .current
            .ok_or(Error::IllegalState("cursor has no current entry"))?;
        let (removed, generation) = self.write_fenced(|scope| scope.remove(index))?;
        self.current = None;
        if index < self.next {
            self.next -= 1;
        }
        self.expected = generation;
        Ok(removed)
    }

    /// Replace the current entry in place, returning the previous pair
    pub fn set_current(&mut self, key: K, value: V) -> Result<Entry<K, V>> {
        let index = self
            .current
            .ok_or(Error::IllegalState("cursor has no current entry"))?;
        let (previous, _) =
            self.write_fenced(|scope| Ok(scope.entry_mut(index)?.replace(key, value)))?;
        Ok(previous)
    }

    /// Insert before the cursor; the new entry is not returned by `advance`
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        let at = self.next;
        let ((), generation) = self.write_fenced(|scope| scope.insert(at, key, value))?;
        self.next += 1;
        self.current = None;
        self.expected = generation;
        Ok(())
    }
}

impl<'a, K, V, M> Cursor<'a, K, V, M>
where
    K: Clone,
    V: Clone,
    M: IndexedMultimap<K, V>,
{
    /// Step forward and return the entry passed over
    pub fn advance(&mut self) -> Result<Entry<K, V>> {
        let index = self.next;
        let entry = self.read_fenced(|scope| {
            if index >= scope.len() {
                return Err(Error::NoSuchElement);
            }
            scope.entry(index).cloned()
        })?;
        self.current = Some(index);
        self.next = index + 1;
        Ok(entry)
    }

    /// Step backward and return the entry passed over
    pub fn retreat(&mut self) -> Result<Entry<K, V>> {
        let next = self.next;
        let (index, entry) = self.read_fenced(|scope| {
            let index = next.checked_sub(1).ok_or(Error::NoSuchElement)?;
            Ok((index, scope.entry(index)?.clone()))
        })?;
        self.current = Some(index);
        self.next = index;
        Ok(entry)
    }

    /// Entry `advance` would return, without moving
    pub fn peek_next(&self) -> Result<Option<Entry<K, V>>> {
        let index = self.next;
        self.read_fenced(|scope| {
            if index >= scope.len() {
                return Ok(None);
            }
            scope.entry(index).map(|entry| Some(entry.clone()))
        })
    }

    /// Entry `retreat` would return, without moving
    pub fn peek_previous(&self) -> Result<Option<Entry<K, V>>> {
        let previous = self.next.checked_sub(1);
        self.read_fenced(|scope| match previous {
            Some(index) => scope.entry(index).map(|entry| Some(entry.clone())),
            None => Ok(None),
        })
    }

    /// Entry last returned by `advance` or `retreat`
    pub fn current_entry(&self) -> Result<Entry<K, V>> {
        let current = self.current;
        self.read_fenced(|scope| {
            let index = current.ok_or(Error::IllegalState("cursor has no current entry"))?;
            scope.entry(index).cloned()
        })
    }
}

fn fence(expected: u64, actual: u64) -> Result<()> {
    if actual != expected {
        debug!(expected, actual, "cursor observed a structural change");
        return Err(Error::ConcurrentStructuralChange { expected, actual });
    }
    Ok(())
}

impl<'a, K, V, M> Iterator for Cursor<'a, K, V, M>
where
    K: Clone,
    V: Clone,
    M: IndexedMultimap<K, V>,
{
    type Item = Result<Entry<K, V>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.advance() {
            Ok(entry) => Some(Ok(entry)),
            Err(Error::NoSuchElement) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl<'a, K, V, M> std::fmt::Debug for Cursor<'a, K, V, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("next", &self.next)
            .field("current", &self.current)
            .field("expected_generation", &self.expected)
            .finish()
    }
}
