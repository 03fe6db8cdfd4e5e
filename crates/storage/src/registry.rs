//! View registry and boundary synchronization
//!
//! The store keeps a weak reference to the window of every view constructed
//! from it. Each structural edit walks the registry once:
//!
//! - `Insert(i)`: every live window with a concrete end that contains `i`
//!   grows its end by one. Inserting exactly at a window's start is inside
//!   the window. A window anchored at the parent's start contains every `i`
//!   before its end.
//! - `Remove(i)`: every live window with a concrete end that contained `i`
//!   shrinks its end by one.
//! - `Clear`: every live window becomes [`Window::Emptied`] and stays that way.
//!
//! Windows anchored at the parent's end never need adjusting. Dead references
//! (views dropped by the caller) are pruned during the same walk.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut registry = ViewRegistry::new();
//! let window = Arc::new(Mutex::new(Window::span(2, 5)));
//! registry.register(&window);
//!
//! registry.notify(StructuralEdit::Insert(3));
//! assert_eq!(*window.lock(), Window::span(2, 6));
//! ```

use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use smallvec::SmallVec;
use tracing::debug;

/// One edge of a view window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Tracks the parent's start (for a start edge) or end (for an end edge)
    Anchored,
    /// Concrete root-absolute position
    ///
    /// For a start edge this is the first index inside the window; for an end
    /// edge it is one past the last index inside the window.
    At(usize),
}

/// Boundary pair of a view, in root-absolute index space (half-open)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    /// Window tracking its edges
    Live {
        /// First index inside the window
        start: Edge,
        /// One past the last index inside the window
        end: Edge,
    },
    /// Window invalidated by a `clear` of the parent
    Emptied,
}

impl Window {
    /// Window anchored at both ends
    pub fn full() -> Self {
        Window::Live {
            start: Edge::Anchored,
            end: Edge::Anchored,
        }
    }

    /// Window with two concrete edges, `start..end`
    pub fn span(start: usize, end: usize) -> Self {
        Window::Live {
            start: Edge::At(start),
            end: Edge::At(end),
        }
    }

    /// True once the parent has been cleared
    pub fn is_emptied(&self) -> bool {
        matches!(self, Window::Emptied)
    }

    /// Resolve to `(offset, len)` given the current length of the root store
    ///
    /// `len` is the nominal window size; it is not clamped to the entries
    /// that actually exist past `offset`.
    pub fn resolve(&self, root_len: usize) -> (usize, usize) {
        match *self {
            Window::Emptied => (0, 0),
            Window::Live { start, end } => {
                let offset = match start {
                    Edge::Anchored => 0,
                    Edge::At(s) => s,
                };
                let end = match end {
                    Edge::Anchored => root_len,
                    Edge::At(e) => e,
                };
                (offset, end.saturating_sub(offset))
            }
        }
    }

    /// True if root index `index` lies inside a window with a concrete end
    fn contains_bounded(&self, index: usize) -> bool {
        match *self {
            Window::Live {
                start,
                end: Edge::At(end),
            } => {
                let after_start = match start {
                    Edge::Anchored => true,
                    Edge::At(s) => index >= s,
                };
                after_start && index < end
            }
            _ => false,
        }
    }

    /// Apply one structural edit to this window
    pub fn apply(&mut self, edit: StructuralEdit) {
        match edit {
            StructuralEdit::Insert(index) => {
                if self.contains_bounded(index) {
                    if let Window::Live {
                        end: Edge::At(end), ..
                    } = self
                    {
                        *end += 1;
                    }
                }
            }
            StructuralEdit::Remove(index) => {
                if self.contains_bounded(index) {
                    if let Window::Live {
                        end: Edge::At(end), ..
                    } = self
                    {
                        *end -= 1;
                    }
                }
            }
            StructuralEdit::Clear => *self = Window::Emptied,
        }
    }

    /// Move a concrete end edge so the window ends at `end`
    ///
    /// Used when a view appends at its own end: the sync protocol treats that
    /// position as outside the window, so the owning view extends itself.
    pub(crate) fn extend_to(&mut self, new_end: usize) {
        if let Window::Live {
            end: Edge::At(end), ..
        } = self
        {
            *end = new_end;
        }
    }
}

/// A position-shifting change to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralEdit {
    /// Entry inserted at the index; entries at or after it moved right
    Insert(usize),
    /// Entry removed from the index; entries after it moved left
    Remove(usize),
    /// All entries removed
    Clear,
}

/// Weak registry of view windows owned by a store
#[derive(Default)]
pub struct ViewRegistry {
    windows: SmallVec<[Weak<Mutex<Window>>; 4]>,
}

impl ViewRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        ViewRegistry {
            windows: SmallVec::new(),
        }
    }

    /// Register a view window without taking ownership of it
    pub fn register(&mut self, window: &Arc<Mutex<Window>>) {
        self.windows.push(Arc::downgrade(window));
    }

    /// Propagate a structural edit to every live window
    ///
    /// Returns the number of dead references pruned during the walk.
    pub fn notify(&mut self, edit: StructuralEdit) -> usize {
        let before = self.windows.len();
        self.windows.retain(|weak| match weak.upgrade() {
            Some(window) => {
                window.lock().apply(edit);
                true
            }
            None => false,
        });

        let pruned = before - self.windows.len();
        if pruned > 0 {
            debug!(
                pruned,
                remaining = self.windows.len(),
                "pruned dropped views from registry"
            );
        }
        pruned
    }

    /// Number of registry slots, including dead ones not yet pruned
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Check if the registry holds no slots
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Number of windows still referenced by a view
    pub fn live(&self) -> usize {
        self.windows
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }
}

impl std::fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewRegistry")
            .field("slots", &self.windows.len())
            .field("live", &self.live())
            .finish()
    }
}
