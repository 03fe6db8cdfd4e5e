//! Storage layer for listmap
//!
//! This crate implements the ordered multimap and its live views:
//! - ListMap: root sequence store behind an `Arc<RwLock<_>>`
//! - Addressing engine: index, key and N-th-duplicate lookups
//! - ViewRegistry: weak registry keeping view windows in step with edits
//! - View: live sub-range that resolves through the root store
//! - Cursor: bidirectional, generation-fenced iteration
//!
//! # Structural edits
//!
//! Insert, remove and clear are the only operations that shift positions.
//! Each one increments the store generation and adjusts every live view
//! window while the write lock is held. In-place replacement of keys or
//! values is not structural and does not disturb cursors.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod addressing;
pub mod cursor;
pub mod multimap;
pub mod registry;
pub mod view;

mod codec;
mod scope;
mod store;

pub use cursor::{Cursor, CursorState};
pub use multimap::IndexedMultimap;
pub use registry::{Edge, StructuralEdit, ViewRegistry, Window};
pub use store::ListMap;
pub use view::View;

pub use listmap_core::{Entry, Error, ListMapConfig, Locator, Result};
