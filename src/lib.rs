//! listmap - ordered, duplicate-tolerant indexed multimap
//!
//! A `ListMap` stores `(key, value)` entries in insertion order, allows any
//! number of entries per key, and addresses them by position or by the N-th
//! occurrence of a key. Sub-range views stay live while the map is edited.
//!
//! # Quick Start
//!
//! ```ignore
//! use listmap::{IndexedMultimap, ListMap, Locator};
//!
//! let map = ListMap::new();
//! map.push("user", 1)?;
//! map.push("user", 2)?;
//!
//! // Second "user" entry
//! assert_eq!(map.value_of(&Locator::nth_key(1, "user"))?, 2);
//!
//! // Live view over the first two entries
//! let head = map.head_map(2)?;
//! map.insert_at(0, "admin", 0)?;
//! assert_eq!(head.len(), 3);
//! ```
//!
//! # Architecture
//!
//! - `listmap-core`: entries, locators, errors and configuration
//! - `listmap-storage`: the store, its views and cursors

pub use listmap_core::*;
pub use listmap_storage::{
    Cursor, CursorState, Edge, IndexedMultimap, ListMap, StructuralEdit, View, ViewRegistry,
    Window,
};
