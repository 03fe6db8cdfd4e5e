//! Core types for listmap
//!
//! This crate defines the foundational types shared by the storage layer:
//! - Entry: positional (key, value) pair with in-place mutable slots
//! - Locator: logical addressing request (index, key, N-th duplicate)
//! - Error: error type hierarchy
//! - ListMapConfig: construction parameters

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod entry;
pub mod error;
pub mod locator;

pub use config::ListMapConfig;
pub use entry::Entry;
pub use error::{Error, Result};
pub use locator::Locator;
