//! ListMap Comprehensive Test Suite
//!
//! End-to-end coverage of the public `listmap` facade.
//!
//! ## Modules
//!
//! - `round_trip`: insert, view and remove walkthroughs
//! - `duplicates`: N-th occurrence addressing and its determinism
//! - `view_sync`: window adjustment across nested and sibling views
//! - `fail_fast`: cursor fencing against structural edits
//! - `clear`: root and view clear semantics
//! - `reclamation`: dropped and detached views
//! - `serialization`: serde and TOML configuration
//!
//! ## Running Tests
//!
//! ```bash
//! # Run the whole suite
//! cargo test --test listmap_comprehensive
//!
//! # Run one module
//! cargo test --test listmap_comprehensive view_sync::
//! ```

mod test_utils;

mod clear;
mod duplicates;
mod fail_fast;
mod reclamation;
mod round_trip;
mod serialization;
mod view_sync;
