//! Error types for listmap
//!
//! This module defines all error types used throughout the workspace.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Every error is local and synchronous: it is returned to the immediate
//! caller and never recovered internally.

use thiserror::Error;

/// Result type alias for listmap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the listmap containers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Positional index (or duplicate-occurrence number) outside valid bounds
    ///
    /// For occurrence lookups `len` carries the frequency of the key.
    #[error("Index out of range: {index} (length {len})")]
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// Number of addressable positions at the time of the call
        len: usize,
    },

    /// Lookup miss where a definite match was required
    #[error("Key not found")]
    KeyNotFound,

    /// View construction with inverted or out-of-range endpoints
    #[error("Illegal view range: {0}")]
    IllegalViewRange(String),

    /// The structure changed between a consistency check and its dependent access
    ///
    /// Cursors report stamped and current generations; occurrence walks
    /// report the counted frequency and the matches actually seen.
    #[error("Concurrent structural change: expected {expected}, found {actual}")]
    ConcurrentStructuralChange {
        /// Value observed at the consistency check
        expected: u64,
        /// Value observed at the dependent access
        actual: u64,
    },

    /// Cursor stepped past either end of its sequence
    #[error("No such element")]
    NoSuchElement,

    /// Operation requires state the caller has not established
    #[error("Illegal state: {0}")]
    IllegalState(&'static str),

    /// The store backing a view has been dropped
    #[error("View detached: parent store was dropped")]
    Detached,

    /// Insertion would grow the store past its configured limit
    #[error("Capacity exceeded: limit {limit}")]
    CapacityExceeded {
        /// Configured maximum number of entries
        limit: usize,
    },

    /// Configuration failed validation or could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Shorthand for an [`Error::IndexOutOfRange`]
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Error::IndexOutOfRange { index, len }
    }

    /// True if retrying after resynchronizing (for example re-creating a cursor)
    /// could succeed
    pub fn is_stale(&self) -> bool {
        matches!(
            self,
            Error::ConcurrentStructuralChange { .. } | Error::Detached
        )
    }
}
