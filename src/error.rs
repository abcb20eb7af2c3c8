//! Error type shared by both map variants and the backing store

use thiserror::Error;

/// Errors reported by map construction, explicit resizing and the backing store.
///
/// A missing key is not an error: lookups and removals return `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// A table was requested with a capacity it cannot have
    #[error("invalid capacity {requested}: {reason}")]
    InvalidCapacity {
        /// The capacity that was asked for
        requested: usize,
        /// Why it was rejected
        reason: &'static str,
    },

    /// A load factor threshold outside the range the variant supports
    #[error("invalid load factor threshold {percent}%, expected 1..={max}")]
    InvalidLoadFactor {
        /// The threshold that was asked for, in percent
        percent: usize,
        /// Largest threshold the variant accepts, in percent
        max: usize,
    },

    /// Every slot of a quadratic probe sequence held a different live key
    #[error("probe sequence exhausted in a table of {capacity} slots")]
    CapacityExhausted {
        /// Number of slots in the table that was probed
        capacity: usize,
    },

    /// The allocator refused a new backing store
    #[error("failed to allocate a backing store of {length} slots")]
    AllocationFailed {
        /// Requested number of slots
        length: usize,
    },

    /// A store index past the end
    #[error("index {index} out of bounds for a store of length {length}")]
    OutOfBounds {
        /// The offending index
        index: usize,
        /// Length of the store at the time of access
        length: usize,
    },
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, MapError>;
