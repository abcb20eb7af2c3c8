//! # Probechain
//!
//! Two hash map implementations over one backing store, for comparing
//! collision strategies side by side.
//!
//! This crate provides:
//!
//! - `OpenAddressingMap`: quadratic probing over a prime-sized table, with
//!   tombstones marking removed entries
//! - `ChainingMap`: separate chaining, one singly linked chain per bucket
//! - `find_mode` / `mode_of`: the most frequent keys of a frequency table
//!
//! Both maps are generic over any [`std::hash::BuildHasher`]. The additive and
//! positional string hashes are deterministic and cheap to reason about, which
//! makes collisions easy to provoke.
//!
//! ## Basic Usage
//!
//! ```rust
//! use probechain::OpenAddressingMap;
//!
//! // Create a new hash map
//! let mut map = OpenAddressingMap::new();
//!
//! // Insert values
//! map.put("apple".to_string(), 1);
//! map.put("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.put("apple".to_string(), 10);
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Frequency Tables
//!
//! ```rust
//! use probechain::{AdditiveState, ChainingMap, find_mode};
//!
//! let mut counts = ChainingMap::with_hasher(AdditiveState::default());
//! for word in ["melon", "apple", "melon", "grape"] {
//!     counts.increment(word, 1);
//! }
//!
//! let mode = find_mode(&counts).expect("counts are not empty");
//! assert_eq!(mode.keys.as_slice(), &[&"melon"]);
//! assert_eq!(mode.frequency, 2);
//! ```

/// Module implementing the separate chaining hash map
mod chaining_map;
/// Construction parameters and their limits
mod config;
/// Bounds-checked backing store
mod dynamic_array;
/// Error type shared by the crate
mod error;
/// Hash states and table sizing helpers
mod hashing;
/// Mode queries over frequency tables
mod mode;
/// Module implementing the open addressing hash map
mod open_addressing_map;
/// Utility traits for the hash maps
mod utils;

pub use chaining_map::{ChainingMap, Iter as ChainingIter};
pub use config::{
    CHAINING_LOAD_PERCENT, CHAINING_MAX_LOAD_PERCENT, DEFAULT_CAPACITY, MapConfig,
    OPEN_ADDRESSING_LOAD_PERCENT, OPEN_ADDRESSING_MAX_LOAD_PERCENT,
};
pub use dynamic_array::DynamicArray;
pub use error::{MapError, Result};
pub use hashing::{
    AdditiveHasher, AdditiveState, DefaultState, PositionalHasher, PositionalState, bucket_index,
    is_prime, next_prime,
};
pub use mode::{Mode, find_mode, mode_of};
pub use open_addressing_map::{Iter as OpenAddressingIter, OpenAddressingMap};
pub use utils::HashMapExtensions;

/// Helpers shared by the unit tests
#[cfg(test)]
pub(crate) mod test_support {
    use std::hash::{BuildHasher, Hasher};

    /// Hash state sending every key to the same hash
    #[derive(Debug, Clone, Copy, Default)]
    pub(crate) struct FixedState(
        /// Hash returned for every key
        pub(crate) u64,
    );

    /// Hasher ignoring its input
    #[derive(Debug)]
    pub(crate) struct FixedHasher(
        /// Hash returned by `finish`
        u64,
    );

    impl Hasher for FixedHasher {
        fn finish(&self) -> u64 {
            self.0
        }

        fn write(&mut self, _bytes: &[u8]) {}
    }

    impl BuildHasher for FixedState {
        type Hasher = FixedHasher;

        fn build_hasher(&self) -> Self::Hasher {
            FixedHasher(self.0)
        }
    }

    /// Routes `log` output through the test harness
    pub(crate) fn init_test_logger() {
        let _ = env_logger::builder().filter_level(log::LevelFilter::Trace).is_test(true).try_init();
    }
}
