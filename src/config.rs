//! Construction parameters for both map variants

use crate::error::{MapError, Result};

/// Initial number of slots or buckets when none is given
pub const DEFAULT_CAPACITY: usize = 17;

/// Default load factor threshold for open addressing, in percent
pub const OPEN_ADDRESSING_LOAD_PERCENT: usize = 50;

/// Default load factor threshold for separate chaining, in percent
pub const CHAINING_LOAD_PERCENT: usize = 100;

/// Largest open addressing threshold, in percent.
///
/// With at most half of a prime table occupied, a quadratic probe always
/// reaches a free slot.
pub const OPEN_ADDRESSING_MAX_LOAD_PERCENT: usize = 50;

/// Largest separate chaining threshold, in percent
pub const CHAINING_MAX_LOAD_PERCENT: usize = 1000;

/// Capacity and load factor threshold a map is built with.
///
/// The threshold is stored as a percentage so load checks stay in integer
/// arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapConfig {
    /// Initial number of slots (open addressing) or buckets (chaining)
    pub capacity: usize,
    /// Largest `len / capacity` ratio allowed after a `put`, in percent
    pub load_factor_percent: usize,
}

impl MapConfig {
    /// Defaults for [`crate::OpenAddressingMap`]
    #[must_use]
    pub const fn open_addressing() -> Self {
        Self { capacity: DEFAULT_CAPACITY, load_factor_percent: OPEN_ADDRESSING_LOAD_PERCENT }
    }

    /// Defaults for [`crate::ChainingMap`]
    #[must_use]
    pub const fn chaining() -> Self {
        Self { capacity: DEFAULT_CAPACITY, load_factor_percent: CHAINING_LOAD_PERCENT }
    }

    /// Replaces the initial capacity
    #[must_use]
    pub const fn with_capacity(self, capacity: usize) -> Self {
        Self { capacity, ..self }
    }

    /// Replaces the load factor threshold
    #[must_use]
    pub const fn with_load_factor_percent(self, load_factor_percent: usize) -> Self {
        Self { load_factor_percent, ..self }
    }

    /// Checks the configuration against the limits of a map variant
    pub(crate) fn validate(&self, max_load_percent: usize) -> Result<()> {
        validate_capacity(self.capacity)?;
        validate_load_percent(self.load_factor_percent, max_load_percent)
    }
}

/// Rejects a zero capacity
pub(crate) fn validate_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        return Err(MapError::InvalidCapacity {
            requested: capacity,
            reason: "capacity must be at least 1",
        });
    }
    Ok(())
}

/// Rejects thresholds outside `1..=max`
pub(crate) fn validate_load_percent(percent: usize, max: usize) -> Result<()> {
    if percent == 0 || percent > max {
        return Err(MapError::InvalidLoadFactor { percent, max });
    }
    Ok(())
}
