//! Hash functions, hash-to-index mapping and the sizing rules shared by both maps
//!
//! Both maps take any [`std::hash::BuildHasher`]. Three deterministic states are
//! provided; none of them carries a per-process seed, so slot placement is
//! reproducible between runs.

use std::hash::{BuildHasherDefault, DefaultHasher, Hasher};

/// Hash state that sums every byte fed to it.
///
/// Anagrams collide, which makes it a useful stress case for collision
/// handling.
///
/// Hashing a `str` through [`std::hash::Hash`] feeds a trailing `0xff` after
/// the UTF-8 bytes, so `"ab"` hashes to `97 + 98 + 255`, not `97 + 98`. The
/// terminator shifts every string by the same amount and keeps anagram
/// collisions intact.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdditiveHasher {
    /// Running sum
    hash: u64,
}

impl Hasher for AdditiveHasher {
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.hash = self.hash.wrapping_add(u64::from(byte));
        }
    }
}

/// Hash state that weights every byte by its 1-based position in the input.
///
/// The `0xff` terminator that `str` hashing appends counts as the last
/// position, so `"ab"` hashes to `97 + 2 * 98 + 3 * 255`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalHasher {
    /// Running weighted sum
    hash: u64,
    /// Number of bytes consumed so far
    position: u64,
}

impl Hasher for PositionalHasher {
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.position = self.position.wrapping_add(1);
            self.hash = self.hash.wrapping_add(self.position.wrapping_mul(u64::from(byte)));
        }
    }
}

/// Builds [`AdditiveHasher`]s
pub type AdditiveState = BuildHasherDefault<AdditiveHasher>;

/// Builds [`PositionalHasher`]s
pub type PositionalState = BuildHasherDefault<PositionalHasher>;

/// SipHash with fixed keys, the default for both maps
pub type DefaultState = BuildHasherDefault<DefaultHasher>;

/// Maps a hash onto `0..capacity`.
///
/// A zero capacity maps everything to `0`; maps never have one.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn bucket_index(hash: u64, capacity: usize) -> usize {
    // the remainder is below `capacity`, so it fits back into `usize`
    hash.checked_rem(capacity as u64).map_or(0, |index| index as usize)
}

/// Returns true if `n` is prime
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut divisor = 3;
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Smallest prime greater than or equal to `n`.
///
/// Saturates at `usize::MAX`, which is not prime, when no prime at least `n`
/// fits in a `usize`. Allocation rejects a table that large before it is used.
#[must_use]
pub fn next_prime(n: usize) -> usize {
    let mut candidate = n.max(2);
    while !is_prime(candidate) && candidate < usize::MAX {
        candidate = candidate.saturating_add(1);
    }
    candidate
}

/// Returns true if `len` entries in `capacity` slots is above `percent` load
pub(crate) fn exceeds_load(len: usize, capacity: usize, percent: usize) -> bool {
    len.saturating_mul(100) > capacity.saturating_mul(percent)
}

/// Capacity to grow to so that `required` entries stay within `percent` load.
///
/// Starts at the smallest prime at least twice `current` and keeps doubling.
pub(crate) fn grown_capacity(current: usize, required: usize, percent: usize) -> usize {
    let mut capacity = next_prime(current.saturating_mul(2));
    while exceeds_load(required, capacity, percent) && capacity < usize::MAX {
        capacity = next_prime(capacity.saturating_mul(2));
    }
    capacity
}

/// Slot sequence `(hash + i^2) mod capacity` for `i` in `0..capacity`.
///
/// On a prime capacity the first `(capacity + 1) / 2` positions are distinct.
#[derive(Debug, Clone)]
pub(crate) struct QuadraticProbe {
    /// Slot yielded last
    position: usize,
    /// Table length
    capacity: usize,
    /// Number of slots yielded so far
    attempt: usize,
}

impl QuadraticProbe {
    /// Starts the sequence at the home slot of `hash`
    pub(crate) fn new(hash: u64, capacity: usize) -> Self {
        Self { position: bucket_index(hash, capacity), capacity, attempt: 0 }
    }
}

impl Iterator for QuadraticProbe {
    type Item = usize;

    #[allow(clippy::arithmetic_side_effects)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.attempt >= self.capacity {
            return None;
        }
        if self.attempt > 0 {
            // consecutive squares differ by 2i - 1
            let step = (2 * self.attempt - 1) % self.capacity;
            self.position = (self.position + step) % self.capacity;
        }
        self.attempt += 1;
        Some(self.position)
    }
}
