use std::{
    borrow::Borrow,
    fmt,
    hash::{BuildHasher, Hash},
    mem,
};

use log::{debug, error, trace};

use crate::{
    config::{self, MapConfig, OPEN_ADDRESSING_MAX_LOAD_PERCENT},
    dynamic_array::DynamicArray,
    error::{MapError, Result},
    hashing::{self, DefaultState, QuadraticProbe},
};

/// A table slot
#[derive(Debug, Clone)]
enum Slot<K, V> {
    /// Never written since the last rebuild; terminates every probe
    Empty,
    /// Holds a live entry
    Occupied {
        /// The key of the entry
        key: K,
        /// The value associated with the key
        value: V,
    },
    /// Held an entry that was removed; probes continue past it
    Tombstone,
}

/// Where a key about to be written belongs
enum Placement {
    /// The key is already stored at this slot
    Existing(usize),
    /// The key is absent and may be written at this slot
    Vacant(usize),
}

/// A hash map resolving collisions by quadratic probing.
///
/// Slot `i` of the probe sequence for a key is `(hash + i^2) mod capacity`.
/// The capacity is always prime and the table is rebuilt before an insert
/// would push the load factor above the threshold, which guarantees every
/// insert finds a free slot. Removal leaves a tombstone so that keys placed
/// further along a probe sequence stay reachable.
///
/// The table never shrinks.
#[derive(Debug, Clone)]
pub struct OpenAddressingMap<K, V, S = DefaultState> {
    /// The slots of the table
    slots: DynamicArray<Slot<K, V>>,
    /// Number of occupied slots
    size: usize,
    /// Number of tombstoned slots
    tombstones: usize,
    /// Threshold for load factor before resizing - stored as percentage (1-50)
    load_factor_threshold: usize,
    /// Builds the hasher applied to every key
    hash_builder: S,
}

impl<K, V> OpenAddressingMap<K, V, DefaultState> {
    /// Creates an empty map with the default capacity and threshold
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(DefaultState::default())
    }

    /// Creates an empty map with room for `capacity` slots, rounded up to a prime.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidCapacity`] if `capacity` is zero and
    /// [`MapError::AllocationFailed`] if the table cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let config = MapConfig::open_addressing().with_capacity(capacity);
        Self::with_config(config, DefaultState::default())
    }
}

impl<K, V, S> OpenAddressingMap<K, V, S> {
    /// Creates an empty map with the default capacity and the given hasher
    #[must_use]
    pub fn with_hasher(hash_builder: S) -> Self {
        let config = MapConfig::open_addressing();
        let length = hashing::next_prime(config.capacity);
        let slots = DynamicArray::filled_with(length, || Slot::Empty);
        Self::from_parts(slots, config.load_factor_percent, hash_builder)
    }

    /// Creates an empty map with `capacity` slots and the given hasher.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidCapacity`] if `capacity` is zero and
    /// [`MapError::AllocationFailed`] if the table cannot be allocated.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Result<Self> {
        Self::with_config(MapConfig::open_addressing().with_capacity(capacity), hash_builder)
    }

    /// Creates an empty map from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidCapacity`] for a zero capacity and
    /// [`MapError::InvalidLoadFactor`] for a threshold outside `1..=50`, and
    /// [`MapError::AllocationFailed`] if the table cannot be allocated.
    pub fn with_config(config: MapConfig, hash_builder: S) -> Result<Self> {
        config.validate(OPEN_ADDRESSING_MAX_LOAD_PERCENT)?;
        let length = Self::table_length(config.capacity)?;
        let slots = DynamicArray::try_filled_with(length, || Slot::Empty)?;
        Ok(Self::from_parts(slots, config.load_factor_percent, hash_builder))
    }

    /// Wraps an empty table
    fn from_parts(
        slots: DynamicArray<Slot<K, V>>,
        load_factor_threshold: usize,
        hash_builder: S,
    ) -> Self {
        Self {
            slots,
            size: 0,
            tombstones: 0,
            load_factor_threshold,
            hash_builder,
        }
    }

    /// Prime table length for a requested capacity.
    ///
    /// Lengths no allocation can hold are refused before searching for a prime.
    fn table_length(capacity: usize) -> Result<usize> {
        if capacity > DynamicArray::<Slot<K, V>>::MAX_LENGTH {
            return Err(MapError::AllocationFailed { length: capacity });
        }
        Ok(hashing::next_prime(capacity))
    }

    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the current load factor, live entries over slots
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Returns the load factor threshold in percent
    #[must_use]
    pub fn load_factor_threshold(&self) -> usize {
        self.load_factor_threshold
    }

    /// Number of slots without a live entry, tombstones included
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.slots.iter().filter(|slot| !matches!(slot, Slot::Occupied { .. })).count()
    }

    /// Removes every entry, keeping the capacity
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.size = 0;
        self.tombstones = 0;
    }

    /// Returns an iterator over the live entries in slot order
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { slots: self.slots.iter() }
    }
}

impl<K, V, S> OpenAddressingMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Inserts a key-value pair, returning the previous value of the key.
    ///
    /// A new key first triggers a rebuild into a larger prime table if it
    /// would push the load factor above the threshold.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if self.tombstones > self.capacity() / 2 {
            trace!("purging {} tombstones from {} slots", self.tombstones, self.capacity());
            self.install(DynamicArray::filled_with(self.capacity(), || Slot::Empty));
        }

        let hash = self.hash_builder.hash_one(&key);
        match self.placement(&key, hash) {
            Ok(Placement::Existing(index)) => return self.replace_value(index, value),
            Ok(Placement::Vacant(index)) => {
                let required = self.size.saturating_add(1);
                if !hashing::exceeds_load(required, self.capacity(), self.load_factor_threshold) {
                    self.occupy(index, key, value);
                    return None;
                }
            }
            Err(err) => error!("{err} before reaching the load factor threshold"),
        }

        self.grow(self.size.saturating_add(1));
        self.insert_entry(key, value)
    }

    /// Retrieves the value for a given key
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find(key)?;
        match self.slots.get(index)? {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    /// Retrieves a mutable reference to the value for a given key
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find(key)?;
        match self.slots.get_mut(index)? {
            Slot::Occupied { value, .. } => Some(value),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    /// Returns true if the map holds `key`
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Removes a key, leaving a tombstone in its slot, and returns its value
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find(key)?;
        let slot = self.slots.get_mut(index)?;
        match mem::replace(slot, Slot::Tombstone) {
            Slot::Occupied { value, .. } => {
                self.size = self.size.saturating_sub(1);
                self.tombstones = self.tombstones.saturating_add(1);
                Some(value)
            }
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Rehashes every live entry into a table of `new_capacity` slots,
    /// rounded up to a prime. Tombstones are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidCapacity`] if `new_capacity` is zero or too
    /// small to hold the live entries under the threshold, and
    /// [`MapError::AllocationFailed`] if the new table cannot be allocated.
    /// The map is unchanged on error.
    pub fn resize_table(&mut self, new_capacity: usize) -> Result<()> {
        config::validate_capacity(new_capacity)?;
        let capacity = Self::table_length(new_capacity)?;
        if hashing::exceeds_load(self.size, capacity, self.load_factor_threshold) {
            return Err(MapError::InvalidCapacity {
                requested: new_capacity,
                reason: "too small for the live entries under the load factor threshold",
            });
        }
        let fresh = DynamicArray::try_filled_with(capacity, || Slot::Empty)?;
        self.install(fresh);
        Ok(())
    }

    /// Sets the load factor threshold, growing the table at once if the
    /// current load is above it.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidLoadFactor`] if `percent` is outside `1..=50`.
    pub fn set_load_factor_threshold(&mut self, percent: usize) -> Result<()> {
        config::validate_load_percent(percent, OPEN_ADDRESSING_MAX_LOAD_PERCENT)?;
        trace!("load factor threshold {}% -> {percent}%", self.load_factor_threshold);
        self.load_factor_threshold = percent;
        if hashing::exceeds_load(self.size, self.capacity(), percent) {
            self.grow(self.size);
        }
        Ok(())
    }

    /// Finds the slot holding `key`.
    ///
    /// Tombstones are skipped; an empty slot ends the search.
    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_builder.hash_one(key);
        for index in QuadraticProbe::new(hash, self.capacity()) {
            match self.slots.get(index)? {
                Slot::Empty => return None,
                Slot::Occupied { key: existing, .. } if existing.borrow() == key => {
                    return Some(index);
                }
                Slot::Occupied { .. } | Slot::Tombstone => {}
            }
        }
        None
    }

    /// Probes for the slot `key` should be written to.
    ///
    /// Keeps going past tombstones until the key or an empty slot shows up, so
    /// a key stored beyond a tombstone is updated rather than duplicated. A new
    /// key goes into the first tombstone seen, otherwise into the empty slot.
    fn placement(&self, key: &K, hash: u64) -> Result<Placement> {
        let mut first_tombstone = None;
        for index in QuadraticProbe::new(hash, self.capacity()) {
            match self.slots.get(index) {
                None => break,
                Some(Slot::Empty) => {
                    return Ok(Placement::Vacant(first_tombstone.unwrap_or(index)));
                }
                Some(Slot::Tombstone) => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(index);
                    }
                }
                Some(Slot::Occupied { key: existing, .. }) if existing == key => {
                    return Ok(Placement::Existing(index));
                }
                Some(Slot::Occupied { .. }) => {}
            }
        }
        first_tombstone
            .map(Placement::Vacant)
            .ok_or(MapError::CapacityExhausted { capacity: self.capacity() })
    }

    /// Swaps the value of the entry at `index`
    fn replace_value(&mut self, index: usize, value: V) -> Option<V> {
        match self.slots.get_mut(index) {
            Some(Slot::Occupied { value: current, .. }) => Some(mem::replace(current, value)),
            _ => None,
        }
    }

    /// Writes a new entry at `index`
    fn occupy(&mut self, index: usize, key: K, value: V) {
        if let Some(slot) = self.slots.get_mut(index) {
            if matches!(slot, Slot::Tombstone) {
                self.tombstones = self.tombstones.saturating_sub(1);
            }
            *slot = Slot::Occupied { key, value };
            self.size = self.size.saturating_add(1);
        }
    }

    /// Places an entry without consulting the threshold
    fn insert_entry(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash_builder.hash_one(&key);
        loop {
            match self.placement(&key, hash) {
                Ok(Placement::Existing(index)) => return self.replace_value(index, value),
                Ok(Placement::Vacant(index)) => {
                    self.occupy(index, key, value);
                    return None;
                }
                Err(err) => {
                    error!("{err} while placing an entry");
                    self.grow(self.size.saturating_add(1));
                }
            }
        }
    }

    /// Rebuilds into the smallest prime table at least twice as large that
    /// keeps `required` entries under the threshold
    fn grow(&mut self, required: usize) {
        let capacity =
            hashing::grown_capacity(self.capacity(), required, self.load_factor_threshold);
        self.install(DynamicArray::filled_with(capacity, || Slot::Empty));
    }

    /// Replaces the table with `fresh` and reinserts every live entry into it
    fn install(&mut self, fresh: DynamicArray<Slot<K, V>>) {
        let old = mem::replace(&mut self.slots, fresh);
        debug!(
            "rebuilding open addressing table: {} -> {} slots, {} live entries",
            old.len(),
            self.capacity(),
            self.size
        );
        self.size = 0;
        self.tombstones = 0;
        for slot in old {
            if let Slot::Occupied { key, value } = slot {
                self.insert_entry(key, value);
            }
        }
    }
}

impl<K, V, S> Default for OpenAddressingMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> Extend<(K, V)> for OpenAddressingMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for OpenAddressingMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, S> fmt::Display for OpenAddressingMap<K, V, S>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.slots.iter().enumerate() {
            match slot {
                Slot::Empty => writeln!(f, "{index}: None")?,
                Slot::Tombstone => writeln!(f, "{index}: <tombstone>")?,
                Slot::Occupied { key, value } => writeln!(f, "{index}: {key} -> {value}")?,
            }
        }
        Ok(())
    }
}

/// Iterator over the live entries of an [`OpenAddressingMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Remaining slots
    slots: std::slice::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(|slot| match slot {
            Slot::Occupied { key, value } => Some((key, value)),
            Slot::Empty | Slot::Tombstone => None,
        })
    }
}
