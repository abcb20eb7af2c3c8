use std::{
    borrow::Borrow,
    fmt,
    hash::{BuildHasher, Hash},
    mem,
};

use log::{debug, error, trace};
use slotmap::{SlotMap, new_key_type};

use crate::{
    config::{self, CHAINING_MAX_LOAD_PERCENT, MapConfig},
    dynamic_array::DynamicArray,
    error::{MapError, Result},
    hashing::{self, DefaultState},
};

new_key_type! {
    /// Arena handle of a chain node
    struct NodeKey;
}

/// A link in a bucket chain
#[derive(Debug, Clone)]
struct Node<K, V> {
    /// The key of the entry
    key: K,
    /// The value associated with the key
    value: V,
    /// Next node of the same bucket
    next: Option<NodeKey>,
}

/// A hash map resolving collisions by separate chaining.
///
/// Every bucket holds the head of a singly linked chain. Nodes live in an
/// arena owned by the map and link to each other by arena key, so the chains
/// need no raw pointers. New keys are appended at the tail of their chain.
///
/// The table grows after a `put` leaves the load factor above the threshold,
/// never before. It never shrinks on its own, and [`ChainingMap::resize_table`]
/// refuses a capacity that would put it over the threshold.
#[derive(Debug, Clone)]
pub struct ChainingMap<K, V, S = DefaultState> {
    /// Head node of every bucket
    buckets: DynamicArray<Option<NodeKey>>,
    /// Storage for every node of every chain
    nodes: SlotMap<NodeKey, Node<K, V>>,
    /// Threshold for load factor before resizing - stored as percentage
    load_factor_threshold: usize,
    /// Builds the hasher applied to every key
    hash_builder: S,
}

impl<K, V> ChainingMap<K, V, DefaultState> {
    /// Creates an empty map with the default capacity and threshold
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(DefaultState::default())
    }

    /// Creates an empty map with `capacity` buckets.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MapError::InvalidCapacity`] if `capacity` is zero and
    /// [`crate::MapError::AllocationFailed`] if the buckets cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let config = MapConfig::chaining().with_capacity(capacity);
        Self::with_config(config, DefaultState::default())
    }
}

impl<K, V, S> ChainingMap<K, V, S> {
    /// Creates an empty map with the default capacity and the given hasher
    #[must_use]
    pub fn with_hasher(hash_builder: S) -> Self {
        let config = MapConfig::chaining();
        let buckets = DynamicArray::filled(config.capacity, None);
        Self::from_parts(buckets, config.load_factor_percent, hash_builder)
    }

    /// Creates an empty map with `capacity` buckets and the given hasher.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MapError::InvalidCapacity`] if `capacity` is zero and
    /// [`crate::MapError::AllocationFailed`] if the buckets cannot be allocated.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Result<Self> {
        Self::with_config(MapConfig::chaining().with_capacity(capacity), hash_builder)
    }

    /// Creates an empty map from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MapError::InvalidCapacity`] for a zero capacity and
    /// [`crate::MapError::InvalidLoadFactor`] for a threshold outside `1..=1000`,
    /// and [`crate::MapError::AllocationFailed`] if the buckets cannot be
    /// allocated.
    pub fn with_config(config: MapConfig, hash_builder: S) -> Result<Self> {
        config.validate(CHAINING_MAX_LOAD_PERCENT)?;
        let buckets = DynamicArray::try_filled_with(config.capacity, || None)?;
        Ok(Self::from_parts(buckets, config.load_factor_percent, hash_builder))
    }

    /// Wraps an empty bucket array
    fn from_parts(
        buckets: DynamicArray<Option<NodeKey>>,
        load_factor_threshold: usize,
        hash_builder: S,
    ) -> Self {
        Self {
            buckets,
            nodes: SlotMap::with_key(),
            load_factor_threshold,
            hash_builder,
        }
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the map holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor, entries over buckets
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    /// Returns the load factor threshold in percent
    #[must_use]
    pub fn load_factor_threshold(&self) -> usize {
        self.load_factor_threshold
    }

    /// Number of buckets with no entries
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|head| head.is_none()).count()
    }

    /// Removes every entry, keeping the capacity
    pub fn clear(&mut self) {
        for head in self.buckets.iter_mut() {
            *head = None;
        }
        self.nodes.clear();
    }

    /// Returns an iterator over the entries, bucket by bucket in index order
    /// and along each chain from head to tail
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { heads: self.buckets.iter(), chain: Chain { nodes: &self.nodes, cursor: None } }
    }

    /// Walks the chain of `bucket`
    fn chain(&self, bucket: usize) -> Chain<'_, K, V> {
        Chain { nodes: &self.nodes, cursor: self.buckets.get(bucket).copied().flatten() }
    }

    /// The link pointing at the node after `previous`, or the bucket head
    fn link_mut(
        &mut self,
        bucket: usize,
        previous: Option<NodeKey>,
    ) -> Option<&mut Option<NodeKey>> {
        match previous {
            Some(node_key) => self.nodes.get_mut(node_key).map(|node| &mut node.next),
            None => self.buckets.get_mut(bucket),
        }
    }
}

impl<K, V, S> ChainingMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Inserts a key-value pair, returning the previous value of the key.
    ///
    /// A new key is appended to the tail of its chain. Either way the table is
    /// then rebuilt if the load factor is above the threshold, which also
    /// retries a growth that failed to allocate earlier.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let bucket = self.bucket_of(&key);
        let mut existing = None;
        let mut tail = None;
        for (node_key, node) in self.chain(bucket) {
            if node.key == key {
                existing = Some(node_key);
                break;
            }
            tail = Some(node_key);
        }

        if let Some(node) = existing.and_then(|node_key| self.nodes.get_mut(node_key)) {
            let previous = mem::replace(&mut node.value, value);
            self.grow_if_overloaded();
            return Some(previous);
        }

        let node_key = self.nodes.insert(Node { key, value, next: None });
        if let Some(link) = self.link_mut(bucket, tail) {
            *link = Some(node_key);
        }
        self.grow_if_overloaded();
        None
    }

    /// Retrieves the value for a given key
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let node_key = self.locate(key)?;
        self.nodes.get(node_key).map(|node| &node.value)
    }

    /// Retrieves a mutable reference to the value for a given key
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let node_key = self.locate(key)?;
        self.nodes.get_mut(node_key).map(|node| &mut node.value)
    }

    /// Returns true if the map holds `key`
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.locate(key).is_some()
    }

    /// Unlinks a key from its chain and returns its value
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let bucket = self.bucket_of(key);
        let mut previous = None;
        let mut target = None;
        for (node_key, node) in self.chain(bucket) {
            if node.key.borrow() == key {
                target = Some(node_key);
                break;
            }
            previous = Some(node_key);
        }

        let node = self.nodes.remove(target?)?;
        if let Some(link) = self.link_mut(bucket, previous) {
            *link = node.next;
        }
        Some(node.value)
    }

    /// Rehashes every entry into `new_capacity` buckets.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MapError::InvalidCapacity`] if `new_capacity` is zero
    /// or too small to hold the entries under the threshold, and
    /// [`crate::MapError::AllocationFailed`] if the new table cannot be
    /// allocated. The map is unchanged on error.
    pub fn resize_table(&mut self, new_capacity: usize) -> Result<()> {
        config::validate_capacity(new_capacity)?;
        if hashing::exceeds_load(self.len(), new_capacity, self.load_factor_threshold) {
            return Err(MapError::InvalidCapacity {
                requested: new_capacity,
                reason: "too small for the entries under the load factor threshold",
            });
        }
        self.rebuild(new_capacity)
    }

    /// Sets the load factor threshold, growing the table at once if the
    /// current load is above it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MapError::InvalidLoadFactor`] if `percent` is outside
    /// `1..=1000`, and [`crate::MapError::AllocationFailed`] if the table
    /// needed to grow and could not. The map is unchanged on error.
    pub fn set_load_factor_threshold(&mut self, percent: usize) -> Result<()> {
        config::validate_load_percent(percent, CHAINING_MAX_LOAD_PERCENT)?;
        if hashing::exceeds_load(self.len(), self.capacity(), percent) {
            self.rebuild(hashing::grown_capacity(self.capacity(), self.len(), percent))?;
        }
        trace!("load factor threshold {}% -> {percent}%", self.load_factor_threshold);
        self.load_factor_threshold = percent;
        Ok(())
    }

    /// Bucket `key` hashes to
    fn bucket_of<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        hashing::bucket_index(self.hash_builder.hash_one(key), self.capacity())
    }

    /// Finds the node holding `key`
    fn locate<Q>(&self, key: &Q) -> Option<NodeKey>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.chain(self.bucket_of(key))
            .find(|(_, node)| node.key.borrow() == key)
            .map(|(node_key, _)| node_key)
    }

    /// Grows the table if the load factor is above the threshold.
    ///
    /// Allocation failure is logged and leaves the table valid but overloaded.
    fn grow_if_overloaded(&mut self) {
        if !hashing::exceeds_load(self.len(), self.capacity(), self.load_factor_threshold) {
            return;
        }
        let capacity =
            hashing::grown_capacity(self.capacity(), self.len(), self.load_factor_threshold);
        if let Err(err) = self.rebuild(capacity) {
            error!("{err}; staying at {} buckets", self.capacity());
        }
    }

    /// Relinks every node into `capacity` fresh buckets.
    ///
    /// Both new arrays are allocated before the table is touched. Nodes keep
    /// their relative chain order within each new bucket.
    fn rebuild(&mut self, capacity: usize) -> Result<()> {
        let fresh = DynamicArray::try_filled_with(capacity, || None)?;
        let mut tails: DynamicArray<Option<NodeKey>> =
            DynamicArray::try_filled_with(capacity, || None)?;
        let old = mem::replace(&mut self.buckets, fresh);
        debug!(
            "rebuilding chained table: {} -> {capacity} buckets, {} entries",
            old.len(),
            self.len()
        );

        for head in old {
            let mut cursor = head;
            while let Some(node_key) = cursor {
                let Some(node) = self.nodes.get_mut(node_key) else {
                    break;
                };
                cursor = node.next.take();
                let bucket =
                    hashing::bucket_index(self.hash_builder.hash_one(&node.key), capacity);
                let previous = tails.get(bucket).copied().flatten();
                if let Some(link) = self.link_mut(bucket, previous) {
                    *link = Some(node_key);
                }
                if let Some(tail) = tails.get_mut(bucket) {
                    *tail = Some(node_key);
                }
            }
        }
        Ok(())
    }
}

impl<K, S> ChainingMap<K, usize, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Adds `by` to the count stored for `key`, starting from zero for a new
    /// key, and returns the updated count
    pub fn increment(&mut self, key: K, by: usize) -> usize {
        if let Some(count) = self.get_mut(&key) {
            *count = count.saturating_add(by);
            let updated = *count;
            self.grow_if_overloaded();
            return updated;
        }
        self.put(key, by);
        by
    }
}

impl<K, V, S> Default for ChainingMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> Extend<(K, V)> for ChainingMap<K, V, S>
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

impl<K, V, S> FromIterator<(K, V)> for ChainingMap<K, V, S>
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

impl<K, V, S> fmt::Display for ChainingMap<K, V, S>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bucket in 0..self.capacity() {
            write!(f, "{bucket}:")?;
            for (_, node) in self.chain(bucket) {
                write!(f, " ({}: {})", node.key, node.value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Walk along one bucket chain
#[derive(Debug, Clone)]
struct Chain<'a, K, V> {
    /// Arena the chain lives in
    nodes: &'a SlotMap<NodeKey, Node<K, V>>,
    /// Node to yield next
    cursor: Option<NodeKey>,
}

impl<'a, K, V> Iterator for Chain<'a, K, V> {
    type Item = (NodeKey, &'a Node<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        let node_key = self.cursor?;
        let node = self.nodes.get(node_key)?;
        self.cursor = node.next;
        Some((node_key, node))
    }
}

/// Iterator over the entries of a [`ChainingMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Heads of the buckets not visited yet
    heads: std::slice::Iter<'a, Option<NodeKey>>,
    /// Chain of the bucket being visited
    chain: Chain<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((_, node)) = self.chain.next() {
                return Some((&node.key, &node.value));
            }
            self.chain.cursor = *self.heads.next()?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MapError, test_support::{FixedState, init_test_logger}};

    /// Keys of a map in traversal order
    fn keys_in_order<S>(map: &ChainingMap<String, i32, S>) -> Vec<&str> {
        map.iter().map(|(key, _)| key.as_str()).collect()
    }

    #[test]
    fn test_put_and_get() {
        let mut map = ChainingMap::new();
        assert_eq!(map.put("key1".to_string(), 1), None);
        assert_eq!(map.put("key2".to_string(), 2), None);

        assert_eq!(map.get("key1"), Some(&1));
        assert_eq!(map.get("key2"), Some(&2));
        assert_eq!(map.get("key3"), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_update_in_place() {
        let mut map = ChainingMap::new();
        map.put("key1".to_string(), 10);
        assert_eq!(map.put("key1".to_string(), 30), Some(10));
        assert_eq!(map.get("key1"), Some(&30));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_colliding_keys_chain_in_insertion_order() -> Result<()> {
        let mut map = ChainingMap::with_capacity_and_hasher(7, FixedState(3))?;
        for (value, key) in [(1, "a"), (2, "b"), (3, "c")] {
            map.put(key.to_string(), value);
        }
        assert_eq!(keys_in_order(&map), vec!["a", "b", "c"]);
        assert_eq!(map.empty_buckets(), 6);
        assert_eq!(map.get("b"), Some(&2));
        Ok(())
    }

    #[test]
    fn test_remove_head_middle_and_tail() -> Result<()> {
        let mut map = ChainingMap::with_capacity_and_hasher(7, FixedState(3))?;
        for (value, key) in [(1, "a"), (2, "b"), (3, "c"), (4, "d")] {
            map.put(key.to_string(), value);
        }

        assert_eq!(map.remove("b"), Some(2));
        assert_eq!(keys_in_order(&map), vec!["a", "c", "d"]);
        assert_eq!(map.remove("a"), Some(1));
        assert_eq!(keys_in_order(&map), vec!["c", "d"]);
        assert_eq!(map.remove("d"), Some(4));
        assert_eq!(keys_in_order(&map), vec!["c"]);
        assert_eq!(map.remove("d"), None);
        assert!(!map.contains_key("a"));
        assert!(map.contains_key("c"));
        assert_eq!(map.len(), 1);

        // the tail is still correct after unlinking it
        map.put("e".to_string(), 5);
        assert_eq!(keys_in_order(&map), vec!["c", "e"]);
        Ok(())
    }

    #[test]
    fn test_resize_after_insert() -> Result<()> {
        init_test_logger();
        let mut map = ChainingMap::with_capacity(2)?;
        map.put("key1".to_string(), 1);
        map.put("key2".to_string(), 2);
        assert_eq!(map.capacity(), 2);

        map.put("key3".to_string(), 3);
        assert_eq!(map.capacity(), 5);
        for (key, value) in [("key1", 1), ("key2", 2), ("key3", 3)] {
            assert_eq!(map.get(key), Some(&value));
        }
        Ok(())
    }

    #[test]
    fn test_resize_keeps_chain_order() -> Result<()> {
        let mut map = ChainingMap::with_capacity_and_hasher(2, FixedState(0))?;
        map.set_load_factor_threshold(CHAINING_MAX_LOAD_PERCENT)?;
        for (value, key) in [(1, "a"), (2, "b"), (3, "c")] {
            map.put(key.to_string(), value);
        }
        map.resize_table(11)?;
        assert_eq!(keys_in_order(&map), vec!["a", "b", "c"]);
        assert_eq!(map.empty_buckets(), 10);
        Ok(())
    }

    #[test]
    fn test_load_factor_stays_under_threshold() {
        let mut map = ChainingMap::new();
        for i in 0..500 {
            map.put(format!("key{i}"), i);
            assert!(map.load_factor() <= 1.0, "load {} after {i}", map.load_factor());
        }
        for i in 0..500 {
            assert_eq!(map.get(&format!("key{i}")), Some(&i));
        }
    }

    #[test]
    fn test_resize_table() -> Result<()> {
        let mut map = ChainingMap::with_capacity(10)?;
        for i in 100..200 {
            if i % 10 == 0 {
                map.put(i.to_string(), i * 10);
            }
        }
        assert!(matches!(map.resize_table(0), Err(MapError::InvalidCapacity { .. })));
        assert_eq!(
            map.resize_table(9),
            Err(MapError::InvalidCapacity {
                requested: 9,
                reason: "too small for the entries under the load factor threshold",
            })
        );
        assert_eq!(map.capacity(), 10);

        map.set_load_factor_threshold(CHAINING_MAX_LOAD_PERCENT)?;
        map.resize_table(1)?;
        assert_eq!(map.capacity(), 1);
        assert_eq!(map.len(), 10);
        assert_eq!(map.empty_buckets(), 0);
        assert_eq!(map.get("150"), Some(&1500));

        // lowering the threshold grows the single bucket back out
        map.set_load_factor_threshold(100)?;
        assert_eq!(map.capacity(), 11);
        assert_eq!(map.get("190"), Some(&1900));
        Ok(())
    }

    #[test]
    fn test_update_after_rejected_shrink_keeps_load_bound() -> Result<()> {
        let mut map = ChainingMap::with_capacity(10)?;
        for i in 0..10 {
            map.put(format!("k{i}"), i);
        }
        assert!(map.resize_table(1).is_err());

        assert_eq!(map.put("k0".to_string(), 99), Some(0));
        assert!(map.load_factor() <= 1.0, "load {} after update", map.load_factor());
        assert_eq!(map.get("k0"), Some(&99));
        assert_eq!(map.len(), 10);
        Ok(())
    }

    #[test]
    fn test_failed_resize_keeps_the_table() -> Result<()> {
        let mut map = ChainingMap::with_capacity_and_hasher(4, FixedState(1))?;
        for (value, key) in [(1, "a"), (2, "b"), (3, "c")] {
            map.put(key.to_string(), value);
        }

        assert_eq!(
            map.resize_table(usize::MAX),
            Err(MapError::AllocationFailed { length: usize::MAX })
        );
        assert_eq!(map.capacity(), 4);
        assert_eq!(map.len(), 3);
        assert_eq!(keys_in_order(&map), vec!["a", "b", "c"]);
        for (value, key) in [(1, "a"), (2, "b"), (3, "c")] {
            assert_eq!(map.get(key), Some(&value));
        }
        Ok(())
    }

    #[test]
    fn test_oversized_capacity_is_an_error() {
        assert!(matches!(
            ChainingMap::<String, i32>::with_capacity(usize::MAX),
            Err(MapError::AllocationFailed { length: usize::MAX })
        ));
        let config = MapConfig::chaining().with_capacity(usize::MAX / 2);
        assert!(matches!(
            ChainingMap::<u64, u64>::with_config(config, DefaultState::default()),
            Err(MapError::AllocationFailed { .. })
        ));
    }

    #[test]
    fn test_empty_buckets() -> Result<()> {
        let mut map = ChainingMap::with_capacity_and_hasher(100, FixedState(5))?;
        assert_eq!(map.empty_buckets(), 100);
        map.put("key1".to_string(), 10);
        map.put("key2".to_string(), 20);
        assert_eq!(map.empty_buckets(), 99);
        map.remove("key1");
        map.remove("key2");
        assert_eq!(map.empty_buckets(), 100);
        Ok(())
    }

    #[test]
    fn test_set_load_factor_threshold() -> Result<()> {
        let mut map = ChainingMap::with_capacity(5)?;
        for i in 0..5 {
            map.put(i, i);
        }
        assert_eq!(
            map.set_load_factor_threshold(0),
            Err(MapError::InvalidLoadFactor { percent: 0, max: CHAINING_MAX_LOAD_PERCENT })
        );
        map.set_load_factor_threshold(50)?;
        assert_eq!(map.capacity(), 11);
        assert!(map.load_factor() <= 0.5);
        Ok(())
    }

    #[test]
    fn test_increment_counts_occurrences() {
        let mut table: ChainingMap<&str, usize> = ChainingMap::new();
        assert_eq!(table.increment("apple", 1), 1);
        assert_eq!(table.increment("apple", 1), 2);
        assert_eq!(table.increment("pear", 3), 3);
        assert_eq!(table.get("apple"), Some(&2));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut map = ChainingMap::new();
        map.put("key1".to_string(), 1);
        map.put("key2".to_string(), 2);
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.empty_buckets(), map.capacity());
        assert_eq!(map.get("key1"), None);
    }

    #[test]
    fn test_get_mut() {
        let mut map = ChainingMap::new();
        map.put("key1".to_string(), 1);
        if let Some(value) = map.get_mut("key1") {
            *value += 10;
        }
        assert_eq!(map.get("key1"), Some(&11));
    }

    #[test]
    fn test_display_lists_every_bucket() -> Result<()> {
        let mut map = ChainingMap::with_capacity_and_hasher(3, FixedState(1))?;
        map.put("a".to_string(), 1);
        map.put("b".to_string(), 2);
        assert_eq!(map.to_string(), "0:\n1: (a: 1) (b: 2)\n2:\n");
        Ok(())
    }

    #[test]
    fn test_collect() {
        let map: ChainingMap<String, i32> = (0..20).map(|i| (i.to_string(), i)).collect();
        assert_eq!(map.len(), 20);
        assert_eq!(map.iter().count(), 20);
    }
}
