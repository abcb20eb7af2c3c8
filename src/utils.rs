//! Utility traits shared by both map variants

use crate::{ChainingMap, DynamicArray, OpenAddressingMap};

/// Extension trait for map implementations that provides snapshot accessors
pub trait HashMapExtensions<K, V> {
    /// Returns the live entries in table order
    fn entries<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a V)>
    where
        K: 'a,
        V: 'a;

    /// Returns the keys of the map, in table order, as a [`DynamicArray`]
    fn keys<'a>(&'a self) -> DynamicArray<K>
    where
        K: Clone + 'a,
        V: 'a,
    {
        self.entries().map(|(key, _)| key.clone()).collect()
    }

    /// Returns the values of the map, in table order, as a [`DynamicArray`]
    fn values<'a>(&'a self) -> DynamicArray<V>
    where
        K: 'a,
        V: Clone + 'a,
    {
        self.entries().map(|(_, value)| value.clone()).collect()
    }
}

impl<K, V, S> HashMapExtensions<K, V> for OpenAddressingMap<K, V, S> {
    fn entries<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a V)>
    where
        K: 'a,
        V: 'a,
    {
        self.iter()
    }
}

impl<K, V, S> HashMapExtensions<K, V> for ChainingMap<K, V, S> {
    fn entries<'a>(&'a self) -> impl Iterator<Item = (&'a K, &'a V)>
    where
        K: 'a,
        V: 'a,
    {
        self.iter()
    }
}
