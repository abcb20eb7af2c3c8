//! Most frequent keys of a frequency table

use std::hash::Hash;

use crate::{chaining_map::ChainingMap, dynamic_array::DynamicArray, hashing::AdditiveState};

/// The most frequent key(s) and how often they occur
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode<K> {
    /// Every key sharing the highest count, in table traversal order
    pub keys: DynamicArray<K>,
    /// The highest count
    pub frequency: usize,
}

/// Finds the keys with the highest count in a frequency table.
///
/// Makes one pass over the buckets in index order, each chain from head to
/// tail. A strictly greater count starts a new result; an equal count joins
/// it, so ties come back in the order they were met. Returns `None` for an
/// empty table.
#[must_use]
pub fn find_mode<K, S>(table: &ChainingMap<K, usize, S>) -> Option<Mode<&K>> {
    let mut mode: Option<Mode<&K>> = None;
    for (key, &count) in table.iter() {
        match mode.as_mut() {
            Some(current) if count == current.frequency => current.keys.push(key),
            Some(current) if count < current.frequency => {}
            _ => {
                let mut keys = DynamicArray::new();
                keys.push(key);
                mode = Some(Mode { keys, frequency: count });
            }
        }
    }
    mode
}

/// Counts `items` and returns the most frequent ones.
///
/// Counting goes through a [`ChainingMap`] sized to a third of the input and
/// hashed with [`AdditiveState`]. Returns `None` when `items` is empty.
#[must_use]
pub fn mode_of<K, I>(items: I) -> Option<Mode<K>>
where
    K: Hash + Eq + Clone,
    I: IntoIterator<Item = K>,
{
    let items = items.into_iter();
    let capacity = (items.size_hint().0 / 3).max(1);
    let mut table =
        ChainingMap::with_capacity_and_hasher(capacity, AdditiveState::default()).ok()?;
    for item in items {
        table.increment(item, 1);
    }
    let mode = find_mode(&table)?;
    Some(Mode { keys: mode.keys.into_iter().cloned().collect(), frequency: mode.frequency })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Result, test_support::FixedState};

    /// Owned keys of a mode, for comparison
    fn keys_of(mode: &Mode<&String>) -> Vec<String> {
        mode.keys.iter().map(|key| (*key).clone()).collect()
    }

    #[test]
    fn test_ties_keep_traversal_order() -> Result<()> {
        // one bucket, so traversal order is insertion order
        let mut table = ChainingMap::with_capacity_and_hasher(1, FixedState(0))?;
        table.set_load_factor_threshold(1000)?;
        table.put("a".to_string(), 5);
        table.put("b".to_string(), 3);
        table.put("c".to_string(), 5);

        let Some(mode) = find_mode(&table) else {
            panic!("a filled table has a mode");
        };
        assert_eq!(keys_of(&mode), vec!["a", "c"]);
        assert_eq!(mode.frequency, 5);
        Ok(())
    }

    #[test]
    fn test_greater_count_resets_result() -> Result<()> {
        let mut table = ChainingMap::with_capacity_and_hasher(1, FixedState(0))?;
        table.set_load_factor_threshold(1000)?;
        table.put("a".to_string(), 2);
        table.put("b".to_string(), 2);
        table.put("c".to_string(), 7);

        let mode = find_mode(&table);
        assert_eq!(mode.as_ref().map(keys_of), Some(vec!["c".to_string()]));
        assert_eq!(mode.map(|mode| mode.frequency), Some(7));
        Ok(())
    }

    #[test]
    fn test_empty_table_has_no_mode() {
        let table: ChainingMap<String, usize> = ChainingMap::new();
        assert_eq!(find_mode(&table), None);
        assert_eq!(mode_of(Vec::<String>::new()), None);
    }

    #[test]
    fn test_mode_of_single_item() {
        let mode = mode_of(["apple"]);
        assert_eq!(mode, Some(Mode { keys: DynamicArray::from(vec!["apple"]), frequency: 1 }));
    }

    #[test]
    fn test_mode_of_fruit() {
        let mode = mode_of(["apple", "apple", "grape", "melon", "melon", "peach"]);
        let Some(mode) = mode else {
            panic!("six items have a mode");
        };
        let mut keys: Vec<&str> = mode.keys.into_iter().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["apple", "melon"]);
        assert_eq!(mode.frequency, 2);
    }

    #[test]
    fn test_mode_of_single_winner() {
        let distros = [
            "Arch", "Manjaro", "Manjaro", "Mint", "Mint", "Mint", "Ubuntu", "Ubuntu", "Ubuntu",
            "Ubuntu",
        ];
        let mode = mode_of(distros);
        assert_eq!(mode, Some(Mode { keys: DynamicArray::from(vec!["Ubuntu"]), frequency: 4 }));
    }

    #[test]
    fn test_mode_of_all_distinct() {
        let Some(mode) = mode_of(["one", "two", "three", "four", "five"]) else {
            panic!("five items have a mode");
        };
        assert_eq!(mode.frequency, 1);
        assert_eq!(mode.keys.len(), 5);
    }

    #[test]
    fn test_mode_of_numbers() {
        let digits = ["2", "4", "2", "6", "8", "4", "1", "3", "4", "5", "7", "3", "3", "2"];
        let Some(mode) = mode_of(digits.map(String::from)) else {
            panic!("fourteen items have a mode");
        };
        let mut keys: Vec<String> = mode.keys.into_iter().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["2", "3", "4"]);
        assert_eq!(mode.frequency, 3);
    }
}
