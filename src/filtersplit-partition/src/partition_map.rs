//! Ordered mapping from partition key to filter set.

use filtersplit_core::{Conjunction, FilterSet};

/// The result of a split: one filter set per classification key.
///
/// Keys iterate in the order they were first produced during traversal.
/// Entries live in a `Vec` with linear lookup: a split produces a handful of
/// keys (two with the default classifier), so ordering is kept without a
/// hashed map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartitionMap {
    entries: Vec<(String, FilterSet)>,
}

impl PartitionMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of partitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no partitions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the partition for `key`.
    pub fn get(&self, key: &str) -> Option<&FilterSet> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, set)| set)
    }

    /// Whether a partition exists for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Partition keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterate over `(key, partition)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterSet)> {
        self.entries.iter().map(|(k, set)| (k.as_str(), set))
    }

    /// Insert a partition, replacing and returning any previous one for the
    /// same key. A replaced key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, set: FilterSet) -> Option<FilterSet> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, set)),
            None => {
                self.entries.push((key, set));
                None
            }
        }
    }

    /// Remove and return the partition for `key`.
    pub fn remove(&mut self, key: &str) -> Option<FilterSet> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Render every partition as an indented tree.
    pub fn explain(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Partitions ({}):\n", self.len()));
        for (key, set) in self.iter() {
            output.push_str(&format!("[{}]\n", key));
            output.push_str(&set.explain_indented(1));
            output.push('\n');
        }
        output
    }

    /// Get the partition for `key`, creating it with `conjunction` if absent.
    pub(crate) fn get_or_create(&mut self, key: &str, conjunction: Conjunction) -> &mut FilterSet {
        let index = match self.entries.iter().position(|(k, _)| k == key) {
            Some(index) => index,
            None => {
                self.entries
                    .push((key.to_string(), FilterSet::empty(conjunction)));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    /// Drop partitions that ended up with no filters.
    pub(crate) fn remove_empty(&mut self) {
        self.entries.retain(|(_, set)| !set.is_empty());
    }
}

impl IntoIterator for PartitionMap {
    type Item = (String, FilterSet);
    type IntoIter = std::vec::IntoIter<(String, FilterSet)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, FilterSet)> for PartitionMap {
    fn from_iter<I: IntoIterator<Item = (K, FilterSet)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, set) in iter {
            map.insert(key, set);
        }
        map
    }
}
