//! Ordered map type for TOML tables.
//!
//! This module provides [`TomlMap`], a wrapper around [`IndexMap`] that
//! maintains insertion order for table entries. Order matters here: the
//! serializer iterates a table's entries in the map's native order, so the
//! emitted document lists keys the way the tree was built.
//!
//! ## Examples
//!
//! ```rust
//! use toml_fmt::{TomlMap, Value};
//!
//! let mut table = TomlMap::new();
//! table.insert("name".to_string(), Value::from("Alice"));
//! table.insert("age".to_string(), Value::from(30));
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.get("name").and_then(|v| v.as_str()), Some("Alice"));
//!
//! // Iteration maintains insertion order
//! let keys: Vec<_> = table.keys().cloned().collect();
//! assert_eq!(keys, vec!["name", "age"]);
//! ```

use crate::Value;
use indexmap::IndexMap;

/// An insertion-ordered map of string keys to TOML values.
///
/// This is a thin wrapper around [`IndexMap`]. A plain `HashMap` would
/// reorder entries between runs, which breaks deterministic output and
/// makes the emitted document shuffle its keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TomlMap(IndexMap<String, Value>);

impl TomlMap {
    /// Creates an empty `TomlMap`.
    #[must_use]
    pub fn new() -> Self {
        TomlMap(IndexMap::new())
    }

    /// Creates an empty `TomlMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        TomlMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the entry keeps its original position.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes the entry for the key, preserving the order of the remaining
    /// entries, and returns its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion
    /// order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl IntoIterator for TomlMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TomlMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for TomlMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        TomlMap(IndexMap::from_iter(iter))
    }
}

impl Extend<(String, Value)> for TomlMap {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let mut map = TomlMap::new();
        map.insert("zebra".to_string(), Value::integer(1));
        map.insert("apple".to_string(), Value::integer(2));
        map.insert("mango".to_string(), Value::integer(3));

        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_reinsert_keeps_position() {
        let mut map = TomlMap::new();
        map.insert("a".to_string(), Value::integer(1));
        map.insert("b".to_string(), Value::integer(2));
        let old = map.insert("a".to_string(), Value::integer(3));

        assert!(old.is_some());
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(map.get("a").and_then(|v| v.as_integer()), Some(3));
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut map = TomlMap::new();
        map.insert("a".to_string(), Value::integer(1));
        map.insert("b".to_string(), Value::integer(2));
        map.insert("c".to_string(), Value::integer(3));
        map.remove("b");

        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_from_iterator() {
        let map: TomlMap = vec![
            ("x".to_string(), Value::integer(1)),
            ("y".to_string(), Value::integer(2)),
        ]
        .into_iter()
        .collect();

        assert_eq!(map.len(), 2);
        assert!(map.contains_key("x"));
    }
}
