//! The flat side of a conversion: unique dotted keys mapped to string values.

use std::collections::BTreeMap;
use std::collections::btree_map;

/// Dotted key → scalar text, keys unique across the store.
///
/// Iteration is in ascending byte order of the key regardless of insertion
/// order. The tree builder relies on this for reproducible results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatStore {
    entries: BTreeMap<String, String>,
}

impl FlatStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `value`, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FlatStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = FlatStore::new();
        for (key, value) in iter {
            store.insert(key, value);
        }
        store
    }
}

impl IntoIterator for FlatStore {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_is_sorted_regardless_of_insertion() {
        let mut store = FlatStore::new();
        store.insert("b.y", "2");
        store.insert("a.z", "3");
        store.insert("a.x", "1");
        let keys: Vec<&str> = store.keys().collect();
        assert_eq!(keys, ["a.x", "a.z", "b.y"]);
    }

    #[test]
    fn insert_replaces_and_returns_previous() {
        let mut store = FlatStore::new();
        assert_eq!(store.insert("port", "8080"), None);
        assert_eq!(store.insert("port", "3000"), Some("8080".into()));
        assert_eq!(store.get("port"), Some("3000"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn collects_from_pairs() {
        let store: FlatStore = [("db.host", "localhost"), ("db.port", "5432")]
            .into_iter()
            .collect();
        assert_eq!(store.len(), 2);
        assert!(store.contains_key("db.host"));
        assert_eq!(store.get("db.port"), Some("5432"));
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a: FlatStore = [("x", "1"), ("y", "2")].into_iter().collect();
        let b: FlatStore = [("y", "2"), ("x", "1")].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_store() {
        let store = FlatStore::new();
        assert!(store.is_empty());
        assert_eq!(store.iter().count(), 0);
    }
}
