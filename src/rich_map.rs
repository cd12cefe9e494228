//! Association map with default-fallback accessors
//!
//! Thin layer over a hash map. Iteration order is the storage order of the
//! backing map and changes as the map is mutated.
//!
//! No internal synchronization: wrap the map yourself if it must be shared
//! between threads.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use serde::Serialize;

/// Key-to-value store with get/put/default-fallback semantics
#[derive(Clone, Serialize)]
#[serde(transparent)]
pub struct RichMap<K, V> {
    map: FxHashMap<K, V>,
}

impl<K, V> Default for RichMap<K, V> {
    fn default() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }
}

impl<K: Eq + Hash, V> RichMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite, returning the previous value if any
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.map.insert(key, value)
    }

    /// Stored value, `None` if the key was never inserted
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key)
    }

    /// Stored value, or `fallback` if absent
    pub fn get_or_else<Q>(&self, key: &Q, fallback: V) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.map.get(key).cloned().unwrap_or(fallback)
    }

    /// Insert only if absent; returns the value now associated with `key`
    pub fn put_if_absent(&mut self, key: K, value: V) -> &V {
        self.map.entry(key).or_insert(value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.map.iter()
    }

    /// Snapshot of the keys
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.map.keys().cloned().collect()
    }

    /// Snapshot of the values, in key order
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.map.values().cloned().collect()
    }

    /// Snapshot of the `(key, value)` pairs
    pub fn entries(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.map
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Visit every entry
    pub fn for_entries<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V),
    {
        for (k, v) in &self.map {
            visit(k, v);
        }
    }
}

impl<K: Eq + Hash, V: PartialEq> PartialEq for RichMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<K: Eq + Hash, V: Eq> Eq for RichMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RichMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.map.iter()).finish()
    }
}

/// Renders the map as a JSON object
impl<K: Serialize, V: Serialize> fmt::Display for RichMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.map) {
            Ok(json) => f.write_str(&json),
            Err(e) => write!(f, "<unrenderable map: {e}>"),
        }
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for RichMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

impl<K: Eq + Hash, V> Extend<(K, V)> for RichMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.map.extend(iter);
    }
}

impl<'a, K, V> IntoIterator for &'a RichMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = std::collections::hash_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}
