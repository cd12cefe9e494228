//! Per-key counter built on [`RichMap`]

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::ops::Add;

use serde::Serialize;

use crate::rich_map::RichMap;

/// Numeric type usable as a count. Zero is `Default::default()`, one is `From<u8>`.
pub trait Count: Copy + Default + Add<Output = Self> + From<u8> {}

impl<C> Count for C where C: Copy + Default + Add<Output = C> + From<u8> {}

/// Tracks a count per key. Increments are not validated: negative or
/// fractional amounts are accepted when `C` allows them.
#[derive(Clone, Serialize)]
#[serde(transparent)]
pub struct Counter<K, C = i64> {
    map: RichMap<K, C>,
}

impl<K, C> Default for Counter<K, C> {
    fn default() -> Self {
        Self {
            map: RichMap::default(),
        }
    }
}

impl<K: Eq + Hash, C: Count> Counter<K, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter with every key of `keys` present at zero
    pub fn with_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        Self {
            map: keys.into_iter().map(|key| (key, C::default())).collect(),
        }
    }

    /// Current count, zero for unseen keys
    pub fn count<Q>(&self, key: &Q) -> C
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).copied().unwrap_or_default()
    }

    /// Add `n` to the count of `key` and return the new count
    pub fn add(&mut self, key: K, n: C) -> C {
        let count = self.count(&key) + n;
        self.map.put(key, count);
        count
    }

    /// `add(key, 1)`
    pub fn inc(&mut self, key: K) -> C {
        self.add(key, C::from(1u8))
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.map.keys()
    }

    pub fn values(&self) -> Vec<C> {
        self.map.values()
    }

    pub fn entries(&self) -> Vec<(K, C)>
    where
        K: Clone,
    {
        self.map.entries()
    }

    /// Sum of all counts
    pub fn total(&self) -> C {
        self.map
            .iter()
            .fold(C::default(), |acc, (_, &count)| acc + count)
    }

    /// Entries by descending count, ties by ascending key; at most `n` if given
    ///
    /// Counts that do not compare equal to themselves (`f64::NAN`) go last,
    /// ordered by key.
    pub fn most_common(&self, n: Option<usize>) -> Vec<(K, C)>
    where
        K: Ord + Clone,
        C: PartialOrd,
    {
        let unordered = |count: &C| count.partial_cmp(count).is_none();

        let mut entries = self.entries();
        entries.sort_by(|a, b| {
            unordered(&a.1)
                .cmp(&unordered(&b.1))
                .then_with(|| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal))
                .then_with(|| a.0.cmp(&b.0))
        });
        if let Some(n) = n {
            entries.truncate(n);
        }
        entries
    }

    pub fn as_map(&self) -> &RichMap<K, C> {
        &self.map
    }
}

impl<K: Eq + Hash, C: Count> Extend<K> for Counter<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        for key in keys {
            self.inc(key);
        }
    }
}

impl<K: Eq + Hash, C: Count> FromIterator<K> for Counter<K, C> {
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut counter = Self::new();
        counter.extend(keys);
        counter
    }
}

impl<K: Eq + Hash, C: PartialEq> PartialEq for Counter<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<K: fmt::Debug, C: fmt::Debug> fmt::Debug for Counter<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Counter").field(&self.map).finish()
    }
}

impl<K: Serialize, C: Serialize> fmt::Display for Counter<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.map, f)
    }
}
