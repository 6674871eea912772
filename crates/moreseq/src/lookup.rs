//! Insertion-ordered keyed storage driven by a [`HashEqualityComparer`].
//!
//! # Storage Strategy
//! Uses a `HashTable<usize>` for hash lookups combined with a dense
//! `Vec<KeyedEntry>` to preserve first-occurrence order. The hash table maps key
//! hashes to indices in the entries vector, and all hashing and equality goes
//! through the comparer, so custom comparers get O(1) lookups without
//! requiring `Hash + Eq` on the key type.

use hashbrown::HashTable;

use crate::comparer::HashEqualityComparer;

#[derive(Debug, Clone)]
struct KeyedEntry<K, V> {
    key: K,
    value: V,
    /// the hash is needed here for correct use of insert_unique
    hash: u64,
}

/// Map from key to value remembering first-occurrence order of keys.
#[derive(Debug, Clone)]
pub(crate) struct KeyedMap<K, V, C> {
    /// indices mapping from the entry hash to its index.
    indices: HashTable<usize>,
    /// entries is a dense vec maintaining entry order.
    entries: Vec<KeyedEntry<K, V>>,
    comparer: C,
}

impl<K, V, C: HashEqualityComparer<K>> KeyedMap<K, V, C> {
    pub fn new(comparer: C) -> Self {
        Self {
            indices: HashTable::new(),
            entries: Vec::new(),
            comparer,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Finds the entry index for `key`, returning the computed hash as well.
    pub fn find(&self, key: &K) -> (Option<usize>, u64) {
        let hash = self.comparer.hash(key);
        let index = self
            .indices
            .find(hash, |&index| self.comparer.equals(&self.entries[index].key, key))
            .copied();
        (index, hash)
    }

    /// Returns the index of the entry for `key`, inserting `make(&key)` first
    /// if absent. A duplicate `key` is dropped in favour of the stored one.
    pub fn index_or_insert_with(&mut self, key: K, make: impl FnOnce(&K) -> V) -> usize {
        let (found, hash) = self.find(&key);
        if let Some(index) = found {
            return index;
        }
        let value = make(&key);
        let index = self.entries.len();
        self.entries.push(KeyedEntry { key, value, hash });
        self.indices
            .insert_unique(hash, index, |index| self.entries[*index].hash);
        index
    }

    pub fn value(&self, index: usize) -> &V {
        &self.entries[index].value
    }

    pub fn value_mut(&mut self, index: usize) -> &mut V {
        &mut self.entries[index].value
    }

    /// Consumes the map, yielding entries in first-occurrence order.
    pub fn into_entries(self) -> impl Iterator<Item = (K, V)> {
        self.entries.into_iter().map(|entry| (entry.key, entry.value))
    }
}

/// A multi-map: every key maps to the values seen for it, in encounter order.
pub(crate) type Lookup<K, V, C> = KeyedMap<K, Vec<V>, C>;

impl<K, V, C: HashEqualityComparer<K>> Lookup<K, V, C> {
    /// Appends `value` under `key` and returns the key's entry index.
    pub fn push(&mut self, key: K, value: V) -> usize {
        let index = self.index_or_insert_with(key, |_| Vec::new());
        self.value_mut(index).push(value);
        index
    }
}
