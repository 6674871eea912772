//! Running per-key accumulation.

use crate::{comparer::HashEqualityComparer, lookup::KeyedMap};

/// Emits `(key, state)` for every element, where `state` is the running
/// accumulation of all elements seen so far with that key.
///
/// State for a key is created with `seed(&key)` the first time the key shows
/// up and is carried across every later occurrence, adjacent or not. Only keys
/// that actually occur get an entry.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ScanBy<I, K, S, KF, SF, AF, C> {
    iter: I,
    key: KF,
    seed: SF,
    accumulate: AF,
    states: KeyedMap<K, S, C>,
}

impl<I, K, S, KF, SF, AF, C> ScanBy<I, K, S, KF, SF, AF, C>
where
    C: HashEqualityComparer<K>,
{
    pub(crate) fn new(iter: I, key: KF, seed: SF, accumulate: AF, comparer: C) -> Self {
        Self {
            iter,
            key,
            seed,
            accumulate,
            states: KeyedMap::new(comparer),
        }
    }

    /// Number of distinct keys seen so far.
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.states.len()
    }
}

impl<I, K, S, KF, SF, AF, C> Iterator for ScanBy<I, K, S, KF, SF, AF, C>
where
    I: Iterator,
    K: Clone,
    S: Clone,
    KF: FnMut(&I::Item) -> K,
    SF: FnMut(&K) -> S,
    AF: FnMut(&S, &K, I::Item) -> S,
    C: HashEqualityComparer<K>,
{
    type Item = (K, S);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next()?;
        let key = (self.key)(&item);
        let seed = &mut self.seed;
        let index = self.states.index_or_insert_with(key.clone(), |key| seed(key));
        let state = (self.accumulate)(self.states.value(index), &key, item);
        self.states.value_mut(index).clone_from(&state);
        Some((key, state))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}
