//! Pluggable key equality.
//!
//! Adjacency-based operators (`group_adjacent_by`, `run_length_encode_by`)
//! only need [`EqualityComparer`]. Operators that index keys (`scan_by_with`,
//! the joins) need [`HashEqualityComparer`], whose hash must agree with its
//! equality: keys that compare equal must hash equally.
//!
//! `Option<K>` keys need nothing special; `None` is a key like any other.

use std::hash::Hash;

use ahash::RandomState;

/// Decides whether two values are the same key.
pub trait EqualityComparer<T: ?Sized> {
    fn equals(&self, a: &T, b: &T) -> bool;
}

/// An [`EqualityComparer`] that can also hash, for indexed lookups.
pub trait HashEqualityComparer<T: ?Sized>: EqualityComparer<T> {
    fn hash(&self, value: &T) -> u64;
}

impl<T: ?Sized, C: EqualityComparer<T> + ?Sized> EqualityComparer<T> for &C {
    fn equals(&self, a: &T, b: &T) -> bool {
        (**self).equals(a, b)
    }
}

impl<T: ?Sized, C: HashEqualityComparer<T> + ?Sized> HashEqualityComparer<T> for &C {
    fn hash(&self, value: &T) -> u64 {
        (**self).hash(value)
    }
}

/// Natural equality: `PartialEq`, and `Hash` when indexing.
#[derive(Debug, Clone, Default)]
pub struct DefaultEq {
    state: RandomState,
}

impl DefaultEq {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: PartialEq + ?Sized> EqualityComparer<T> for DefaultEq {
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

impl<T: Hash + Eq + ?Sized> HashEqualityComparer<T> for DefaultEq {
    #[inline]
    fn hash(&self, value: &T) -> u64 {
        self.state.hash_one(value)
    }
}

/// Compares values through a projection, e.g. case-insensitive strings.
///
/// ```
/// use moreseq::{EqBy, EqualityComparer};
///
/// let nocase = EqBy::new(|s: &str| s.to_lowercase());
/// assert!(nocase.equals("Foo", "fOO"));
/// ```
#[derive(Debug, Clone)]
pub struct EqBy<F> {
    project: F,
    state: RandomState,
}

impl<F> EqBy<F> {
    #[must_use]
    pub fn new(project: F) -> Self {
        Self {
            project,
            state: RandomState::new(),
        }
    }
}

impl<T, P, F> EqualityComparer<T> for EqBy<F>
where
    T: ?Sized,
    F: Fn(&T) -> P,
    P: PartialEq,
{
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.project)(a) == (self.project)(b)
    }
}

impl<T, P, F> HashEqualityComparer<T> for EqBy<F>
where
    T: ?Sized,
    F: Fn(&T) -> P,
    P: Hash + PartialEq,
{
    fn hash(&self, value: &T) -> u64 {
        self.state.hash_one((self.project)(value))
    }
}

/// Wraps a plain equality closure. Only usable where hashing is not needed.
#[derive(Debug, Clone, Copy)]
pub struct EqWith<F>(pub F);

impl<T: ?Sized, F: Fn(&T, &T) -> bool> EqualityComparer<T> for EqWith<F> {
    fn equals(&self, a: &T, b: &T) -> bool {
        (self.0)(a, b)
    }
}
