//! Restartable sequences.
//!
//! An `Iterator` is a single cursor. A [`Sequence`] is something that can hand
//! out a fresh, independent cursor every time one is requested. Every
//! `IntoIterator + Clone` value qualifies: `&Vec<T>`, ranges, cloneable
//! adapters, [`Memoized`](crate::Memoized) handles. [`defer`] builds one from a
//! factory closure, which is the way to model a source with side effects that
//! must replay on every enumeration.
//!
//! Adapters in this crate never touch their inputs when constructed. Cloning
//! an adapter that has not started yet gives a second, independent replay.

/// A value that produces a fresh cursor on every request.
pub trait Sequence {
    /// Element type.
    type Item;
    /// Cursor type returned by [`Sequence::cursor`].
    type Cursor: Iterator<Item = Self::Item>;

    /// Starts a new, independent enumeration.
    fn cursor(&self) -> Self::Cursor;
}

impl<S> Sequence for S
where
    S: IntoIterator + Clone,
{
    type Item = S::Item;
    type Cursor = S::IntoIter;

    fn cursor(&self) -> S::IntoIter {
        self.clone().into_iter()
    }
}

/// A sequence whose cursors come from a factory closure.
///
/// The factory runs once per enumeration and never at construction.
#[derive(Debug, Clone, Copy)]
pub struct Deferred<F> {
    factory: F,
}

/// Builds a sequence that calls `factory` each time it is enumerated.
///
/// ```
/// use std::cell::Cell;
/// use moreseq::{Sequence, defer};
///
/// let calls = Cell::new(0);
/// let seq = defer(|| {
///     calls.set(calls.get() + 1);
///     1..=3
/// });
/// assert_eq!(calls.get(), 0);
/// assert_eq!(seq.cursor().sum::<i32>(), 6);
/// assert_eq!(seq.cursor().count(), 3);
/// assert_eq!(calls.get(), 2);
/// ```
pub fn defer<F, I>(factory: F) -> Deferred<F>
where
    F: Fn() -> I,
    I: IntoIterator,
{
    Deferred { factory }
}

impl<F, I> IntoIterator for Deferred<F>
where
    F: Fn() -> I,
    I: IntoIterator,
{
    type Item = I::Item;
    type IntoIter = I::IntoIter;

    fn into_iter(self) -> I::IntoIter {
        (self.factory)().into_iter()
    }
}

impl<F, I> IntoIterator for &Deferred<F>
where
    F: Fn() -> I,
    I: IntoIterator,
{
    type Item = I::Item;
    type IntoIter = I::IntoIter;

    fn into_iter(self) -> I::IntoIter {
        (self.factory)().into_iter()
    }
}
