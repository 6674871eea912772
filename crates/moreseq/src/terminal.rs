//! Operators that consume a sequence and return a plain value.

use crate::error::{SeqError, SeqResult};

/// How many elements a sequence had, as far as `try_single` cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality<T> {
    /// The sequence was empty.
    Zero,
    /// The sequence had exactly this one element.
    One(T),
    /// The sequence had two or more elements.
    Many,
}

impl<T> Cardinality<T> {
    /// The single element, if there was exactly one.
    #[must_use]
    pub fn one(self) -> Option<T> {
        match self {
            Self::One(item) => Some(item),
            Self::Zero | Self::Many => None,
        }
    }
}

/// Reads at most two elements.
pub(crate) fn try_single<I: Iterator>(mut iter: I) -> Cardinality<I::Item> {
    let Some(first) = iter.next() else {
        return Cardinality::Zero;
    };
    match iter.next() {
        Some(_) => Cardinality::Many,
        None => Cardinality::One(first),
    }
}

/// Splits at `index`, clamped to `[0, len]`.
pub(crate) fn split_at<I: Iterator>(iter: I, index: isize) -> (Vec<I::Item>, Vec<I::Item>) {
    let index = usize::try_from(index).unwrap_or(0);
    let mut iter = iter.fuse();
    let head: Vec<_> = iter.by_ref().take(index).collect();
    (head, iter.collect())
}

/// Reads exactly `N` elements and checks that nothing follows them.
pub(crate) fn fold_exact<I: Iterator, const N: usize>(iter: I) -> SeqResult<[I::Item; N]> {
    let mut iter = iter.fuse();
    let items: Vec<_> = iter.by_ref().take(N).collect();
    if iter.next().is_some() {
        return Err(SeqError::SequenceTooLong { expected: N });
    }
    items.try_into().map_err(|items: Vec<_>| SeqError::SequenceTooShort {
        expected: N,
        actual: items.len(),
    })
}
