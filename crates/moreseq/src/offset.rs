//! Pairing each element with the one a fixed distance behind or ahead of it.

use std::{collections::VecDeque, iter::Fuse};

use crate::error::{SeqResult, require_positive};

/// Pairs each element with the element `offset` positions earlier.
///
/// The first `offset` elements are paired with the default value. Keeps the
/// last `offset` elements in a ring buffer.
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Lag<I: Iterator, F> {
    iter: I,
    offset: usize,
    default: I::Item,
    history: VecDeque<I::Item>,
    f: F,
}

impl<I: Iterator, F> Lag<I, F> {
    pub(crate) fn new(iter: I, offset: usize, default: I::Item, f: F) -> SeqResult<Self> {
        let offset = require_positive("offset", offset)?;
        Ok(Self {
            iter,
            offset,
            default,
            history: VecDeque::new(),
            f,
        })
    }
}

impl<I, F, R> Iterator for Lag<I, F>
where
    I: Iterator,
    I::Item: Clone,
    F: FnMut(I::Item, I::Item) -> R,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        let current = self.iter.next()?;
        let lagged = if self.history.len() == self.offset {
            self.history.pop_front()
        } else {
            None
        }
        .unwrap_or_else(|| self.default.clone());
        self.history.push_back(current.clone());
        Some((self.f)(current, lagged))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Pairs each element with the element `offset` positions later.
///
/// The last `offset` elements are paired with the default value. Reads
/// `offset` elements ahead of what it has yielded.
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Lead<I: Iterator, F> {
    iter: Fuse<I>,
    offset: usize,
    default: I::Item,
    ahead: VecDeque<I::Item>,
    f: F,
}

impl<I: Iterator, F> Lead<I, F> {
    pub(crate) fn new(iter: I, offset: usize, default: I::Item, f: F) -> SeqResult<Self> {
        let offset = require_positive("offset", offset)?;
        Ok(Self {
            iter: iter.fuse(),
            offset,
            default,
            ahead: VecDeque::new(),
            f,
        })
    }
}

impl<I, F, R> Iterator for Lead<I, F>
where
    I: Iterator,
    I::Item: Clone,
    F: FnMut(I::Item, I::Item) -> R,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        let wanted = self.offset + 1;
        if self.ahead.len() < wanted {
            let missing = wanted - self.ahead.len();
            self.ahead.extend(self.iter.by_ref().take(missing));
        }
        let current = self.ahead.pop_front()?;
        let lead = self
            .ahead
            .get(self.offset - 1)
            .cloned()
            .unwrap_or_else(|| self.default.clone());
        Some((self.f)(current, lead))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.iter.size_hint();
        let buffered = self.ahead.len();
        (lo.saturating_add(buffered), hi.and_then(|hi| hi.checked_add(buffered)))
    }
}
