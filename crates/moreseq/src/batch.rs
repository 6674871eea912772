//! Splitting a sequence into consecutive buckets.

use std::iter::Fuse;

use crate::error::{SeqResult, require_positive};

/// Buckets of `size` elements; the last bucket may be shorter.
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Batch<I> {
    iter: Fuse<I>,
    size: usize,
}

impl<I: Iterator> Batch<I> {
    pub(crate) fn new(iter: I, size: usize) -> SeqResult<Self> {
        let size = require_positive("size", size)?;
        Ok(Self { iter: iter.fuse(), size })
    }
}

impl<I: Iterator> Iterator for Batch<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.iter.next()?;
        let mut bucket = vec![first];
        bucket.extend(self.iter.by_ref().take(self.size - 1));
        Some(bucket)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.iter.size_hint();
        (lo.div_ceil(self.size), hi.map(|hi| hi.div_ceil(self.size)))
    }
}

/// Buckets that keep growing while a predicate accepts the next element.
///
/// The first element always opens a bucket. Each following element is offered
/// to `predicate(&element, &bucket)`: `true` appends it, `false` emits the
/// bucket and opens a new one with that element. The predicate never sees an
/// empty bucket.
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct BatchWhile<I: Iterator, F> {
    iter: Fuse<I>,
    pending: Option<I::Item>,
    predicate: F,
}

impl<I: Iterator, F> BatchWhile<I, F> {
    pub(crate) fn new(iter: I, predicate: F) -> Self {
        Self {
            iter: iter.fuse(),
            pending: None,
            predicate,
        }
    }
}

impl<I, F> Iterator for BatchWhile<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item, &[I::Item]) -> bool,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = match self.pending.take() {
            Some(item) => item,
            None => self.iter.next()?,
        };
        let mut bucket = vec![first];
        for item in self.iter.by_ref() {
            if (self.predicate)(&item, &bucket) {
                bucket.push(item);
            } else {
                self.pending = Some(item);
                break;
            }
        }
        Some(bucket)
    }
}

/// Segments that split wherever `predicate(&current, &previous, index)` holds.
///
/// `index` is the position of `current` in the source sequence.
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Segment<I: Iterator, F> {
    iter: Fuse<I>,
    pending: Option<I::Item>,
    index: usize,
    predicate: F,
}

impl<I: Iterator, F> Segment<I, F> {
    pub(crate) fn new(iter: I, predicate: F) -> Self {
        Self {
            iter: iter.fuse(),
            pending: None,
            index: 0,
            predicate,
        }
    }
}

impl<I, F> Iterator for Segment<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item, &I::Item, usize) -> bool,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = match self.pending.take() {
            Some(item) => item,
            None => {
                let item = self.iter.next()?;
                self.index += 1;
                item
            }
        };
        let mut segment = vec![first];
        for item in self.iter.by_ref() {
            let index = self.index;
            self.index += 1;
            if segment.last().is_some_and(|previous| (self.predicate)(&item, previous, index)) {
                self.pending = Some(item);
                break;
            }
            segment.push(item);
        }
        Some(segment)
    }
}
