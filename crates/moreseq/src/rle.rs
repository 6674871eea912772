//! Run-length encoding.

use std::iter::Fuse;

use crate::comparer::EqualityComparer;

/// `(value, run_length)` for each maximal run of equal elements.
///
/// The first element of a run is the one reported. A run closes as soon as an
/// element that differs from it arrives, so at most two elements are held at
/// a time.
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct RunLengthEncode<I: Iterator, C> {
    iter: Fuse<I>,
    pending: Option<I::Item>,
    comparer: C,
}

impl<I: Iterator, C> RunLengthEncode<I, C> {
    pub(crate) fn new(iter: I, comparer: C) -> Self {
        Self {
            iter: iter.fuse(),
            pending: None,
            comparer,
        }
    }
}

impl<I, C> Iterator for RunLengthEncode<I, C>
where
    I: Iterator,
    C: EqualityComparer<I::Item>,
{
    type Item = (I::Item, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let value = match self.pending.take() {
            Some(value) => value,
            None => self.iter.next()?,
        };
        let mut run = 1;
        for item in self.iter.by_ref() {
            if self.comparer.equals(&value, &item) {
                run += 1;
            } else {
                self.pending = Some(item);
                break;
            }
        }
        Some((value, run))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = self.pending.is_some();
        let (lo, hi) = self.iter.size_hint();
        (usize::from(pending || lo > 0), hi.and_then(|hi| hi.checked_add(usize::from(pending))))
    }
}
