//! Padding a sequence out to a minimum width.

use std::{collections::VecDeque, iter::Fuse};

/// The source, followed by copies of `fill` until at least `width` elements
/// have been yielded.
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Pad<I: Iterator> {
    iter: Fuse<I>,
    width: usize,
    yielded: usize,
    fill: I::Item,
}

impl<I: Iterator> Pad<I> {
    pub(crate) fn new(iter: I, width: usize, fill: I::Item) -> Self {
        Self {
            iter: iter.fuse(),
            width,
            yielded: 0,
            fill,
        }
    }
}

impl<I> Iterator for Pad<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let item = match self.iter.next() {
            Some(item) => item,
            None if self.yielded < self.width => self.fill.clone(),
            None => return None,
        };
        self.yielded += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let missing = self.width.saturating_sub(self.yielded);
        let (lo, hi) = self.iter.size_hint();
        (lo.max(missing), hi.map(|hi| hi.max(missing)))
    }
}

/// Copies of `fill` followed by the source, so that at least `width`
/// elements are yielded.
///
/// Holds up to `width` elements back to learn whether padding is needed; past
/// that point the source streams through.
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct PadStart<I: Iterator> {
    iter: Fuse<I>,
    width: usize,
    fill: I::Item,
    missing: Option<usize>,
    head: VecDeque<I::Item>,
}

impl<I: Iterator> PadStart<I> {
    pub(crate) fn new(iter: I, width: usize, fill: I::Item) -> Self {
        Self {
            iter: iter.fuse(),
            width,
            fill,
            missing: None,
            head: VecDeque::new(),
        }
    }
}

impl<I> Iterator for PadStart<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.missing.is_none() {
            self.head.extend(self.iter.by_ref().take(self.width));
            self.missing = Some(self.width - self.head.len());
        }
        if let Some(missing) = &mut self.missing
            && *missing > 0
        {
            *missing -= 1;
            return Some(self.fill.clone());
        }
        self.head.pop_front().or_else(|| self.iter.next())
    }
}
