//! Sliding windows over a sequence.
//!
//! All three window shapes keep at most `size` elements in a ring buffer and
//! hand out each window as a freshly allocated `Vec`, so a caller is free to
//! keep or mutate any window without affecting the ones that follow.

use std::{collections::VecDeque, iter::Fuse};

use crate::error::{SeqResult, require_positive};

/// Full windows of exactly `size` elements.
///
/// A sequence of length `L` yields `L - size + 1` windows, or none if `L < size`.
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Window<I: Iterator> {
    iter: Fuse<I>,
    size: usize,
    buffer: VecDeque<I::Item>,
}

impl<I: Iterator> Window<I> {
    pub(crate) fn new(iter: I, size: usize) -> SeqResult<Self> {
        let size = require_positive("size", size)?;
        Ok(Self {
            iter: iter.fuse(),
            size,
            buffer: VecDeque::new(),
        })
    }
}

impl<I> Iterator for Window<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buffer.len() == self.size {
            self.buffer.pop_front();
        }
        while self.buffer.len() < self.size {
            let Some(item) = self.iter.next() else {
                self.buffer.clear();
                return None;
            };
            self.buffer.push_back(item);
        }
        Some(self.buffer.iter().cloned().collect())
    }
}

/// Windows anchored at each element and extending up to `size - 1` elements
/// to its right.
///
/// Window `i` holds elements `[i, min(i + size - 1, L - 1)]`: the windows are
/// full until the tail is reached, then shrink one element at a time.
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct WindowLeft<I: Iterator> {
    iter: Fuse<I>,
    size: usize,
    buffer: VecDeque<I::Item>,
    primed: bool,
}

impl<I: Iterator> WindowLeft<I> {
    pub(crate) fn new(iter: I, size: usize) -> SeqResult<Self> {
        let size = require_positive("size", size)?;
        Ok(Self {
            iter: iter.fuse(),
            size,
            buffer: VecDeque::new(),
            primed: false,
        })
    }
}

impl<I> Iterator for WindowLeft<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.primed {
            self.buffer.pop_front();
            if let Some(item) = self.iter.next() {
                self.buffer.push_back(item);
            }
        } else {
            self.primed = true;
            self.buffer.extend(self.iter.by_ref().take(self.size));
        }
        if self.buffer.is_empty() {
            return None;
        }
        Some(self.buffer.iter().cloned().collect())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lo, hi) = self.iter.size_hint();
        let pending = if self.primed {
            self.buffer.len().saturating_sub(1)
        } else {
            0
        };
        (lo.saturating_add(pending), hi.and_then(|hi| hi.checked_add(pending)))
    }
}

/// Windows ending at each element and extending up to `size - 1` elements
/// to its left.
///
/// Window `i` holds elements `[max(0, i - size + 1), i]`: the windows grow
/// from one element up to `size`, then stay full.
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct WindowRight<I: Iterator> {
    iter: I,
    size: usize,
    buffer: VecDeque<I::Item>,
}

impl<I: Iterator> WindowRight<I> {
    pub(crate) fn new(iter: I, size: usize) -> SeqResult<Self> {
        let size = require_positive("size", size)?;
        Ok(Self {
            iter,
            size,
            buffer: VecDeque::new(),
        })
    }
}

impl<I> Iterator for WindowRight<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.iter.next()?;
        if self.buffer.len() == self.size {
            self.buffer.pop_front();
        }
        self.buffer.push_back(item);
        Some(self.buffer.iter().cloned().collect())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Applies a function to each pair of consecutive elements.
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Pairwise<I: Iterator, F> {
    iter: I,
    previous: Option<I::Item>,
    f: F,
}

impl<I: Iterator, F> Pairwise<I, F> {
    pub(crate) fn new(iter: I, f: F) -> Self {
        Self {
            iter,
            previous: None,
            f,
        }
    }
}

impl<I, F, R> Iterator for Pairwise<I, F>
where
    I: Iterator,
    F: FnMut(&I::Item, &I::Item) -> R,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        let previous = match self.previous.take() {
            Some(previous) => previous,
            None => self.iter.next()?,
        };
        let current = self.iter.next()?;
        let result = (self.f)(&previous, &current);
        self.previous = Some(current);
        Some(result)
    }
}
