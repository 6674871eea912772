//! Operators that need to know where the sequence ends.
//!
//! Each keeps only the trailing elements it cannot yet place: `count`
//! elements for [`CountDown`] and [`SkipLast`], `n` for [`TakeLast`].

use std::{collections::VecDeque, iter::Fuse};

/// Annotates the last `count` elements with how many elements follow them.
///
/// The final elements receive `Some(count - 1)`, ..., `Some(0)`; every earlier
/// element receives `None`. When the source reports an exact length through
/// `size_hint` the countdown is computed directly; otherwise exactly `count`
/// elements are held back until the end is seen.
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct CountDown<I: Iterator, F> {
    iter: Fuse<I>,
    count: usize,
    mode: CountDownMode<I::Item>,
    f: F,
}

#[derive(Clone)]
enum CountDownMode<T> {
    Undecided,
    /// Number of elements still to come, including the next one.
    Known(usize),
    Buffered(VecDeque<T>),
}

impl<I: Iterator, F> CountDown<I, F> {
    pub(crate) fn new(iter: I, count: usize, f: F) -> Self {
        Self {
            iter: iter.fuse(),
            count,
            mode: CountDownMode::Undecided,
            f,
        }
    }
}

impl<I, F, R> Iterator for CountDown<I, F>
where
    I: Iterator,
    F: FnMut(I::Item, Option<usize>) -> R,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        if matches!(self.mode, CountDownMode::Undecided) {
            self.mode = match self.iter.size_hint() {
                (lo, Some(hi)) if lo == hi => CountDownMode::Known(lo),
                _ => CountDownMode::Buffered(VecDeque::with_capacity(self.count)),
            };
        }
        match &mut self.mode {
            CountDownMode::Known(remaining) => {
                let item = self.iter.next()?;
                *remaining = remaining.saturating_sub(1);
                let left = *remaining;
                let mark = (left < self.count).then_some(left);
                Some((self.f)(item, mark))
            }
            CountDownMode::Buffered(queue) => {
                while queue.len() <= self.count {
                    match self.iter.next() {
                        Some(item) => queue.push_back(item),
                        None => break,
                    }
                }
                let item = queue.pop_front()?;
                let mark = (queue.len() < self.count).then_some(queue.len());
                Some((self.f)(item, mark))
            }
            CountDownMode::Undecided => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = match &self.mode {
            CountDownMode::Buffered(queue) => queue.len(),
            _ => 0,
        };
        let (lo, hi) = self.iter.size_hint();
        (lo.saturating_add(buffered), hi.and_then(|hi| hi.checked_add(buffered)))
    }
}

/// The last `n` elements. Consumes the whole source on the first call.
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct TakeLast<I: Iterator> {
    source: Option<I>,
    n: usize,
    tail: VecDeque<I::Item>,
}

impl<I: Iterator> TakeLast<I> {
    pub(crate) fn new(iter: I, n: usize) -> Self {
        Self {
            source: Some(iter),
            n,
            tail: VecDeque::new(),
        }
    }
}

impl<I: Iterator> Iterator for TakeLast<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(source) = self.source.take()
            && self.n > 0
        {
            for item in source {
                if self.tail.len() == self.n {
                    self.tail.pop_front();
                }
                self.tail.push_back(item);
            }
        }
        self.tail.pop_front()
    }
}

/// Everything except the last `n` elements, streamed with an `n`-element delay.
#[derive(Debug, Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct SkipLast<I: Iterator> {
    iter: Fuse<I>,
    n: usize,
    held: VecDeque<I::Item>,
}

impl<I: Iterator> SkipLast<I> {
    pub(crate) fn new(iter: I, n: usize) -> Self {
        Self {
            iter: iter.fuse(),
            n,
            held: VecDeque::new(),
        }
    }
}

impl<I: Iterator> Iterator for SkipLast<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        while self.held.len() <= self.n {
            let Some(item) = self.iter.next() else {
                self.held.clear();
                return None;
            };
            self.held.push_back(item);
        }
        self.held.pop_front()
    }
}
