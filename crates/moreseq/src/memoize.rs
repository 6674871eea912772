//! Replaying a single-pass source to any number of cursors.
//!
//! A [`Memoized`] handle owns the source iterator and a buffer of everything
//! pulled from it so far. Each cursor keeps only its own position: elements
//! below the buffer's length are cloned out of the buffer, and the first
//! cursor to step past the end pulls exactly one new element from the source
//! and appends it for everyone else. Cursors may be interleaved freely.
//!
//! The source is dropped as soon as it is exhausted, when [`Memoized::dispose`]
//! is called, or when a resource limit is hit. From then on cursors replay
//! the buffer and end.
//!
//! No borrow of the shared state is held while the source runs, so the source
//! itself may read the sequence it feeds. A cursor advanced from inside the
//! source sees only what was buffered before the pull in progress.

use std::{cell::RefCell, fmt, rc::Rc};

use crate::resource::{LimitedTracker, NoLimitTracker, ResourceError, ResourceLimits, ResourceTracker};

struct MemoState<I: Iterator, T> {
    /// Taken out for the duration of each pull.
    source: Option<I>,
    buffer: Vec<I::Item>,
    tracker: T,
    released: bool,
}

/// A shared, replayable view of a single-pass iterator.
///
/// Cloning the handle is cheap and shares the buffer. `Memoized` is a
/// [`Sequence`](crate::Sequence): every enumeration starts a fresh cursor at
/// the first element.
///
/// ```
/// use std::cell::Cell;
/// use moreseq::SeqExt;
///
/// let pulls = Cell::new(0);
/// let memo = (1..=3).inspect(|_| pulls.set(pulls.get() + 1)).memoize();
/// let mut a = memo.cursor();
/// let mut b = memo.cursor();
/// assert_eq!(a.next(), Some(1));
/// assert_eq!(b.next(), Some(1));
/// assert_eq!(b.next(), Some(2));
/// assert_eq!(a.next(), Some(2));
/// assert_eq!(pulls.get(), 2);
/// ```
pub struct Memoized<I: Iterator, T = NoLimitTracker> {
    state: Rc<RefCell<MemoState<I, T>>>,
}

impl<I: Iterator> Memoized<I> {
    pub(crate) fn new(source: I) -> Self {
        Self::with_tracker(source, NoLimitTracker)
    }
}

impl<I: Iterator> Memoized<I, LimitedTracker> {
    /// The tracker's clock starts now.
    pub(crate) fn with_limits(source: I, limits: ResourceLimits) -> Self {
        Self::with_tracker(source, LimitedTracker::new(limits))
    }
}

impl<I: Iterator, T: ResourceTracker> Memoized<I, T> {
    fn with_tracker(source: I, tracker: T) -> Self {
        Self {
            state: Rc::new(RefCell::new(MemoState {
                source: Some(source),
                buffer: Vec::new(),
                tracker,
                released: false,
            })),
        }
    }

    /// Starts a new cursor at the first element.
    #[must_use]
    pub fn cursor(&self) -> MemoCursor<I, T> {
        MemoCursor {
            state: Rc::clone(&self.state),
            position: 0,
        }
    }

    /// Releases the source. Elements already buffered stay available.
    pub fn dispose(&self) {
        let mut state = self.state.borrow_mut();
        state.released = true;
        let source = state.source.take();
        drop(state);
        drop(source);
    }

    /// Number of elements pulled from the source so far.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.state.borrow().buffer.len()
    }

    /// Whether the source is still held.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.state.borrow().source.is_some()
    }
}

impl<I: Iterator, T> Clone for Memoized<I, T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<I: Iterator, T> fmt::Debug for Memoized<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized").field("handles", &Rc::strong_count(&self.state)).finish()
    }
}

impl<I, T> IntoIterator for Memoized<I, T>
where
    I: Iterator,
    T: ResourceTracker,
    MemoCursor<I, T>: Iterator,
{
    type Item = <MemoCursor<I, T> as Iterator>::Item;
    type IntoIter = MemoCursor<I, T>;

    fn into_iter(self) -> MemoCursor<I, T> {
        self.cursor()
    }
}

impl<I, T> IntoIterator for &Memoized<I, T>
where
    I: Iterator,
    T: ResourceTracker,
    MemoCursor<I, T>: Iterator,
{
    type Item = <MemoCursor<I, T> as Iterator>::Item;
    type IntoIter = MemoCursor<I, T>;

    fn into_iter(self) -> MemoCursor<I, T> {
        self.cursor()
    }
}

/// A position in a [`Memoized`] sequence.
///
/// Yields plain elements without limits, and `Result<_, ResourceError>` when
/// created through [`memoize_with_limits`](crate::SeqExt::memoize_with_limits).
pub struct MemoCursor<I: Iterator, T = NoLimitTracker> {
    state: Rc<RefCell<MemoState<I, T>>>,
    position: usize,
}

impl<I, T> MemoCursor<I, T>
where
    I: Iterator,
    I::Item: Clone,
    T: ResourceTracker,
{
    /// Returns the element at the cursor, pulling it from the source if no
    /// cursor has reached it yet.
    fn fetch(&mut self) -> Option<Result<I::Item, T::Error>> {
        let mut source = {
            let mut state = self.state.borrow_mut();
            if let Some(item) = state.buffer.get(self.position).cloned() {
                self.position += 1;
                return Some(Ok(item));
            }
            state.source.take()?
        };
        let pulled = source.next();

        // `guard` is declared after `source`, so a source that is not put back
        // is dropped only once the borrow has ended.
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        let item = pulled?;
        if let Err(err) = state.tracker.on_buffer_grow(state.buffer.len() + 1) {
            return Some(Err(err));
        }
        state.buffer.push(item.clone());
        if !state.released {
            state.source = Some(source);
        }
        self.position += 1;
        Some(Ok(item))
    }

    fn remaining(&self) -> (usize, Option<usize>) {
        let state = self.state.borrow();
        let buffered = state.buffer.len().saturating_sub(self.position);
        match &state.source {
            Some(source) => {
                let (lo, hi) = source.size_hint();
                (buffered.saturating_add(lo), hi.and_then(|hi| hi.checked_add(buffered)))
            }
            None => (buffered, Some(buffered)),
        }
    }
}

impl<I: Iterator, T> fmt::Debug for MemoCursor<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoCursor").field("position", &self.position).finish()
    }
}

impl<I: Iterator, T> Clone for MemoCursor<I, T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            position: self.position,
        }
    }
}

impl<I> Iterator for MemoCursor<I, NoLimitTracker>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let Ok(item) = self.fetch()?;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.remaining()
    }
}

impl<I> Iterator for MemoCursor<I, LimitedTracker>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = Result<I::Item, ResourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.fetch()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, hi) = self.remaining();
        (0, hi.and_then(|hi| hi.checked_add(1)))
    }
}
