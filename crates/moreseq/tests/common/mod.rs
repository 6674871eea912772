//! Shared sources for the integration tests.
//!
//! [`TestingSequence`] counts how often it is opened and how many of its
//! iterators have been dropped, and can be told to panic on open or at a given
//! element. [`BreakingSequence`] panics the moment anything reads from it, which
//! is how laziness is checked.
#![allow(dead_code, reason = "each test binary uses a different subset of helpers")]

use std::{
    cell::Cell,
    marker::PhantomData,
    panic::{AssertUnwindSafe, catch_unwind},
    rc::Rc,
    vec,
};

/// Shared open/drop counters of a [`TestingSequence`] and all its iterators.
#[derive(Debug, Clone, Default)]
pub struct Probe {
    opened: Rc<Cell<usize>>,
    dropped: Rc<Cell<usize>>,
}

impl Probe {
    /// Number of iterators created.
    pub fn opened(&self) -> usize {
        self.opened.get()
    }

    /// Number of iterators dropped.
    pub fn dropped(&self) -> usize {
        self.dropped.get()
    }

    /// Number of iterators created and not yet dropped.
    pub fn live(&self) -> usize {
        self.opened() - self.dropped()
    }
}

/// A restartable source that records its own lifecycle.
#[derive(Debug, Clone)]
pub struct TestingSequence<T> {
    items: Vec<T>,
    probe: Probe,
    panic_on_open: bool,
    panic_at: Option<usize>,
}

impl<T> TestingSequence<T> {
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().collect(),
            probe: Probe::default(),
            panic_on_open: false,
            panic_at: None,
        }
    }

    /// Makes `into_iter` panic.
    pub fn panicking_on_open(mut self) -> Self {
        self.panic_on_open = true;
        self
    }

    /// Makes the iterator panic instead of yielding the element at `index`.
    pub fn panicking_at(mut self, index: usize) -> Self {
        self.panic_at = Some(index);
        self
    }

    pub fn probe(&self) -> Probe {
        self.probe.clone()
    }
}

impl<T> IntoIterator for TestingSequence<T> {
    type Item = T;
    type IntoIter = TestingIter<T>;

    fn into_iter(self) -> TestingIter<T> {
        assert!(!self.panic_on_open, "TestingSequence opened");
        self.probe.opened.set(self.probe.opened.get() + 1);
        TestingIter {
            inner: self.items.into_iter(),
            probe: self.probe,
            panic_at: self.panic_at,
            position: 0,
        }
    }
}

/// Iterator over a [`TestingSequence`]; bumps the drop counter when dropped.
#[derive(Debug)]
pub struct TestingIter<T> {
    inner: vec::IntoIter<T>,
    probe: Probe,
    panic_at: Option<usize>,
    position: usize,
}

impl<T> Iterator for TestingIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        assert!(self.panic_at != Some(self.position), "TestingIter advanced to {}", self.position);
        self.position += 1;
        self.inner.next()
    }
}

impl<T> Drop for TestingIter<T> {
    fn drop(&mut self) {
        self.probe.dropped.set(self.probe.dropped.get() + 1);
    }
}

/// An iterator that panics if it is ever advanced.
#[derive(Debug, Clone, Copy)]
pub struct BreakingSequence<T>(PhantomData<T>);

impl<T> BreakingSequence<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Iterator for BreakingSequence<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        panic!("BreakingSequence was enumerated");
    }
}

/// Runs `f`, returning whether it panicked.
pub fn panics(f: impl FnOnce()) -> bool {
    catch_unwind(AssertUnwindSafe(f)).is_err()
}
