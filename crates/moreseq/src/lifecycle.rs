//! Ownership and release of the iterators behind multi-source adapters.
//!
//! A multi-source adapter owns one [`Slot`] per source. A slot starts out
//! holding the unopened source (`IntoIterator` value) and moves through a
//! fixed set of states:
//!
//! ```text
//! Unopened --open--> Open --None--> Exhausted
//!     \               |                |
//!      +--------------+----dispose-----+--> Disposed
//! ```
//!
//! Nothing leaves `Disposed`. An exhausted source drops its iterator the
//! moment it reports `None`, and [`SourceSet::dispose`] drops whatever is still
//! open in declaration order. Disposal is idempotent, so an adapter can release
//! everything as soon as it finishes and again from `Drop` without harm.
//!
//! Panics need no special handling: every iterator that was opened is owned by
//! a slot, so unwinding through the adapter drops each one exactly once. That
//! covers a source whose `into_iter` panics halfway through opening a set, as
//! well as a source whose `next` panics mid-round.

use std::{fmt, mem};

use smallvec::SmallVec;

use crate::tracer::{NoopTracer, SeqTracer};

/// Inline capacity for source sets; most combinations involve few sources.
const INLINE_CAPACITY: usize = 4;

/// Item type of the sources in a set of sources.
pub type SourceItem<O> = <<O as IntoIterator>::Item as IntoIterator>::Item;

/// Rule applied when combined sources have different lengths.
///
/// Each operator documents which policy it implements; the policies are not
/// interchangeable across operators.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum ImbalanceStrategy {
    /// Stop as soon as the shortest source ends.
    Truncate,
    /// Substitute a fill value for exhausted sources until the longest ends.
    Pad,
    /// Report an error the moment sources are found to differ in length.
    Fail,
    /// Leave exhausted sources out and keep going with the rest.
    Skip,
}

/// Observable state of a [`Slot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum SlotState {
    Unopened,
    Open,
    Exhausted,
    Disposed,
}

/// One source of a multi-source adapter together with its lifecycle state.
pub struct Slot<S: IntoIterator> {
    state: SlotInner<S>,
}

impl<S: IntoIterator> fmt::Debug for Slot<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot").field("state", &self.state()).finish()
    }
}

impl<S> Clone for Slot<S>
where
    S: IntoIterator + Clone,
    S::IntoIter: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

#[derive(Debug, Clone)]
enum SlotInner<S: IntoIterator> {
    Unopened(S),
    Open(S::IntoIter),
    Exhausted,
    Disposed,
}

impl<S: IntoIterator> Slot<S> {
    /// Wraps an unopened source.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            state: SlotInner::Unopened(source),
        }
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> SlotState {
        match self.state {
            SlotInner::Unopened(_) => SlotState::Unopened,
            SlotInner::Open(_) => SlotState::Open,
            SlotInner::Exhausted => SlotState::Exhausted,
            SlotInner::Disposed => SlotState::Disposed,
        }
    }

    /// Returns true while the slot may still produce elements.
    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self.state, SlotInner::Unopened(_) | SlotInner::Open(_))
    }

    /// Creates the iterator if the slot is still unopened.
    ///
    /// The slot reads as `Disposed` while `into_iter` runs, so a panicking
    /// source is never reopened.
    pub(crate) fn open(&mut self, index: usize, tracer: &mut impl SeqTracer) {
        if !matches!(self.state, SlotInner::Unopened(_)) {
            return;
        }
        if let SlotInner::Unopened(source) = mem::replace(&mut self.state, SlotInner::Disposed) {
            self.state = SlotInner::Open(source.into_iter());
            tracer.on_open(index);
        }
    }

    /// Advances the source, opening it first if needed.
    ///
    /// On exhaustion the iterator is dropped immediately.
    pub(crate) fn advance(&mut self, index: usize, tracer: &mut impl SeqTracer) -> Option<S::Item> {
        self.open(index, tracer);
        let SlotInner::Open(iter) = &mut self.state else {
            return None;
        };
        let item = iter.next();
        if item.is_none() {
            self.state = SlotInner::Exhausted;
            tracer.on_exhausted(index);
        }
        item
    }

    /// Releases whatever the slot holds. Calling it again is a no-op.
    pub(crate) fn dispose(&mut self, index: usize, tracer: &mut impl SeqTracer) {
        match mem::replace(&mut self.state, SlotInner::Disposed) {
            SlotInner::Open(iter) => {
                drop(iter);
                tracer.on_dispose(index);
            }
            SlotInner::Unopened(_) | SlotInner::Exhausted | SlotInner::Disposed => {}
        }
    }
}

/// An empty slot is already disposed.
impl<S: IntoIterator> Default for Slot<S> {
    fn default() -> Self {
        Self {
            state: SlotInner::Disposed,
        }
    }
}

/// A homogeneous, ordered set of sources.
///
/// The outer collection of sources is itself only enumerated on the first
/// call to [`SourceSet::open_all`], so building an adapter over a lazy
/// sequence of sequences does no work.
pub struct SourceSet<O, Tr = NoopTracer>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    Tr: SeqTracer,
{
    pending: Option<O>,
    slots: SmallVec<[Slot<O::Item>; INLINE_CAPACITY]>,
    tracer: Tr,
}

impl<O, Tr> fmt::Debug for SourceSet<O, Tr>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    Tr: SeqTracer,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceSet")
            .field("collected", &self.pending.is_none())
            .field("slots", &self.slots)
            .field("tracer", &self.tracer)
            .finish()
    }
}

impl<O> SourceSet<O>
where
    O: IntoIterator,
    O::Item: IntoIterator,
{
    pub(crate) fn new(sources: O) -> Self {
        Self {
            pending: Some(sources),
            slots: SmallVec::new(),
            tracer: NoopTracer,
        }
    }
}

impl<O, Tr> SourceSet<O, Tr>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    Tr: SeqTracer,
{
    /// Moves the unopened state into a set reporting to `tracer`.
    pub(crate) fn with_tracer<T2: SeqTracer>(mut self, tracer: T2) -> SourceSet<O, T2> {
        SourceSet {
            pending: self.pending.take(),
            slots: mem::take(&mut self.slots),
            tracer,
        }
    }

    /// Collects the sources and opens every one of them in declared order.
    ///
    /// Runs once; later calls return immediately.
    pub(crate) fn open_all(&mut self) {
        let Some(sources) = self.pending.take() else {
            return;
        };
        self.slots.extend(sources.into_iter().map(Slot::new));
        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.open(index, &mut self.tracer);
        }
    }

    /// Number of sources. Zero until [`Self::open_all`] has run.
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_live()).count()
    }

    /// Advances source `index`; returns `None` once it is exhausted.
    pub(crate) fn advance(&mut self, index: usize) -> Option<SourceItem<O>> {
        let slot = self.slots.get_mut(index)?;
        slot.advance(index, &mut self.tracer)
    }

    #[cfg(test)]
    pub(crate) fn state(&self, index: usize) -> Option<SlotState> {
        self.slots.get(index).map(Slot::state)
    }

    pub(crate) fn report_imbalance(&mut self, source: usize, policy: ImbalanceStrategy) {
        self.tracer.on_imbalance(source, policy);
    }

    pub(crate) fn tracer(&self) -> &Tr {
        &self.tracer
    }

    /// Drops every source still held, in declaration order.
    pub(crate) fn dispose(&mut self) {
        self.pending = None;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.dispose(index, &mut self.tracer);
        }
    }
}

impl<O, Tr> Drop for SourceSet<O, Tr>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    Tr: SeqTracer,
{
    fn drop(&mut self) {
        self.dispose();
    }
}
