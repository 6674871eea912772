//! Round-robin interleaving of a homogeneous set of sources.
//!
//! All four adapters visit the sources in declared order, one element per
//! source per round, and differ only in what happens once some sources have
//! ended:
//!
//! - [`Interleave`] drops exhausted sources and keeps going with the rest.
//! - [`InterleaveShortest`] stops at the first exhausted source.
//! - [`InterleavePadded`] substitutes a fill value until every source has ended.
//! - [`EquiInterleave`] reports an error when sources end in different rounds.
//!
//! The collection of sources is not touched until the first call to `next`,
//! at which point every source is opened.

use std::{collections::VecDeque, fmt};

use crate::{
    ImbalanceStrategy,
    error::{SeqError, SeqResult},
    lifecycle::{SourceItem, SourceSet},
    tracer::SeqTracer,
};

macro_rules! with_tracer {
    ($name:ident { $($field:ident),* }) => {
        impl<O, Tr> $name<O, Tr>
        where
            O: IntoIterator,
            O::Item: IntoIterator,
            Tr: SeqTracer,
        {
            /// Reports source lifecycle events to `tracer`.
            pub fn with_tracer<T2: SeqTracer>(self, tracer: T2) -> $name<O, T2> {
                $name {
                    sources: self.sources.with_tracer(tracer),
                    $($field: self.$field,)*
                }
            }

            /// The tracer receiving lifecycle events.
            #[must_use]
            pub fn tracer(&self) -> &Tr {
                self.sources.tracer()
            }
        }
    };
}

/// Interleaves sources, skipping those that have ended.
#[derive(Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Interleave<O, Tr = crate::NoopTracer>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    Tr: SeqTracer,
{
    sources: SourceSet<O, Tr>,
    position: usize,
}

/// Interleaves the given sources; a source that ends simply drops out of the
/// rotation.
///
/// ```
/// use moreseq::interleave;
///
/// let mixed: Vec<_> = interleave([vec![1, 4, 6], vec![2], vec![3, 5]]).collect();
/// assert_eq!(mixed, [1, 2, 3, 4, 5, 6]);
/// ```
pub fn interleave<O>(sources: O) -> Interleave<O>
where
    O: IntoIterator,
    O::Item: IntoIterator,
{
    Interleave {
        sources: SourceSet::new(sources),
        position: 0,
    }
}

with_tracer!(Interleave { position });

impl<O, Tr> Iterator for Interleave<O, Tr>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    Tr: SeqTracer,
{
    type Item = SourceItem<O>;

    fn next(&mut self) -> Option<Self::Item> {
        self.sources.open_all();
        let count = self.sources.len();
        for _ in 0..count {
            let index = self.position;
            self.position = (self.position + 1) % count;
            if let Some(item) = self.sources.advance(index) {
                return Some(item);
            }
        }
        self.sources.dispose();
        None
    }
}

/// Interleaves sources until the first one ends.
#[derive(Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct InterleaveShortest<O, Tr = crate::NoopTracer>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    Tr: SeqTracer,
{
    sources: SourceSet<O, Tr>,
    position: usize,
    done: bool,
}

/// Interleaves the given sources, stopping as soon as any source ends.
///
/// Elements already taken from earlier sources in the final round are still
/// yielded.
pub fn interleave_shortest<O>(sources: O) -> InterleaveShortest<O>
where
    O: IntoIterator,
    O::Item: IntoIterator,
{
    InterleaveShortest {
        sources: SourceSet::new(sources),
        position: 0,
        done: false,
    }
}

with_tracer!(InterleaveShortest { position, done });

impl<O, Tr> Iterator for InterleaveShortest<O, Tr>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    Tr: SeqTracer,
{
    type Item = SourceItem<O>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.sources.open_all();
        let count = self.sources.len();
        let item = if count == 0 {
            None
        } else {
            let index = self.position;
            self.position = (self.position + 1) % count;
            self.sources.advance(index)
        };
        if item.is_none() {
            self.done = true;
            self.sources.dispose();
        }
        item
    }
}

/// Interleaves sources until the last one ends, filling in for ended sources.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct InterleavePadded<O, Tr = crate::NoopTracer>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    Tr: SeqTracer,
{
    sources: SourceSet<O, Tr>,
    fill: SourceItem<O>,
    round: VecDeque<Option<SourceItem<O>>>,
    done: bool,
}

impl<O, Tr> fmt::Debug for InterleavePadded<O, Tr>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    SourceItem<O>: fmt::Debug,
    Tr: SeqTracer,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterleavePadded")
            .field("sources", &self.sources)
            .field("fill", &self.fill)
            .field("round", &self.round)
            .field("done", &self.done)
            .finish()
    }
}

/// Interleaves the given sources, substituting `fill` for every source that
/// has ended until all of them have.
///
/// Each round is read from all sources before any of it is yielded.
pub fn interleave_padded<O>(sources: O, fill: SourceItem<O>) -> InterleavePadded<O>
where
    O: IntoIterator,
    O::Item: IntoIterator,
{
    InterleavePadded {
        sources: SourceSet::new(sources),
        fill,
        round: VecDeque::new(),
        done: false,
    }
}

with_tracer!(InterleavePadded { fill, round, done });

impl<O, Tr> Iterator for InterleavePadded<O, Tr>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    SourceItem<O>: Clone,
    Tr: SeqTracer,
{
    type Item = SourceItem<O>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.round.is_empty() && !self.done {
            self.sources.open_all();
            self.round.extend((0..self.sources.len()).map(|index| self.sources.advance(index)));
            if self.round.iter().all(Option::is_none) {
                self.round.clear();
                self.done = true;
                self.sources.dispose();
            }
        }
        let slot = self.round.pop_front()?;
        Some(slot.unwrap_or_else(|| self.fill.clone()))
    }
}

/// Interleaves sources that must all have the same length.
#[derive(Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct EquiInterleave<O, Tr = crate::NoopTracer>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    Tr: SeqTracer,
{
    sources: SourceSet<O, Tr>,
    position: usize,
    done: bool,
}

/// Interleaves the given sources, yielding `Err(SeqError::Imbalance)` once
/// they are found to end in different rounds.
///
/// A source that ends in the middle of a round is reported directly. When the
/// first source ends, the remaining sources are probed once; if any of them
/// still has an element, the first source is reported as too short.
pub fn equi_interleave<O>(sources: O) -> EquiInterleave<O>
where
    O: IntoIterator,
    O::Item: IntoIterator,
{
    EquiInterleave {
        sources: SourceSet::new(sources),
        position: 0,
        done: false,
    }
}

with_tracer!(EquiInterleave { position, done });

impl<O, Tr> EquiInterleave<O, Tr>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    Tr: SeqTracer,
{
    fn fail(&mut self, source: usize) -> SeqError {
        let policy = ImbalanceStrategy::Fail;
        self.sources.report_imbalance(source, policy);
        self.finish();
        SeqError::Imbalance { source, policy }
    }

    fn finish(&mut self) {
        self.done = true;
        self.sources.dispose();
    }
}

impl<O, Tr> Iterator for EquiInterleave<O, Tr>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    Tr: SeqTracer,
{
    type Item = SeqResult<SourceItem<O>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.sources.open_all();
        let count = self.sources.len();
        if count == 0 {
            self.finish();
            return None;
        }
        let index = self.position;
        self.position = (self.position + 1) % count;
        if let Some(item) = self.sources.advance(index) {
            return Some(Ok(item));
        }
        if index > 0 {
            return Some(Err(self.fail(index)));
        }
        let longer = (1..count).any(|other| self.sources.advance(other).is_some());
        if longer {
            return Some(Err(self.fail(0)));
        }
        self.finish();
        None
    }
}
