//! Merging individually sorted sources into one sorted sequence.

use std::{cmp::Ordering, fmt, mem};

use smallvec::SmallVec;

use crate::{
    lifecycle::{SourceItem, SourceSet},
    tracer::{NoopTracer, SeqTracer},
};

/// Order in which sorted sources are arranged, and in which they are merged.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum OrderByDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

/// Comparison used by [`sorted_merge`].
pub type NaturalOrder<T> = fn(&T, &T) -> Ordering;

/// Merges sources that are each sorted in `direction`.
///
/// Every call to `next` compares the current head of each live source and
/// takes the smallest (or largest); ties go to the source declared first. A
/// source that ends leaves the pool; the others carry on.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct SortedMerge<O, F, Tr = NoopTracer>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    Tr: SeqTracer,
{
    sources: SourceSet<O, Tr>,
    heads: SmallVec<[Option<SourceItem<O>>; 4]>,
    primed: bool,
    direction: OrderByDirection,
    compare: F,
}

impl<O, F, Tr> fmt::Debug for SortedMerge<O, F, Tr>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    SourceItem<O>: fmt::Debug,
    Tr: SeqTracer,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortedMerge")
            .field("sources", &self.sources)
            .field("heads", &self.heads)
            .field("primed", &self.primed)
            .field("direction", &self.direction)
            .finish_non_exhaustive()
    }
}

/// Merges sorted sources using the natural order of their elements.
///
/// ```
/// use moreseq::{OrderByDirection, sorted_merge};
///
/// let merged: Vec<_> = sorted_merge(OrderByDirection::Ascending, [vec![1, 3, 5], vec![2, 4, 6]]).collect();
/// assert_eq!(merged, [1, 2, 3, 4, 5, 6]);
/// ```
pub fn sorted_merge<O>(direction: OrderByDirection, sources: O) -> SortedMerge<O, NaturalOrder<SourceItem<O>>>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    SourceItem<O>: Ord,
{
    sorted_merge_by(direction, <SourceItem<O> as Ord>::cmp as NaturalOrder<_>, sources)
}

/// Merges sorted sources using `compare`.
pub fn sorted_merge_by<O, F>(direction: OrderByDirection, compare: F, sources: O) -> SortedMerge<O, F>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    F: FnMut(&SourceItem<O>, &SourceItem<O>) -> Ordering,
{
    SortedMerge {
        sources: SourceSet::new(sources),
        heads: SmallVec::new(),
        primed: false,
        direction,
        compare,
    }
}

impl<O, F, Tr> SortedMerge<O, F, Tr>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    Tr: SeqTracer,
{
    /// Reports source lifecycle events to `tracer`.
    pub fn with_tracer<T2: SeqTracer>(self, tracer: T2) -> SortedMerge<O, F, T2> {
        SortedMerge {
            sources: self.sources.with_tracer(tracer),
            heads: self.heads,
            primed: self.primed,
            direction: self.direction,
            compare: self.compare,
        }
    }

    /// The tracer receiving lifecycle events.
    #[must_use]
    pub fn tracer(&self) -> &Tr {
        self.sources.tracer()
    }
}

impl<O, F, Tr> Iterator for SortedMerge<O, F, Tr>
where
    O: IntoIterator,
    O::Item: IntoIterator,
    F: FnMut(&SourceItem<O>, &SourceItem<O>) -> Ordering,
    Tr: SeqTracer,
{
    type Item = SourceItem<O>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.primed {
            self.primed = true;
            self.sources.open_all();
            let sources = &mut self.sources;
            self.heads.extend((0..sources.len()).map(|index| sources.advance(index)));
        }

        let wanted = match self.direction {
            OrderByDirection::Ascending => Ordering::Less,
            OrderByDirection::Descending => Ordering::Greater,
        };
        let mut best: Option<usize> = None;
        for (index, head) in self.heads.iter().enumerate() {
            let Some(candidate) = head else { continue };
            let better = match best.and_then(|b| self.heads[b].as_ref()) {
                Some(current) => (self.compare)(candidate, current) == wanted,
                None => true,
            };
            if better {
                best = Some(index);
            }
        }

        let Some(index) = best else {
            self.sources.dispose();
            return None;
        };
        let refill = self.sources.advance(index);
        mem::replace(&mut self.heads[index], refill)
    }
}
