#![doc = include_str!("../../../README.md")]

mod batch;
mod comparer;
mod error;
mod group;
mod interleave;
mod join;
mod lifecycle;
mod lookup;
mod memoize;
mod merge;
mod offset;
mod pad;
mod rank;
pub mod resource;
mod rle;
mod scan;
mod sequence;
mod tail;
mod terminal;
pub mod tracer;
mod transpose;
mod window;
mod zip;

use std::{cmp::Ordering, convert::identity};

pub use crate::{
    batch::{Batch, BatchWhile, Segment},
    comparer::{DefaultEq, EqBy, EqWith, EqualityComparer, HashEqualityComparer},
    error::{SeqError, SeqResult},
    group::GroupAdjacent,
    interleave::{
        EquiInterleave, Interleave, InterleavePadded, InterleaveShortest, equi_interleave, interleave,
        interleave_padded, interleave_shortest,
    },
    join::{FullGroupJoin, FullJoin, Joined, LeftJoin, RightJoin},
    lifecycle::{ImbalanceStrategy, Slot, SlotState, SourceItem},
    memoize::{MemoCursor, Memoized},
    merge::{NaturalOrder, OrderByDirection, SortedMerge, sorted_merge, sorted_merge_by},
    offset::{Lag, Lead},
    pad::{Pad, PadStart},
    rank::Rank,
    resource::{LimitedTracker, NoLimitTracker, ResourceError, ResourceLimits, ResourceTracker},
    rle::RunLengthEncode,
    scan::ScanBy,
    sequence::{Deferred, Sequence, defer},
    tail::{CountDown, SkipLast, TakeLast},
    terminal::Cardinality,
    tracer::{NoopTracer, RecordingTracer, SeqTracer, StderrTracer, TraceEvent},
    transpose::{Transpose, transpose},
    window::{Pairwise, Window, WindowLeft, WindowRight},
    zip::{EquiZip, IntoZipSources, ZipLongest, ZipShortest, ZipSources, equi_zip, zip_longest, zip_shortest},
};

/// Sequence operators available on every [`Iterator`].
///
/// Every adapter is lazy: calling one of these methods only records the
/// arguments, and the source is not advanced until the returned iterator is.
/// Methods returning [`SeqResult`] validate their static parameters up front
/// and fail before anything is read.
///
/// The terminal operators ([`split_at`](Self::split_at),
/// [`try_single`](Self::try_single), [`fold_exact`](Self::fold_exact)) consume
/// the source immediately.
pub trait SeqExt: Iterator + Sized {
    // ========================================================================
    // Windows
    // ========================================================================

    /// Full windows of `size` consecutive elements.
    ///
    /// ```
    /// use moreseq::SeqExt;
    ///
    /// let windows: Vec<_> = (1..=4).window(3).unwrap().collect();
    /// assert_eq!(windows, [vec![1, 2, 3], vec![2, 3, 4]]);
    /// assert!((1..=4).window(0).is_err());
    /// ```
    fn window(self, size: usize) -> SeqResult<Window<Self>> {
        Window::new(self, size)
    }

    /// One window per element, starting at that element.
    fn window_left(self, size: usize) -> SeqResult<WindowLeft<Self>> {
        WindowLeft::new(self, size)
    }

    /// One window per element, ending at that element.
    fn window_right(self, size: usize) -> SeqResult<WindowRight<Self>> {
        WindowRight::new(self, size)
    }

    /// `f(previous, current)` for every pair of consecutive elements.
    fn pairwise<F, R>(self, f: F) -> Pairwise<Self, F>
    where
        F: FnMut(&Self::Item, &Self::Item) -> R,
    {
        Pairwise::new(self, f)
    }

    /// `f(element, lagged)` where `lagged` is the element `offset` positions
    /// earlier, or `default` for the first `offset` elements.
    fn lag<F, R>(self, offset: usize, default: Self::Item, f: F) -> SeqResult<Lag<Self, F>>
    where
        Self::Item: Clone,
        F: FnMut(Self::Item, Self::Item) -> R,
    {
        Lag::new(self, offset, default, f)
    }

    /// `f(element, lead)` where `lead` is the element `offset` positions
    /// later, or `default` for the last `offset` elements.
    fn lead<F, R>(self, offset: usize, default: Self::Item, f: F) -> SeqResult<Lead<Self, F>>
    where
        Self::Item: Clone,
        F: FnMut(Self::Item, Self::Item) -> R,
    {
        Lead::new(self, offset, default, f)
    }

    // ========================================================================
    // Buckets
    // ========================================================================

    /// Buckets of `size` elements; the last may be shorter.
    fn batch(self, size: usize) -> SeqResult<Batch<Self>> {
        Batch::new(self, size)
    }

    /// Buckets that grow while `predicate(&next, &bucket)` holds.
    ///
    /// ```
    /// use moreseq::SeqExt;
    ///
    /// let runs: Vec<_> = [1, 2, 3, 1, 2, 1]
    ///     .into_iter()
    ///     .batch_while(|next, bucket| bucket.last().is_some_and(|last| next > last))
    ///     .collect();
    /// assert_eq!(runs, [vec![1, 2, 3], vec![1, 2], vec![1]]);
    /// ```
    fn batch_while<F>(self, predicate: F) -> BatchWhile<Self, F>
    where
        F: FnMut(&Self::Item, &[Self::Item]) -> bool,
    {
        BatchWhile::new(self, predicate)
    }

    /// Segments that start wherever `predicate(&current, &previous, index)` holds.
    fn segment<F>(self, predicate: F) -> Segment<Self, F>
    where
        F: FnMut(&Self::Item, &Self::Item, usize) -> bool,
    {
        Segment::new(self, predicate)
    }

    /// `f(element, Some(n))` for the last `count` elements, where `n` is the
    /// number of elements after it; `f(element, None)` for the rest.
    fn count_down<F, R>(self, count: usize, f: F) -> CountDown<Self, F>
    where
        F: FnMut(Self::Item, Option<usize>) -> R,
    {
        CountDown::new(self, count, f)
    }

    /// The last `n` elements.
    fn take_last(self, n: usize) -> TakeLast<Self> {
        TakeLast::new(self, n)
    }

    /// All but the last `n` elements.
    fn skip_last(self, n: usize) -> SkipLast<Self> {
        SkipLast::new(self, n)
    }

    /// Appends `fill` until at least `width` elements have been yielded.
    fn pad(self, width: usize, fill: Self::Item) -> Pad<Self>
    where
        Self::Item: Clone,
    {
        Pad::new(self, width, fill)
    }

    /// Prepends `fill` so that at least `width` elements are yielded.
    fn pad_start(self, width: usize, fill: Self::Item) -> PadStart<Self>
    where
        Self::Item: Clone,
    {
        PadStart::new(self, width, fill)
    }

    /// `(value, run_length)` for each run of equal elements.
    ///
    /// ```
    /// use moreseq::SeqExt;
    ///
    /// let runs: Vec<_> = [1, 2, 2, 3, 3, 3].into_iter().run_length_encode().collect();
    /// assert_eq!(runs, [(1, 1), (2, 2), (3, 3)]);
    /// ```
    fn run_length_encode(self) -> RunLengthEncode<Self, DefaultEq>
    where
        Self::Item: PartialEq,
    {
        RunLengthEncode::new(self, DefaultEq::new())
    }

    /// Like [`run_length_encode`](Self::run_length_encode) with a custom comparer.
    fn run_length_encode_by<C>(self, comparer: C) -> RunLengthEncode<Self, C>
    where
        C: EqualityComparer<Self::Item>,
    {
        RunLengthEncode::new(self, comparer)
    }

    // ========================================================================
    // Keyed aggregation
    // ========================================================================

    /// `(key, elements)` for each run of adjacent elements with equal keys.
    fn group_adjacent<K, KF>(
        self,
        key: KF,
    ) -> GroupAdjacent<Self, K, Self::Item, KF, fn(Self::Item) -> Self::Item, DefaultEq>
    where
        K: PartialEq,
        KF: FnMut(&Self::Item) -> K,
    {
        GroupAdjacent::new(self, key, identity as fn(Self::Item) -> Self::Item, DefaultEq::new())
    }

    /// `(key, projected elements)` for each run of adjacent elements whose
    /// keys are equal under `comparer`.
    fn group_adjacent_by<K, E, KF, EF, C>(
        self,
        key: KF,
        element: EF,
        comparer: C,
    ) -> GroupAdjacent<Self, K, E, KF, EF, C>
    where
        KF: FnMut(&Self::Item) -> K,
        EF: FnMut(Self::Item) -> E,
        C: EqualityComparer<K>,
    {
        GroupAdjacent::new(self, key, element, comparer)
    }

    /// `(key, state)` per element, with state accumulated per key across the
    /// whole sequence.
    ///
    /// ```
    /// use moreseq::SeqExt;
    ///
    /// let counts: Vec<_> = "abab".chars().scan_by(|c| *c, |_| 0, |n, _, _| n + 1).collect();
    /// assert_eq!(counts, [('a', 1), ('b', 1), ('a', 2), ('b', 2)]);
    /// ```
    fn scan_by<K, S, KF, SF, AF>(self, key: KF, seed: SF, accumulate: AF) -> ScanBy<Self, K, S, KF, SF, AF, DefaultEq>
    where
        K: Clone + std::hash::Hash + Eq,
        S: Clone,
        KF: FnMut(&Self::Item) -> K,
        SF: FnMut(&K) -> S,
        AF: FnMut(&S, &K, Self::Item) -> S,
    {
        ScanBy::new(self, key, seed, accumulate, DefaultEq::new())
    }

    /// Like [`scan_by`](Self::scan_by) with keys compared by `comparer`.
    fn scan_by_with<K, S, KF, SF, AF, C>(
        self,
        key: KF,
        seed: SF,
        accumulate: AF,
        comparer: C,
    ) -> ScanBy<Self, K, S, KF, SF, AF, C>
    where
        K: Clone,
        S: Clone,
        KF: FnMut(&Self::Item) -> K,
        SF: FnMut(&K) -> S,
        AF: FnMut(&S, &K, Self::Item) -> S,
        C: HashEqualityComparer<K>,
    {
        ScanBy::new(self, key, seed, accumulate, comparer)
    }

    /// `(element, rank)` with dense ranks, largest element first.
    fn rank(self) -> Rank<Self, fn(&Self::Item) -> Self::Item, NaturalOrder<Self::Item>>
    where
        Self::Item: Ord + Clone,
    {
        Rank::new(
            self,
            <Self::Item as Clone>::clone as fn(&Self::Item) -> Self::Item,
            <Self::Item as Ord>::cmp as NaturalOrder<Self::Item>,
        )
    }

    /// `(element, rank)` with dense ranks by key, largest key first.
    fn rank_by<K, KF>(self, key: KF) -> Rank<Self, KF, NaturalOrder<K>>
    where
        K: Ord,
        KF: FnMut(&Self::Item) -> K,
    {
        Rank::new(self, key, <K as Ord>::cmp as NaturalOrder<K>)
    }

    /// `(element, rank)` with dense ranks by key under `compare`, greatest first.
    fn rank_by_with<K, KF, CF>(self, key: KF, compare: CF) -> Rank<Self, KF, CF>
    where
        KF: FnMut(&Self::Item) -> K,
        CF: FnMut(&K, &K) -> Ordering,
    {
        Rank::new(self, key, compare)
    }

    // ========================================================================
    // Joins
    // ========================================================================

    /// Left outer join against `right`.
    ///
    /// ```
    /// use moreseq::{Joined, SeqExt};
    ///
    /// let left = [(1, "foo"), (2, "bar")];
    /// let right = [(2, "Bar"), (3, "baz")];
    /// let rows: Vec<_> = left.into_iter().left_join(right, |l| l.0, |r| r.0).collect();
    /// assert_eq!(rows, [Joined::Left((1, "foo")), Joined::Both((2, "bar"), (2, "Bar"))]);
    /// ```
    fn left_join<R, K, LF, RF>(
        self,
        right: R,
        left_key: LF,
        right_key: RF,
    ) -> LeftJoin<Self, R::IntoIter, K, LF, RF, DefaultEq>
    where
        R: IntoIterator,
        Self::Item: Clone,
        R::Item: Clone,
        K: std::hash::Hash + Eq,
        LF: FnMut(&Self::Item) -> K,
        RF: FnMut(&R::Item) -> K,
    {
        join::left_join(self, right.into_iter(), left_key, right_key, DefaultEq::new())
    }

    /// Left outer join with keys compared by `comparer`.
    fn left_join_by<R, K, LF, RF, C>(
        self,
        right: R,
        left_key: LF,
        right_key: RF,
        comparer: C,
    ) -> LeftJoin<Self, R::IntoIter, K, LF, RF, C>
    where
        R: IntoIterator,
        Self::Item: Clone,
        R::Item: Clone,
        LF: FnMut(&Self::Item) -> K,
        RF: FnMut(&R::Item) -> K,
        C: HashEqualityComparer<K>,
    {
        join::left_join(self, right.into_iter(), left_key, right_key, comparer)
    }

    /// Right outer join against `right`.
    fn right_join<R, K, LF, RF>(
        self,
        right: R,
        left_key: LF,
        right_key: RF,
    ) -> RightJoin<Self, R::IntoIter, K, LF, RF, DefaultEq>
    where
        R: IntoIterator,
        Self::Item: Clone,
        R::Item: Clone,
        K: std::hash::Hash + Eq,
        LF: FnMut(&Self::Item) -> K,
        RF: FnMut(&R::Item) -> K,
    {
        join::right_join(self, right.into_iter(), left_key, right_key, DefaultEq::new())
    }

    /// Right outer join with keys compared by `comparer`.
    fn right_join_by<R, K, LF, RF, C>(
        self,
        right: R,
        left_key: LF,
        right_key: RF,
        comparer: C,
    ) -> RightJoin<Self, R::IntoIter, K, LF, RF, C>
    where
        R: IntoIterator,
        Self::Item: Clone,
        R::Item: Clone,
        LF: FnMut(&Self::Item) -> K,
        RF: FnMut(&R::Item) -> K,
        C: HashEqualityComparer<K>,
    {
        join::right_join(self, right.into_iter(), left_key, right_key, comparer)
    }

    /// Full outer join against `right`.
    fn full_join<R, K, LF, RF>(
        self,
        right: R,
        left_key: LF,
        right_key: RF,
    ) -> FullJoin<Self, R::IntoIter, K, LF, RF, DefaultEq>
    where
        R: IntoIterator,
        Self::Item: Clone,
        R::Item: Clone,
        K: std::hash::Hash + Eq,
        LF: FnMut(&Self::Item) -> K,
        RF: FnMut(&R::Item) -> K,
    {
        join::full_join(self, right.into_iter(), left_key, right_key, DefaultEq::new())
    }

    /// Full outer join with keys compared by `comparer`.
    fn full_join_by<R, K, LF, RF, C>(
        self,
        right: R,
        left_key: LF,
        right_key: RF,
        comparer: C,
    ) -> FullJoin<Self, R::IntoIter, K, LF, RF, C>
    where
        R: IntoIterator,
        Self::Item: Clone,
        R::Item: Clone,
        LF: FnMut(&Self::Item) -> K,
        RF: FnMut(&R::Item) -> K,
        C: HashEqualityComparer<K>,
    {
        join::full_join(self, right.into_iter(), left_key, right_key, comparer)
    }

    /// `(key, left elements, right elements)` for every key on either side.
    fn full_group_join<R, K, LF, RF>(
        self,
        right: R,
        left_key: LF,
        right_key: RF,
    ) -> FullGroupJoin<Self, R::IntoIter, K, LF, RF, DefaultEq>
    where
        R: IntoIterator,
        K: std::hash::Hash + Eq,
        LF: FnMut(&Self::Item) -> K,
        RF: FnMut(&R::Item) -> K,
    {
        join::full_group_join(self, right.into_iter(), left_key, right_key, DefaultEq::new())
    }

    /// Full group join with keys compared by `comparer`.
    fn full_group_join_by<R, K, LF, RF, C>(
        self,
        right: R,
        left_key: LF,
        right_key: RF,
        comparer: C,
    ) -> FullGroupJoin<Self, R::IntoIter, K, LF, RF, C>
    where
        R: IntoIterator,
        LF: FnMut(&Self::Item) -> K,
        RF: FnMut(&R::Item) -> K,
        C: HashEqualityComparer<K>,
    {
        join::full_group_join(self, right.into_iter(), left_key, right_key, comparer)
    }

    // ========================================================================
    // Pairing with another source
    // ========================================================================

    /// Pairs elements until either side ends.
    fn zip_shortest<B: IntoIterator>(self, other: B) -> ZipShortest<(Slot<Self>, Slot<B>)> {
        zip::zip_shortest((self, other))
    }

    /// Pairs elements until both sides end, with `None` for the side that ended.
    fn zip_longest<B: IntoIterator>(self, other: B) -> ZipLongest<(Slot<Self>, Slot<B>)> {
        zip::zip_longest((self, other))
    }

    /// Pairs elements, yielding an error if the sides differ in length.
    fn equi_zip<B: IntoIterator>(self, other: B) -> EquiZip<(Slot<Self>, Slot<B>)> {
        zip::equi_zip((self, other))
    }

    // ========================================================================
    // Memoization
    // ========================================================================

    /// Shares this iterator between any number of cursors, pulling each
    /// element from it at most once.
    fn memoize(self) -> Memoized<Self>
    where
        Self::Item: Clone,
    {
        Memoized::new(self)
    }

    /// Like [`memoize`](Self::memoize), with the shared buffer bounded by `limits`.
    ///
    /// Cursors yield `Err(ResourceError)` once a limit is exceeded, then end.
    fn memoize_with_limits(self, limits: ResourceLimits) -> Memoized<Self, LimitedTracker>
    where
        Self::Item: Clone,
    {
        Memoized::with_limits(self, limits)
    }

    // ========================================================================
    // Terminal operators
    // ========================================================================

    /// Splits into the first `index` elements and the rest.
    ///
    /// `index` is clamped to `[0, len]`, so negative or oversized indices
    /// put everything on one side.
    ///
    /// ```
    /// use moreseq::SeqExt;
    ///
    /// assert_eq!((1..=4).split_at(1), (vec![1], vec![2, 3, 4]));
    /// assert_eq!((1..=4).split_at(-3), (vec![], vec![1, 2, 3, 4]));
    /// ```
    fn split_at(self, index: isize) -> (Vec<Self::Item>, Vec<Self::Item>) {
        terminal::split_at(self, index)
    }

    /// Reports whether the sequence has zero, one, or more elements, reading
    /// at most two.
    fn try_single(self) -> Cardinality<Self::Item> {
        terminal::try_single(self)
    }

    /// Exactly `N` elements as an array.
    ///
    /// ```
    /// use moreseq::{SeqError, SeqExt};
    ///
    /// let [a, b] = (1..=2).fold_exact().unwrap();
    /// assert_eq!(a + b, 3);
    /// assert_eq!((1..=3).fold_exact::<2>(), Err(SeqError::SequenceTooLong { expected: 2 }));
    /// ```
    fn fold_exact<const N: usize>(self) -> SeqResult<[Self::Item; N]> {
        terminal::fold_exact(self)
    }
}

impl<I: Iterator> SeqExt for I {}
