//! Zipping two to four sources of possibly different element types.
//!
//! Sources are passed as a tuple and each one is held in its own [`Slot`].
//! The first advance opens every source in declared order, even when an
//! early one turns out to be empty. Within a round, sources are advanced in
//! declared order. What happens when
//! the sources turn out to have different lengths depends on the adapter:
//!
//! | Adapter | Policy | Item |
//! |---------|--------|------|
//! | [`ZipShortest`] | [`Truncate`](crate::ImbalanceStrategy::Truncate) | `(A, B, ..)` |
//! | [`ZipLongest`] | [`Pad`](crate::ImbalanceStrategy::Pad) | `(Option<A>, Option<B>, ..)` |
//! | [`EquiZip`] | [`Fail`](crate::ImbalanceStrategy::Fail) | `SeqResult<(A, B, ..)>` |
//!
//! A source that runs dry has its iterator dropped on the spot. Whatever is
//! still open when the adapter finishes or is dropped is released in declared
//! order.

use std::mem;

use crate::{
    ImbalanceStrategy,
    error::{SeqError, SeqResult},
    lifecycle::Slot,
    tracer::{NoopTracer, SeqTracer},
};

/// A tuple of sources that can be zipped.
pub trait IntoZipSources {
    /// The slot tuple holding the sources.
    type Slots: ZipSources;

    fn into_slots(self) -> Self::Slots;
}

/// A tuple of [`Slot`]s advanced together, one round at a time.
pub trait ZipSources: Default {
    /// One element from every source.
    type Items;
    /// One element from every source that still had one.
    type Padded;

    /// Opens every source still unopened, in declared order.
    fn open_all(&mut self, tracer: &mut impl SeqTracer);

    /// Advances in order, stopping at the first source that has ended.
    fn next_truncated(&mut self, tracer: &mut impl SeqTracer) -> Option<Self::Items>;

    /// Advances every source; `None` once all of them have ended.
    fn next_padded(&mut self, tracer: &mut impl SeqTracer) -> Option<Self::Padded>;

    /// Advances every source. A round in which only some sources ended
    /// reports the first of them as `Err(index)`.
    fn next_equal(&mut self, tracer: &mut impl SeqTracer) -> Option<Result<Self::Items, usize>>;

    /// Releases every open source in declared order.
    fn dispose(&mut self, tracer: &mut impl SeqTracer);
}

macro_rules! zip_sources {
    ($($S:ident $s:ident $idx:tt),+) => {
        impl<$($S: IntoIterator),+> IntoZipSources for ($($S,)+) {
            type Slots = ($(Slot<$S>,)+);

            fn into_slots(self) -> Self::Slots {
                let ($($s,)+) = self;
                ($(Slot::new($s),)+)
            }
        }

        impl<$($S: IntoIterator),+> ZipSources for ($(Slot<$S>,)+) {
            type Items = ($($S::Item,)+);
            type Padded = ($(Option<$S::Item>,)+);

            fn open_all(&mut self, tracer: &mut impl SeqTracer) {
                $(self.$idx.open($idx, tracer);)+
            }

            fn next_truncated(&mut self, tracer: &mut impl SeqTracer) -> Option<Self::Items> {
                Some(($(self.$idx.advance($idx, tracer)?,)+))
            }

            fn next_padded(&mut self, tracer: &mut impl SeqTracer) -> Option<Self::Padded> {
                let padded = ($(self.$idx.advance($idx, tracer),)+);
                if $(padded.$idx.is_none())&&+ {
                    return None;
                }
                Some(padded)
            }

            fn next_equal(&mut self, tracer: &mut impl SeqTracer) -> Option<Result<Self::Items, usize>> {
                let ($($s,)+) = ($(self.$idx.advance($idx, tracer),)+);
                let mut first_missing = None;
                $(
                    if $s.is_none() && first_missing.is_none() {
                        first_missing = Some($idx);
                    }
                )+
                match first_missing {
                    None => Some(Ok(($($s?,)+))),
                    Some(_) if $($s.is_none())&&+ => None,
                    Some(source) => Some(Err(source)),
                }
            }

            fn dispose(&mut self, tracer: &mut impl SeqTracer) {
                $(self.$idx.dispose($idx, tracer);)+
            }
        }
    };
}

zip_sources!(A a 0, B b 1);
zip_sources!(A a 0, B b 1, C c 2);
zip_sources!(A a 0, B b 1, C c 2, D d 3);

/// Shared state of the zip adapters: the slots, the tracer and progress flags.
#[derive(Debug)]
struct ZipCore<S: ZipSources, Tr: SeqTracer> {
    sources: S,
    tracer: Tr,
    opened: bool,
    done: bool,
}

impl<S: ZipSources, Tr: SeqTracer> ZipCore<S, Tr> {
    fn new(sources: S, tracer: Tr) -> Self {
        Self {
            sources,
            tracer,
            opened: false,
            done: false,
        }
    }

    fn retrace<T2: SeqTracer>(mut self, tracer: T2) -> ZipCore<S, T2> {
        ZipCore {
            sources: mem::take(&mut self.sources),
            tracer,
            opened: self.opened,
            done: self.done,
        }
    }

    /// Returns false once the adapter has finished; otherwise makes sure
    /// every source is open before the round starts.
    fn begin_round(&mut self) -> bool {
        if self.done {
            return false;
        }
        if !self.opened {
            self.opened = true;
            self.sources.open_all(&mut self.tracer);
        }
        true
    }

    fn finish(&mut self) {
        self.done = true;
        self.sources.dispose(&mut self.tracer);
    }
}

impl<S: ZipSources, Tr: SeqTracer> Drop for ZipCore<S, Tr> {
    fn drop(&mut self) {
        self.sources.dispose(&mut self.tracer);
    }
}

macro_rules! zip_adapter {
    ($(#[$meta:meta])* $name:ident, $ctor:ident) => {
        $(#[$meta])*
        #[derive(Debug)]
        #[must_use = "iterators are lazy and do nothing unless consumed"]
        pub struct $name<S: ZipSources, Tr: SeqTracer = NoopTracer> {
            core: ZipCore<S, Tr>,
        }

        impl<S: ZipSources, Tr: SeqTracer> $name<S, Tr> {
            /// Reports source lifecycle events to `tracer`.
            pub fn with_tracer<T2: SeqTracer>(self, tracer: T2) -> $name<S, T2> {
                $name {
                    core: self.core.retrace(tracer),
                }
            }

            /// Releases every source still open. Later calls to `next` return `None`.
            pub fn dispose(&mut self) {
                self.core.finish();
            }

            /// The tracer receiving lifecycle events.
            #[must_use]
            pub fn tracer(&self) -> &Tr {
                &self.core.tracer
            }
        }

        /// Starts zipping the given tuple of sources.
        pub fn $ctor<T: IntoZipSources>(sources: T) -> $name<T::Slots> {
            $name {
                core: ZipCore::new(sources.into_slots(), NoopTracer),
            }
        }
    };
}

zip_adapter!(
    /// Zips sources until the shortest one ends.
    ///
    /// Once a source ends, later sources are not advanced for that round and
    /// the partial round is discarded.
    ///
    /// ```
    /// use moreseq::zip_shortest;
    ///
    /// let pairs: Vec<_> = zip_shortest((1..=3, "ab".chars())).collect();
    /// assert_eq!(pairs, [(1, 'a'), (2, 'b')]);
    /// ```
    ZipShortest,
    zip_shortest
);

zip_adapter!(
    /// Zips sources until the longest one ends, with `None` standing in for
    /// sources that have already ended.
    ZipLongest,
    zip_longest
);

zip_adapter!(
    /// Zips sources that must all have the same length.
    ///
    /// Yields `Err(SeqError::Imbalance)` for the first round in which some but
    /// not all sources have ended, then stops.
    EquiZip,
    equi_zip
);

impl<S: ZipSources, Tr: SeqTracer> Iterator for ZipShortest<S, Tr> {
    type Item = S::Items;

    fn next(&mut self) -> Option<S::Items> {
        if !self.core.begin_round() {
            return None;
        }
        let items = self.core.sources.next_truncated(&mut self.core.tracer);
        if items.is_none() {
            self.core.finish();
        }
        items
    }
}

impl<S: ZipSources, Tr: SeqTracer> Iterator for ZipLongest<S, Tr> {
    type Item = S::Padded;

    fn next(&mut self) -> Option<S::Padded> {
        if !self.core.begin_round() {
            return None;
        }
        let items = self.core.sources.next_padded(&mut self.core.tracer);
        if items.is_none() {
            self.core.finish();
        }
        items
    }
}

impl<S: ZipSources, Tr: SeqTracer> Iterator for EquiZip<S, Tr> {
    type Item = SeqResult<S::Items>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.core.begin_round() {
            return None;
        }
        match self.core.sources.next_equal(&mut self.core.tracer) {
            Some(Ok(items)) => Some(Ok(items)),
            Some(Err(source)) => {
                let policy = ImbalanceStrategy::Fail;
                self.core.tracer.on_imbalance(source, policy);
                self.core.finish();
                Some(Err(SeqError::Imbalance { source, policy }))
            }
            None => {
                self.core.finish();
                None
            }
        }
    }
}
