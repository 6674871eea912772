//! Outer joins by key.
//!
//! Every join indexes one side completely and then streams the other side
//! through the index. The index is built on the first call to `next`, so
//! creating a join touches neither input. Matches come out in the order the
//! indexed side listed them; keys are hashed and compared through a
//! [`HashEqualityComparer`].

use std::{iter::Fuse, mem, vec};

use crate::{comparer::HashEqualityComparer, lookup::Lookup};

/// One row of an outer join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Joined<L, R> {
    /// A left element without a matching right element.
    Left(L),
    /// A right element without a matching left element.
    Right(R),
    /// A left element and one of its matching right elements.
    Both(L, R),
}

impl<L, R> Joined<L, R> {
    /// Swaps the two sides.
    #[must_use]
    pub fn flip(self) -> Joined<R, L> {
        match self {
            Self::Left(left) => Joined::Right(left),
            Self::Right(right) => Joined::Left(right),
            Self::Both(left, right) => Joined::Both(right, left),
        }
    }

    /// The left element, if there is one.
    #[must_use]
    pub fn left(&self) -> Option<&L> {
        match self {
            Self::Left(left) | Self::Both(left, _) => Some(left),
            Self::Right(_) => None,
        }
    }

    /// The right element, if there is one.
    #[must_use]
    pub fn right(&self) -> Option<&R> {
        match self {
            Self::Right(right) | Self::Both(_, right) => Some(right),
            Self::Left(_) => None,
        }
    }
}

/// Streams a probe side through an index over a build side.
struct JoinEngine<P: Iterator, B: Iterator, K, PF, BF, C> {
    probe: Fuse<P>,
    build: Option<B>,
    probe_key: PF,
    build_key: BF,
    /// key -> positions in `items`
    index: Lookup<K, usize, C>,
    /// build elements in input order, each with its index entry
    items: Vec<(usize, B::Item)>,
    /// per index entry: whether a probe element has matched it
    matched: Vec<bool>,
    /// probe element with matches still to emit: (element, entry, next match)
    current: Option<(P::Item, usize, usize)>,
    /// unmatched build elements, once the probe side is done
    trailing: Option<vec::IntoIter<(usize, B::Item)>>,
    outer: bool,
}

impl<P, B, K, PF, BF, C> JoinEngine<P, B, K, PF, BF, C>
where
    P: Iterator,
    B: Iterator,
    P::Item: Clone,
    B::Item: Clone,
    PF: FnMut(&P::Item) -> K,
    BF: FnMut(&B::Item) -> K,
    C: HashEqualityComparer<K>,
{
    fn new(probe: P, build: B, probe_key: PF, build_key: BF, comparer: C, outer: bool) -> Self {
        Self {
            probe: probe.fuse(),
            build: Some(build),
            probe_key,
            build_key,
            index: Lookup::new(comparer),
            items: Vec::new(),
            matched: Vec::new(),
            current: None,
            trailing: None,
            outer,
        }
    }

    fn build_index(&mut self) {
        let Some(build) = self.build.take() else {
            return;
        };
        for item in build {
            let key = (self.build_key)(&item);
            let entry = self.index.push(key, self.items.len());
            self.items.push((entry, item));
        }
        self.matched = vec![false; self.index.len()];
    }

    fn next_joined(&mut self) -> Option<Joined<P::Item, B::Item>> {
        self.build_index();
        if let Some(trailing) = &mut self.trailing {
            let matched = &self.matched;
            return trailing
                .find(|(entry, _)| !matched[*entry])
                .map(|(_, item)| Joined::Right(item));
        }

        if let Some((item, entry, position)) = self.current.take() {
            let matches = self.index.value(entry);
            let other = self.items[matches[position]].1.clone();
            if position + 1 < matches.len() {
                self.current = Some((item.clone(), entry, position + 1));
            }
            return Some(Joined::Both(item, other));
        }

        let Some(item) = self.probe.next() else {
            if self.outer {
                self.trailing = Some(mem::take(&mut self.items).into_iter());
                return self.next_joined();
            }
            return None;
        };
        let key = (self.probe_key)(&item);
        match self.index.find(&key).0 {
            Some(entry) => {
                self.matched[entry] = true;
                self.current = Some((item, entry, 0));
                self.next_joined()
            }
            None => Some(Joined::Left(item)),
        }
    }
}

/// Left outer join: every left element, paired with each matching right
/// element or alone.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct LeftJoin<LI: Iterator, RI: Iterator, K, LF, RF, C> {
    engine: JoinEngine<LI, RI, K, LF, RF, C>,
}

impl<LI, RI, K, LF, RF, C> Iterator for LeftJoin<LI, RI, K, LF, RF, C>
where
    LI: Iterator,
    RI: Iterator,
    LI::Item: Clone,
    RI::Item: Clone,
    LF: FnMut(&LI::Item) -> K,
    RF: FnMut(&RI::Item) -> K,
    C: HashEqualityComparer<K>,
{
    type Item = Joined<LI::Item, RI::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        self.engine.next_joined()
    }
}

/// Right outer join: every right element, paired with each matching left
/// element or alone.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct RightJoin<LI: Iterator, RI: Iterator, K, LF, RF, C> {
    engine: JoinEngine<RI, LI, K, RF, LF, C>,
}

impl<LI, RI, K, LF, RF, C> Iterator for RightJoin<LI, RI, K, LF, RF, C>
where
    LI: Iterator,
    RI: Iterator,
    LI::Item: Clone,
    RI::Item: Clone,
    LF: FnMut(&LI::Item) -> K,
    RF: FnMut(&RI::Item) -> K,
    C: HashEqualityComparer<K>,
{
    type Item = Joined<LI::Item, RI::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        self.engine.next_joined().map(Joined::flip)
    }
}

/// Full outer join: matched pairs and unmatched left elements in left order,
/// then unmatched right elements in right order.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct FullJoin<LI: Iterator, RI: Iterator, K, LF, RF, C> {
    engine: JoinEngine<LI, RI, K, LF, RF, C>,
}

impl<LI, RI, K, LF, RF, C> Iterator for FullJoin<LI, RI, K, LF, RF, C>
where
    LI: Iterator,
    RI: Iterator,
    LI::Item: Clone,
    RI::Item: Clone,
    LF: FnMut(&LI::Item) -> K,
    RF: FnMut(&RI::Item) -> K,
    C: HashEqualityComparer<K>,
{
    type Item = Joined<LI::Item, RI::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        self.engine.next_joined()
    }
}

pub(crate) fn left_join<LI, RI, K, LF, RF, C>(
    left: LI,
    right: RI,
    left_key: LF,
    right_key: RF,
    comparer: C,
) -> LeftJoin<LI, RI, K, LF, RF, C>
where
    LI: Iterator,
    RI: Iterator,
    LI::Item: Clone,
    RI::Item: Clone,
    LF: FnMut(&LI::Item) -> K,
    RF: FnMut(&RI::Item) -> K,
    C: HashEqualityComparer<K>,
{
    LeftJoin {
        engine: JoinEngine::new(left, right, left_key, right_key, comparer, false),
    }
}

pub(crate) fn right_join<LI, RI, K, LF, RF, C>(
    left: LI,
    right: RI,
    left_key: LF,
    right_key: RF,
    comparer: C,
) -> RightJoin<LI, RI, K, LF, RF, C>
where
    LI: Iterator,
    RI: Iterator,
    LI::Item: Clone,
    RI::Item: Clone,
    LF: FnMut(&LI::Item) -> K,
    RF: FnMut(&RI::Item) -> K,
    C: HashEqualityComparer<K>,
{
    RightJoin {
        engine: JoinEngine::new(right, left, right_key, left_key, comparer, false),
    }
}

pub(crate) fn full_join<LI, RI, K, LF, RF, C>(
    left: LI,
    right: RI,
    left_key: LF,
    right_key: RF,
    comparer: C,
) -> FullJoin<LI, RI, K, LF, RF, C>
where
    LI: Iterator,
    RI: Iterator,
    LI::Item: Clone,
    RI::Item: Clone,
    LF: FnMut(&LI::Item) -> K,
    RF: FnMut(&RI::Item) -> K,
    C: HashEqualityComparer<K>,
{
    FullJoin {
        engine: JoinEngine::new(left, right, left_key, right_key, comparer, true),
    }
}

/// `(key, left elements, right elements)` for every key found on either side.
///
/// Keys come in the order they first appear on the left, followed by keys that
/// only appear on the right, in right order. Both inputs are read completely
/// on the first call to `next`.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct FullGroupJoin<LI: Iterator, RI: Iterator, K, LF, RF, C> {
    inputs: Option<(LI, RI, LF, RF, C)>,
    groups: vec::IntoIter<(K, (Vec<LI::Item>, Vec<RI::Item>))>,
}

pub(crate) fn full_group_join<LI, RI, K, LF, RF, C>(
    left: LI,
    right: RI,
    left_key: LF,
    right_key: RF,
    comparer: C,
) -> FullGroupJoin<LI, RI, K, LF, RF, C>
where
    LI: Iterator,
    RI: Iterator,
{
    FullGroupJoin {
        inputs: Some((left, right, left_key, right_key, comparer)),
        groups: Vec::new().into_iter(),
    }
}

impl<LI, RI, K, LF, RF, C> Iterator for FullGroupJoin<LI, RI, K, LF, RF, C>
where
    LI: Iterator,
    RI: Iterator,
    LF: FnMut(&LI::Item) -> K,
    RF: FnMut(&RI::Item) -> K,
    C: HashEqualityComparer<K>,
{
    type Item = (K, Vec<LI::Item>, Vec<RI::Item>);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((left, right, mut left_key, mut right_key, comparer)) = self.inputs.take() {
            let mut groups = crate::lookup::KeyedMap::new(comparer);
            for item in left {
                let index = groups.index_or_insert_with(left_key(&item), |_| (Vec::new(), Vec::new()));
                groups.value_mut(index).0.push(item);
            }
            for item in right {
                let index = groups.index_or_insert_with(right_key(&item), |_| (Vec::new(), Vec::new()));
                groups.value_mut(index).1.push(item);
            }
            self.groups = groups.into_entries().collect::<Vec<_>>().into_iter();
        }
        self.groups.next().map(|(key, (left, right))| (key, left, right))
    }
}
