//! Dense ranking.

use std::{cmp::Ordering, vec};

/// Pairs each element with its dense rank, in source order.
///
/// Ranks are assigned in descending key order: the largest key gets rank 1,
/// equal keys share a rank, and the next distinct key gets the next rank with
/// no gaps. The source is read completely on the first call to `next`.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Rank<I: Iterator, KF, CF> {
    source: Option<I>,
    key: KF,
    compare: CF,
    ranked: vec::IntoIter<(I::Item, usize)>,
}

impl<I: Iterator, KF, CF> Rank<I, KF, CF> {
    pub(crate) fn new(iter: I, key: KF, compare: CF) -> Self {
        Self {
            source: Some(iter),
            key,
            compare,
            ranked: Vec::new().into_iter(),
        }
    }
}

impl<I, K, KF, CF> Rank<I, KF, CF>
where
    I: Iterator,
    KF: FnMut(&I::Item) -> K,
    CF: FnMut(&K, &K) -> Ordering,
{
    fn materialize(&mut self, source: I) {
        let keyed: Vec<(I::Item, K)> = source
            .map(|item| {
                let key = (self.key)(&item);
                (item, key)
            })
            .collect();

        let mut order: Vec<usize> = (0..keyed.len()).collect();
        order.sort_by(|&a, &b| (self.compare)(&keyed[b].1, &keyed[a].1));

        let mut ranks = vec![0; keyed.len()];
        let mut rank = 0;
        let mut previous: Option<usize> = None;
        for &index in &order {
            let tied = previous.is_some_and(|p| (self.compare)(&keyed[p].1, &keyed[index].1).is_eq());
            if !tied {
                rank += 1;
            }
            ranks[index] = rank;
            previous = Some(index);
        }

        self.ranked = keyed
            .into_iter()
            .zip(ranks)
            .map(|((item, _), rank)| (item, rank))
            .collect::<Vec<_>>()
            .into_iter();
    }
}

impl<I, K, KF, CF> Iterator for Rank<I, KF, CF>
where
    I: Iterator,
    KF: FnMut(&I::Item) -> K,
    CF: FnMut(&K, &K) -> Ordering,
{
    type Item = (I::Item, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(source) = self.source.take() {
            self.materialize(source);
        }
        self.ranked.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.source {
            Some(source) => source.size_hint(),
            None => self.ranked.size_hint(),
        }
    }
}
