//! Grouping of adjacent elements that share a key.

use std::iter::Fuse;

use crate::comparer::EqualityComparer;

/// `(key, elements)` for each run of adjacent elements with equal keys.
///
/// A group is emitted as soon as an element with a different key arrives, so
/// only the group being built is ever held. Keys that reappear later start a
/// new group. The key of the first element of a run is the one reported.
#[derive(Clone)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct GroupAdjacent<I, K, E, KF, EF, C> {
    iter: Fuse<I>,
    key: KF,
    element: EF,
    comparer: C,
    pending: Option<(K, E)>,
}

impl<I: Iterator, K, E, KF, EF, C> GroupAdjacent<I, K, E, KF, EF, C> {
    pub(crate) fn new(iter: I, key: KF, element: EF, comparer: C) -> Self {
        Self {
            iter: iter.fuse(),
            key,
            element,
            comparer,
            pending: None,
        }
    }
}

impl<I, K, E, KF, EF, C> Iterator for GroupAdjacent<I, K, E, KF, EF, C>
where
    I: Iterator,
    KF: FnMut(&I::Item) -> K,
    EF: FnMut(I::Item) -> E,
    C: EqualityComparer<K>,
{
    type Item = (K, Vec<E>);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, first) = match self.pending.take() {
            Some(pending) => pending,
            None => {
                let item = self.iter.next()?;
                ((self.key)(&item), (self.element)(item))
            }
        };
        let mut members = vec![first];
        for item in self.iter.by_ref() {
            let next_key = (self.key)(&item);
            let element = (self.element)(item);
            if self.comparer.equals(&key, &next_key) {
                members.push(element);
            } else {
                self.pending = Some((next_key, element));
                break;
            }
        }
        Some((key, members))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DefaultEq;

    #[test]
    fn only_the_open_group_is_held() {
        let source = (0..).map(|n| n / 3);
        let mut groups = GroupAdjacent::new(source, |n: &i32| *n, |n| n * 10, DefaultEq::new());
        assert_eq!(groups.next(), Some((0, vec![0, 0, 0])));
        assert_eq!(groups.pending, Some((1, 10)));
        assert_eq!(groups.next(), Some((1, vec![10, 10, 10])));
    }
}
