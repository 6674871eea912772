//! Tests for the bounded-state operators: windows, lag/lead, buckets, tails,
//! padding and run-length encoding.

use moreseq::{EqBy, SeqError, SeqExt};
use pretty_assertions::assert_eq;

// =============================================================================
// 1. Sliding windows
// =============================================================================

#[test]
fn window_left_shrinks_at_the_tail() {
    let windows: Vec<_> = (1..=5).window_left(3).unwrap().collect();
    assert_eq!(
        windows,
        vec![vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5], vec![4, 5], vec![5]]
    );
}

#[test]
fn window_right_grows_from_the_head() {
    let windows: Vec<_> = (1..=5).window_right(3).unwrap().collect();
    assert_eq!(
        windows,
        vec![vec![1], vec![1, 2], vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5]]
    );
}

#[test]
fn window_yields_only_full_windows() {
    let windows: Vec<_> = (1..=5).window(3).unwrap().collect();
    assert_eq!(windows, vec![vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5]]);
    assert_eq!((1..=2).window(3).unwrap().count(), 0);
}

/// For a sequence of length L, window i of `window_left(n)` has
/// `min(n, L - i)` elements and `window_right(n)` has `min(n, i + 1)`.
#[test]
fn window_size_laws() {
    for len in 0..9_usize {
        for size in 1..6_usize {
            let left: Vec<_> = (0..len).window_left(size).unwrap().collect();
            assert_eq!(left.len(), len, "window_left({size}) over {len}");
            for (i, window) in left.iter().enumerate() {
                assert_eq!(window.len(), size.min(len - i));
                assert_eq!(window[0], i);
            }

            let right: Vec<_> = (0..len).window_right(size).unwrap().collect();
            assert_eq!(right.len(), len, "window_right({size}) over {len}");
            for (i, window) in right.iter().enumerate() {
                assert_eq!(window.len(), size.min(i + 1));
                assert_eq!(window.last(), Some(&i));
            }

            let full = (0..len).window(size).unwrap().count();
            assert_eq!(full, (len + 1).saturating_sub(size));
        }
    }
}

#[test]
fn windows_are_independent_snapshots() {
    let mut windows: Vec<_> = (1..=5).window_left(3).unwrap().collect();
    windows[0][0] = 99;
    windows[1].push(100);
    assert_eq!(windows[2], vec![3, 4, 5]);
    assert_eq!(windows[0], vec![99, 2, 3]);

    let mut right: Vec<_> = (1..=3).window_right(2).unwrap().collect();
    right[1].clear();
    assert_eq!(right, vec![vec![1], vec![], vec![2, 3]]);
}

#[test]
fn windows_work_on_infinite_sources() {
    let left: Vec<_> = (0..).window_left(2).unwrap().take(3).collect();
    assert_eq!(left, vec![vec![0, 1], vec![1, 2], vec![2, 3]]);
    let right: Vec<_> = (0..).window_right(2).unwrap().take(2).collect();
    assert_eq!(right, vec![vec![0], vec![0, 1]]);
    let full: Vec<_> = (0..).window(2).unwrap().nth(10).unwrap();
    assert_eq!(full, vec![10, 11]);
}

#[test]
fn zero_sized_windows_are_rejected() {
    for result in [
        (1..3).window(0).map(|_| ()),
        (1..3).window_left(0).map(|_| ()),
        (1..3).window_right(0).map(|_| ()),
    ] {
        let err = result.unwrap_err();
        assert_eq!(err.param(), Some("size"));
        assert!(err.is_argument_error());
    }
}

#[test]
fn pairwise_sees_consecutive_pairs() {
    let gaps: Vec<_> = [1, 4, 9, 16].into_iter().pairwise(|a, b| b - a).collect();
    assert_eq!(gaps, vec![3, 5, 7]);
    assert_eq!([1].into_iter().pairwise(|a, b| a + b).count(), 0);
}

// =============================================================================
// 2. Lag and lead
// =============================================================================

#[test]
fn lag_pairs_with_earlier_elements() {
    let pairs: Vec<_> = (1..=5).lag(2, 0, |cur, lagged| (cur, lagged)).unwrap().collect();
    assert_eq!(pairs, vec![(1, 0), (2, 0), (3, 1), (4, 2), (5, 3)]);
}

#[test]
fn lead_pairs_with_later_elements() {
    let pairs: Vec<_> = (1..=5).lead(2, 0, |cur, lead| (cur, lead)).unwrap().collect();
    assert_eq!(pairs, vec![(1, 3), (2, 4), (3, 5), (4, 0), (5, 0)]);
}

#[test]
fn lag_and_lead_with_offset_past_the_end() {
    let lagged: Vec<_> = (1..=2).lag(5, -1, |a, b| (a, b)).unwrap().collect();
    assert_eq!(lagged, vec![(1, -1), (2, -1)]);
    let led: Vec<_> = (1..=2).lead(5, -1, |a, b| (a, b)).unwrap().collect();
    assert_eq!(led, vec![(1, -1), (2, -1)]);
}

#[test]
fn lag_and_lead_work_on_infinite_sources() {
    let lagged = (0..).lag(1, 0, |a, b| a - b).unwrap().nth(100);
    assert_eq!(lagged, Some(1));
    let led = (0..).lead(3, 0, |a, b| b - a).unwrap().nth(100);
    assert_eq!(led, Some(3));
}

#[test]
fn zero_offsets_are_rejected() {
    let lag = (1..3).lag(0, 0, |a, b| a + b).map(|_| ()).unwrap_err();
    let lead = (1..3).lead(0, 0, |a, b| a + b).map(|_| ()).unwrap_err();
    assert_eq!(lag.param(), Some("offset"));
    assert_eq!(lead.param(), Some("offset"));
    assert_eq!(
        lag,
        SeqError::ArgumentOutOfRange {
            param: "offset",
            value: 0,
            expected: "a value >= 1",
        }
    );
}

// =============================================================================
// 3. Buckets
// =============================================================================

#[test]
fn batch_emits_trailing_partial_bucket() {
    let batches: Vec<_> = (1..=7).batch(3).unwrap().collect();
    assert_eq!(batches, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]);
    assert_eq!((1..=6).batch(3).unwrap().size_hint(), (2, Some(2)));
    assert_eq!((1..=6).batch(0).map(|_| ()).unwrap_err().param(), Some("size"));
}

#[test]
fn batch_works_on_infinite_sources() {
    let third = (0..).batch(2).unwrap().nth(2);
    assert_eq!(third, Some(vec![4, 5]));
}

#[test]
fn batch_while_closes_on_rejected_element() {
    let sums: Vec<i32> = [1, 2, 3, 1, 2, 3, 4, 1, 2, 3, 4, 5]
        .into_iter()
        .batch_while(|next, bucket| bucket.last().is_some_and(|last| next > last))
        .map(|bucket| bucket.iter().sum())
        .collect();
    assert_eq!(sums, vec![6, 10, 15]);
}

#[test]
fn batch_while_never_sees_an_empty_bucket() {
    let mut smallest_bucket = usize::MAX;
    let batches: Vec<_> = (0..10)
        .batch_while(|_, bucket| {
            smallest_bucket = smallest_bucket.min(bucket.len());
            bucket.len() < 4
        })
        .collect();
    assert_eq!(smallest_bucket, 1);
    assert_eq!(batches, vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7], vec![8, 9]]);
}

#[test]
fn segment_splits_on_predicate() {
    let runs: Vec<_> = [1, 2, 4, 5, 7]
        .into_iter()
        .segment(|cur, prev, _| cur - prev > 1)
        .collect();
    assert_eq!(runs, vec![vec![1, 2], vec![4, 5], vec![7]]);

    let by_index: Vec<_> = (0..7).segment(|_, _, index| index % 3 == 0).collect();
    assert_eq!(by_index, vec![vec![0, 1, 2], vec![3, 4, 5], vec![6]]);
}

// =============================================================================
// 4. Tails and padding
// =============================================================================

#[test]
fn count_down_marks_the_last_elements() {
    let expected = vec![(1, None), (2, None), (3, Some(2)), (4, Some(1)), (5, Some(0))];

    let known: Vec<_> = (1..=5).count_down(3, |x, n| (x, n)).collect();
    assert_eq!(known, expected);

    let unknown: Vec<_> = (1..=5).filter(|_| true).count_down(3, |x, n| (x, n)).collect();
    assert_eq!(unknown, expected);
}

#[test]
fn count_down_longer_than_the_sequence() {
    let marks: Vec<_> = (1..=2).filter(|_| true).count_down(5, |_, n| n).collect();
    assert_eq!(marks, vec![Some(1), Some(0)]);
    let none: Vec<_> = (1..=3).count_down(0, |_, n| n).collect();
    assert_eq!(none, vec![None, None, None]);
}

#[test]
fn take_last_and_skip_last() {
    assert_eq!((1..=5).take_last(2).collect::<Vec<_>>(), vec![4, 5]);
    assert_eq!((1..=5).take_last(0).count(), 0);
    assert_eq!((1..=3).take_last(10).collect::<Vec<_>>(), vec![1, 2, 3]);

    assert_eq!((1..=5).skip_last(2).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!((1..=5).skip_last(0).count(), 5);
    assert_eq!((1..=3).skip_last(10).count(), 0);
}

#[test]
fn pad_and_pad_start() {
    assert_eq!([1, 2].into_iter().pad(4, 0).collect::<Vec<_>>(), vec![1, 2, 0, 0]);
    assert_eq!([1, 2, 3].into_iter().pad(2, 0).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!([1, 2].into_iter().pad_start(4, 0).collect::<Vec<_>>(), vec![0, 0, 1, 2]);
    assert_eq!([1, 2, 3].into_iter().pad_start(2, 0).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(std::iter::empty().pad_start(2, 'x').collect::<String>(), "xx");
}

// =============================================================================
// 5. Run-length encoding
// =============================================================================

#[test]
fn run_length_encode_scenario() {
    let runs: Vec<_> = [1, 2, 2, 3, 3, 3].into_iter().run_length_encode().collect();
    assert_eq!(runs, vec![(1, 1), (2, 2), (3, 3)]);
}

#[test]
fn run_lengths_sum_to_input_length() {
    let inputs: [&[i32]; 5] = [&[], &[7], &[1, 1, 1], &[1, 2, 1, 2], &[5, 5, 6, 6, 6, 5, 5, 5, 5]];
    for input in inputs {
        let total: usize = input.iter().run_length_encode().map(|(_, run)| run).sum();
        assert_eq!(total, input.len(), "input {input:?}");
    }
}

#[test]
fn run_length_encode_on_infinite_source() {
    let mut runs = (0_u64..).run_length_encode();
    assert_eq!(runs.next(), Some((0, 1)));
    assert_eq!(runs.size_hint(), (1, None));
    let next: Vec<_> = runs.by_ref().take(3).collect();
    assert_eq!(next, vec![(1, 1), (2, 1), (3, 1)]);
}

#[test]
fn run_length_encode_with_comparer() {
    let nocase = EqBy::new(|s: &&str| s.to_lowercase());
    let runs: Vec<_> = ["a", "A", "b", "B", "a"].into_iter().run_length_encode_by(nocase).collect();
    assert_eq!(runs, vec![("a", 2), ("b", 2), ("a", 1)]);
}

#[test]
fn optional_values_are_encoded_like_any_other() {
    let runs: Vec<_> = [None, None, Some(1), None].into_iter().run_length_encode().collect();
    assert_eq!(runs, vec![(None, 2), (Some(1), 1), (None, 1)]);
}
