//! Tests for the operators that own several sources: zips, interleaves,
//! sorted merges and transposes. Besides the results, these check that every
//! source iterator is released exactly once, including while panicking.

mod common;

use common::{TestingSequence, panics};
use moreseq::{
    ImbalanceStrategy, OrderByDirection, RecordingTracer, SeqError, SeqExt, StderrTracer, TraceEvent, equi_interleave,
    equi_zip, interleave, interleave_padded, interleave_shortest, sorted_merge, sorted_merge_by, transpose,
    zip_longest, zip_shortest,
};
use pretty_assertions::assert_eq;

const FAIL: ImbalanceStrategy = ImbalanceStrategy::Fail;

// =============================================================================
// 1. Zips
// =============================================================================

#[test]
fn zip_shortest_stops_at_the_shortest() {
    let zipped: Vec<_> = zip_shortest((1..=3, "ab".chars(), [true, false, true])).collect();
    assert_eq!(zipped, vec![(1, 'a', true), (2, 'b', false)]);

    let pairs: Vec<_> = [1, 2].into_iter().zip_shortest(["x", "y", "z"]).collect();
    assert_eq!(pairs, vec![(1, "x"), (2, "y")]);
}

#[test]
fn zip_longest_pads_with_none() {
    let zipped: Vec<_> = [1, 2, 3].into_iter().zip_longest(['a']).collect();
    assert_eq!(
        zipped,
        vec![(Some(1), Some('a')), (Some(2), None), (Some(3), None)]
    );

    let four: Vec<_> = zip_longest((vec![1], vec![2], vec![3, 4], Vec::<i32>::new())).collect();
    assert_eq!(
        four,
        vec![(Some(1), Some(2), Some(3), None), (None, None, Some(4), None)]
    );
}

#[test]
fn equi_zip_reports_the_short_source() {
    let second_short: Vec<_> = [1, 2].into_iter().equi_zip([10]).collect();
    assert_eq!(
        second_short,
        vec![Ok((1, 10)), Err(SeqError::Imbalance { source: 1, policy: FAIL })]
    );

    let first_short: Vec<_> = [1].into_iter().equi_zip([10, 20]).collect();
    assert_eq!(
        first_short,
        vec![Ok((1, 10)), Err(SeqError::Imbalance { source: 0, policy: FAIL })]
    );

    let balanced: Result<Vec<_>, _> = equi_zip((1..=3, 4..=6, 7..=9)).collect();
    assert_eq!(balanced, Ok(vec![(1, 4, 7), (2, 5, 8), (3, 6, 9)]));
}

#[test]
fn equi_zip_stops_after_the_error() {
    let mut zip = equi_zip((vec![1, 2, 3], vec![1]));
    assert!(zip.next().is_some_and(|round| round.is_ok()));
    assert!(zip.next().is_some_and(|round| round.is_err()));
    assert_eq!(zip.next(), None);
    assert_eq!(zip.next(), None);
}

#[test]
fn zip_releases_every_source_when_done() {
    let a = TestingSequence::new([1, 2, 3]);
    let b = TestingSequence::new(['a']);
    let (pa, pb) = (a.probe(), b.probe());

    let mut zip = zip_shortest((a, b));
    assert_eq!(zip.next(), Some((1, 'a')));
    assert_eq!((pa.live(), pb.live()), (1, 1));
    assert_eq!(zip.next(), None);
    assert_eq!((pa.live(), pb.live()), (0, 0));
    drop(zip);
    assert_eq!((pa.dropped(), pb.dropped()), (1, 1));
}

#[test]
fn zip_releases_sources_when_dropped_early() {
    let a = TestingSequence::new(0..100);
    let b = TestingSequence::new(0..100);
    let (pa, pb) = (a.probe(), b.probe());

    let first: Vec<_> = zip_longest((a, b)).take(2).collect();
    assert_eq!(first, vec![(Some(0), Some(0)), (Some(1), Some(1))]);
    assert_eq!((pa.opened(), pb.opened()), (1, 1));
    assert_eq!((pa.live(), pb.live()), (0, 0));
}

#[test]
fn zip_explicit_dispose_ends_enumeration() {
    let a = TestingSequence::new([1, 2, 3]);
    let probe = a.probe();
    let mut zip = zip_longest((a, [4, 5, 6]));
    assert_eq!(zip.next(), Some((Some(1), Some(4))));
    zip.dispose();
    assert_eq!(probe.live(), 0);
    assert_eq!(zip.next(), None);
}

#[test]
fn zip_releases_sources_on_panic() {
    let a = TestingSequence::new([1, 2, 3]);
    let b = TestingSequence::new([1, 2, 3]).panicking_at(1);
    let (pa, pb) = (a.probe(), b.probe());

    assert!(panics(|| {
        let _ = zip_shortest((a, b)).count();
    }));
    assert_eq!((pa.opened(), pb.opened()), (1, 1));
    assert_eq!((pa.live(), pb.live()), (0, 0));
}

#[test]
fn zip_releases_opened_sources_when_a_later_open_panics() {
    let a = TestingSequence::new([1]);
    let b = TestingSequence::new([2]).panicking_on_open();
    let pa = a.probe();

    assert!(panics(|| {
        let _ = equi_zip((a, b)).count();
    }));
    assert_eq!(pa.opened(), 1);
    assert_eq!(pa.live(), 0);
}

#[test]
fn zip_tracer_sees_open_exhaust_and_dispose() {
    let tracer = RecordingTracer::new();
    let zipped: Vec<_> = zip_shortest((vec![1, 2], vec![10])).with_tracer(tracer.clone()).collect();
    assert_eq!(zipped, vec![(1, 10)]);
    assert_eq!(
        tracer.events(),
        vec![
            TraceEvent::Open { source: 0 },
            TraceEvent::Open { source: 1 },
            TraceEvent::Exhausted { source: 1 },
            TraceEvent::Dispose { source: 0 },
        ]
    );
}

#[test]
fn zip_opens_every_source_even_when_the_first_is_empty() {
    let a = TestingSequence::new(Vec::<i32>::new());
    let b = TestingSequence::new([1, 2]);
    let (pa, pb) = (a.probe(), b.probe());

    let tracer = RecordingTracer::new();
    let mut zip = zip_shortest((a, b)).with_tracer(tracer.clone());
    assert_eq!(zip.next(), None);
    assert_eq!((pa.opened(), pb.opened()), (1, 1));
    assert_eq!((pa.live(), pb.live()), (0, 0));
    assert_eq!(
        tracer.events(),
        vec![
            TraceEvent::Open { source: 0 },
            TraceEvent::Open { source: 1 },
            TraceEvent::Exhausted { source: 0 },
            TraceEvent::Dispose { source: 1 },
        ]
    );
}

#[test]
fn zip_open_failure_behind_an_empty_source_surfaces() {
    let a = TestingSequence::new(Vec::<i32>::new());
    let b = TestingSequence::new([2]).panicking_on_open();
    let pa = a.probe();

    assert!(panics(|| {
        let _ = zip_shortest((a.clone(), b.clone())).next();
    }));
    assert!(panics(|| {
        let _ = zip_longest((a.clone(), b.clone())).next();
    }));
    assert!(panics(|| {
        let _ = equi_zip((a, b)).next();
    }));
    assert_eq!(pa.opened(), 3);
    assert_eq!(pa.live(), 0);
}

#[test]
fn equi_zip_tracer_records_the_imbalance() {
    let tracer = RecordingTracer::new();
    let zip = equi_zip((vec![1, 2], vec![10])).with_tracer(tracer.clone());
    assert_eq!(zip.filter(Result::is_err).count(), 1);
    assert_eq!(
        tracer.events(),
        vec![
            TraceEvent::Open { source: 0 },
            TraceEvent::Open { source: 1 },
            TraceEvent::Exhausted { source: 1 },
            TraceEvent::Imbalance { source: 1, policy: FAIL },
            TraceEvent::Dispose { source: 0 },
        ]
    );
}

// =============================================================================
// 2. Interleaves
// =============================================================================

#[test]
fn interleave_skips_ended_sources() {
    let mixed: Vec<_> = interleave([vec![1, 4, 6], vec![2], vec![3, 5]]).collect();
    assert_eq!(mixed, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(interleave(Vec::<Vec<i32>>::new()).count(), 0);
    assert_eq!(interleave([Vec::<i32>::new(), vec![]]).count(), 0);
}

#[test]
fn interleave_shortest_stops_at_first_ended_source() {
    let mixed: Vec<_> = interleave_shortest([vec![1, 3, 5], vec![2, 4]]).collect();
    assert_eq!(mixed, vec![1, 2, 3, 4, 5]);
    let none: Vec<_> = interleave_shortest([vec![], vec![1, 2]]).collect();
    assert_eq!(none, Vec::<i32>::new());
}

#[test]
fn interleave_padded_fills_ended_sources() {
    let mixed: Vec<_> = interleave_padded([vec![1, 3, 5], vec![2]], 0).collect();
    assert_eq!(mixed, vec![1, 2, 3, 0, 5, 0]);
    let fill_first: Vec<_> = interleave_padded([vec![], vec!['b', 'd']], '_').collect();
    assert_eq!(fill_first, vec!['_', 'b', '_', 'd']);
}

#[test]
fn equi_interleave_reports_short_sources() {
    let second_short: Vec<_> = equi_interleave([vec![1, 3], vec![2]]).collect();
    assert_eq!(
        second_short,
        vec![Ok(1), Ok(2), Ok(3), Err(SeqError::Imbalance { source: 1, policy: FAIL })]
    );

    let first_short: Vec<_> = equi_interleave([vec![1], vec![2, 4]]).collect();
    assert_eq!(
        first_short,
        vec![Ok(1), Ok(2), Err(SeqError::Imbalance { source: 0, policy: FAIL })]
    );

    let balanced: Result<Vec<_>, _> = equi_interleave([1..=2, 3..=4, 5..=6]).collect();
    assert_eq!(balanced, Ok(vec![1, 3, 5, 2, 4, 6]));
}

#[test]
fn interleave_releases_exhausted_source_immediately() {
    let short = TestingSequence::new([1]);
    let long = TestingSequence::new([2, 3, 4]);
    let (ps, pl) = (short.probe(), long.probe());

    let mut mixed = interleave([short, long]);
    assert_eq!(mixed.next(), Some(1));
    assert_eq!(mixed.next(), Some(2));
    assert_eq!((ps.live(), pl.live()), (1, 1));
    assert_eq!(mixed.next(), Some(3));
    assert_eq!((ps.live(), pl.live()), (0, 1));
    drop(mixed);
    assert_eq!(pl.live(), 0);
}

#[test]
fn interleave_releases_sources_on_panic_at_open() {
    let a = TestingSequence::new([1, 2]);
    let b = TestingSequence::new([3, 4]);
    let c = TestingSequence::new([5]).panicking_on_open();
    let (pa, pb, pc) = (a.probe(), b.probe(), c.probe());

    assert!(panics(|| {
        let _ = interleave([a, b, c]).count();
    }));
    assert_eq!((pa.opened(), pb.opened(), pc.opened()), (1, 1, 0));
    assert_eq!((pa.live(), pb.live()), (0, 0));
}

#[test]
fn interleave_releases_sources_on_panic_at_advance() {
    let a = TestingSequence::new([1, 2, 3]).panicking_at(1);
    let b = TestingSequence::new([4, 5, 6]);
    let (pa, pb) = (a.probe(), b.probe());

    let mut seen = Vec::new();
    assert!(panics(|| {
        for item in interleave_shortest([a, b]) {
            seen.push(item);
        }
    }));
    assert_eq!(seen, vec![1, 4]);
    assert_eq!((pa.live(), pb.live()), (0, 0));
    assert_eq!((pa.dropped(), pb.dropped()), (1, 1));
}

#[test]
fn interleave_tracer_event_order() {
    let tracer = RecordingTracer::new();
    let mixed: Vec<_> = interleave([vec![1, 3], vec![2]]).with_tracer(tracer.clone()).collect();
    assert_eq!(mixed, vec![1, 2, 3]);
    assert_eq!(
        tracer.events(),
        vec![
            TraceEvent::Open { source: 0 },
            TraceEvent::Open { source: 1 },
            TraceEvent::Exhausted { source: 1 },
            TraceEvent::Exhausted { source: 0 },
        ]
    );
}

#[test]
fn dropping_unfinished_interleave_disposes_in_declared_order() {
    let tracer = RecordingTracer::new();
    let mut mixed = equi_interleave([vec![1, 2], vec![3, 4], vec![5, 6]]).with_tracer(tracer.clone());
    assert_eq!(mixed.next(), Some(Ok(1)));
    drop(mixed);
    let disposed: Vec<_> = tracer
        .events()
        .into_iter()
        .filter(|event| matches!(event, TraceEvent::Dispose { .. }))
        .collect();
    assert_eq!(
        disposed,
        vec![
            TraceEvent::Dispose { source: 0 },
            TraceEvent::Dispose { source: 1 },
            TraceEvent::Dispose { source: 2 },
        ]
    );
}

#[test]
fn stderr_tracer_does_not_change_results() {
    let mixed: Vec<_> = interleave_padded([vec![1], vec![2, 3]], 0)
        .with_tracer(StderrTracer::new())
        .collect();
    assert_eq!(mixed, vec![1, 2, 0, 3]);
}

// =============================================================================
// 3. Sorted merge
// =============================================================================

#[test]
fn sorted_merge_ascending() {
    let merged: Vec<_> = sorted_merge(
        OrderByDirection::Ascending,
        [vec![1, 4, 7], vec![2, 5, 8], vec![3, 6, 9]],
    )
    .collect();
    assert_eq!(merged, (1..=9).collect::<Vec<_>>());
}

#[test]
fn sorted_merge_descending_with_uneven_sources() {
    let merged: Vec<_> = sorted_merge(OrderByDirection::Descending, [vec![9, 5, 1], vec![8, 2], vec![]]).collect();
    assert_eq!(merged, vec![9, 8, 5, 2, 1]);
}

#[test]
fn sorted_merge_with_custom_order() {
    let merged: Vec<_> = sorted_merge_by(
        OrderByDirection::Ascending,
        |a: &&str, b: &&str| a.len().cmp(&b.len()),
        [vec!["a", "ccc"], vec!["bb", "dddd"]],
    )
    .collect();
    assert_eq!(merged, vec!["a", "bb", "ccc", "dddd"]);
}

#[test]
fn sorted_merge_of_nothing() {
    assert_eq!(sorted_merge(OrderByDirection::Ascending, Vec::<Vec<i32>>::new()).count(), 0);
}

#[test]
fn sorted_merge_releases_sources_on_panic() {
    let a = TestingSequence::new([1, 3, 5]);
    let b = TestingSequence::new([2, 4, 6]).panicking_at(1);
    let (pa, pb) = (a.probe(), b.probe());

    let mut seen = Vec::new();
    assert!(panics(|| {
        for item in sorted_merge(OrderByDirection::Ascending, [a, b]) {
            seen.push(item);
        }
    }));
    assert_eq!(seen, vec![1]);
    assert_eq!((pa.live(), pb.live()), (0, 0));
}

// =============================================================================
// 4. Transpose
// =============================================================================

#[test]
fn transpose_skips_short_rows() {
    let columns: Vec<_> = transpose([vec![10, 11], vec![20], vec![30, 31, 32]]).collect();
    assert_eq!(columns, vec![vec![10, 20, 30], vec![11, 31], vec![32]]);
}

#[test]
fn transpose_of_square_matrix() {
    let columns: Vec<_> = transpose([[1, 2, 3], [4, 5, 6], [7, 8, 9]]).collect();
    assert_eq!(columns, vec![vec![1, 4, 7], vec![2, 5, 8], vec![3, 6, 9]]);
    assert_eq!(transpose(Vec::<Vec<u8>>::new()).count(), 0);
}

#[test]
fn transpose_releases_rows_on_panic_at_open() {
    let a = TestingSequence::new([1]);
    let b = TestingSequence::new([2]);
    let c = TestingSequence::new([3]).panicking_on_open();
    let (pa, pb) = (a.probe(), b.probe());

    assert!(panics(|| {
        let _ = transpose([a, b, c]).count();
    }));
    assert_eq!((pa.opened(), pb.opened()), (1, 1));
    assert_eq!((pa.live(), pb.live()), (0, 0));
}

#[test]
fn transpose_tracer_counts() {
    let tracer = RecordingTracer::new();
    let columns = transpose([vec![1, 2], vec![3]]).with_tracer(tracer.clone()).count();
    assert_eq!(columns, 2);
    assert_eq!(tracer.count(|event| matches!(event, TraceEvent::Open { .. })), 2);
    assert_eq!(tracer.count(|event| matches!(event, TraceEvent::Exhausted { .. })), 2);
    assert_eq!(tracer.count(|event| matches!(event, TraceEvent::Dispose { .. })), 0);
}
