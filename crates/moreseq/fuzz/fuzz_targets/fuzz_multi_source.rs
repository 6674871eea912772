//! Fuzz target: multi-source operators over byte strings split on zero.
//!
//! Up to eight sources are cut from the input. Interleaves and merges must
//! neither lose nor invent elements, and the strict policies must report an
//! imbalance exactly when the sources differ in length.

#![no_main]

use libfuzzer_sys::fuzz_target;

use moreseq::{OrderByDirection, equi_interleave, interleave, interleave_padded, sorted_merge, transpose};

fuzz_target!(|data: &[u8]| {
    let sources: Vec<Vec<u8>> = data.split(|&b| b == 0).take(8).map(<[u8]>::to_vec).collect();
    let total: usize = sources.iter().map(Vec::len).sum();
    let longest = sources.iter().map(Vec::len).max().unwrap_or(0);
    let balanced = sources.iter().all(|source| source.len() == longest);

    assert_eq!(interleave(sources.clone()).count(), total);
    assert_eq!(interleave_padded(sources.clone(), 0).count(), longest * sources.len());

    let strict: Result<Vec<_>, _> = equi_interleave(sources.clone()).collect();
    assert_eq!(strict.is_ok(), balanced);

    let columns: Vec<_> = transpose(sources.clone()).collect();
    assert_eq!(columns.len(), longest);
    assert_eq!(columns.iter().map(Vec::len).sum::<usize>(), total);

    let sorted: Vec<Vec<u8>> = sources
        .into_iter()
        .map(|mut source| {
            source.sort_unstable();
            source
        })
        .collect();
    let merged: Vec<_> = sorted_merge(OrderByDirection::Ascending, sorted).collect();
    assert_eq!(merged.len(), total);
    assert!(merged.is_sorted());
});
