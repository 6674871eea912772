//! Fuzz target: single-source operators against their structural laws.
//!
//! The first byte picks a size parameter, the rest is the sequence. Every
//! operator here must preserve the elements it is given; a failed assertion
//! is a bug.

#![no_main]

use libfuzzer_sys::fuzz_target;

use moreseq::SeqExt;

fuzz_target!(|data: &[u8]| {
    let Some((&first, items)) = data.split_first() else {
        return;
    };
    let size = usize::from(first % 16) + 1;
    let len = items.len();
    let source = || items.iter().copied();

    let left: Vec<_> = source().window_left(size).unwrap().collect();
    assert_eq!(left.len(), len);
    for (i, window) in left.iter().enumerate() {
        assert_eq!(window.as_slice(), &items[i..len.min(i + size)]);
    }

    let right: Vec<_> = source().window_right(size).unwrap().collect();
    for (i, window) in right.iter().enumerate() {
        assert_eq!(window.as_slice(), &items[(i + 1).saturating_sub(size)..=i]);
    }

    let batches: Vec<u8> = source().batch(size).unwrap().flatten().collect();
    assert_eq!(batches, items);

    let runs: Vec<_> = source().run_length_encode().collect();
    assert_eq!(runs.iter().map(|(_, run)| run).sum::<usize>(), len);
    assert!(runs.windows(2).all(|pair| pair[0].0 != pair[1].0));

    let mut tail = source().skip_last(size).collect::<Vec<_>>();
    tail.extend(source().take_last(size));
    assert_eq!(tail, items);

    let index = isize::from(first.cast_signed()) / 8;
    let (head, rest) = source().split_at(index);
    assert_eq!([head, rest].concat(), items);

    assert_eq!(source().pad_start(size, 0).count(), len.max(size));
    assert_eq!(source().pad(size, 0).count(), len.max(size));
});
