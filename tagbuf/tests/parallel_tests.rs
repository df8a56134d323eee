#![cfg(feature = "parallel")]

use rayon::prelude::*;
use tagbuf::TaggedBuffer;

fn hundreds() -> TaggedBuffer<i64> {
    let buffer = TaggedBuffer::new(|i: &i64| i % 100 == 0);
    for i in 0..1_000_000i64 {
        buffer.insert(i).unwrap();
    }
    buffer
}

#[test]
fn test_parallel_tagged_count() {
    let buffer = hundreds();
    assert_eq!(buffer.par_iter(true).count(), 10_000);
}

#[test]
fn test_parallel_untagged_count() {
    let buffer = hundreds();
    assert_eq!(buffer.par_iter(false).count(), 1_000_000);
}

#[test]
fn test_parallel_tagged_sum_matches_sequential() {
    let buffer = hundreds();

    let mut sequential = 0i64;
    buffer.for_each(true, |&i| sequential += i);
    let parallel: i64 = buffer.par_iter(true).copied().sum();

    assert_eq!(parallel, sequential);
    assert_eq!(parallel, 4_999_500_000);
}

#[test]
fn test_parallel_untagged_sum_matches_sequential() {
    let buffer = hundreds();

    let mut sequential = 0i64;
    buffer.for_each(false, |&i| sequential += i);
    let parallel: i64 = buffer.par_iter(false).copied().sum();

    assert_eq!(parallel, sequential);
    assert_eq!(parallel, 499_999_500_000);
}

#[test]
fn test_parallel_collect_preserves_order() {
    let buffer = TaggedBuffer::new(|i: &u32| i % 7 == 3);
    for i in 0..100_003u32 {
        buffer.insert(i).unwrap();
    }

    for tagged in [true, false] {
        let mut expected = Vec::new();
        buffer.for_each(tagged, |&i| expected.push(i));

        let collected: Vec<u32> = buffer.par_iter(tagged).copied().collect();
        assert_eq!(collected, expected);
    }
}

#[test]
fn test_parallel_map_and_filter() {
    let buffer = TaggedBuffer::new(|s: &String| s.len() > 1);
    for i in 0..1_000 {
        buffer.insert(i.to_string()).unwrap();
    }

    let lengths: Vec<usize> = buffer.par_iter(true).map(String::len).collect();
    assert_eq!(lengths.len(), 990);
    assert!(lengths.iter().all(|&len| len > 1));

    let threes = buffer
        .par_iter(false)
        .filter(|s| s.starts_with('3'))
        .count();
    assert_eq!(threes, 111);
}

#[test]
fn test_parallel_from_traversal() {
    let buffer = TaggedBuffer::new(|i: &i32| *i > 2);
    for i in 0..6 {
        buffer.insert(i).unwrap();
    }

    let mut traversal = buffer.traversal(true);
    let prefix = traversal.try_split().unwrap();

    let left: Vec<i32> = prefix.into_par_iter().copied().collect();
    let right: Vec<i32> = traversal.into_par_iter().copied().collect();
    assert_eq!(left, vec![]);
    assert_eq!(right, vec![3, 4, 5]);
}

#[test]
fn test_parallel_snapshot_isolation() {
    let buffer = TaggedBuffer::new(|i: &i32| i % 2 == 1);
    buffer.insert(5).unwrap();
    buffer.insert(10).unwrap();
    buffer.insert(15).unwrap();

    let tagged = buffer.par_iter(true);
    let untagged = buffer.par_iter(false);
    buffer.insert(17).unwrap();

    assert_eq!(tagged.copied().collect::<Vec<_>>(), vec![5, 15]);
    assert_eq!(untagged.copied().collect::<Vec<_>>(), vec![5, 10, 15]);
}

#[test]
fn test_parallel_is_unindexed() {
    let buffer = TaggedBuffer::new(|i: &i32| i % 2 == 0);
    for i in 0..10 {
        buffer.insert(i).unwrap();
    }

    assert_eq!(buffer.par_iter(false).opt_len(), None);
    assert_eq!(buffer.par_iter(true).opt_len(), None);
}

#[test]
fn test_parallel_untagged_collect() {
    let buffer = TaggedBuffer::new(|i: &u64| i % 2 == 0);
    for i in 0..50_000u64 {
        buffer.insert(i).unwrap();
    }

    let refs: Vec<&u64> = buffer.par_iter(false).collect();
    assert_eq!(refs.len(), 50_000);
    assert!(refs.iter().enumerate().all(|(i, &&v)| v == i as u64));

    let mut values: Vec<u64> = Vec::new();
    values.par_extend(buffer.par_iter(false).copied());
    assert_eq!(values, (0..50_000u64).collect::<Vec<_>>());
}

#[test]
fn test_parallel_empty() {
    let buffer = TaggedBuffer::new(|_: &u8| -> bool { panic!("predicate must not be called") });

    assert_eq!(buffer.par_iter(true).count(), 0);
    assert_eq!(buffer.par_iter(false).count(), 0);
}
