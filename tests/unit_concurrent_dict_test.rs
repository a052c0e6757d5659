// tests/unit_concurrent_dict_test.rs

use bytes::Bytes;
use citrine::dict::ConcurrentDict;
use std::collections::HashSet;

fn populated(n: usize) -> ConcurrentDict<u64> {
    let dict = ConcurrentDict::new();
    for i in 0..n {
        dict.put(Bytes::from(format!("key:{i}")), i as u64);
    }
    dict
}

#[test]
fn test_shard_count_hint_rounding() {
    assert_eq!(ConcurrentDict::<()>::with_shard_count(0).shard_count(), 16);
    assert_eq!(ConcurrentDict::<()>::with_shard_count(10).shard_count(), 16);
    assert_eq!(ConcurrentDict::<()>::with_shard_count(16).shard_count(), 16);
    assert_eq!(ConcurrentDict::<()>::with_shard_count(17).shard_count(), 32);
    assert_eq!(
        ConcurrentDict::<()>::with_shard_count(100).shard_count(),
        128
    );
    assert_eq!(
        ConcurrentDict::<()>::with_shard_count(128).shard_count(),
        128
    );
}

#[test]
fn test_put_reports_creation_and_overwrite() {
    let dict = ConcurrentDict::new();
    assert!(dict.put(Bytes::from_static(b"a"), 1));
    assert_eq!(dict.len(), 1);
    assert!(!dict.put(Bytes::from_static(b"a"), 2));
    assert_eq!(dict.len(), 1);
    assert_eq!(dict.get(b"a"), Some(2));
}

#[test]
fn test_get_missing_key() {
    let dict = populated(4);
    assert_eq!(dict.get(b"nope"), None);
}

#[test]
fn test_put_if_absent_never_overwrites() {
    let dict = ConcurrentDict::new();
    assert!(dict.put_if_absent(Bytes::from_static(b"a"), 1));
    assert!(!dict.put_if_absent(Bytes::from_static(b"a"), 2));
    assert_eq!(dict.get(b"a"), Some(1));
    assert_eq!(dict.len(), 1);
}

#[test]
fn test_put_if_exists_never_creates() {
    let dict = ConcurrentDict::new();
    assert!(!dict.put_if_exists(Bytes::from_static(b"a"), 1));
    assert_eq!(dict.get(b"a"), None);
    assert_eq!(dict.len(), 0);

    dict.put(Bytes::from_static(b"a"), 1);
    assert!(dict.put_if_exists(Bytes::from_static(b"a"), 9));
    assert_eq!(dict.get(b"a"), Some(9));
    assert_eq!(dict.len(), 1);
}

#[test]
fn test_remove_decrements_len() {
    let dict = ConcurrentDict::new();
    dict.put(Bytes::from_static(b"a"), 1);
    assert!(dict.remove(b"a"));
    assert_eq!(dict.get(b"a"), None);
    assert_eq!(dict.len(), 0);
    assert!(!dict.remove(b"a"));
    assert_eq!(dict.len(), 0);
}

#[test]
fn test_len_after_inserts_and_removals() {
    let dict = populated(100);
    assert_eq!(dict.len(), 100);
    for i in 0..40 {
        assert!(dict.remove(format!("key:{i}").as_bytes()));
    }
    assert_eq!(dict.len(), 60);
}

#[test]
fn test_keys_returns_every_key_once() {
    let dict = populated(100);
    let keys = dict.keys();
    assert_eq!(keys.len(), 100);
    let distinct: HashSet<_> = keys.into_iter().collect();
    assert_eq!(distinct.len(), 100);
}

#[test]
fn test_for_each_visits_everything() {
    let dict = populated(50);
    let mut sum = 0u64;
    let mut visits = 0usize;
    dict.for_each(&mut |_, val| {
        sum += *val;
        visits += 1;
        true
    });
    assert_eq!(visits, 50);
    assert_eq!(sum, (0..50).sum());
}

#[test]
fn test_for_each_early_exit() {
    let dict = populated(50);
    let mut visits = 0usize;
    dict.for_each(&mut |_, _| {
        visits += 1;
        visits < 7
    });
    assert_eq!(visits, 7);
}

#[test]
fn test_random_keys_full_coverage_when_limit_covers_dict() {
    let dict = populated(20);
    for limit in [20, 25, 1000] {
        let keys = dict.random_keys(limit);
        assert_eq!(keys.len(), 20);
        let distinct: HashSet<_> = keys.into_iter().collect();
        assert_eq!(distinct.len(), 20);
    }
}

#[test]
fn test_random_keys_with_replacement() {
    let dict = populated(50);
    let all: HashSet<_> = dict.keys().into_iter().collect();
    let picks = dict.random_keys(10);
    assert_eq!(picks.len(), 10);
    for pick in &picks {
        assert!(all.contains(pick));
    }
}

#[test]
fn test_random_distinct_keys_no_repeats() {
    let dict = populated(50);
    let all: HashSet<_> = dict.keys().into_iter().collect();
    let picks = dict.random_distinct_keys(10);
    assert_eq!(picks.len(), 10);
    let distinct: HashSet<_> = picks.into_iter().collect();
    assert_eq!(distinct.len(), 10);
    for pick in &distinct {
        assert!(all.contains(pick));
    }
}

#[test]
fn test_sampling_empty_dict() {
    let dict = ConcurrentDict::<u64>::new();
    assert!(dict.random_keys(5).is_empty());
    assert!(dict.random_distinct_keys(5).is_empty());
}

#[test]
fn test_binary_keys_survive_routing() {
    let dict = ConcurrentDict::new();
    let key = Bytes::from_static(&[0x00, 0xff, 0x10, 0x00]);
    assert!(dict.put(key.clone(), 7));
    assert_eq!(dict.get(&key), Some(7));
    assert!(dict.remove(&key));
}
