// ==============================================
// LRU CONTRACT TESTS (integration)
// ==============================================
//
// End-to-end checks of the public cache contract: the size bound, the
// index/list bijection, deterministic eviction, and the reference
// scenarios from the console protocol the cache was built to match.

use lrukit::policy::lru::LruCache;

// ==============================================
// Construction
// ==============================================

#[test]
fn zero_capacity_produces_no_cache() {
    let err = LruCache::<u32, u32>::try_new(0).unwrap_err();
    assert!(
        err.to_string().contains("capacity"),
        "config error should name the bad parameter, got: {}",
        err
    );
}

#[test]
fn capacity_is_fixed_at_construction() {
    let mut cache = LruCache::try_new(3).unwrap();
    for key in 0..10u32 {
        cache.insert(key, key);
    }
    assert_eq!(cache.capacity(), 3);
    assert_eq!(cache.len(), 3);
}

// ==============================================
// Reference scenarios (console protocol parity)
// ==============================================

#[test]
fn scenario_get_promotes_then_eviction_targets_new_lru() {
    let mut cache = LruCache::try_new(2).unwrap();

    cache.insert(1, 10);
    cache.insert(2, 20);
    assert_eq!(cache.keys_by_recency(), vec![2, 1]);

    assert_eq!(cache.get(&1), Some(&10));
    assert_eq!(cache.keys_by_recency(), vec![1, 2]);

    cache.insert(3, 30);
    assert_eq!(cache.keys_by_recency(), vec![3, 1]);
    assert_eq!(cache.get(&2), None);
}

#[test]
fn scenario_capacity_one() {
    let mut cache = LruCache::try_new(1).unwrap();

    cache.insert(1, 1);
    cache.insert(2, 2);

    assert_eq!(cache.get(&1), None);
    assert_eq!(cache.get(&2), Some(&2));
}

#[test]
fn scenario_update_existing_key() {
    let mut cache = LruCache::try_new(2).unwrap();

    cache.insert(5, 50);
    cache.insert(5, 99);

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&5), Some(&99));
}

// ==============================================
// Contract properties
// ==============================================

#[test]
fn promotion_on_every_touch() {
    let mut cache = LruCache::try_new(4).unwrap();
    for key in 0..4u32 {
        cache.insert(key, key);
        assert_eq!(cache.recency_rank(&key), Some(0), "insert must promote");
    }

    let _ = cache.get(&1);
    assert_eq!(cache.recency_rank(&1), Some(0), "get hit must promote");

    cache.touch(&2);
    assert_eq!(cache.recency_rank(&2), Some(0), "touch must promote");

    cache.insert(0, 100);
    assert_eq!(cache.recency_rank(&0), Some(0), "update must promote");
}

#[test]
fn miss_has_no_side_effects() {
    let mut cache = LruCache::try_new(3).unwrap();
    cache.insert(1, 10);
    cache.insert(2, 20);

    let order = cache.keys_by_recency();
    let len = cache.len();

    assert_eq!(cache.get(&42), None);
    assert!(!cache.touch(&42));
    assert_eq!(cache.remove(&42), None);

    assert_eq!(cache.keys_by_recency(), order);
    assert_eq!(cache.len(), len);
    cache.check_invariants().unwrap();
}

#[test]
fn eviction_always_takes_the_least_recently_touched() {
    let mut cache = LruCache::try_new(3).unwrap();
    cache.insert("a", 1);
    cache.insert("b", 2);
    cache.insert("c", 3);

    // Touch order now: a (oldest), b, c. Promote a; b becomes LRU.
    let _ = cache.get(&"a");
    cache.insert("d", 4);
    assert!(!cache.contains(&"b"));

    // Order: d, a, c. Promote c; a becomes LRU.
    cache.touch(&"c");
    cache.insert("e", 5);
    assert!(!cache.contains(&"a"));

    assert_eq!(cache.keys_by_recency(), vec!["e", "c", "d"]);
    cache.check_invariants().unwrap();
}

#[test]
fn history_determinism_across_instances() {
    // Two caches fed the same call history end in the same state.
    let history: &[(&str, u32, u32)] = &[
        ("set", 1, 10),
        ("set", 2, 20),
        ("get", 1, 0),
        ("set", 3, 30),
        ("set", 2, 21),
        ("get", 9, 0),
        ("set", 4, 40),
    ];

    let mut a = LruCache::try_new(3).unwrap();
    let mut b = LruCache::try_new(3).unwrap();
    for cache in [&mut a, &mut b] {
        for &(op, key, value) in history {
            match op {
                "set" => {
                    cache.insert(key, value);
                },
                _ => {
                    let _ = cache.get(&key);
                },
            }
        }
    }

    assert_eq!(a.keys_by_recency(), b.keys_by_recency());
    let pairs_a: Vec<_> = a.iter().map(|(k, v)| (*k, *v)).collect();
    let pairs_b: Vec<_> = b.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(pairs_a, pairs_b);
}

#[test]
fn long_mixed_workload_holds_invariants() {
    let mut cache = LruCache::try_new(16).unwrap();

    // Deterministic pseudo-random walk over a key space larger than the
    // cache, mixing all mutating operations.
    let mut state = 0x2545F491u32;
    for step in 0..10_000u32 {
        state = state.wrapping_mul(1664525).wrapping_add(1013904223);
        let key = state % 64;
        match step % 5 {
            0 | 1 => {
                cache.insert(key, step);
            },
            2 => {
                let _ = cache.get(&key);
            },
            3 => {
                cache.touch(&key);
            },
            _ => {
                let _ = cache.remove(&key);
            },
        }
        assert!(cache.len() <= 16);
    }
    cache.check_invariants().unwrap();
}

#[test]
fn string_keys_and_values() {
    // The cache is generic; nothing ties it to integer keys.
    let mut cache: LruCache<String, String> = LruCache::try_new(2).unwrap();
    cache.insert("alpha".to_string(), "a".to_string());
    cache.insert("beta".to_string(), "b".to_string());
    let _ = cache.get(&"alpha".to_string());
    cache.insert("gamma".to_string(), "c".to_string());

    assert!(!cache.contains(&"beta".to_string()));
    assert_eq!(cache.keys_by_recency(), vec!["gamma", "alpha"]);
    cache.check_invariants().unwrap();
}
