//! Integration tests for ArrayPool sharing between sets and threads.

use std::sync::Arc;
use std::thread;

use arrayset::pool::DEFAULT_POOL_LIMIT;
use arrayset::{ArrayPool, ArraySet, Indexing};
use rstest::rstest;

fn pooled_set(pool: &Arc<ArrayPool<u64>>) -> ArraySet<u64> {
    ArraySet::builder(Indexing::hashed())
        .pool(Arc::clone(pool))
        .build()
}

#[rstest]
fn test_dropped_set_returns_base_vectors_to_pool() {
    let pool = Arc::new(ArrayPool::new());
    {
        let mut set = pooled_set(&pool);
        for value in [1, 2, 3] {
            set.insert(value);
        }
        assert_eq!(set.capacity(), 4);
    }
    let counts = pool.pooled();
    assert_eq!(counts.base_elements, 1);
    assert_eq!(counts.base_keys, 1);
}

#[rstest]
fn test_next_set_reuses_retained_vectors() {
    let pool = Arc::new(ArrayPool::new());
    let mut first = pooled_set(&pool);
    first.insert(1);
    first.clear();

    let hits_before = pool.stats().hits;
    let mut second = pooled_set(&pool);
    second.insert(2);
    assert_eq!(pool.stats().hits, hits_before + 2);
    assert_eq!(pool.pooled().base_elements, 0);
}

#[rstest]
fn test_comparator_sets_use_no_key_vectors() {
    let pool = Arc::new(ArrayPool::new());
    let mut set = ArraySet::builder(Indexing::compared_by(|left: &u64, right: &u64| left.cmp(right)))
        .pool(Arc::clone(&pool))
        .build();
    for value in [3, 1, 2] {
        set.insert(value);
    }
    assert_eq!(set.capacity(), 4);
    drop(set);

    let counts = pool.pooled();
    assert_eq!(counts.base_elements, 1);
    assert_eq!(counts.base_keys, 0);
}

#[rstest]
fn test_free_list_is_bounded() {
    let pool = Arc::new(ArrayPool::with_limit(2));
    let sets: Vec<ArraySet<u64>> = (0..5)
        .map(|seed| {
            let mut set = pooled_set(&pool);
            set.insert(seed);
            set
        })
        .collect();
    drop(sets);

    assert_eq!(pool.pooled().base_elements, 2);
    assert_eq!(pool.stats().discarded, 3 * 2);
}

#[rstest]
fn test_pool_survives_concurrent_use() {
    let pool = Arc::new(ArrayPool::new());
    let handles: Vec<_> = (0..8_u64)
        .map(|thread_index| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                for round in 0..200_u64 {
                    let mut set = pooled_set(&pool);
                    let base = thread_index * 1_000 + round;
                    set.add_all((0..(round % 12)).map(|offset| base + offset * 10_000));
                    assert_eq!(set.len(), usize::try_from(round % 12).unwrap_or(0));
                    for offset in 0..(round % 12) {
                        assert!(set.remove(&(base + offset * 10_000)));
                    }
                    assert!(set.is_empty());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let counts = pool.pooled();
    assert!(counts.base_elements <= DEFAULT_POOL_LIMIT);
    assert!(counts.double_elements <= DEFAULT_POOL_LIMIT);
    assert!(counts.base_keys <= DEFAULT_POOL_LIMIT);
    assert!(counts.double_keys <= DEFAULT_POOL_LIMIT);
}

#[rstest]
fn test_shared_pool_is_per_type() {
    let first = ArrayPool::<u64>::shared();
    let second = ArrayPool::<u64>::shared();
    assert!(Arc::ptr_eq(&first, &second));

    let set: ArraySet<u64> = ArraySet::new();
    assert!(Arc::ptr_eq(set.pool(), &first));
}
