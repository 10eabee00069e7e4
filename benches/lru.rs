use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use lrukit::policy::lru::LruCache;

const CAPACITY: usize = 1024;

fn full_cache() -> LruCache<u64, u64> {
    let mut cache = LruCache::try_new(CAPACITY).expect("capacity is valid");
    for key in 0..CAPACITY as u64 {
        cache.insert(key, key);
    }
    cache
}

fn bench_insert_with_eviction(c: &mut Criterion) {
    c.bench_function("lru/insert_evicting", |b| {
        b.iter_batched_ref(
            full_cache,
            |cache| {
                for key in CAPACITY as u64..CAPACITY as u64 + 256 {
                    black_box(cache.insert(key, key));
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_insert_update(c: &mut Criterion) {
    c.bench_function("lru/insert_update", |b| {
        b.iter_batched_ref(
            full_cache,
            |cache| {
                for key in 0..256u64 {
                    black_box(cache.insert(key, key + 1));
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_get_hit(c: &mut Criterion) {
    let mut cache = full_cache();
    let mut key = 0u64;
    c.bench_function("lru/get_hit", |b| {
        b.iter(|| {
            key = (key + 7) % CAPACITY as u64;
            black_box(cache.get(&key).copied())
        });
    });
}

fn bench_get_miss(c: &mut Criterion) {
    let mut cache = full_cache();
    c.bench_function("lru/get_miss", |b| {
        b.iter(|| black_box(cache.get(&u64::MAX).copied()));
    });
}

fn bench_mixed_workload(c: &mut Criterion) {
    c.bench_function("lru/mixed_set_get", |b| {
        b.iter_batched_ref(
            full_cache,
            |cache| {
                let mut state = 0x2545F491u64;
                for _ in 0..512 {
                    state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
                    let key = state % (CAPACITY as u64 * 2);
                    if state & 1 == 0 {
                        black_box(cache.insert(key, state));
                    } else {
                        black_box(cache.get(&key));
                    }
                }
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_insert_with_eviction,
    bench_insert_update,
    bench_get_hit,
    bench_get_miss,
    bench_mixed_workload
);
criterion_main!(benches);
