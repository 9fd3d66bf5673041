use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use sugi_tree::BstMap;

const N: usize = 10_000;

/// Sorted input degenerates an unbalanced tree into a chain, so those runs stay small.
const CHAIN_N: usize = 1_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Map Benchmarks ─────────────────────────────────────────────────────────

fn bench_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);

    let mut group = c.benchmark_group("insert_random");

    group.bench_function(BenchmarkId::new("BstMap", N), |b| {
        b.iter(|| {
            let mut map = BstMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &k in &keys {
                map.entry(k).or_insert(k);
            }
            map
        });
    });

    group.finish();
}

fn bench_insert_ordered(c: &mut Criterion) {
    let keys = ordered_keys(CHAIN_N);

    let mut group = c.benchmark_group("insert_ordered");

    group.bench_function(BenchmarkId::new("BstMap", CHAIN_N), |b| {
        b.iter(|| {
            let mut map = BstMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", CHAIN_N), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.finish();
}

fn bench_find_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let map: BstMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let mut balanced = map.clone();
    balanced.balance();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("find_random");

    group.bench_function(BenchmarkId::new("BstMap", N), |b| {
        b.iter(|| {
            let mut hits = 0;
            for k in &keys {
                if !map.find(k).is_end() {
                    hits += 1;
                }
            }
            hits
        });
    });

    group.bench_function(BenchmarkId::new("BstMap/balanced", N), |b| {
        b.iter(|| {
            let mut hits = 0;
            for k in &keys {
                if !balanced.find(k).is_end() {
                    hits += 1;
                }
            }
            hits
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut hits = 0;
            for k in &keys {
                if bt_map.contains_key(k) {
                    hits += 1;
                }
            }
            hits
        });
    });

    group.finish();
}

fn bench_erase_random(c: &mut Criterion) {
    let keys = random_keys(N);

    let mut group = c.benchmark_group("erase_random");

    group.bench_function(BenchmarkId::new("BstMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<BstMap<i64, i64>>(),
            |mut map| {
                for k in &keys {
                    let _ = map.erase(k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<BTreeMap<i64, i64>>(),
            |mut map| {
                for k in &keys {
                    map.remove(k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_balance(c: &mut Criterion) {
    let mut group = c.benchmark_group("balance");

    for (name, keys) in [("ordered", ordered_keys(CHAIN_N)), ("random", random_keys(N))] {
        group.bench_function(BenchmarkId::new(name, keys.len()), |b| {
            b.iter_batched(
                || keys.iter().map(|&k| (k, k)).collect::<BstMap<i64, i64>>(),
                |mut map| {
                    map.balance();
                    map
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_iterate(c: &mut Criterion) {
    let keys = random_keys(N);
    let map: BstMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("iterate");

    group.bench_function(BenchmarkId::new("BstMap", N), |b| {
        b.iter(|| map.values().fold(0i64, |acc, v| acc.wrapping_add(*v)));
    });

    group.bench_function(BenchmarkId::new("BstMap/positions", N), |b| {
        b.iter(|| {
            let mut acc = 0i64;
            let mut pos = map.begin();
            while let Some((_, v)) = map.entry_at(pos) {
                acc = acc.wrapping_add(*v);
                pos = map.next_position(pos);
            }
            acc
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| bt_map.values().fold(0i64, |acc, v| acc.wrapping_add(*v)));
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(insert_benches, bench_insert_random, bench_insert_ordered,);

criterion_group!(lookup_benches, bench_find_random, bench_iterate,);

criterion_group!(mutation_benches, bench_erase_random, bench_balance,);

criterion_main!(insert_benches, lookup_benches, mutation_benches);
