use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::{BTreeMap, BTreeSet};
use std::hint::black_box;
use rubi_tree::{OSRBTreeMap, RBTreeMap, RBTreeSet};

const N: usize = 10_000;

// ─── Key sequences ──────────────────────────────────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Deterministic LCG so runs are comparable.
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn key_patterns() -> [(&'static str, Vec<i64>); 3] {
    [("ordered", ordered_keys(N)), ("reverse", reverse_keys(N)), ("random", random_keys(N))]
}

// ─── Map Benchmarks ─────────────────────────────────────────────────────────

fn bench_map_insert(c: &mut Criterion) {
    for (pattern, keys) in key_patterns() {
        let mut group = c.benchmark_group(format!("map_insert_{pattern}"));

        group.bench_function(BenchmarkId::new("RBTreeMap", N), |b| {
            b.iter(|| {
                let mut map = RBTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });

        group.bench_function(BenchmarkId::new("OSRBTreeMap", N), |b| {
            b.iter(|| {
                let mut map = OSRBTreeMap::new();
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
                    map.insert(k, k);
                }
                map
            });
        });

        group.finish();
    }
}

fn bench_map_get(c: &mut Criterion) {
    let rb_map: RBTreeMap<i64, i64> = ordered_keys(N).into_iter().map(|k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = ordered_keys(N).into_iter().map(|k| (k, k)).collect();

    for (pattern, keys) in key_patterns() {
        let mut group = c.benchmark_group(format!("map_get_{pattern}"));

        group.bench_function(BenchmarkId::new("RBTreeMap", N), |b| {
            b.iter(|| {
                let mut sum = 0i64;
                for &k in &keys {
                    if let Some(&v) = rb_map.get(&k) {
                        sum = sum.wrapping_add(v);
                    }
                }
                sum
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter(|| {
                let mut sum = 0i64;
                for &k in &keys {
                    if let Some(&v) = bt_map.get(&k) {
                        sum = sum.wrapping_add(v);
                    }
                }
                sum
            });
        });

        group.finish();
    }
}

fn bench_map_remove(c: &mut Criterion) {
    let inserted = ordered_keys(N);

    for (pattern, keys) in key_patterns() {
        let mut group = c.benchmark_group(format!("map_remove_{pattern}"));

        group.bench_function(BenchmarkId::new("RBTreeMap", N), |b| {
            b.iter_batched(
                || inserted.iter().map(|&k| (k, k)).collect::<RBTreeMap<i64, i64>>(),
                |mut map| {
                    for &k in &keys {
                        map.remove(&k);
                    }
                    map
                },
                criterion::BatchSize::LargeInput,
            );
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter_batched(
                || inserted.iter().map(|&k| (k, k)).collect::<BTreeMap<i64, i64>>(),
                |mut map| {
                    for &k in &keys {
                        map.remove(&k);
                    }
                    map
                },
                criterion::BatchSize::LargeInput,
            );
        });

        group.finish();
    }
}

fn bench_map_successor(c: &mut Criterion) {
    let keys = random_keys(N);
    let rb_map: RBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let probes: Vec<i64> = keys.iter().map(|k| k ^ 1).collect();

    let mut group = c.benchmark_group("map_strict_successor");

    group.bench_function(BenchmarkId::new("RBTreeMap", N), |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for k in &probes {
                hits += usize::from(rb_map.strict_successor_of(k).is_some());
            }
            hits
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            use std::ops::Bound::{Excluded, Unbounded};
            let mut hits = 0usize;
            for &k in &probes {
                hits += usize::from(bt_map.range((Excluded(k), Unbounded)).next().is_some());
            }
            hits
        });
    });

    group.finish();
}

// ─── Order-statistic Benchmarks ─────────────────────────────────────────────

fn bench_select_rank(c: &mut Criterion) {
    let keys = random_keys(N);
    let os_map: OSRBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let len = os_map.len();

    let mut group = c.benchmark_group("order_statistic");

    group.bench_function(BenchmarkId::new("OSRBTreeMap::select", len), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for index in (0..len).step_by(7) {
                if let Ok((_, &v)) = os_map.select(index) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    // Linear baseline: BTreeMap has no positional access.
    group.bench_function(BenchmarkId::new("BTreeMap::iter().nth", len), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for index in (0..len).step_by(7 * 64) {
                if let Some((_, &v)) = bt_map.iter().nth(index) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("OSRBTreeMap::rank", len), |b| {
        b.iter(|| {
            let mut sum = 0usize;
            for k in &keys {
                sum = sum.wrapping_add(os_map.rank(black_box(k)).0);
            }
            sum
        });
    });

    group.finish();
}

// ─── Set Benchmarks ─────────────────────────────────────────────────────────

fn bench_set_insert_contains(c: &mut Criterion) {
    for (pattern, keys) in key_patterns() {
        let mut group = c.benchmark_group(format!("set_{pattern}"));

        group.bench_function(BenchmarkId::new("RBTreeSet::insert", N), |b| {
            b.iter(|| keys.iter().copied().collect::<RBTreeSet<i64>>());
        });

        group.bench_function(BenchmarkId::new("BTreeSet::insert", N), |b| {
            b.iter(|| keys.iter().copied().collect::<BTreeSet<i64>>());
        });

        let rb_set: RBTreeSet<i64> = keys.iter().copied().collect();
        let bt_set: BTreeSet<i64> = keys.iter().copied().collect();

        group.bench_function(BenchmarkId::new("RBTreeSet::contains", N), |b| {
            b.iter(|| keys.iter().filter(|k| rb_set.contains(*k)).count());
        });

        group.bench_function(BenchmarkId::new("BTreeSet::contains", N), |b| {
            b.iter(|| keys.iter().filter(|k| bt_set.contains(*k)).count());
        });

        group.finish();
    }
}

fn bench_set_algebra(c: &mut Criterion) {
    let left: RBTreeSet<i64> = random_keys(N).into_iter().collect();
    let right: Vec<i64> = ordered_keys(N).into_iter().map(|k| k * 3).collect();

    let mut group = c.benchmark_group("set_algebra");

    group.bench_function(BenchmarkId::new("union_with", N), |b| {
        b.iter_batched(
            || left.clone(),
            |mut set| {
                set.union_with(right.iter().copied());
                set
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function(BenchmarkId::new("intersect_with", N), |b| {
        b.iter_batched(
            || left.clone(),
            |mut set| {
                set.intersect_with(&right);
                set
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function(BenchmarkId::new("symmetric_except_with", N), |b| {
        b.iter_batched(
            || left.clone(),
            |mut set| {
                set.symmetric_except_with(right.iter().copied());
                set
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(map_benches, bench_map_insert, bench_map_get, bench_map_remove, bench_map_successor);

criterion_group!(order_statistic_benches, bench_select_rank);

criterion_group!(set_benches, bench_set_insert_contains, bench_set_algebra);

criterion_main!(map_benches, order_statistic_benches, set_benches);
