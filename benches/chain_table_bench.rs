use chain_table::ChainTable;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("chain_table_insert_10k", |b| {
        b.iter_batched(
            ChainTable::<String, u64>::new,
            |mut t| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    t.insert(key(x), i as u64).unwrap();
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_insert_presized(c: &mut Criterion) {
    c.bench_function("chain_table_insert_10k_presized", |b| {
        b.iter_batched(
            || ChainTable::<String, u64>::with_capacity(16_384).unwrap(),
            |mut t| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    t.insert(key(x), i as u64).unwrap();
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("chain_table_get_hit", |b| {
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        let t: ChainTable<String, u64> = keys
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, k)| (k, i as u64))
            .collect();
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(t.get(k.as_str()).unwrap());
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("chain_table_get_miss", |b| {
        let mut t = ChainTable::new();
        for (i, x) in lcg(11).take(10_000).enumerate() {
            t.insert(key(x), i as u64).unwrap();
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in table
            let k = key(miss.next().unwrap());
            black_box(t.get(&k));
        })
    });
}

fn bench_insert_or_replace_hit(c: &mut Criterion) {
    c.bench_function("chain_table_insert_or_replace_hit", |b| {
        let keys: Vec<_> = lcg(3).take(10_000).map(key).collect();
        let mut t: ChainTable<String, u64> = keys.iter().cloned().map(|k| (k, 0)).collect();
        let mut it = keys.iter().cycle();
        let mut n = 0u64;
        b.iter(|| {
            n += 1;
            black_box(t.insert_or_replace(it.next().unwrap().clone(), n));
        })
    });
}

fn bench_remove_reinsert(c: &mut Criterion) {
    c.bench_function("chain_table_remove_reinsert", |b| {
        let keys: Vec<_> = lcg(5).take(10_000).map(key).collect();
        let mut t: ChainTable<String, u64> = keys.iter().cloned().map(|k| (k, 0)).collect();
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            let removed = t.remove(k.as_str());
            t.insert(k.clone(), 1).unwrap();
            black_box(removed);
        })
    });
}

fn bench_iterate(c: &mut Criterion) {
    c.bench_function("chain_table_iterate_10k", |b| {
        let t: ChainTable<u64, u64> = lcg(9).take(10_000).map(|x| (x, x)).collect();
        b.iter(|| black_box(t.values().fold(0u64, |acc, v| acc.wrapping_add(*v))))
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_insert_presized, bench_get_hit, bench_get_miss,
        bench_insert_or_replace_hit, bench_remove_reinsert, bench_iterate
}
criterion_main!(benches);
