use criterion::{criterion_group, criterion_main, Criterion};
use tabmap_core::config::EngineConfig;
use tabmap_core::storage::{Column, Storage};
use tabmap_exec::{scalar, Engine, MapRequest};

fn make_longs(rows: usize) -> Column {
    Storage::from_options((0..rows).map(|i| {
        if i % 17 == 0 {
            None
        } else {
            Some((i as i64 - rows as i64 / 2) * 7919)
        }
    }))
    .into()
}

fn bench_round(c: &mut Criterion) {
    let input = make_longs(1_000_000);
    let engine = Engine::new(EngineConfig::default()).unwrap();
    let request = MapRequest::ternary("round", &input, scalar(-3i64), scalar(true));
    c.bench_function("round_long_1m", |b| {
        b.iter(|| {
            let _ = engine.execute_uncancellable(&request).unwrap();
        })
    });
}

fn bench_add_column(c: &mut Criterion) {
    let left = make_longs(1_000_000);
    let right = make_longs(1_000_000);
    let engine = Engine::new(EngineConfig::default()).unwrap();
    let request = MapRequest::binary("add", &left, &right);
    c.bench_function("add_long_columns_1m", |b| {
        b.iter(|| {
            let _ = engine.execute_uncancellable(&request).unwrap();
        })
    });
}

criterion_group!(kernels, bench_round, bench_add_column);
criterion_main!(kernels);
