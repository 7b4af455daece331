use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use galena::matching::MatchingEngine;
use galena::order::{Order, Side};

fn limit(id: u64, side: Side, price: i64, qty: u64) -> Order {
    Order::limit(id, 1, side, price, qty).unwrap()
}

fn engine(cap: u32) -> MatchingEngine {
    MatchingEngine::with_capacity(cap)
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for &n in &[100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("non_crossing", n), &n, |b, &n| {
            b.iter_batched(
                || engine(n as u32 + 16),
                |mut engine| {
                    for i in 0..n {
                        let side = if i % 2 == 0 { Side::Buy } else { Side::Sell };
                        let price = if side == Side::Buy { 100 } else { 200 };
                        engine.submit(limit(i + 1, side, price, 10)).unwrap();
                    }
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("match");

    group.bench_function("full_fill_1k", |b| {
        b.iter_batched(
            || {
                let mut e = engine(2_048);
                for i in 1..=1_000u64 {
                    e.submit(limit(i, Side::Sell, 100, 10)).unwrap();
                }
                e
            },
            |mut engine| {
                for i in 1..=1_000u64 {
                    engine
                        .submit(limit(1_000 + i, Side::Buy, 100, 10))
                        .unwrap();
                }
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("multi_level_sweep", |b| {
        b.iter_batched(
            || {
                let mut e = engine(2_048);
                for i in 0..100u64 {
                    for j in 0..10u64 {
                        let id = i * 10 + j + 1;
                        e.submit(limit(id, Side::Sell, 100 + i as i64, 10)).unwrap();
                    }
                }
                e
            },
            |mut engine| {
                engine
                    .submit(limit(5_000, Side::Buy, 199, 5_000))
                    .unwrap();
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("market_sweep_1k", |b| {
        b.iter_batched(
            || {
                let mut e = engine(2_048);
                for i in 1..=1_000u64 {
                    e.submit(limit(i, Side::Sell, 100 + (i as i64 % 50), 10))
                        .unwrap();
                }
                e
            },
            |mut engine| {
                engine
                    .submit(Order::market(5_000, 1, Side::Buy, 10_000).unwrap())
                    .unwrap();
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_match);
criterion_main!(benches);
