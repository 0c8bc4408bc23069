//! Throughput benchmarks for the core order book operations.

use criterion::{Criterion, criterion_group, criterion_main};
use lob_replay::{OrderBook, Side};
use std::hint::black_box;

fn bench_add_limit(c: &mut Criterion) {
    c.bench_function("add_limit_resting", |b| {
        b.iter_batched(
            OrderBook::new,
            |book| {
                for i in 0..1_000u64 {
                    black_box(
                        book.add_limit(i, Side::Buy, 100_000 - (i % 50), 100, i)
                            .unwrap(),
                    );
                }
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_add_limit_crossing(c: &mut Criterion) {
    c.bench_function("add_limit_crossing", |b| {
        b.iter_batched(
            || {
                let book = OrderBook::new();
                for i in 0..1_000u64 {
                    book.add_limit(i, Side::Sell, 100_000 + (i % 50), 100, i).unwrap();
                }
                book
            },
            |book| {
                for i in 1_000..2_000u64 {
                    black_box(book.add_limit(i, Side::Buy, 100_200, 100, i).unwrap());
                }
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_cancel(c: &mut Criterion) {
    c.bench_function("cancel_resting", |b| {
        b.iter_batched(
            || {
                let book = OrderBook::new();
                for i in 0..1_000u64 {
                    book.add_limit(i, Side::Buy, 100_000, 100, i).unwrap();
                }
                book
            },
            |book| {
                for i in 0..1_000u64 {
                    black_box(book.cancel(i, 10).unwrap());
                }
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_add_limit, bench_add_limit_crossing, bench_cancel);
criterion_main!(benches);
