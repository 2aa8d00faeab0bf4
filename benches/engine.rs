//! Order book performance benchmarks (Criterion).
//!
//! Run: `cargo bench` or `cargo bench --bench engine`.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use matchbook::order_gen::{Generator, GeneratorConfig};
use matchbook::OrderBook;

fn bench_add_order_throughput(c: &mut Criterion) {
    const N: usize = 1000;
    let mut group = c.benchmark_group("book");
    group.throughput(Throughput::Elements(N as u64));
    group.bench_function("add_order_1000", |b| {
        b.iter_batched(
            || {
                let config = GeneratorConfig {
                    seed: 42,
                    num_orders: N,
                    ..Default::default()
                };
                (OrderBook::new(), Generator::new(config).all_orders())
            },
            |(mut book, orders)| {
                for order in orders {
                    let _ = book
                        .add_order(order.id, order.order_type, order.side, order.price, order.quantity)
                        .unwrap();
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_cancel_order(c: &mut Criterion) {
    const RESTING: usize = 500;
    const CANCELS_PER_ITER: usize = 100;
    let mut group = c.benchmark_group("book");
    group.throughput(Throughput::Elements(CANCELS_PER_ITER as u64));
    group.bench_function("cancel_order_100_after_500_resting", |b| {
        b.iter_batched(
            || {
                let config = GeneratorConfig {
                    seed: 123,
                    num_orders: RESTING,
                    gtc_ratio: 1.0,
                    ioc_ratio: 0.0,
                    ..Default::default()
                };
                let mut book = OrderBook::new();
                let orders = Generator::new(config).all_orders();
                for order in &orders {
                    book.add_order(order.id, order.order_type, order.side, order.price, order.quantity)
                        .unwrap();
                }
                let cancel_ids: Vec<_> = orders[..CANCELS_PER_ITER].iter().map(|o| o.id).collect();
                (book, cancel_ids)
            },
            |(mut book, cancel_ids)| {
                for id in cancel_ids {
                    // some of the early orders already filled; skip those
                    let _ = book.cancel_order(id);
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_modify_order(c: &mut Criterion) {
    const RESTING: usize = 200;
    const MODIFIES: usize = 50;
    let mut group = c.benchmark_group("book");
    group.throughput(Throughput::Elements(MODIFIES as u64));
    group.bench_function("modify_order_50_after_200_resting", |b| {
        b.iter_batched(
            || {
                let config = GeneratorConfig {
                    seed: 456,
                    num_orders: RESTING,
                    gtc_ratio: 1.0,
                    ioc_ratio: 0.0,
                    ..Default::default()
                };
                let mut book = OrderBook::new();
                let orders = Generator::new(config).all_orders();
                for order in &orders {
                    book.add_order(order.id, order.order_type, order.side, order.price, order.quantity)
                        .unwrap();
                }
                let modifies: Vec<_> = orders[..MODIFIES]
                    .iter()
                    .map(|o| (o.id, o.price + 1, o.quantity + 1))
                    .collect();
                (book, modifies)
            },
            |(mut book, modifies)| {
                for (id, price, quantity) in modifies {
                    let _ = book.modify_order(id, price, quantity);
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_add_order_throughput,
    bench_cancel_order,
    bench_modify_order
);
criterion_main!(benches);
