//! Hot path benchmarks for the swap math

use amm::{calculate_price_impact, SwapMath};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_swap_math(c: &mut Criterion) {
    c.bench_function("get_amount_out", |b| {
        b.iter(|| {
            SwapMath::get_amount_out(
                criterion::black_box(1_000_000),
                criterion::black_box(5_000_000_000),
                criterion::black_box(9_000_000_000),
            )
        })
    });

    c.bench_function("get_amount_in", |b| {
        b.iter(|| {
            SwapMath::get_amount_in(
                criterion::black_box(1_000_000),
                criterion::black_box(5_000_000_000),
                criterion::black_box(9_000_000_000),
            )
        })
    });

    c.bench_function("price_impact", |b| {
        b.iter(|| {
            calculate_price_impact(
                criterion::black_box(1_000_000),
                criterion::black_box(5_000_000_000),
                criterion::black_box(9_000_000_000),
            )
        })
    });
}

fn bench_initial_liquidity(c: &mut Criterion) {
    let mut group = c.benchmark_group("initial_liquidity");
    for value in [1_000_000u128, 1u128 << 64, u128::MAX] {
        group.bench_with_input(BenchmarkId::from_parameter(value), &value, |b, &v| {
            b.iter(|| SwapMath::initial_liquidity(criterion::black_box(v), criterion::black_box(v)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_swap_math, bench_initial_liquidity);
criterion_main!(benches);
