//! Criterion benchmarks for the calculator core.
//!
//! Three benchmark groups:
//! - `simplex`: dense slack-form LPs of growing size
//! - `propagate`: recursive expansion over a long chain and a branching graph
//! - `rational`: decimal rendering of awkward fractions

use std::collections::HashSet;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use yieldgraph_core::facility::CalcContext;
use yieldgraph_core::propagate::Propagator;
use yieldgraph_core::rational::Rational;
use yieldgraph_core::simplex::{SimplexOptions, simplex};
use yieldgraph_core::test_utils::*;

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_simplex(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplex");
    let options = SimplexOptions::default();
    for n in [4, 16, 32] {
        let lp = dense_lp(n);
        group.bench_with_input(BenchmarkId::new("dense_lp", n), &lp, |b, lp| {
            b.iter(|| {
                let mut a = lp.clone();
                simplex(&mut a, &options)
            });
        });
    }
    group.bench_function("beale", |b| {
        let tableau = beale_tableau();
        b.iter(|| {
            let mut a = tableau.clone();
            simplex(&mut a, &options)
        });
    });
    group.finish();
}

fn bench_propagate(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagate");
    let ctx = CalcContext::new();
    let ignore = HashSet::new();

    let chain = deep_chain(500);
    let propagator = Propagator::new(1_000);
    let top = chain.item_id("item-499");
    group.bench_function("deep_chain_500", |b| {
        b.iter(|| top.map(|item| propagator.produce(&chain, item, rat(7, 3), &ignore, &ctx)));
    });

    let electronics = electronics_graph();
    let inserter = electronics.item_id("inserter");
    group.bench_function("inserter", |b| {
        b.iter(|| {
            inserter.map(|item| {
                Propagator::default().produce(&electronics, item, rat(45, 2), &ignore, &ctx)
            })
        });
    });
    group.finish();
}

fn bench_rational(c: &mut Criterion) {
    let mut group = c.benchmark_group("rational");
    let values: Vec<Rational> = (1..200).map(|i| rat(i * 7919, 997 + i)).collect();
    group.bench_function("to_decimal_3", |b| {
        b.iter(|| values.iter().map(|v| v.to_decimal(3)).collect::<Vec<_>>());
    });
    group.bench_function("to_up_decimal_3", |b| {
        b.iter(|| values.iter().map(|v| v.to_up_decimal(3)).collect::<Vec<_>>());
    });
    group.finish();
}

criterion_group!(benches, bench_simplex, bench_propagate, bench_rational);
criterion_main!(benches);
