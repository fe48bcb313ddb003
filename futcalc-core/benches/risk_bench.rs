//! Criterion benchmarks for futcalc hot paths.
//!
//! Benchmarks:
//! 1. ATR estimation over growing bar histories
//! 2. Full trade plan (all stops, targets, sizing, outcomes) for one direction
//! 3. Long + short plans for every catalog contract
//! 4. Reference-table assembly from snapshots

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use futcalc_core::catalog::ContractCatalog;
use futcalc_core::domain::{Bar, MarketSnapshot};
use futcalc_core::indicators::VolatilityEstimator;
use futcalc_core::reference::ReferenceTable;
use futcalc_core::risk::{Direction, RiskEngine, RiskParameters};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_bars(n: usize) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            Bar::new(
                base_date + chrono::Duration::days(i as i64),
                close - 0.3,
                close + 1.5,
                close - 1.5,
                close,
                1_000,
            )
        })
        .collect()
}

fn snapshots(catalog: &ContractCatalog) -> Vec<MarketSnapshot> {
    catalog
        .contracts()
        .enumerate()
        .map(|(i, c)| {
            MarketSnapshot::new(&c.symbol, Some(100.0 + i as f64), Some(2.0 + i as f64 * 0.1))
        })
        .collect()
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_atr(c: &mut Criterion) {
    let mut group = c.benchmark_group("atr_estimate");
    let estimator = VolatilityEstimator::default();
    for n in [15usize, 250, 2_500] {
        let bars = make_bars(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &bars, |b, bars| {
            b.iter(|| estimator.estimate(black_box(bars)))
        });
    }
    group.finish();
}

fn bench_plan(c: &mut Criterion) {
    let catalog = ContractCatalog::builtin();
    let es = catalog.get("ES=F").cloned().unwrap();
    let snap = MarketSnapshot::new("ES=F", Some(5000.0), Some(20.0));
    let params = RiskParameters::new(100_000.0, 1.0, 1.0, 2).unwrap();
    let engine = RiskEngine::default();

    c.bench_function("plan_single_direction", |b| {
        b.iter(|| engine.plan(black_box(&es), black_box(&snap), &params, Direction::Long))
    });
}

fn bench_plan_catalog(c: &mut Criterion) {
    let catalog = ContractCatalog::builtin();
    let snaps = snapshots(&catalog);
    let params = RiskParameters::new(100_000.0, 1.0, 1.0, 1).unwrap();
    let engine = RiskEngine::default();

    c.bench_function("plan_both_all_contracts", |b| {
        b.iter(|| {
            catalog
                .contracts()
                .zip(&snaps)
                .filter_map(|(contract, snap)| engine.plan_both(contract, snap, &params).ok())
                .count()
        })
    });
}

fn bench_reference_table(c: &mut Criterion) {
    let catalog = ContractCatalog::builtin();
    let snaps = snapshots(&catalog);
    c.bench_function("reference_table_from_snapshots", |b| {
        b.iter(|| ReferenceTable::from_snapshots(black_box(&catalog), black_box(&snaps)))
    });
}

criterion_group!(
    benches,
    bench_atr,
    bench_plan,
    bench_plan_catalog,
    bench_reference_table
);
criterion_main!(benches);
