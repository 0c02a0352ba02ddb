//! Benchmarks for bond valuation and discount curve fitting.
//!
//! Run with: cargo bench -p bondfit-bonds

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use bondfit_bonds::prelude::*;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn today() -> Date {
    date(2020, 7, 23)
}

fn create_universe() -> Vec<Bond> {
    let quotes = [
        (date(2015, 5, 21), date(2015, 11, 21), date(2020, 11, 21), 0.015, 101.066),
        (date(2007, 5, 15), date(2015, 11, 15), date(2021, 5, 15), 0.0575, 105.640),
        (date(2010, 7, 15), date(2011, 1, 15), date(2022, 7, 15), 0.0575, 111.177),
        (date(2017, 5, 21), date(2017, 11, 21), date(2022, 11, 21), 0.0225, 105.213),
        (date(2011, 10, 21), date(2012, 4, 21), date(2023, 4, 21), 0.055, 115.900),
        (date(2012, 10, 21), date(2013, 4, 21), date(2024, 4, 21), 0.0275, 109.920),
        (date(2020, 5, 21), date(2020, 11, 21), date(2024, 11, 21), 0.0025, 99.699),
        (date(2013, 10, 21), date(2014, 4, 21), date(2025, 4, 21), 0.0325, 114.365),
        (date(2014, 4, 21), date(2014, 10, 21), date(2026, 4, 21), 0.0425, 122.362),
        (date(2012, 4, 21), date(2012, 10, 21), date(2027, 4, 21), 0.0475, 128.980),
        (date(2016, 5, 21), date(2016, 11, 21), date(2027, 11, 21), 0.0275, 115.380),
    ];

    quotes
        .into_iter()
        .map(|(first, second, maturity, rate, price)| {
            Bond::semi_annual(first, second, maturity, rate, 100.0)
                .unwrap()
                .with_market_dirty_price(price)
        })
        .collect()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_dirty_value(c: &mut Criterion) {
    let bonds = create_universe();
    let curve = fit_discount_curve(&bonds, &DiscountFitOptions::default(), today()).unwrap();

    c.bench_function("dirty_value_universe", |b| {
        b.iter(|| {
            bonds
                .iter()
                .map(|bond| bond.dirty_value(black_box(&curve), today()).unwrap())
                .sum::<f64>()
        });
    });
}

fn bench_calibration(c: &mut Criterion) {
    let bonds = create_universe();
    let mut group = c.benchmark_group("fit_discount_curve");

    for knots in [5usize, 10] {
        let options = DiscountFitOptions::default().with_knot_count(knots);
        group.bench_with_input(BenchmarkId::from_parameter(knots), &options, |b, options| {
            b.iter(|| fit_discount_curve(black_box(&bonds), options, today()).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dirty_value, bench_calibration);
criterion_main!(benches);
