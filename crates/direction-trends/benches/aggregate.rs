use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};

use direction_trends::aggregate::{SeriesLoader, build_matrix, rank};
use direction_trends::config::Config;
use direction_trends::models::{
    Direction, Series, SeriesMap, Transform, YearCount, YearRange, default_directions,
};
use direction_trends::source::MemorySource;

const RANGE: YearRange = YearRange::new(2010, 2025);

fn catalog_series(directions: &[Direction]) -> SeriesMap {
    let mut map = SeriesMap::new();
    for (i, direction) in directions.iter().enumerate() {
        let points = RANGE.iter().map(|year| {
            let count = ((year - RANGE.start) as u64 + 1) * (i as u64 % 7 + 1) * 13;
            YearCount::new(year, count)
        });
        map.insert(direction.clone(), Series::from_points(points));
    }
    map
}

fn bench_matrix(c: &mut Criterion) {
    let directions = default_directions();
    let series = catalog_series(&directions);
    let years = RANGE.years();

    c.bench_function("matrix_catalog_log1p", |b| {
        b.iter(|| build_matrix(black_box(&series), &directions, &years, Transform::Log1p))
    });

    c.bench_function("matrix_catalog_identity", |b| {
        b.iter(|| build_matrix(black_box(&series), &directions, &years, Transform::Identity))
    });
}

fn bench_rank(c: &mut Criterion) {
    let directions = default_directions();
    let series = catalog_series(&directions);

    c.bench_function("rank_catalog_top15", |b| {
        b.iter(|| rank(black_box(&series), &directions, black_box(2020), 15))
    });
}

fn bench_loader(c: &mut Criterion) {
    let directions = default_directions();
    let pairs: Vec<(String, Vec<(i32, u64)>)> = directions
        .iter()
        .enumerate()
        .map(|(i, d)| (d.to_string(), vec![(2015, i as u64), (2024, 10 * i as u64)]))
        .collect();
    let source = Arc::new(MemorySource::from_pairs(
        pairs.iter().map(|(name, points)| (name.as_str(), points.clone())),
    ));
    let loader = SeriesLoader::new(source, &Config::for_testing("http://localhost"));

    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    c.bench_function("load_catalog_uncached", |b| {
        b.to_async(&runtime).iter(|| loader.load(&directions, RANGE))
    });
}

criterion_group!(benches, bench_matrix, bench_rank, bench_loader);
criterion_main!(benches);
