//! Benchmarks for the emonsim feed engine and chart transforms
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use emonsim::chart::{cumulative_deltas, merge};
use emonsim::engine::{DataPoint, FeedStorage};

fn filled_feed(interval: f64, count: usize) -> FeedStorage {
    let mut feed = FeedStorage::new(interval);
    for i in 0..count {
        feed.post(i as f64 * interval + interval, i as f64);
    }
    feed
}

fn sample_points(count: usize, interval: f64) -> Vec<DataPoint> {
    (0..count)
        .map(|i| DataPoint::new(i as f64 * interval, i as f64 * 0.25))
        .collect()
}

fn bench_post(c: &mut Criterion) {
    let mut group = c.benchmark_group("post");

    for size in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("sequential_{}", size), |b| {
            b.iter(|| {
                let mut feed = FeedStorage::new(10.0);
                for i in 0..size {
                    feed.post(black_box(i as f64 * 10.0 + 10.0), black_box(i as f64));
                }
                feed
            })
        });

        // Every other sample missing, so half the buckets are gap fills
        group.bench_function(format!("sparse_{}", size), |b| {
            b.iter(|| {
                let mut feed = FeedStorage::new(10.0);
                for i in 0..size / 2 {
                    feed.post(black_box(i as f64 * 20.0 + 10.0), black_box(i as f64));
                }
                feed
            })
        });
    }

    group.finish();
}

fn bench_get_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_data");

    // A day of 10s buckets, queried at dashboard granularity
    let feed = filled_feed(10.0, 8_640);

    group.bench_function("day_at_5min", |b| {
        b.iter(|| feed.get_data(black_box(0.0), black_box(86_400_000.0), black_box(300_000.0)))
    });

    group.bench_function("day_at_native", |b| {
        b.iter(|| feed.get_data(black_box(0.0), black_box(86_400_000.0), black_box(10_000.0)))
    });

    group.finish();
}

fn bench_chart(c: &mut Criterion) {
    let mut group = c.benchmark_group("chart");

    let series: Vec<Vec<DataPoint>> = (0..3).map(|_| sample_points(1_000, 10.0)).collect();

    group.bench_function("merge_3x1000", |b| {
        b.iter(|| merge(black_box(&series), |_, _, _| {}))
    });

    let points = sample_points(1_000, 10.0);

    group.bench_function("cumulative_deltas_1000", |b| {
        b.iter(|| cumulative_deltas(black_box(&points), 1_024, 10.0))
    });

    group.finish();
}

criterion_group!(benches, bench_post, bench_get_data, bench_chart);
criterion_main!(benches);
