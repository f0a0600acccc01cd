use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use screenfit_core::prelude::*;
use screenfit_platform::{ScreenDimensions, StaticMetricsSource};

fn engine() -> ScaleEngine {
    ScaleEngine::builder()
        .source(Arc::new(StaticMetricsSource::new(ScreenDimensions::new(
            428.0, 926.0, 3.0,
        ))))
        .configuration(Configuration::IPHONE_13_PRO)
        .build()
}

fn single_values(c: &mut Criterion) {
    let engine = engine();
    let snapshot = engine.fast_scaler();

    let mut group = c.benchmark_group("single");
    group.bench_function("scale", |b| {
        b.iter(|| engine.scale(black_box(16.0), ScaleType::Width))
    });
    group.bench_function("fast_scale", |b| {
        b.iter(|| engine.fast_scale(black_box(16.0), ScaleType::Width))
    });
    group.bench_function("snapshot", |b| b.iter(|| snapshot.width(black_box(16.0))));
    group.bench_function("scale_rect", |b| {
        b.iter(|| engine.scale_rect(black_box(Rect::new(8.0, 8.0, 120.0, 44.0))))
    });
    group.finish();
}

fn batches(c: &mut Criterion) {
    let engine = engine();
    let values: Vec<f64> = (0..1_000).map(f64::from).collect();

    let mut group = c.benchmark_group("batch_1000");
    group.bench_function("loop_scale", |b| {
        b.iter(|| {
            values
                .iter()
                .map(|&v| engine.scale(v, ScaleType::Width))
                .collect::<Vec<_>>()
        })
    });
    group.bench_function("batch_widths", |b| {
        b.iter(|| engine.batch_widths(black_box(values.as_slice())))
    });
    group.finish();
}

fn reconfigure(c: &mut Criterion) {
    let engine = engine();
    c.bench_function("configure", |b| {
        b.iter(|| engine.configure(black_box(Configuration::IPHONE_14_PRO)))
    });
}

criterion_group!(benches, single_values, batches, reconfigure);
criterion_main!(benches);
