//! Criterion benchmarks for queue_logger

use chrono::{Local, TimeZone};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use queue_logger::prelude::*;
use queue_logger::{render_message, substitute, RenderContext};

// ============================================================================
// Template Substitution Benchmarks
// ============================================================================

fn bench_substitute(c: &mut Criterion) {
    let mut group = c.benchmark_group("substitute");
    group.throughput(Throughput::Elements(1));

    group.bench_function("no_args", |b| {
        b.iter(|| substitute(black_box("Server started"), &[]));
    });

    let args = [Arg::from("alice"), Arg::from(42), Arg::from(0.75)];
    group.bench_function("three_args", |b| {
        b.iter(|| substitute(black_box("user {} id {} ratio {}"), black_box(&args)));
    });

    group.finish();
}

// ============================================================================
// Rendering Benchmarks
// ============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    group.throughput(Throughput::Elements(1));

    let ctx = RenderContext {
        now: Local
            .with_ymd_and_hms(2025, 1, 8, 12, 0, 0)
            .single()
            .expect("unambiguous local time"),
        pid: 1,
        tid: "1".to_string(),
    };
    let all = Flags::union_of(&[Flags::LEVEL, Flags::DATE, Flags::TIME, Flags::PID, Flags::TID]);

    group.bench_function("plain_level_only", |b| {
        b.iter(|| render_message(Level::Info, black_box("message"), Flags::LEVEL, false, &ctx));
    });

    group.bench_function("plain_all_fields", |b| {
        b.iter(|| render_message(Level::Info, black_box("message"), all, false, &ctx));
    });

    group.bench_function("json_all_fields", |b| {
        b.iter(|| render_message(Level::Info, black_box("message"), all, true, &ctx));
    });

    group.finish();
}

// ============================================================================
// Enqueue Benchmarks
// ============================================================================

fn bench_enqueue(c: &mut Criterion) {
    let mut group = c.benchmark_group("enqueue");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::new();
    logger.set_level(Level::Info);
    logger.start().expect("Failed to start writer");

    group.bench_function("filtered", |b| {
        b.iter(|| logger.debug(black_box("below threshold"), &[]));
    });

    group.finish();
    logger.stop();
}

criterion_group!(benches, bench_substitute, bench_render, bench_enqueue);
criterion_main!(benches);
