//! # Repair-Track Scan Benchmarks
//!
//! | Path | Target |
//! |------|--------|
//! | Token scan (decode + buffer) | < 50μs |
//! | Box drain of 100 items | < 1ms |
//! | Path query | < 5μs |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rt_02_entity_store::EntityKind;
use rt_03_scan_dispatch::ScanContext;
use rt_tests::benchmarks::{ids, station};
use std::time::Duration;

fn bench_token_scan(c: &mut Criterion) {
    let station = station();
    let tokens: Vec<String> = ids(EntityKind::Item, 1, 256)
        .iter()
        .filter_map(|id| station.mint_label(id).ok())
        .collect();

    let mut group = c.benchmark_group("rt-03-token-scan");
    group.measurement_time(Duration::from_secs(5));
    group.throughput(Throughput::Elements(1));

    group.bench_function("submit_token", |b| {
        let mut ctx = ScanContext::default();
        let mut n = 0;
        b.iter(|| {
            let token = &tokens[n % tokens.len()];
            n += 1;
            black_box(station.submit(&mut ctx, token).ok())
        });
    });

    group.finish();
}

fn bench_drain(c: &mut Criterion) {
    let station = station();
    let mut group = c.benchmark_group("rt-03-drain");

    for count in [10usize, 100, 1_000] {
        let items: Vec<String> = ids(EntityKind::Item, 1, count)
            .iter()
            .map(ToString::to_string)
            .collect();
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &items, |b, items| {
            b.iter(|| {
                let mut ctx = ScanContext::default();
                for item in items {
                    let _ = station.submit(&mut ctx, item);
                }
                black_box(station.submit(&mut ctx, "b000000000000000001").ok())
            });
        });
    }

    group.finish();
}

fn bench_full_path(c: &mut Criterion) {
    let station = station();
    let mut ctx = ScanContext::default();
    for scan in ["i000000000000000001", "b000000000000000001", "p000000000000000001"] {
        let _ = station.submit(&mut ctx, scan);
    }
    let item = ids(EntityKind::Item, 1, 1)[0];

    c.bench_function("rt-02-full-path", |b| {
        b.iter(|| black_box(ctx.store.full_path(black_box(&item)).ok()))
    });
}

criterion_group!(benches, bench_token_scan, bench_drain, bench_full_path);
criterion_main!(benches);
