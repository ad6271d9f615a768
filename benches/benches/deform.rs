// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_deform::{CurveStyle, DeformConfig, DeformationMapper};

fn tile_rects(count: usize) -> Vec<Rect> {
    (0..count)
        .map(|i| {
            let x = i as f64 * 424.0;
            Rect::new(x, 0.0, x + 400.0, 400.0)
        })
        .collect()
}

fn bench_map(c: &mut Criterion) {
    let container = Rect::new(0.0, 0.0, 1200.0, 400.0);
    let mut group = c.benchmark_group("deform/map");
    for (name, curve) in [
        ("quadratic", CurveStyle::Quadratic),
        ("cubic", CurveStyle::Cubic),
    ] {
        let mapper = DeformationMapper::new(DeformConfig::default().with_curve(curve));
        for count in [9_usize, 64, 512] {
            let tiles = tile_rects(count);
            group.bench_with_input(BenchmarkId::new(name, count), &tiles, |b, tiles| {
                b.iter(|| {
                    let geometry =
                        mapper.map(black_box(1800.0), container, tiles.iter().copied());
                    black_box(geometry.tile_paths.len())
                });
            });
        }
    }
    group.finish();
}

fn bench_dead_zone(c: &mut Criterion) {
    let mapper = DeformationMapper::default();
    let tiles = tile_rects(9);
    let container = Rect::new(0.0, 0.0, 1200.0, 400.0);
    c.bench_function("deform/map_at_rest_9", |b| {
        b.iter(|| {
            let geometry = mapper.map(black_box(0.0), container, tiles.iter().copied());
            black_box(geometry.skew_deg)
        });
    });
}

fn bench_single_paths(c: &mut Criterion) {
    let mapper = DeformationMapper::default();
    let rect = Rect::new(0.0, 0.0, 400.0, 400.0);
    c.bench_function("deform/tile_path", |b| {
        b.iter(|| black_box(mapper.tile_path(black_box(-2000.0), rect)));
    });
    c.bench_function("deform/container_path", |b| {
        b.iter(|| black_box(mapper.container_path(black_box(-2000.0), rect)));
    });
}

criterion_group!(benches, bench_map, bench_dead_zone, bench_single_paths);
criterion_main!(benches);
