// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_density::{DensityGrid, Kernel, Smoothing, find_split};

fn gen_cluster(count: usize, centre: Point, spread: f64, seed: u64) -> Vec<(Point, f64)> {
    let mut state = seed;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        ((state >> 11) as f64) / ((1u64 << 53) as f64)
    };
    (0..count)
        .map(|_| {
            let x = centre.x + (next() - 0.5) * spread;
            let y = centre.y + (next() - 0.5) * spread;
            (Point::new(x, y), 1.0)
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
    let samples = gen_cluster(2_000, Point::new(30.0, 70.0), 15.0, 0x5EED);
    let mut group = c.benchmark_group("density");
    for size in [8_usize, 16, 32, 64] {
        group.bench_function(format!("rasterize_n{size}"), |b| {
            b.iter(|| black_box(DensityGrid::rasterize(bounds, size, samples.iter().copied())));
        });
        let grid = DensityGrid::rasterize(bounds, size, samples.iter().copied());
        group.bench_function(format!("smooth2_n{size}"), |b| {
            let smoothing = Smoothing::new(Kernel::smoothing(), 2);
            b.iter_batched(
                || grid.clone(),
                |g| black_box(smoothing.apply(g)),
                BatchSize::SmallInput,
            );
        });
        if let Some(smoothed) = Smoothing::default().apply(grid) {
            group.bench_function(format!("find_split_n{size}"), |b| {
                b.iter(|| black_box(find_split(&smoothed)));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
