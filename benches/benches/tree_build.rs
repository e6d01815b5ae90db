// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_conv_tree::{
    AdaptiveTree, DensitySplit, MidpointSplit, Region, SequentialIds, Tree, TreeConfig,
    UniformTree, WeightedPoint,
};

const SIDE: f64 = 1000.0;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn region() -> Region {
    Region::new(Point::new(0.0, SIDE), Point::new(SIDE, 0.0)).unwrap()
}

fn config() -> TreeConfig {
    TreeConfig::new()
        .with_min_size(4.0, 4.0)
        .with_max_weight(32)
        .with_max_depth(10)
}

fn gen_uniform_points(count: usize, seed: u64) -> Vec<WeightedPoint> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            let x = rng.next_f64() * SIDE;
            let y = rng.next_f64() * SIDE;
            WeightedPoint::new(x, y, 1 + (rng.next_u64() % 4) as u32)
        })
        .collect()
}

fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<WeightedPoint> {
    let mut rng = Rng::new(0xC0FFEE);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for _ in 0..n_clusters {
        let cx = spread + rng.next_f64() * (SIDE - 2.0 * spread);
        let cy = spread + rng.next_f64() * (SIDE - 2.0 * spread);
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * 2.0 * spread;
            let dy = (rng.next_f64() - 0.5) * 2.0 * spread;
            out.push(WeightedPoint::new(cx + dx, cy + dy, 1));
        }
    }
    out
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let inputs = [
        ("uniform_4k", gen_uniform_points(4_000, 0xDEADBEEF)),
        ("clustered_8x500", gen_clustered_points(8, 500, 20.0)),
    ];
    for (name, points) in &inputs {
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("adaptive_{name}"), |b| {
            b.iter_batched(
                || points.clone(),
                |pts| {
                    let tree: AdaptiveTree = Tree::with_id_source(
                        region(),
                        config(),
                        DensitySplit::new(16, 2, Default::default()),
                        SequentialIds::new(),
                        pts,
                    );
                    black_box(tree.leaf_count());
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("uniform_{name}"), |b| {
            b.iter_batched(
                || points.clone(),
                |pts| {
                    let tree: UniformTree = Tree::with_id_source(
                        region(),
                        config(),
                        MidpointSplit,
                        SequentialIds::new(),
                        pts,
                    );
                    black_box(tree.leaf_count());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    let points = gen_clustered_points(8, 500, 20.0);
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("adaptive_split_on_insert", |b| {
        b.iter_batched(
            || points.clone(),
            |pts| {
                let mut tree: AdaptiveTree = Tree::with_id_source(
                    region(),
                    config(),
                    DensitySplit::default(),
                    SequentialIds::new(),
                    [],
                );
                for p in pts {
                    tree.insert(p, true);
                }
                black_box(tree.leaf_count());
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("adaptive_bulk_then_check", |b| {
        b.iter_batched(
            || points.clone(),
            |pts| {
                let mut tree: AdaptiveTree = Tree::with_id_source(
                    region(),
                    config(),
                    DensitySplit::default(),
                    SequentialIds::new(),
                    [],
                );
                for p in pts {
                    tree.insert(p, false);
                }
                tree.check();
                black_box(tree.leaf_count());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_insert);
criterion_main!(benches);
