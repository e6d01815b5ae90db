// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adaptive versus uniform splitting on clustered points.
//!
//! This example builds the same point set twice:
//! - with `DensitySplit`, which cuts where the smoothed density falls off,
//! - with `MidpointSplit`, which always cuts at the centre,
//!
//! and prints both layouts as indented trees.
//!
//! Run:
//! - `cargo run -p understory_demos --example conv_tree_clusters`

use kurbo::Point;
use understory_conv_tree::{
    AdaptiveTree, DensitySplit, MidpointSplit, Node, SequentialIds, Tree, TreeConfig, UniformTree,
    WeightedPoint,
};
use understory_density::Kernel;

/// Three clusters of different sizes in a 100×100 region.
fn clustered() -> Vec<WeightedPoint> {
    let clusters = [
        (Point::new(20.0, 80.0), 40, 6.0),
        (Point::new(75.0, 70.0), 25, 4.0),
        (Point::new(60.0, 20.0), 60, 10.0),
    ];
    let mut points = Vec::new();
    for (centre, count, spread) in clusters {
        for i in 0..count {
            // A deterministic spiral around the cluster centre.
            let t = f64::from(i);
            let r = spread * (t / f64::from(count)).sqrt();
            let angle = t * 2.399_963;
            let x = centre.x + r * angle.cos();
            let y = centre.y + r * angle.sin();
            points.push(WeightedPoint::new(x, y, 1 + i % 2));
        }
    }
    points
}

fn print_node<P>(node: &Node<P>, indent: usize) {
    let r = node.region();
    let pad = "  ".repeat(indent);
    match node.children() {
        Some(children) => {
            println!(
                "{pad}node {} [{:.1}, {:.1}] .. [{:.1}, {:.1}]",
                node.id(),
                r.left(),
                r.top(),
                r.right(),
                r.bottom()
            );
            for child in children {
                print_node(child, indent + 1);
            }
        }
        None => {
            let summary = node.summary().expect("leaves carry a summary");
            println!(
                "{pad}leaf [{:.1}, {:.1}] .. [{:.1}, {:.1}] points={} weight={} spread={:.2}",
                r.left(),
                r.top(),
                r.right(),
                r.bottom(),
                summary.point_count,
                node.total_weight(),
                summary.average_distance
            );
        }
    }
}

fn main() {
    let top_left = Point::new(0.0, 100.0);
    let bottom_right = Point::new(100.0, 0.0);
    let config = TreeConfig::new()
        .with_min_size(2.0, 2.0)
        .with_max_weight(24)
        .with_max_depth(5);
    let points = clustered();

    let adaptive: AdaptiveTree = Tree::create(
        top_left,
        bottom_right,
        config,
        DensitySplit::new(16, 2, Kernel::smoothing()),
        points.clone(),
    )
    .expect("valid region");
    println!(
        "adaptive: {} leaves, {} nodes, weight {}",
        adaptive.leaf_count(),
        adaptive.nodes().count(),
        adaptive.total_weight()
    );
    print_node(adaptive.root(), 1);

    let region = *adaptive.region();
    let uniform: UniformTree =
        Tree::with_id_source(region, config, MidpointSplit, SequentialIds::new(), points);
    println!(
        "uniform: {} leaves, {} nodes, weight {}",
        uniform.leaf_count(),
        uniform.nodes().count(),
        uniform.total_weight()
    );
    print_node(uniform.root(), 1);

    // Points exactly on a cut line go to the left and top children.
    let on_cut = adaptive.root().children().map(|c| c[0].region().bottom_right());
    if let Some(p) = on_cut {
        let leaf = adaptive.leaf_at(p).expect("inside the region");
        println!("cut corner {p:?} lands in leaf {}", leaf.id());
    }
}
