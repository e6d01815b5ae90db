// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Observation windows with tagged payloads.
//!
//! A tree is built from a first batch of tagged observations. Each following
//! window clears the points, replays the new batch without splitting, settles
//! the layout with `check`, and refreshes the leaf summaries. Leaves that see
//! no tagged points keep the baseline tags of the previous window.
//!
//! Run:
//! - `cargo run -p understory_demos --example conv_tree_windows`

use kurbo::Point;
use understory_conv_tree::{
    AdaptiveTree, BaselineInheritance, DensitySplit, Tree, TreeConfig, WeightedPoint,
};

type Observation = WeightedPoint<Vec<String>>;

fn observe(x: f64, y: f64, tags: &[&str]) -> Observation {
    WeightedPoint::with_payload(x, y, 1, tags.iter().map(|t| t.to_string()).collect())
}

fn window(shift: f64, tags: &[&str]) -> Vec<Observation> {
    let mut out = Vec::new();
    for i in 0..30 {
        let t = f64::from(i);
        out.push(observe(10.0 + shift + (t * 0.7) % 8.0, 40.0 - (t * 1.3) % 9.0, tags));
        if i % 3 == 0 {
            out.push(observe(40.0 - (t * 0.9) % 6.0, 8.0 + (t * 0.4) % 5.0, &["bus"]));
        }
    }
    out
}

fn report(label: &str, tree: &AdaptiveTree<Vec<String>>) {
    println!("{label}: {} leaves, {} points", tree.leaf_count(), tree.point_count());
    for leaf in tree.leaves() {
        let summary = leaf.summary().expect("leaves carry a summary");
        let r = leaf.region();
        println!(
            "  [{:>5.1}, {:>5.1}] .. [{:>5.1}, {:>5.1}] n={:<3} baseline={:?}",
            r.left(),
            r.top(),
            r.right(),
            r.bottom(),
            summary.point_count,
            summary.baseline_tags
        );
    }
}

fn main() {
    let config = TreeConfig::new()
        .with_min_size(2.0, 2.0)
        .with_max_weight(12)
        .with_max_depth(4)
        .with_baseline_inheritance(BaselineInheritance::OverwriteIfNonEmpty);
    let mut tree: AdaptiveTree<Vec<String>> = Tree::create(
        Point::new(0.0, 50.0),
        Point::new(50.0, 0.0),
        config,
        DensitySplit::default(),
        window(0.0, &["car", "red"]),
    )
    .expect("valid region");
    report("window 0", &tree);

    for (n, tags) in [&["car"][..], &["truck", "red"][..]].into_iter().enumerate() {
        tree.clear();
        for obs in window(4.0 * (n + 1) as f64, tags) {
            tree.insert(obs, false);
        }
        tree.check();
        tree.refresh_summaries();
        report(&format!("window {}", n + 1), &tree);
    }

    let stray = observe(75.0, 10.0, &["car"]);
    println!("stray observation accepted: {}", tree.insert(stray, true));
}
