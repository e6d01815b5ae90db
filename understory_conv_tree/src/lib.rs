// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_conv_tree --heading-base-level=0

//! Understory Conv Tree: an adaptive quadtree over weighted 2D points.
//!
//! A [`Tree`] covers a rectangular [`Region`] (y grows upwards) and stores
//! [`WeightedPoint`]s in its leaves. When a leaf holds more weight than
//! [`TreeConfig::max_weight`] it splits into four children, as long as the
//! children would respect the minimum size and the depth limit.
//!
//! Where a leaf is cut is up to its [`SplitStrategy`]:
//!
//! - [`DensitySplit`] rasterizes the leaf's points into a density grid,
//!   smooths it by repeated convolution, and cuts just past the edge of the
//!   dominant cluster (see [`understory_density`]). [`AdaptiveTree`] uses it.
//! - [`MidpointSplit`] always cuts at the centre. [`UniformTree`] uses it.
//!
//! Every leaf carries a [`LeafSummary`]: point count, centroid, spread, and
//! baseline tags gathered from payloads implementing [`Tagged`].
//!
//! Points on a cut line belong to the left and top children, so every point of
//! a node lies in exactly one of its children.
//!
//! # Example
//!
//! ```rust
//! use kurbo::Point;
//! use understory_conv_tree::{AdaptiveTree, DensitySplit, Quadrant, TreeConfig, WeightedPoint};
//!
//! // Two tight clusters in opposite corners of a 10×10 region.
//! let mut points = Vec::new();
//! for k in 0..10 {
//!     let d = 0.05 * f64::from(k);
//!     points.push(WeightedPoint::new(1.2 + d, 8.4 + d, 1));
//!     points.push(WeightedPoint::new(8.2 + d, 1.4 + d, 1));
//! }
//!
//! let config = TreeConfig::new().with_max_weight(5).with_max_depth(4);
//! let tree = AdaptiveTree::create(
//!     Point::new(0.0, 10.0),
//!     Point::new(10.0, 0.0),
//!     config,
//!     DensitySplit::new(10, 2, Default::default()),
//!     points,
//! )
//! .unwrap();
//!
//! let root = tree.root();
//! assert!(!root.is_leaf());
//! assert_eq!(root.child(Quadrant::TopLeft).unwrap().total_weight(), 10);
//! assert_eq!(root.child(Quadrant::BottomRight).unwrap().total_weight(), 10);
//! assert_eq!(tree.total_weight(), 20);
//!
//! for leaf in tree.leaves() {
//!     assert!(!leaf.is_split_eligible(tree.config()));
//! }
//! ```
//!
//! Bulk loads can defer splitting and settle the tree once at the end:
//!
//! ```rust
//! use kurbo::Point;
//! use understory_conv_tree::{MidpointSplit, Region, TreeConfig, UniformTree, WeightedPoint};
//!
//! let region = Region::new(Point::new(0.0, 8.0), Point::new(8.0, 0.0)).unwrap();
//! let config = TreeConfig::new().with_max_weight(2);
//! let mut tree: UniformTree = UniformTree::new(region, config, MidpointSplit);
//! for i in 0..6 {
//!     tree.insert(WeightedPoint::new(0.5 + f64::from(i), 4.5, 1), false);
//! }
//! assert_eq!(tree.leaf_count(), 1);
//! tree.check();
//! assert!(tree.leaf_count() > 1);
//! assert!(!tree.insert(WeightedPoint::new(9.0, 1.0, 1), true));
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Enable either `std` (default) or
//! `libm` for floating-point math. Node identifiers are random UUIDs with the
//! default `random_ids` feature and sequential UUIDs without it.

#![no_std]

extern crate alloc;

mod config;
mod ids;
mod node;
mod region;
mod split;
mod summary;
mod tree;
mod types;

pub use config::{BaselineInheritance, TreeConfig};
pub use ids::{DefaultIds, IdSource, SequentialIds};
#[cfg(feature = "random_ids")]
pub use ids::RandomIds;
pub use node::{Node, NodeKind};
pub use region::{InvalidRegion, Region};
pub use split::{DensitySplit, MidpointSplit, SplitStrategy};
pub use summary::{LeafSummary, baseline_tags};
pub use tree::{AdaptiveTree, Tree, UniformTree};
pub use types::{Edges, NodeId, Quadrant, Tagged, WeightedPoint};
pub use understory_density;
