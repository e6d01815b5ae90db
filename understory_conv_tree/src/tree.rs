// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tree: owns the root node, configuration, split strategy, and id source.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;

use crate::config::TreeConfig;
use crate::ids::{DefaultIds, IdSource};
use crate::node::{Context, Node};
use crate::region::{InvalidRegion, Region};
use crate::split::{DensitySplit, MidpointSplit, SplitStrategy};
use crate::types::{Tagged, WeightedPoint};

/// Quadtree over weighted points.
///
/// Generic over the payload `P` and the [`SplitStrategy`] `S`. A leaf splits
/// once its weight exceeds [`TreeConfig::max_weight`], as long as the size and
/// depth limits allow it.
pub struct Tree<P = (), S = DensitySplit> {
    config: TreeConfig,
    strategy: S,
    ids: Box<dyn IdSource + Send>,
    root: Node<P>,
}

/// Tree whose cuts follow the point density.
pub type AdaptiveTree<P = ()> = Tree<P, DensitySplit>;

/// Tree that always cuts at the centre.
pub type UniformTree<P = ()> = Tree<P, MidpointSplit>;

impl<P, S: fmt::Debug> fmt::Debug for Tree<P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("config", &self.config)
            .field("strategy", &self.strategy)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl<P: Tagged, S: SplitStrategy> Tree<P, S> {
    /// Build a tree over the region spanned by two corners.
    ///
    /// Fails when the corners do not describe a region with positive width and
    /// height (remember that y grows upwards).
    pub fn create(
        top_left: Point,
        bottom_right: Point,
        config: TreeConfig,
        strategy: S,
        points: impl IntoIterator<Item = WeightedPoint<P>>,
    ) -> Result<Self, InvalidRegion> {
        let region = Region::new(top_left, bottom_right)?;
        Ok(Self::with_points(region, config, strategy, points))
    }

    /// An empty tree over `region`.
    pub fn new(region: Region, config: TreeConfig, strategy: S) -> Self {
        Self::with_points(region, config, strategy, [])
    }

    /// A tree over `region` holding `points`, split as far as `config` allows.
    ///
    /// Points outside `region` are dropped.
    pub fn with_points(
        region: Region,
        config: TreeConfig,
        strategy: S,
        points: impl IntoIterator<Item = WeightedPoint<P>>,
    ) -> Self {
        Self::with_id_source(region, config, strategy, DefaultIds::default(), points)
    }

    /// Like [`Tree::with_points`], naming nodes with `ids`.
    pub fn with_id_source(
        region: Region,
        config: TreeConfig,
        strategy: S,
        ids: impl IdSource + Send + 'static,
        points: impl IntoIterator<Item = WeightedPoint<P>>,
    ) -> Self {
        let mut ids: Box<dyn IdSource + Send> = Box::new(ids);
        let points: Vec<_> = points
            .into_iter()
            .filter(|p| {
                let inside = region.contains(p.position);
                if !inside {
                    log::warn!("dropping point {:?} outside {:?}", p.position, region.to_rect());
                }
                inside
            })
            .collect();
        let mut ctx = Context {
            config: &config,
            strategy: &strategy,
            ids: &mut *ids,
        };
        let root = Node::build(&mut ctx, region, 0, points, &[]);
        Self {
            config,
            strategy,
            ids,
            root,
        }
    }

    fn parts(&mut self) -> (Context<'_, S>, &mut Node<P>) {
        let ctx = Context {
            config: &self.config,
            strategy: &self.strategy,
            ids: &mut *self.ids,
        };
        (ctx, &mut self.root)
    }

    /// Store `point` in the leaf containing it.
    ///
    /// With `allow_split`, that leaf splits if it is now over budget; otherwise
    /// it keeps growing until the next [`check`](Self::check). Returns `false`
    /// and stores nothing when the point lies outside the tree.
    pub fn insert(&mut self, point: WeightedPoint<P>, allow_split: bool) -> bool {
        if !self.root.region().contains(point.position) {
            log::warn!(
                "rejecting point {:?} outside {:?}",
                point.position,
                self.root.region().to_rect()
            );
            return false;
        }
        let (mut ctx, root) = self.parts();
        root.insert(&mut ctx, point, allow_split)
    }

    /// Split every leaf that is over budget.
    pub fn check(&mut self) {
        let (mut ctx, root) = self.parts();
        root.check(&mut ctx);
    }

    /// Remove every point, keeping the node layout and the leaf summaries.
    pub fn clear(&mut self) {
        self.root.clear();
    }

    /// Recompute every leaf summary from the points the leaf holds now.
    pub fn refresh_summaries(&mut self) {
        self.root.refresh_summaries(&self.config);
    }
}

impl<P, S> Tree<P, S> {
    /// The root node.
    pub fn root(&self) -> &Node<P> {
        &self.root
    }

    /// The region covered by the tree.
    pub fn region(&self) -> &Region {
        self.root.region()
    }

    /// Split limits.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Split strategy.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// All nodes, depth first, parents before children.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<P>> {
        self.root.iter()
    }

    /// All leaves, in the same order as [`nodes`](Self::nodes).
    pub fn leaves(&self) -> impl Iterator<Item = &Node<P>> {
        self.root.iter().filter(|n| n.is_leaf())
    }

    /// The leaf containing `p`, or `None` outside the tree.
    pub fn leaf_at(&self, p: Point) -> Option<&Node<P>> {
        self.root.leaf_at(p)
    }

    /// Sum of all stored weights.
    pub fn total_weight(&self) -> u64 {
        self.root.total_weight()
    }

    /// Number of stored points.
    pub fn point_count(&self) -> usize {
        self.leaves().map(|n| n.points().len()).sum()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }
}
