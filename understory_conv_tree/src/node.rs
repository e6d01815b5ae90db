// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree nodes: leaves holding points, internal nodes holding four children.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;

use crate::config::TreeConfig;
use crate::ids::IdSource;
use crate::region::Region;
use crate::split::SplitStrategy;
use crate::summary::LeafSummary;
use crate::types::{NodeId, Quadrant, Tagged, WeightedPoint};

/// A node of a [`Tree`](crate::Tree).
///
/// A node starts out as a leaf. Once split it becomes internal for good, owns
/// four children in [`Quadrant::ALL`] order, and no longer stores points.
pub struct Node<P = ()> {
    id: NodeId,
    region: Region,
    depth: usize,
    state: NodeState<P>,
}

enum NodeState<P> {
    Leaf {
        points: Vec<WeightedPoint<P>>,
        summary: LeafSummary,
    },
    Internal(Box<[Node<P>; 4]>),
}

/// Borrowed view of what a node holds.
#[derive(Debug)]
pub enum NodeKind<'a, P> {
    /// A leaf and its points.
    Leaf(&'a [WeightedPoint<P>]),
    /// An internal node and its children.
    Internal(&'a [Node<P>; 4]),
}

impl<P> fmt::Debug for Node<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Node");
        s.field("id", &self.id)
            .field("region", &self.region)
            .field("depth", &self.depth);
        match &self.state {
            NodeState::Leaf { points, .. } => s.field("points", &points.len()),
            NodeState::Internal(children) => s.field("children", children),
        };
        s.finish_non_exhaustive()
    }
}

/// What a node needs from its tree while it grows.
pub(crate) struct Context<'a, S> {
    pub(crate) config: &'a TreeConfig,
    pub(crate) strategy: &'a S,
    pub(crate) ids: &'a mut dyn IdSource,
}

impl<P> Node<P> {
    /// Identifier assigned at creation.
    #[inline]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Area covered by this node.
    #[inline]
    pub const fn region(&self) -> &Region {
        &self.region
    }

    /// Distance from the root, which has depth 0.
    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Whether this node is a leaf.
    pub const fn is_leaf(&self) -> bool {
        matches!(self.state, NodeState::Leaf { .. })
    }

    /// Points stored in this node. Always empty for internal nodes.
    pub fn points(&self) -> &[WeightedPoint<P>] {
        match &self.state {
            NodeState::Leaf { points, .. } => points,
            NodeState::Internal(_) => &[],
        }
    }

    /// Children in [`Quadrant::ALL`] order, if this node has been split.
    pub fn children(&self) -> Option<&[Self; 4]> {
        match &self.state {
            NodeState::Leaf { .. } => None,
            NodeState::Internal(children) => Some(children),
        }
    }

    /// The child in quadrant `q`, if this node has been split.
    pub fn child(&self, q: Quadrant) -> Option<&Self> {
        self.children().map(|children| &children[q.index()])
    }

    /// Statistics of a leaf. `None` for internal nodes.
    ///
    /// Computed when the leaf is created and by [`Tree::refresh_summaries`].
    /// Inserting points or clearing the tree leaves it as it was, so
    /// `point_count`, `center` and `average_distance` may not match
    /// [`Node::points`] until the next refresh.
    ///
    /// [`Tree::refresh_summaries`]: crate::Tree::refresh_summaries
    pub fn summary(&self) -> Option<&LeafSummary> {
        match &self.state {
            NodeState::Leaf { summary, .. } => Some(summary),
            NodeState::Internal(_) => None,
        }
    }

    /// Borrowed view of the node's contents.
    pub fn kind(&self) -> NodeKind<'_, P> {
        match &self.state {
            NodeState::Leaf { points, .. } => NodeKind::Leaf(points),
            NodeState::Internal(children) => NodeKind::Internal(children),
        }
    }

    /// Sum of the weights stored in this subtree.
    pub fn total_weight(&self) -> u64 {
        match &self.state {
            NodeState::Leaf { points, .. } => points.iter().map(|p| u64::from(p.weight)).sum(),
            NodeState::Internal(children) => children.iter().map(Self::total_weight).sum(),
        }
    }

    /// Whether this node is a leaf that `config` says must split.
    pub fn is_split_eligible(&self, config: &TreeConfig) -> bool {
        self.is_leaf() && config.allows_split(&self.region, self.depth, self.total_weight())
    }

    /// This node and its descendants, depth first, parents before children.
    pub fn iter(&self) -> impl Iterator<Item = &Self> {
        let mut stack = vec![self];
        core::iter::from_fn(move || {
            let node = stack.pop()?;
            if let Some(children) = node.children() {
                stack.extend(children.iter().rev());
            }
            Some(node)
        })
    }

    /// The leaf whose region contains `p`.
    pub fn leaf_at(&self, p: Point) -> Option<&Self> {
        if !self.region.contains(p) {
            return None;
        }
        let mut node = self;
        while let Some(children) = node.children() {
            node = children.iter().find(|c| c.region.contains(p))?;
        }
        Some(node)
    }

    /// Drop every stored point, keeping the shape and the leaf summaries.
    pub(crate) fn clear(&mut self) {
        match &mut self.state {
            NodeState::Leaf { points, .. } => points.clear(),
            NodeState::Internal(children) => children.iter_mut().for_each(Self::clear),
        }
    }
}

impl<P: Tagged> Node<P> {
    /// Create a leaf over `points` and split it as far as the tree allows.
    pub(crate) fn build<S: SplitStrategy>(
        ctx: &mut Context<'_, S>,
        region: Region,
        depth: usize,
        points: Vec<WeightedPoint<P>>,
        inherited: &[String],
    ) -> Self {
        let summary =
            LeafSummary::from_points(&points).inherit(inherited, ctx.config.baseline_inheritance);
        let mut node = Self {
            id: ctx.ids.next_id(),
            region,
            depth,
            state: NodeState::Leaf { points, summary },
        };
        node.split_if_eligible(ctx);
        node
    }

    fn split_if_eligible<S: SplitStrategy>(&mut self, ctx: &mut Context<'_, S>) {
        if self.is_split_eligible(ctx.config) {
            self.split(ctx);
        }
    }

    fn split<S: SplitStrategy>(&mut self, ctx: &mut Context<'_, S>) {
        let proposed = ctx.strategy.propose_cut(&self.region, self.points());
        let Some(cut) = clamp_cut(&self.region, proposed, ctx.config) else {
            log::warn!(
                "no cut fits {:?}, node {} stays a leaf",
                self.region.to_rect(),
                self.id
            );
            return;
        };
        let NodeState::Leaf { points, summary } = &mut self.state else {
            return;
        };
        let points = core::mem::take(points);
        let inherited = core::mem::take(&mut summary.baseline_tags);
        let regions = self.region.quadrants(cut);

        let mut buckets: [Vec<WeightedPoint<P>>; 4] = core::array::from_fn(|_| Vec::new());
        for p in points {
            // Children tile the parent, so a stored point always finds one.
            let i = regions
                .iter()
                .position(|r| r.contains(p.position))
                .unwrap_or(Quadrant::BottomRight.index());
            buckets[i].push(p);
        }
        log::debug!(
            "splitting node {} at depth {} at {cut:?}, weights {:?}",
            self.id,
            self.depth,
            buckets
                .each_ref()
                .map(|b| b.iter().map(|p| u64::from(p.weight)).sum::<u64>()),
        );

        let depth = self.depth + 1;
        let children = core::array::from_fn(|i| {
            Self::build(
                ctx,
                regions[i],
                depth,
                core::mem::take(&mut buckets[i]),
                &inherited,
            )
        });
        self.state = NodeState::Internal(Box::new(children));
    }

    /// Route `point` to its leaf and store it there. Returns `false` if no leaf contains it.
    pub(crate) fn insert<S: SplitStrategy>(
        &mut self,
        ctx: &mut Context<'_, S>,
        point: WeightedPoint<P>,
        allow_split: bool,
    ) -> bool {
        match &mut self.state {
            NodeState::Internal(children) => {
                match children.iter_mut().find(|c| c.region.contains(point.position)) {
                    Some(child) => child.insert(ctx, point, allow_split),
                    None => false,
                }
            }
            NodeState::Leaf { points, .. } => {
                points.push(point);
                if allow_split {
                    self.split_if_eligible(ctx);
                }
                true
            }
        }
    }

    /// Split every eligible leaf in this subtree.
    pub(crate) fn check<S: SplitStrategy>(&mut self, ctx: &mut Context<'_, S>) {
        match &mut self.state {
            NodeState::Internal(children) => {
                for child in children.iter_mut() {
                    child.check(ctx);
                }
            }
            NodeState::Leaf { .. } => self.split_if_eligible(ctx),
        }
    }

    /// Recompute the summary of every leaf from its current points.
    ///
    /// A leaf's previous baseline tags seed the inheritance policy.
    pub(crate) fn refresh_summaries(&mut self, config: &TreeConfig) {
        match &mut self.state {
            NodeState::Internal(children) => {
                for child in children.iter_mut() {
                    child.refresh_summaries(config);
                }
            }
            NodeState::Leaf { points, summary } => {
                let previous = core::mem::take(&mut summary.baseline_tags);
                *summary = LeafSummary::from_points(points)
                    .inherit(&previous, config.baseline_inheritance);
            }
        }
    }
}

/// Move `cut` so both sides keep the minimum size, and fall back to the centre
/// when the result is not strictly inside `region`.
///
/// `None` when not even the centre is strictly inside.
fn clamp_cut(region: &Region, cut: Point, config: &TreeConfig) -> Option<Point> {
    let mut x = cut.x;
    if x - region.left() < config.min_width {
        x = region.left() + config.min_width;
    }
    if region.right() - x < config.min_width {
        x = region.right() - config.min_width;
    }
    let mut y = cut.y;
    if region.top() - y < config.min_height {
        y = region.top() - config.min_height;
    }
    if y - region.bottom() < config.min_height {
        y = region.bottom() + config.min_height;
    }
    let clamped = Point::new(x, y);
    if region.strictly_contains(clamped) {
        return Some(clamped);
    }
    let center = region.center();
    if !region.strictly_contains(center) {
        return None;
    }
    log::warn!(
        "cut {cut:?} does not fit {:?}, cutting at the centre",
        region.to_rect()
    );
    Some(center)
}
