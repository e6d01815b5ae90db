// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Split thresholds shared by every node of a tree.

use crate::region::Region;

/// How a fresh leaf combines the baseline tags it inherits from its parent
/// with the tags computed from its own points.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BaselineInheritance {
    /// Keep the parent's tags unless the leaf computes a non-empty set.
    #[default]
    OverwriteIfNonEmpty,
    /// Always use the leaf's own tags, even when empty.
    Replace,
    /// Merge both sets.
    Union,
}

/// Limits that decide when a leaf splits.
///
/// A leaf splits only when all of these hold:
/// - its width is more than `2 * min_width`,
/// - its height is more than `2 * min_height`,
/// - its total weight is more than `max_weight`,
/// - its depth is less than `max_depth`,
/// - its centre lies strictly inside it, so the children have positive size.
///
/// ```rust
/// use understory_conv_tree::TreeConfig;
///
/// let config = TreeConfig::new()
///     .with_min_size(0.5, 0.5)
///     .with_max_weight(4)
///     .with_max_depth(6);
/// assert_eq!(config.max_weight, 4);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TreeConfig {
    /// Minimum width of any node produced by a split.
    pub min_width: f64,
    /// Minimum height of any node produced by a split.
    pub min_height: f64,
    /// Largest total weight a leaf may hold without splitting.
    pub max_weight: u64,
    /// Depth at which leaves stop splitting. The root has depth 0.
    pub max_depth: usize,
    /// Tag inheritance policy for new leaves.
    pub baseline_inheritance: BaselineInheritance,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            min_width: 1.0,
            min_height: 1.0,
            max_weight: 16,
            max_depth: 8,
            baseline_inheritance: BaselineInheritance::default(),
        }
    }
}

impl TreeConfig {
    /// Default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum child size.
    pub fn with_min_size(mut self, min_width: f64, min_height: f64) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    /// Set the weight budget of a leaf.
    pub fn with_max_weight(mut self, max_weight: u64) -> Self {
        self.max_weight = max_weight;
        self
    }

    /// Set the depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the tag inheritance policy.
    pub fn with_baseline_inheritance(mut self, policy: BaselineInheritance) -> Self {
        self.baseline_inheritance = policy;
        self
    }

    /// Whether a leaf covering `region` at `depth` holding `weight` must split.
    ///
    /// A region too thin to hold four children of positive size never splits,
    /// whatever the minimum sizes say.
    pub fn allows_split(&self, region: &Region, depth: usize, weight: u64) -> bool {
        region.width() > 2.0 * self.min_width
            && region.height() > 2.0 * self.min_height
            && weight > self.max_weight
            && depth < self.max_depth
            && region.is_divisible()
    }
}
