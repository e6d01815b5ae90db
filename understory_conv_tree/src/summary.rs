// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-leaf statistics and baseline tags.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use kurbo::Point;

use crate::config::BaselineInheritance;
use crate::types::{Tagged, WeightedPoint};

/// Aggregate description of the points in one leaf.
///
/// A snapshot taken when the leaf is created or refreshed with
/// [`Tree::refresh_summaries`]. Later inserts and [`Tree::clear`] do not
/// update it, so `point_count`, `center` and `average_distance` describe the
/// points as they were at that moment.
///
/// [`Tree::refresh_summaries`]: crate::Tree::refresh_summaries
/// [`Tree::clear`]: crate::Tree::clear
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LeafSummary {
    /// Number of points in the leaf.
    pub point_count: usize,
    /// Unweighted centroid, `None` for an empty leaf.
    pub center: Option<Point>,
    /// Mean distance from the points to [`center`](Self::center).
    pub average_distance: f64,
    /// Tags carried by more of the leaf's points than the average tag, sorted.
    pub baseline_tags: Vec<String>,
}

impl LeafSummary {
    /// Summarize `points`.
    ///
    /// ```rust
    /// use understory_conv_tree::{LeafSummary, WeightedPoint};
    ///
    /// let tagged = |x, tags: &[&str]| {
    ///     let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
    ///     WeightedPoint::with_payload(x, 0.0, 1, tags)
    /// };
    /// let points = [
    ///     tagged(0.0, &["car", "red"]),
    ///     tagged(2.0, &["car"]),
    ///     tagged(4.0, &["car", "blue"]),
    /// ];
    /// let summary = LeafSummary::from_points(&points);
    /// assert_eq!(summary.point_count, 3);
    /// assert_eq!(summary.center, Some(kurbo::Point::new(2.0, 0.0)));
    /// // "car" is on 3 points, above the mean of 5 / 3.
    /// assert_eq!(summary.baseline_tags, ["car"]);
    /// ```
    pub fn from_points<P: Tagged>(points: &[WeightedPoint<P>]) -> Self {
        let center = centroid(points);
        let average_distance = match center {
            Some(c) => {
                points.iter().map(|p| p.position.distance(c)).sum::<f64>() / points.len() as f64
            }
            None => 0.0,
        };
        Self {
            point_count: points.len(),
            center,
            average_distance,
            baseline_tags: baseline_tags(points),
        }
    }

    /// Combine the freshly computed tags with `inherited` according to `policy`.
    pub(crate) fn inherit(mut self, inherited: &[String], policy: BaselineInheritance) -> Self {
        match policy {
            BaselineInheritance::Replace => {}
            BaselineInheritance::OverwriteIfNonEmpty => {
                if self.baseline_tags.is_empty() {
                    self.baseline_tags = inherited.to_vec();
                }
            }
            BaselineInheritance::Union => {
                self.baseline_tags.extend_from_slice(inherited);
                self.baseline_tags.sort_unstable();
                self.baseline_tags.dedup();
            }
        }
        self
    }
}

fn centroid<P>(points: &[WeightedPoint<P>]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.position.x, sy + p.position.y));
    Some(Point::new(sx / n, sy / n))
}

/// Tags whose point count strictly exceeds the mean count over all tags.
///
/// Each point counts at most once per tag.
pub fn baseline_tags<P: Tagged>(points: &[WeightedPoint<P>]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for p in points {
        seen.clear();
        for tag in p.payload.tags() {
            if seen.insert(tag.as_str()) {
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }
        }
    }
    if counts.is_empty() {
        return Vec::new();
    }
    let total: usize = counts.values().sum();
    let mean = total as f64 / counts.len() as f64;
    let mut tags: Vec<String> = counts
        .into_iter()
        .filter(|&(_, count)| count as f64 > mean)
        .map(|(tag, _)| String::from(tag))
        .collect();
    tags.sort_unstable();
    tags
}
