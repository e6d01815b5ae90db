// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Validated rectangular regions with a y-up convention.

use kurbo::{Point, Rect};

use crate::types::{Edges, Quadrant};

/// Reasons a pair of corners does not describe a region.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InvalidRegion {
    /// The top-left corner is not strictly left of the bottom-right corner.
    #[error("left edge {left} is not less than right edge {right}")]
    Horizontal {
        /// X of the top-left corner.
        left: f64,
        /// X of the bottom-right corner.
        right: f64,
    },
    /// The top-left corner is not strictly above the bottom-right corner.
    #[error("top edge {top} is not greater than bottom edge {bottom}")]
    Vertical {
        /// Y of the top-left corner.
        top: f64,
        /// Y of the bottom-right corner.
        bottom: f64,
    },
    /// A corner coordinate is NaN or infinite.
    #[error("region corners must be finite")]
    NonFinite,
}

/// An axis-aligned region of the plane.
///
/// The y axis grows upwards, so the top edge has the greater y. Which edges
/// belong to the region is tracked by [`Edges`]; regions built with
/// [`Region::new`] own all of them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Region {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
    closed: Edges,
}

impl Region {
    /// Create a region from its top-left and bottom-right corners.
    ///
    /// ```rust
    /// use kurbo::Point;
    /// use understory_conv_tree::{InvalidRegion, Region};
    ///
    /// let r = Region::new(Point::new(0.0, 10.0), Point::new(4.0, 0.0)).unwrap();
    /// assert_eq!(r.width(), 4.0);
    /// assert_eq!(r.height(), 10.0);
    ///
    /// // Y grows upwards: a "top" below the "bottom" is rejected.
    /// let err = Region::new(Point::new(0.0, 0.0), Point::new(4.0, 10.0)).unwrap_err();
    /// assert!(matches!(err, InvalidRegion::Vertical { .. }));
    /// ```
    pub fn new(top_left: Point, bottom_right: Point) -> Result<Self, InvalidRegion> {
        if !top_left.is_finite() || !bottom_right.is_finite() {
            return Err(InvalidRegion::NonFinite);
        }
        if top_left.x >= bottom_right.x {
            return Err(InvalidRegion::Horizontal {
                left: top_left.x,
                right: bottom_right.x,
            });
        }
        if top_left.y <= bottom_right.y {
            return Err(InvalidRegion::Vertical {
                top: top_left.y,
                bottom: bottom_right.y,
            });
        }
        Ok(Self {
            left: top_left.x,
            top: top_left.y,
            right: bottom_right.x,
            bottom: bottom_right.y,
            closed: Edges::all(),
        })
    }

    /// Smallest x.
    #[inline]
    pub const fn left(&self) -> f64 {
        self.left
    }

    /// Greatest x.
    #[inline]
    pub const fn right(&self) -> f64 {
        self.right
    }

    /// Greatest y.
    #[inline]
    pub const fn top(&self) -> f64 {
        self.top
    }

    /// Smallest y.
    #[inline]
    pub const fn bottom(&self) -> f64 {
        self.bottom
    }

    /// The `(left, top)` corner.
    pub const fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// The `(right, bottom)` corner.
    pub const fn bottom_right(&self) -> Point {
        Point::new(self.right, self.bottom)
    }

    /// Horizontal extent.
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical extent.
    #[inline]
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Geometric centre.
    pub fn center(&self) -> Point {
        Point::new(
            0.5 * (self.left + self.right),
            0.5 * (self.top + self.bottom),
        )
    }

    /// Edges that belong to this region.
    #[inline]
    pub const fn closed_edges(&self) -> Edges {
        self.closed
    }

    /// The region as a Kurbo rectangle (`y0` is the bottom edge), e.g. for drawing outlines.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.left, self.bottom, self.right, self.top)
    }

    /// Whether `p` lies in the region, honouring which edges the region owns.
    pub fn contains(&self, p: Point) -> bool {
        let closed = self.closed;
        let after_left = p.x > self.left || (p.x == self.left && closed.contains(Edges::LEFT));
        let before_right =
            p.x < self.right || (p.x == self.right && closed.contains(Edges::RIGHT));
        let below_top = p.y < self.top || (p.y == self.top && closed.contains(Edges::TOP));
        let above_bottom =
            p.y > self.bottom || (p.y == self.bottom && closed.contains(Edges::BOTTOM));
        after_left && before_right && below_top && above_bottom
    }

    /// Whether `p` lies strictly inside the region, away from every edge.
    pub fn strictly_contains(&self, p: Point) -> bool {
        p.x > self.left && p.x < self.right && p.y > self.bottom && p.y < self.top
    }

    /// Whether the region can be cut into four children of positive size.
    ///
    /// False once the region is so thin that its centre rounds onto an edge.
    pub fn is_divisible(&self) -> bool {
        self.strictly_contains(self.center())
    }

    /// Cut the region at `cut` into four children, in [`Quadrant::ALL`] order.
    ///
    /// `cut` must lie strictly inside the region.
    pub(crate) fn quadrants(&self, cut: Point) -> [Self; 4] {
        debug_assert!(self.strictly_contains(cut), "cut {cut:?} outside {self:?}");
        let outer = self.closed;
        Quadrant::ALL.map(|q| {
            let (left, right, keep_x, cut_x) = match q {
                Quadrant::TopLeft | Quadrant::BottomLeft => {
                    (self.left, cut.x, Edges::LEFT, Edges::RIGHT)
                }
                Quadrant::TopRight | Quadrant::BottomRight => {
                    (cut.x, self.right, Edges::RIGHT, Edges::empty())
                }
            };
            let (top, bottom, keep_y, cut_y) = match q {
                Quadrant::TopLeft | Quadrant::TopRight => {
                    (self.top, cut.y, Edges::TOP, Edges::BOTTOM)
                }
                Quadrant::BottomLeft | Quadrant::BottomRight => {
                    (cut.y, self.bottom, Edges::BOTTOM, Edges::empty())
                }
            };
            Self {
                left,
                top,
                right,
                bottom,
                closed: (outer & (keep_x | keep_y)) | cut_x | cut_y,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(l: f64, t: f64, r: f64, b: f64) -> Region {
        Region::new(Point::new(l, t), Point::new(r, b)).unwrap()
    }

    #[test]
    fn rejects_malformed_corners() {
        assert_eq!(
            Region::new(Point::new(5.0, 10.0), Point::new(5.0, 0.0)),
            Err(InvalidRegion::Horizontal {
                left: 5.0,
                right: 5.0
            })
        );
        assert_eq!(
            Region::new(Point::new(0.0, 0.0), Point::new(5.0, 0.0)),
            Err(InvalidRegion::Vertical {
                top: 0.0,
                bottom: 0.0
            })
        );
        assert_eq!(
            Region::new(Point::new(f64::NAN, 1.0), Point::new(5.0, 0.0)),
            Err(InvalidRegion::NonFinite)
        );
    }

    #[test]
    fn geometry_accessors() {
        let r = region(-2.0, 6.0, 4.0, 1.0);
        assert_eq!(r.top_left(), Point::new(-2.0, 6.0));
        assert_eq!(r.bottom_right(), Point::new(4.0, 1.0));
        assert_eq!(r.width(), 6.0);
        assert_eq!(r.height(), 5.0);
        assert_eq!(r.center(), Point::new(1.0, 3.5));
        assert_eq!(r.to_rect(), Rect::new(-2.0, 1.0, 4.0, 6.0));
        assert_eq!(r.closed_edges(), Edges::all());
    }

    #[test]
    fn root_region_contains_its_edges() {
        let r = region(0.0, 10.0, 10.0, 0.0);
        for p in [(0.0, 0.0), (10.0, 10.0), (0.0, 10.0), (10.0, 0.0), (5.0, 5.0)] {
            assert!(r.contains(Point::new(p.0, p.1)), "{p:?}");
        }
        assert!(!r.contains(Point::new(10.5, 5.0)));
        assert!(!r.contains(Point::new(5.0, -0.1)));
    }

    #[test]
    fn quadrants_tile_the_parent() {
        let r = region(0.0, 10.0, 10.0, 0.0);
        let [tl, tr, bl, br] = r.quadrants(Point::new(3.0, 6.0));
        assert_eq!(tl.to_rect(), Rect::new(0.0, 6.0, 3.0, 10.0));
        assert_eq!(tr.to_rect(), Rect::new(3.0, 6.0, 10.0, 10.0));
        assert_eq!(bl.to_rect(), Rect::new(0.0, 0.0, 3.0, 6.0));
        assert_eq!(br.to_rect(), Rect::new(3.0, 0.0, 10.0, 6.0));
        assert_eq!(tl.closed_edges(), Edges::all());
        assert_eq!(tr.closed_edges(), Edges::RIGHT | Edges::TOP | Edges::BOTTOM);
        assert_eq!(bl.closed_edges(), Edges::LEFT | Edges::BOTTOM | Edges::RIGHT);
        assert_eq!(br.closed_edges(), Edges::RIGHT | Edges::BOTTOM);
    }

    #[test]
    fn every_point_has_exactly_one_quadrant() {
        let r = region(0.0, 10.0, 10.0, 0.0);
        let quads = r.quadrants(Point::new(4.0, 5.0));
        let coords = [0.0, 2.0, 4.0, 5.0, 7.5, 10.0];
        for &x in &coords {
            for &y in &coords {
                let p = Point::new(x, y);
                let hits = quads.iter().filter(|q| q.contains(p)).count();
                assert_eq!(hits, 1, "{p:?}");
            }
        }
        // The cut lines belong to the left and top children.
        assert!(quads[Quadrant::TopLeft.index()].contains(Point::new(4.0, 5.0)));
        assert!(quads[Quadrant::BottomLeft.index()].contains(Point::new(4.0, 2.0)));
        assert!(quads[Quadrant::TopRight.index()].contains(Point::new(7.0, 5.0)));
    }

    #[test]
    fn one_ulp_region_is_not_divisible() {
        assert!(region(0.0, 10.0, 10.0, 0.0).is_divisible());
        let left = 0.3_f64;
        let right = f64::from_bits(left.to_bits() + 1);
        let thin = region(left, 1.0, right, 0.0);
        assert!(thin.width() > 0.0);
        assert!(!thin.is_divisible());
        assert!(!thin.strictly_contains(thin.center()));
    }

    #[test]
    fn nested_quadrants_keep_open_edges_open() {
        let r = region(0.0, 10.0, 10.0, 0.0);
        let br = r.quadrants(Point::new(5.0, 5.0))[Quadrant::BottomRight.index()];
        let inner_tl = br.quadrants(Point::new(7.0, 3.0))[Quadrant::TopLeft.index()];
        // Inherits the open left and top edges of its parent.
        assert!(!inner_tl.contains(Point::new(5.0, 4.0)));
        assert!(!inner_tl.contains(Point::new(6.0, 5.0)));
        assert!(inner_tl.contains(Point::new(7.0, 3.0)));
    }
}
