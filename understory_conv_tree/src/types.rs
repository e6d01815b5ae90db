// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public value types: points, payload tags, node identifiers, quadrants, and edges.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;
use uuid::Uuid;

/// A weighted point with an opaque payload.
///
/// The weight counts towards the density of the cell holding the point and
/// towards that cell's weight budget.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightedPoint<P = ()> {
    /// Location of the point.
    pub position: Point,
    /// Non-negative weight.
    pub weight: u32,
    /// User payload, tagged through [`Tagged`].
    pub payload: P,
}

impl WeightedPoint {
    /// A point without payload.
    pub const fn new(x: f64, y: f64, weight: u32) -> Self {
        Self {
            position: Point::new(x, y),
            weight,
            payload: (),
        }
    }
}

impl<P> WeightedPoint<P> {
    /// A point carrying `payload`.
    pub const fn with_payload(x: f64, y: f64, weight: u32, payload: P) -> Self {
        Self {
            position: Point::new(x, y),
            weight,
            payload,
        }
    }
}

/// Payloads that expose descriptive tags to leaf aggregation.
///
/// Duplicate tags within one payload are allowed; they count once.
pub trait Tagged {
    /// Tags carried by this payload.
    fn tags(&self) -> &[String] {
        &[]
    }
}

impl Tagged for () {}

impl Tagged for Vec<String> {
    fn tags(&self) -> &[String] {
        self
    }
}

impl<T: Tagged> Tagged for Option<T> {
    fn tags(&self) -> &[String] {
        match self {
            Some(payload) => payload.tags(),
            None => &[],
        }
    }
}

/// Identifier of a tree node.
///
/// Generated once when the node is created and never reused. Displays as a
/// hyphenated UUID.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Wrap a UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

/// Position of a child within its parent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Upper-left child (greater y, smaller x).
    TopLeft = 0,
    /// Upper-right child.
    TopRight = 1,
    /// Lower-left child.
    BottomLeft = 2,
    /// Lower-right child.
    BottomRight = 3,
}

impl Quadrant {
    /// All quadrants in child order, which is also the routing order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Index of this quadrant in a node's child array.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

bitflags::bitflags! {
    /// Edges that belong to a region.
    ///
    /// The root region owns all four edges. When a region is cut, the left
    /// children own the vertical cut and the top children own the horizontal
    /// cut, so every point of the parent belongs to exactly one child.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Edges: u8 {
        /// The edge at the smallest x.
        const LEFT   = 0b0000_0001;
        /// The edge at the greatest x.
        const RIGHT  = 0b0000_0010;
        /// The edge at the greatest y.
        const TOP    = 0b0000_0100;
        /// The edge at the smallest y.
        const BOTTOM = 0b0000_1000;
    }
}

impl Default for Edges {
    fn default() -> Self {
        Self::all()
    }
}
