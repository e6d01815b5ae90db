// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring search for the density falloff around the peak cell.
//!
//! Starting from the peak of a smoothed grid, the search inspects square rings
//! of growing radius. Each ring is split into its two columns (`x = peak.x ± r`)
//! and two rows (`y = peak.y ± r`). Cells brighter than the current threshold
//! move the running split offsets out to that ring, and the threshold is then
//! re-derived from the mean of the bright cells. The search ends at the first
//! ring with no bright cell, and the offsets are pushed one cell further out,
//! just past the last significant ring. The result is a cut that wraps the
//! dominant cluster instead of bisecting it.

use smallvec::SmallVec;

use crate::grid::DensityGrid;

/// Fraction of the reference density a ring cell must exceed to count as bright.
pub const FALLOFF: f64 = 0.8;

/// Outcome of [`find_split`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitSearch {
    /// Peak cell `(x, y)` the rings were centred on.
    pub peak: (usize, usize),
    /// Raw column offset of the cut. May fall outside the grid.
    pub x: isize,
    /// Raw row offset of the cut. May fall outside the grid.
    pub y: isize,
    /// Number of rings that contained a bright cell.
    pub rings: usize,
}

impl SplitSearch {
    /// Offsets usable as a cut through a `width × height` grid.
    ///
    /// An offset outside `1..=len - 2` would leave an empty or one-cell side,
    /// so it is replaced by the midpoint `len / 2`.
    pub fn clamped(&self, width: usize, height: usize) -> (usize, usize) {
        (clamp_axis(self.x, width), clamp_axis(self.y, height))
    }
}

fn clamp_axis(offset: isize, len: usize) -> usize {
    match usize::try_from(offset) {
        Ok(o) if o >= 1 && o + 1 < len => o,
        _ => len / 2,
    }
}

/// Locate the split offsets of a normalized, smoothed grid.
pub fn find_split(grid: &DensityGrid) -> SplitSearch {
    let (px, py, peak) = grid.peak().unwrap_or((0, 0, 0.0));
    let (w, h) = (to_signed(grid.width()), to_signed(grid.height()));
    let (px, py) = (to_signed(px), to_signed(py));
    let (mid_x, mid_y) = (w / 2, h / 2);
    let at = |x: isize, y: isize| grid.get(x as usize, y as usize);

    let mut threshold = peak * FALLOFF;
    let mut split_x: Option<isize> = None;
    let mut split_y: Option<isize> = None;
    let mut rings = 0;
    let mut r: isize = 1;
    loop {
        let mut ring_x: Option<isize> = None;
        let mut ring_y: Option<isize> = None;
        let mut bright: SmallVec<[f64; 32]> = SmallVec::new();
        let ys = (py - r).max(0)..=(py + r).min(h - 1);
        let xs = (px - r).max(0)..=(px + r).min(w - 1);

        // Columns own the ring corners.
        let left = px - r;
        if left >= 0 {
            for y in ys.clone() {
                let v = at(left, y);
                if v > threshold {
                    ring_x = Some(left);
                    bright.push(v);
                }
            }
        }
        let right = px + r;
        if right < w {
            for y in ys {
                let v = at(right, y);
                if v > threshold {
                    ring_x = Some(nearer_centre(ring_x, right, mid_x));
                    bright.push(v);
                }
            }
        }
        let top = py - r;
        if top >= 0 {
            for x in xs.clone() {
                let v = at(x, top);
                if v > threshold {
                    ring_y = Some(top);
                    if x != px - r && x != px + r {
                        bright.push(v);
                    }
                }
            }
        }
        let bottom = py + r;
        if bottom < h {
            for x in xs {
                let v = at(x, bottom);
                if v > threshold {
                    ring_y = Some(nearer_centre(ring_y, bottom, mid_y));
                    if x != px - r && x != px + r {
                        bright.push(v);
                    }
                }
            }
        }

        if ring_x.is_none() && ring_y.is_none() {
            break;
        }
        split_x = ring_x.or(split_x);
        split_y = ring_y.or(split_y);
        rings += 1;
        if bright.is_empty() {
            break;
        }
        let mean = bright.iter().sum::<f64>() / bright.len() as f64;
        threshold = mean * FALLOFF;
        r += 1;
    }

    let nudge = |split: Option<isize>, peak: isize| match split {
        Some(s) if s > peak => s + 1,
        Some(s) => s - 1,
        None => -1,
    };
    let search = SplitSearch {
        peak: (px as usize, py as usize),
        x: nudge(split_x, px),
        y: nudge(split_y, py),
        rings,
    };
    log::trace!("split search {search:?}");
    search
}

/// Of the ring coordinate found so far and `candidate`, keep the one nearer `mid`.
fn nearer_centre(current: Option<isize>, candidate: isize, mid: isize) -> isize {
    match current {
        Some(c) if (c - mid).abs() <= (candidate - mid).abs() => c,
        _ => candidate,
    }
}

#[allow(
    clippy::cast_possible_wrap,
    reason = "Grid dimensions are far below isize::MAX."
)]
fn to_signed(v: usize) -> isize {
    v as isize
}
