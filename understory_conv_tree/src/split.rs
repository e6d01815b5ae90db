// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Strategies that choose where an overloaded leaf is cut.

use kurbo::Point;
use understory_density::{DensityGrid, Kernel, Smoothing, find_split};

use crate::region::Region;
use crate::types::WeightedPoint;

/// Chooses the point at which a region is cut into four children.
///
/// The tree clamps the returned point so every child respects the minimum
/// size, and replaces it with the centre when it is not strictly inside the
/// region, so implementations need not be careful about either.
pub trait SplitStrategy {
    /// Propose a cut through `region`, which holds `points`.
    fn propose_cut<P>(&self, region: &Region, points: &[WeightedPoint<P>]) -> Point;
}

/// Always cut at the geometric centre.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MidpointSplit;

impl SplitStrategy for MidpointSplit {
    fn propose_cut<P>(&self, region: &Region, _points: &[WeightedPoint<P>]) -> Point {
        region.center()
    }
}

/// Cut where the smoothed point density falls away from its peak.
///
/// The region's points are rasterized into a `grid_size × grid_size` grid,
/// smoothed, and searched with [`find_split`]. The resulting cell offsets are
/// mapped back onto the region. A region without density is cut at its centre.
#[derive(Clone, Debug, PartialEq)]
pub struct DensitySplit {
    grid_size: usize,
    smoothing: Smoothing,
}

impl Default for DensitySplit {
    fn default() -> Self {
        Self::new(16, 2, Kernel::smoothing())
    }
}

impl DensitySplit {
    /// A strategy with `grid_size` cells per axis and `passes` convolution passes.
    pub fn new(grid_size: usize, passes: usize, kernel: Kernel) -> Self {
        Self {
            grid_size,
            smoothing: Smoothing::new(kernel, passes),
        }
    }

    /// Like [`DensitySplit::new`], with the kernel given as rows.
    ///
    /// Missing, empty, ragged, or non-square rows select the default
    /// smoothing kernel.
    ///
    /// ```rust
    /// use understory_conv_tree::DensitySplit;
    /// use understory_density::Kernel;
    ///
    /// let ragged: &[&[f64]] = &[&[1.0, 2.0], &[3.0]];
    /// let split = DensitySplit::with_kernel_rows(8, 1, Some(ragged));
    /// assert_eq!(split.kernel(), &Kernel::smoothing());
    /// ```
    pub fn with_kernel_rows<R: AsRef<[f64]>>(
        grid_size: usize,
        passes: usize,
        rows: Option<&[R]>,
    ) -> Self {
        Self::new(grid_size, passes, Kernel::from_rows_or_default(rows))
    }

    /// Cells per grid axis.
    pub const fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Convolution passes.
    pub const fn passes(&self) -> usize {
        self.smoothing.passes
    }

    /// Smoothing kernel.
    pub const fn kernel(&self) -> &Kernel {
        &self.smoothing.kernel
    }
}

impl SplitStrategy for DensitySplit {
    fn propose_cut<P>(&self, region: &Region, points: &[WeightedPoint<P>]) -> Point {
        let samples = points
            .iter()
            .map(|p| (p.position, f64::from(p.weight)));
        let grid = DensityGrid::rasterize(region.to_rect(), self.grid_size, samples);
        let Some(smoothed) = self.smoothing.apply(grid) else {
            log::debug!("no density in {:?}, cutting at the centre", region.to_rect());
            return region.center();
        };
        let search = find_split(&smoothed);
        let (ix, iy) = search.clamped(smoothed.width(), smoothed.height());
        // Offsets are measured in cells of the rasterized grid.
        let cells = self.grid_size as f64;
        let cut = Point::new(
            region.left() + ix as f64 * region.width() / cells,
            region.top() - iy as f64 * region.height() / cells,
        );
        log::trace!("density cut at {cut:?} from {search:?}");
        cut
    }
}
