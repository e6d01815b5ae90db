// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Repeated normalize-and-convolve smoothing of a density grid.

use crate::grid::DensityGrid;
use crate::kernel::Kernel;

/// Smooths a raw density grid into basins whose edges are easy to locate.
///
/// [`Smoothing::apply`] normalizes the grid, then runs `passes` rounds of
/// "convolve with stride 1 and padding 1, normalize", and normalizes once more.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Smoothing {
    /// Kernel used for every pass.
    pub kernel: Kernel,
    /// Number of convolution passes.
    pub passes: usize,
}

impl Smoothing {
    /// Create a smoothing pipeline.
    pub fn new(kernel: Kernel, passes: usize) -> Self {
        Self { kernel, passes }
    }

    /// Run the pipeline over `grid`.
    ///
    /// Returns `None` when the grid carries no density (no cell above zero), in
    /// which case no convolution is attempted. A pass that cannot run (for
    /// example because the grid is smaller than the kernel) is logged and ends
    /// the smoothing early; the grid from the previous pass is kept.
    pub fn apply(&self, mut grid: DensityGrid) -> Option<DensityGrid> {
        if !grid.normalize() {
            log::debug!(
                "flat {}x{} density grid, skipping convolution",
                grid.width(),
                grid.height()
            );
            return None;
        }
        for pass in 0..self.passes {
            match grid.convolve(&self.kernel, 1, 1) {
                Ok(mut next) => {
                    next.normalize();
                    grid = next;
                }
                Err(err) => {
                    log::warn!("convolution pass {pass} aborted: {err}");
                    break;
                }
            }
        }
        grid.normalize().then_some(grid)
    }
}
