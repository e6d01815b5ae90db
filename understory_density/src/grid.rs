// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dense 2D grids of density values.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::kernel::Kernel;

/// Reasons [`DensityGrid::convolve`] refuses to run.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConvolutionError {
    /// The stride must be at least 1.
    #[error("convolution stride must be at least 1, got {0}")]
    Stride(usize),
    /// The padding must be at least 1.
    #[error("convolution padding must be at least 1, got {0}")]
    Padding(usize),
    /// One of the grid axes is shorter than the kernel.
    #[error("grid of {width}x{height} cells is smaller than a {kernel}x{kernel} kernel")]
    GridTooSmall {
        /// Grid width in cells.
        width: usize,
        /// Grid height in cells.
        height: usize,
        /// Kernel size.
        kernel: usize,
    },
}

/// A `width × height` grid of `f64` cells addressed as `(x, y)`.
///
/// Column `x` runs left to right. Row `y` runs from the top edge (the edge with
/// the greatest y coordinate) downwards.
#[derive(Clone, Debug, PartialEq)]
pub struct DensityGrid {
    width: usize,
    height: usize,
    // Column-major: `cells[x * height + y]`.
    cells: Vec<f64>,
}

impl DensityGrid {
    /// A grid filled with `0.0`.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: alloc::vec![0.0; width * height],
        }
    }

    /// A grid whose cell `(x, y)` is `f(x, y)`.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for x in 0..width {
            for y in 0..height {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    /// Rasterize weighted samples into a `size × size` grid covering `bounds`.
    ///
    /// Every cell is a closed box, so a sample lying exactly on the edge shared by
    /// two cells adds its weight to both. Samples outside `bounds` are ignored.
    /// The result does not depend on the order of `samples`.
    pub fn rasterize<I>(bounds: Rect, size: usize, samples: I) -> Self
    where
        I: IntoIterator<Item = (Point, f64)>,
    {
        let mut grid = Self::zeros(size, size);
        if size == 0 {
            return grid;
        }
        let bounds = bounds.abs();
        let cells = size as f64;
        let x_step = bounds.width() / cells;
        let y_step = bounds.height() / cells;
        for (pos, weight) in samples {
            let columns = covering_cells(pos.x, bounds.x0, x_step, size);
            if columns.is_empty() {
                continue;
            }
            // Rows count down from the top edge.
            let rows = covering_cells(-pos.y, -bounds.y1, y_step, size);
            for &x in &columns {
                for &y in &rows {
                    grid.cells[x * size + y] += weight;
                }
            }
        }
        grid
    }

    /// Width in cells.
    #[inline]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Value of cell `(x, y)`. Panics when out of range.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) out of range for a {}x{} grid",
            self.width,
            self.height
        );
        self.cells[x * self.height + y]
    }

    /// Sum of all cells.
    pub fn total(&self) -> f64 {
        self.cells.iter().sum()
    }

    /// The largest cell as `(x, y, value)`.
    ///
    /// Cells are scanned column by column; ties keep the first cell seen.
    pub fn peak(&self) -> Option<(usize, usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in self.cells.iter().enumerate() {
            match best {
                Some((_, b)) if v <= b => {}
                _ => best = Some((i, v)),
            }
        }
        best.map(|(i, v)| (i / self.height, i % self.height, v))
    }

    /// Scale the grid so its largest cell becomes `1.0`.
    ///
    /// Returns `false` and sets every cell to `0.0` when the largest cell is not
    /// strictly positive (including the empty grid); such a grid carries no
    /// density to locate.
    pub fn normalize(&mut self) -> bool {
        match self.peak() {
            Some((_, _, max)) if max > 0.0 => {
                for cell in &mut self.cells {
                    *cell /= max;
                }
                true
            }
            _ => {
                self.cells.fill(0.0);
                false
            }
        }
    }

    /// Cross-correlate the zero-padded grid with `kernel`.
    ///
    /// The grid is padded with `padding` zero cells on every side and the kernel
    /// window advances `stride` cells at a time, so each output axis has
    /// `(n - k + 2 * padding) / stride + 1` cells.
    pub fn convolve(
        &self,
        kernel: &Kernel,
        stride: usize,
        padding: usize,
    ) -> Result<Self, ConvolutionError> {
        if stride < 1 {
            return Err(ConvolutionError::Stride(stride));
        }
        if padding < 1 {
            return Err(ConvolutionError::Padding(padding));
        }
        let k = kernel.size();
        if self.width < k || self.height < k {
            return Err(ConvolutionError::GridTooSmall {
                width: self.width,
                height: self.height,
                kernel: k,
            });
        }
        let out_w = (self.width + 2 * padding - k) / stride + 1;
        let out_h = (self.height + 2 * padding - k) / stride + 1;
        Ok(Self::from_fn(out_w, out_h, |ox, oy| {
            let mut total = 0.0;
            for kx in 0..k {
                // Padded coordinates map back to the source by subtracting the padding.
                let Some(sx) = (ox * stride + kx).checked_sub(padding) else {
                    continue;
                };
                if sx >= self.width {
                    continue;
                }
                for ky in 0..k {
                    if let Some(sy) = (oy * stride + ky).checked_sub(padding)
                        && sy < self.height
                    {
                        total += self.cells[sx * self.height + sy] * kernel.get(kx, ky);
                    }
                }
            }
            total
        }))
    }
}

/// Indices of the closed cells `[start + i * step, start + (i + 1) * step]`
/// that contain `value`. At most three for degenerate steps, usually one.
fn covering_cells(value: f64, start: f64, step: f64, n: usize) -> SmallVec<[usize; 3]> {
    let mut out = SmallVec::new();
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Float to int casts saturate; out-of-range values are rejected below."
    )]
    let guess = ((value - start) / step).floor() as isize;
    let last = n as isize - 1;
    let lo = guess.saturating_sub(1).max(0);
    let hi = guess.saturating_add(1).min(last);
    for i in lo..=hi {
        let edge0 = start + i as f64 * step;
        let edge1 = start + (i + 1) as f64 * step;
        if edge0 <= value && value <= edge1 {
            // `i` lies in `0..n` here.
            out.push(i as usize);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn rasterize_sums_weights_per_cell() {
        let bounds = Rect::new(0.0, 0.0, 4.0, 4.0);
        let grid = DensityGrid::rasterize(
            bounds,
            4,
            [
                (Point::new(0.5, 3.5), 2.0),
                (Point::new(0.6, 3.4), 1.0),
                (Point::new(3.5, 0.5), 4.0),
            ],
        );
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 4);
        // Row 0 is the top edge.
        assert_eq!(grid.get(0, 0), 3.0);
        assert_eq!(grid.get(3, 3), 4.0);
        assert_eq!(grid.total(), 7.0);
    }

    #[test]
    fn rasterize_counts_shared_edges_in_every_touching_cell() {
        let bounds = Rect::new(0.0, 0.0, 4.0, 4.0);
        let grid = DensityGrid::rasterize(bounds, 4, [(Point::new(2.0, 2.0), 1.0)]);
        for (x, y) in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            assert_eq!(grid.get(x, y), 1.0, "cell ({x}, {y})");
        }
        assert_eq!(grid.total(), 4.0);
    }

    #[test]
    fn rasterize_ignores_outside_samples_and_order() {
        let bounds = Rect::new(10.0, 10.0, 20.0, 20.0);
        let a = [
            (Point::new(11.0, 19.0), 1.0),
            (Point::new(25.0, 15.0), 9.0),
            (Point::new(19.0, 11.0), 3.0),
        ];
        let mut b = a;
        b.reverse();
        let ga = DensityGrid::rasterize(bounds, 5, a);
        let gb = DensityGrid::rasterize(bounds, 5, b);
        assert_eq!(ga, gb);
        assert_eq!(ga.total(), 4.0);
        assert_eq!(ga.get(0, 0), 1.0);
        assert_eq!(ga.get(4, 4), 3.0);
    }

    #[test]
    fn rasterize_zero_size_is_empty() {
        let grid = DensityGrid::rasterize(
            Rect::new(0.0, 0.0, 1.0, 1.0),
            0,
            [(Point::new(0.5, 0.5), 1.0)],
        );
        assert!(grid.is_empty());
        assert_eq!(grid.peak(), None);
    }

    #[test]
    fn normalize_scales_to_unit_peak() {
        let mut grid = DensityGrid::from_fn(2, 2, |x, y| (x * 2 + y) as f64);
        assert!(grid.normalize());
        assert!((grid.get(1, 1) - 1.0).abs() < EPSILON);
        assert!((grid.get(0, 1) - 1.0 / 3.0).abs() < EPSILON);
    }

    #[test]
    fn normalize_flat_grid_reports_no_density() {
        let mut grid = DensityGrid::zeros(3, 3);
        assert!(!grid.normalize());
        assert_eq!(grid.total(), 0.0);
        assert!(grid.get(1, 1).is_finite());
    }

    #[test]
    fn peak_keeps_first_maximum() {
        let grid = DensityGrid::from_fn(3, 3, |x, y| if x == y { 1.0 } else { 0.0 });
        assert_eq!(grid.peak(), Some((0, 0, 1.0)));
    }

    #[test]
    fn convolve_output_dimensions() {
        let grid = DensityGrid::zeros(7, 5);
        let out = grid.convolve(&Kernel::smoothing(), 1, 1).unwrap();
        assert_eq!((out.width(), out.height()), (7, 5));
        let out = grid.convolve(&Kernel::smoothing(), 2, 1).unwrap();
        assert_eq!((out.width(), out.height()), (4, 3));
        let out = grid.convolve(&Kernel::smoothing(), 1, 2).unwrap();
        assert_eq!((out.width(), out.height()), (9, 7));
    }

    #[test]
    fn convolve_flat_field_is_symmetric() {
        let grid = DensityGrid::from_fn(3, 3, |_, _| 2.0);
        let kernel = Kernel::smoothing();
        let out = grid.convolve(&kernel, 1, 1).unwrap();
        // Interior cell sees the whole kernel.
        assert!((out.get(1, 1) - 2.0 * kernel.sum()).abs() < EPSILON);
        for x in 0..3 {
            for y in 0..3 {
                assert!((out.get(x, y) - out.get(y, x)).abs() < EPSILON);
                assert!((out.get(x, y) - out.get(2 - x, 2 - y)).abs() < EPSILON);
            }
        }
        // Zero padding attenuates corners more than edges.
        assert!((out.get(0, 0) - 2.0 * 2.5).abs() < EPSILON);
        assert!((out.get(0, 1) - 2.0 * 3.5).abs() < EPSILON);
    }

    #[test]
    fn convolve_spreads_a_single_spike() {
        let grid = DensityGrid::from_fn(5, 5, |x, y| if (x, y) == (2, 2) { 1.0 } else { 0.0 });
        let out = grid.convolve(&Kernel::smoothing(), 1, 1).unwrap();
        assert_eq!(out.get(2, 2), 1.0);
        assert_eq!(out.get(1, 3), 0.5);
        assert_eq!(out.get(0, 0), 0.0);
        assert!((out.total() - 5.0).abs() < EPSILON);
    }

    #[test]
    fn convolve_uses_kernel_orientation() {
        // Asymmetric kernel: only the (2, 1) entry is non-zero, i.e. it samples
        // the cell one column to the right.
        let kernel = Kernel::new(&[[0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]]).unwrap();
        let grid = DensityGrid::from_fn(3, 3, |x, y| if (x, y) == (2, 1) { 1.0 } else { 0.0 });
        let out = grid.convolve(&kernel, 1, 1).unwrap();
        assert_eq!(out.get(1, 1), 1.0);
        assert_eq!(out.total(), 1.0);
    }

    #[test]
    fn convolve_rejects_bad_arguments() {
        let grid = DensityGrid::zeros(3, 3);
        let k = Kernel::smoothing();
        assert_eq!(grid.convolve(&k, 0, 1), Err(ConvolutionError::Stride(0)));
        assert_eq!(grid.convolve(&k, 1, 0), Err(ConvolutionError::Padding(0)));
        let small = DensityGrid::zeros(2, 3);
        assert_eq!(
            small.convolve(&k, 1, 1),
            Err(ConvolutionError::GridTooSmall {
                width: 2,
                height: 3,
                kernel: 3
            })
        );
    }
}
