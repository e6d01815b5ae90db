// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_density --heading-base-level=0

//! Understory Density: density grids for weighted 2D point sets.
//!
//! This crate is the numeric half of a density-guided quadtree. Given the
//! points that fall inside a rectangle it can:
//!
//! - rasterize them into a square [`DensityGrid`] of summed weights,
//! - [`normalize`](DensityGrid::normalize) and [`convolve`](DensityGrid::convolve) that grid
//!   with a square [`Kernel`], or run the whole [`Smoothing`] pipeline at once,
//! - and [`find_split`] the cell offsets where density falls away from the
//!   dominant cluster.
//!
//! It knows nothing about trees. `understory_conv_tree` turns the offsets into
//! a cut through a region and recurses.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_density::{DensityGrid, Kernel, Smoothing, find_split};
//!
//! // A small cluster near the top-left corner of a 10×10 region.
//! let samples = [(1.2, 8.4), (1.4, 8.6), (1.6, 8.2), (1.8, 8.8)]
//!     .map(|(x, y)| (Point::new(x, y), 1.0));
//! let grid = DensityGrid::rasterize(Rect::new(0.0, 0.0, 10.0, 10.0), 10, samples);
//!
//! let smoothed = Smoothing::new(Kernel::smoothing(), 2).apply(grid).unwrap();
//! let search = find_split(&smoothed);
//! let (x, y) = search.clamped(smoothed.width(), smoothed.height());
//! assert!(x >= 1 && x <= 8);
//! assert!(y >= 1 && y <= 8);
//! ```
//!
//! A grid with no density at all has nothing to search:
//!
//! ```rust
//! use understory_density::{DensityGrid, Smoothing};
//!
//! assert!(Smoothing::default().apply(DensityGrid::zeros(8, 8)).is_none());
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Enable either `std` (default) or
//! `libm` for floating-point math.

#![no_std]

extern crate alloc;

mod grid;
mod kernel;
pub mod search;
mod smoothing;

pub use grid::{ConvolutionError, DensityGrid};
pub use kernel::{Kernel, KernelError};
pub use search::{SplitSearch, find_split};
pub use smoothing::Smoothing;
