// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Square convolution kernels.

use alloc::vec::Vec;

/// Reasons a matrix cannot be used as a [`Kernel`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum KernelError {
    /// The matrix has no rows, or its first row is empty.
    #[error("kernel is empty")]
    Empty,
    /// The number of rows differs from the length of the first row.
    #[error("kernel is not square: {rows} rows of {columns} columns")]
    NotSquare {
        /// Number of rows supplied.
        rows: usize,
        /// Length of the first row.
        columns: usize,
    },
    /// A row has a different length than the first row.
    #[error("kernel row {row} has {len} entries, expected {expected}")]
    Ragged {
        /// Index of the offending row.
        row: usize,
        /// Its length.
        len: usize,
        /// Length of the first row.
        expected: usize,
    },
}

/// A square matrix of weights applied by [`DensityGrid::convolve`](crate::DensityGrid::convolve).
///
/// Entry `(i, j)` weighs the grid cell offset by `i` columns and `j` rows from
/// the window origin, using the same `(x, y)` orientation as
/// [`DensityGrid`](crate::DensityGrid). Both odd and even sizes are accepted.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f64>,
}

impl Default for Kernel {
    fn default() -> Self {
        Self::smoothing()
    }
}

impl Kernel {
    /// The built-in 3×3 smoothing kernel: `1.0` at the centre, `0.5` everywhere else.
    pub fn smoothing() -> Self {
        let mut weights = alloc::vec![0.5; 9];
        weights[4] = 1.0;
        Self { size: 3, weights }
    }

    /// Build a kernel from a square matrix, indexed `rows[i][j]`.
    pub fn new<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, KernelError> {
        let size = rows.first().map_or(0, |r| r.as_ref().len());
        if size == 0 {
            return Err(KernelError::Empty);
        }
        if rows.len() != size {
            return Err(KernelError::NotSquare {
                rows: rows.len(),
                columns: size,
            });
        }
        let mut weights = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != size {
                return Err(KernelError::Ragged {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            weights.extend_from_slice(values);
        }
        Ok(Self { size, weights })
    }

    /// Build a kernel from `rows`, quietly substituting [`Kernel::smoothing`]
    /// when the matrix is absent, empty, ragged, or not square.
    pub fn from_rows_or_default<R: AsRef<[f64]>>(rows: Option<&[R]>) -> Self {
        match rows.map(Self::new) {
            Some(Ok(kernel)) => kernel,
            Some(Err(err)) => {
                log::debug!("falling back to the smoothing kernel: {err}");
                Self::smoothing()
            }
            None => Self::smoothing(),
        }
    }

    /// Width (and height) of the kernel.
    #[inline]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Weight at `(i, j)`. Panics when out of range.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(
            i < self.size && j < self.size,
            "kernel index ({i}, {j}) out of range for size {}",
            self.size
        );
        self.weights[i * self.size + j]
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::{Kernel, KernelError};
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn smoothing_kernel_layout() {
        let k = Kernel::smoothing();
        assert_eq!(k.size(), 3);
        assert_eq!(k.get(1, 1), 1.0);
        assert_eq!(k.get(0, 0), 0.5);
        assert_eq!(k.get(2, 1), 0.5);
        assert_eq!(k.sum(), 5.0);
        assert_eq!(Kernel::default(), k);
    }

    #[test]
    fn rejects_malformed_matrices() {
        let empty: [Vec<f64>; 0] = [];
        assert_eq!(Kernel::new(&empty), Err(KernelError::Empty));
        assert_eq!(Kernel::new(&[Vec::<f64>::new()]), Err(KernelError::Empty));
        assert_eq!(
            Kernel::new(&[vec![1.0, 2.0]]),
            Err(KernelError::NotSquare {
                rows: 1,
                columns: 2
            })
        );
        assert_eq!(
            Kernel::new(&[vec![1.0, 2.0], vec![3.0]]),
            Err(KernelError::Ragged {
                row: 1,
                len: 1,
                expected: 2
            })
        );
    }

    #[test]
    fn even_sized_kernels_are_accepted() {
        let k = Kernel::new(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
        assert_eq!(k.size(), 2);
        assert_eq!(k.get(0, 1), 2.0);
        assert_eq!(k.get(1, 0), 3.0);
    }

    #[test]
    fn invalid_rows_fall_back_to_smoothing() {
        let ragged = [vec![1.0, 1.0, 1.0], vec![1.0]];
        assert_eq!(
            Kernel::from_rows_or_default(Some(&ragged[..])),
            Kernel::smoothing()
        );
        assert_eq!(
            Kernel::from_rows_or_default::<Vec<f64>>(None),
            Kernel::smoothing()
        );
        let identity = [[1.0]];
        assert_eq!(Kernel::from_rows_or_default(Some(&identity[..])).size(), 1);
    }
}
