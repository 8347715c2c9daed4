//! Axis-aligned sampling grids.
//!
//! Builds the input matrices used to evaluate a model over a regular grid in
//! one or two dimensions.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use nalgebra::DMatrix;

// Internal dependencies
use crate::math::linalg::LwrFloat;
use crate::primitives::errors::LwrError;

/// `n` evenly spaced values from `low` to `high`, both included.
///
/// A single sample is placed at `high`.
pub fn linspace<T: LwrFloat>(n: usize, low: T, high: T) -> Vec<T> {
    match n {
        0 => Vec::new(),
        1 => vec![high],
        _ => {
            let step = (high - low) / T::from(n - 1).unwrap();
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        high
                    } else {
                        low + T::from(i).unwrap() * step
                    }
                })
                .collect()
        }
    }
}

/// Build the `n_samples x n_dims` input matrix of a 1-D or 2-D grid.
///
/// In 2-D the first dimension is the outer loop: row `i * n1 + j` holds
/// `(x1[i], x2[j])`.
pub fn grid_inputs<T: LwrFloat>(
    min: &[T],
    max: &[T],
    n_samples_per_dim: &[usize],
) -> Result<DMatrix<T>, LwrError> {
    if min.len() != max.len() || min.len() != n_samples_per_dim.len() {
        return Err(LwrError::MismatchedGridSpec {
            min_len: min.len(),
            max_len: max.len(),
            samples_len: n_samples_per_dim.len(),
        });
    }

    match min.len() {
        1 => {
            let x = linspace(n_samples_per_dim[0], min[0], max[0]);
            Ok(DMatrix::from_vec(x.len(), 1, x))
        }
        2 => {
            let x1 = linspace(n_samples_per_dim[0], min[0], max[0]);
            let x2 = linspace(n_samples_per_dim[1], min[1], max[1]);
            let n1 = x2.len();
            Ok(DMatrix::from_fn(x1.len() * n1, 2, |row, col| {
                if col == 0 { x1[row / n1] } else { x2[row % n1] }
            }))
        }
        dims => Err(LwrError::UnsupportedGridDimensions(dims)),
    }
}
