//! Gaussian kernel activations for LWR.
//!
//! ## Purpose
//!
//! This module computes the activation of every basis function at every input
//! point, both raw and normalized so that the activations of one input sum to
//! one and can serve as blending weights for the local lines.
//!
//! ## Design notes
//!
//! * **Diagonal covariance**: A multivariate Gaussian with diagonal covariance
//!   factorizes into a product of 1-D Gaussians, which is accumulated one
//!   dimension at a time.
//! * **Asymmetry**: Asymmetric kernels borrow the width of the previous basis
//!   function for inputs left of the center.
//! * **Generics**: Generic over `LwrFloat` types.
//!
//! ## Key concepts
//!
//! * **Activation**: `prod_d exp(-0.5 * (x_d - c_d)^2 / w_d^2)`, starting at 1.
//! * **Normalization**: Each row divided by its row sum.
//! * **Zero-sum floor**: If any row sums to exactly zero, `max(row_sums) / 1e5`
//!   is added to every row sum. This is a global, not per-row, correction and
//!   is known to be imprecise; expected outputs depend on it.
//!
//! ## Invariants
//!
//! * Output shape is `n_samples x n_basis`.
//! * With one basis function normalized activations are exactly 1.
//! * With more, each normalized row sums to 1 within roundoff (unless the
//!   floor was applied).
//!
//! ## Non-goals
//!
//! * This module does not cache anything (see the engine's activation cache).
//! * This module does not validate widths; non-positive widths give
//!   meaningless activations.

// External dependencies
use nalgebra::DMatrix;

// Internal dependencies
use crate::math::linalg::{LwrFloat, row_sums};

/// Divisor of the largest row sum used as a floor when some row sums to zero.
const ZERO_SUM_FLOOR_DIVISOR: f64 = 100_000.0;

// ============================================================================
// Kernel Activations
// ============================================================================

/// Compute unnormalized kernel activations.
///
/// Shapes: `centers` and `widths` are `n_basis x n_dims`, `inputs` is
/// `n_samples x n_dims`; the result is `n_samples x n_basis`.
///
/// # Panics
///
/// Panics if the shapes are inconsistent.
pub fn kernel_activations<T: LwrFloat>(
    centers: &DMatrix<T>,
    widths: &DMatrix<T>,
    inputs: &DMatrix<T>,
    asymmetric_kernels: bool,
) -> DMatrix<T> {
    let n_basis_functions = centers.nrows();
    let n_samples = inputs.nrows();
    let n_dims = centers.ncols();
    assert_eq!(
        widths.shape(),
        (n_basis_functions, n_dims),
        "widths must have the same shape as centers"
    );
    assert_eq!(
        inputs.ncols(),
        n_dims,
        "inputs must have one column per dimension"
    );

    let half = (T::one() + T::one()).recip();
    let mut activations = DMatrix::from_element(n_samples, n_basis_functions, T::one());

    for bb in 0..n_basis_functions {
        for i_dim in 0..n_dims {
            let c = centers[(bb, i_dim)];
            for i_s in 0..n_samples {
                let x = inputs[(i_s, i_dim)];

                // Left of the center, asymmetric kernels take the previous width
                let w = if asymmetric_kernels && x < c && bb > 0 {
                    widths[(bb - 1, i_dim)]
                } else {
                    widths[(bb, i_dim)]
                };

                let diff = x - c;
                let factor = (-half * diff * diff / (w * w)).exp();
                activations[(i_s, bb)] = activations[(i_s, bb)] * factor;
            }
        }
    }

    activations
}

/// Compute kernel activations normalized to sum to one per input.
///
/// With a single basis function every entry is 1: normalizing a kernel
/// against itself is 1 everywhere, and LWR degenerates to least squares.
///
/// # Panics
///
/// Panics if the shapes are inconsistent.
pub fn normalized_kernel_activations<T: LwrFloat>(
    centers: &DMatrix<T>,
    widths: &DMatrix<T>,
    inputs: &DMatrix<T>,
    asymmetric_kernels: bool,
) -> DMatrix<T> {
    let n_basis_functions = centers.nrows();
    let n_samples = inputs.nrows();

    if n_basis_functions == 1 {
        return DMatrix::from_element(n_samples, 1, T::one());
    }

    let mut activations = kernel_activations(centers, widths, inputs, asymmetric_kernels);
    let mut sums = row_sums(&activations);

    if sums.iter().any(|&s| s == T::zero()) {
        let max = sums.iter().fold(T::neg_infinity(), |m, &s| m.max(s));
        let floor = max / T::from(ZERO_SUM_FLOOR_DIVISOR).unwrap();
        for s in sums.iter_mut() {
            *s = *s + floor;
        }
    }

    for i_s in 0..n_samples {
        let sum = sums[i_s];
        for bb in 0..n_basis_functions {
            activations[(i_s, bb)] = activations[(i_s, bb)] / sum;
        }
    }

    activations
}
