//! Blending of local lines into the LWR output.
//!
//! The prediction at an input is the sum over basis functions of each line's
//! value weighted by that basis function's normalized activation.

// External dependencies
use nalgebra::DMatrix;

// Internal dependencies
use crate::math::linalg::LwrFloat;

/// Weight line values with activations and sum per input.
///
/// Both matrices are `n_samples x n_basis`; the result is `n_samples x 1`.
///
/// # Panics
///
/// Panics if the two matrices differ in shape.
pub fn locally_weighted_lines<T: LwrFloat>(
    lines: &DMatrix<T>,
    normalized_activations: &DMatrix<T>,
) -> DMatrix<T> {
    assert_eq!(
        lines.shape(),
        normalized_activations.shape(),
        "lines and activations must have the same shape"
    );

    DMatrix::from_fn(lines.nrows(), 1, |i_s, _| {
        (0..lines.ncols()).fold(T::zero(), |acc, bb| {
            acc + lines[(i_s, bb)] * normalized_activations[(i_s, bb)]
        })
    })
}
