//! Local line evaluation for LWR.
//!
//! ## Purpose
//!
//! Each basis function carries one affine model of the input. This module
//! evaluates those lines for a batch of inputs and converts offsets between
//! the two supported conventions.
//!
//! ## Design notes
//!
//! * **Two conventions**: Offsets are either intercepts at x = 0
//!   ("y = ax + b") or values at the kernel center ("y = a(x - c) + b").
//! * **Exact shift**: Both conventions differ per line by the scalar
//!   `ac = slopes(b, .) . centers(b, .)`, so conversion touches offsets only.
//!
//! ## Invariants
//!
//! * Output shape is `n_samples x n_basis`.
//! * Converting offsets to pivot form and back restores them up to roundoff.
//!
//! ## Non-goals
//!
//! * This module does not fit the lines.

// External dependencies
use nalgebra::DMatrix;

// Internal dependencies
use crate::math::linalg::{LwrFloat, row_dot, rowwise_dot};

// ============================================================================
// Line Convention
// ============================================================================

/// Interpretation of the offsets of the local lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinePivot {
    /// Offset is the line's value at x = 0: "y = ax + b".
    #[default]
    Origin,

    /// Offset is the line's value at its kernel center: "y = a(x - c) + b".
    MaxActivation,
}

impl LinePivot {
    /// Convention selected by the `lines_pivot_at_max_activation` flag.
    #[inline]
    pub fn from_flag(pivot_at_max_activation: bool) -> Self {
        if pivot_at_max_activation {
            Self::MaxActivation
        } else {
            Self::Origin
        }
    }

    /// Whether this is the pivot-at-max-activation convention.
    #[inline]
    pub fn at_max_activation(self) -> bool {
        self == Self::MaxActivation
    }
}

// ============================================================================
// Line Evaluation
// ============================================================================

/// Evaluate every line at every input.
///
/// `slopes` and `centers` are `n_basis x n_dims`, `offsets` is `n_basis x 1`
/// and `inputs` is `n_samples x n_dims`.
///
/// # Panics
///
/// Panics if the shapes are inconsistent.
pub fn get_lines<T: LwrFloat>(
    centers: &DMatrix<T>,
    slopes: &DMatrix<T>,
    offsets: &DMatrix<T>,
    inputs: &DMatrix<T>,
    pivot: LinePivot,
) -> DMatrix<T> {
    let n_lines = slopes.nrows();
    let n_dims = slopes.ncols();
    assert_eq!(
        offsets.shape(),
        (n_lines, 1),
        "offsets must be a column with one entry per line"
    );
    assert_eq!(
        inputs.ncols(),
        n_dims,
        "inputs must have one column per dimension"
    );

    let mut lines = DMatrix::from_fn(inputs.nrows(), n_lines, |i_s, bb| {
        (0..n_dims).fold(T::zero(), |acc, d| acc + inputs[(i_s, d)] * slopes[(bb, d)])
            + offsets[(bb, 0)]
    });

    if pivot.at_max_activation() {
        // "y = a(x - c) + b" is "y = ax - ac + b": still subtract ac
        assert_eq!(
            centers.shape(),
            slopes.shape(),
            "centers must have the same shape as slopes"
        );
        for bb in 0..n_lines {
            let ac = row_dot(slopes, centers, bb);
            for i_s in 0..lines.nrows() {
                lines[(i_s, bb)] = lines[(i_s, bb)] - ac;
            }
        }
    }

    lines
}

/// Convert offsets in place from convention `from` to convention `to`.
///
/// "y = ax + b" equals "y = a(x - c) + (b + ac)", so moving to the pivot
/// form adds `ac` and moving back subtracts it. No-op when `from == to`.
pub fn convert_offsets<T: LwrFloat>(
    centers: &DMatrix<T>,
    slopes: &DMatrix<T>,
    offsets: &mut DMatrix<T>,
    from: LinePivot,
    to: LinePivot,
) {
    if from == to {
        return;
    }

    let ac = rowwise_dot(slopes, centers);
    for (i_line, &shift) in ac.iter().enumerate() {
        offsets[(i_line, 0)] = match to {
            LinePivot::MaxActivation => offsets[(i_line, 0)] + shift,
            LinePivot::Origin => offsets[(i_line, 0)] - shift,
        };
    }
}
