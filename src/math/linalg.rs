//! Float bridge to the dense matrix backend.
//!
//! ## Purpose
//!
//! This module ties the generic `Float` type used throughout the crate to the
//! nalgebra dense matrices that hold centers, widths, slopes and offsets, and
//! provides the few row-level reductions the model needs.
//!
//! ## Design notes
//!
//! * nalgebra is used purely as storage with indexed access; all LWR math is
//!   written out explicitly so its evaluation order is fixed.
//! * Generic over `LwrFloat` types (f32 and f64).

// External dependencies
use core::fmt::{Debug, Display};
use nalgebra::{DMatrix, DVector, Scalar};
use num_traits::Float;

// ============================================================================
// LwrFloat Trait
// ============================================================================

/// Helper trait to bridge generic Float types to nalgebra dense matrices.
pub trait LwrFloat: Float + Scalar + Debug + Display + Send + Sync + 'static {}

impl LwrFloat for f64 {}

impl LwrFloat for f32 {}

// ============================================================================
// Row Reductions
// ============================================================================

/// Dot product of row `row` of `a` with row `row` of `b`.
#[inline]
pub fn row_dot<T: LwrFloat>(a: &DMatrix<T>, b: &DMatrix<T>, row: usize) -> T {
    debug_assert_eq!(a.ncols(), b.ncols(), "Rows must have same length");
    (0..a.ncols()).fold(T::zero(), |acc, d| acc + a[(row, d)] * b[(row, d)])
}

/// Per-row dot products of two matrices of identical shape.
///
/// For slopes and centers this yields `ac`, the offset shift between the
/// "y = ax + b" and "y = a(x - c) + b" line representations.
pub fn rowwise_dot<T: LwrFloat>(a: &DMatrix<T>, b: &DMatrix<T>) -> DVector<T> {
    assert_eq!(a.shape(), b.shape(), "Matrices must have same shape");
    DVector::from_fn(a.nrows(), |row, _| row_dot(a, b, row))
}

/// Sum of each row of a matrix.
pub fn row_sums<T: LwrFloat>(m: &DMatrix<T>) -> DVector<T> {
    DVector::from_fn(m.nrows(), |row, _| {
        m.row(row).iter().fold(T::zero(), |acc, &v| acc + v)
    })
}

/// Exact element-wise equality, including shape.
///
/// NaN never compares equal, so a matrix containing NaN is never equal to
/// anything, itself included.
#[inline]
pub fn exactly_equal<T: LwrFloat>(a: &DMatrix<T>, b: &DMatrix<T>) -> bool {
    a.shape() == b.shape() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
}
