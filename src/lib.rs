//! # LWR: Locally Weighted Regression models for Rust
//!
//! Parameter model and evaluation engine for Locally Weighted Regression
//! function approximators: a set of local linear models ("lines") blended by
//! normalized Gaussian kernel activations.
//!
//! ## What is LWR?
//!
//! An LWR model approximates a function of a multi-dimensional input with
//! `n_basis` local lines. Every line `b` has:
//!
//! - a Gaussian kernel with a center and a width per input dimension,
//! - a slope per input dimension and one offset.
//!
//! The prediction at an input `x` is
//!
//! ```text
//! y(x) = sum_b  psi_b(x) / sum_k psi_k(x)  *  line_b(x)
//! psi_b(x) = prod_d exp(-0.5 * (x_d - c_bd)^2 / w_bd^2)
//! ```
//!
//! The normalized activations form a (near) partition of unity, so the
//! output smoothly switches between lines as the input moves between kernel
//! centers.
//!
//! **Features:**
//! - Symmetric and asymmetric Gaussian kernels
//! - Offsets relative to the origin or to the kernel centers (pivot form)
//! - Flat parameter vector with group masks for black-box optimizers
//! - Single-entry cache for normalized activations
//! - Grid evaluation of all intermediate quantities for plotting
//!
//! Fitting the lines is not part of this crate; models are built from
//! already fitted centers, widths, slopes and offsets.
//!
//! ## Quick Start
//!
//! ```rust
//! use lwr_rs::prelude::*;
//!
//! let mut model = Lwr::new()
//!     .centers(DMatrix::from_column_slice(2, 1, &[0.0, 10.0]))
//!     .widths(DMatrix::from_column_slice(2, 1, &[2.0, 2.0]))
//!     .slopes(DMatrix::from_column_slice(2, 1, &[1.0, 1.0]))
//!     .offsets(DMatrix::from_column_slice(2, 1, &[0.0, 0.0]))
//!     .build()?;
//!
//! let inputs = DMatrix::from_column_slice(1, 1, &[5.0]);
//! let output: DMatrix<f64> = model.locally_weighted_lines(&inputs);
//! assert!((output[(0, 0)] - 5.0).abs() < 1e-12);
//! # Ok::<(), LwrError>(())
//! ```
//!
//! ## Parameter Vector
//!
//! Optimizers see the model as one flat vector laid out as
//! centers, widths, offsets, slopes (each matrix column by column):
//!
//! ```rust
//! use lwr_rs::prelude::*;
//!
//! let mut model = Lwr::new()
//!     .centers(DMatrix::from_column_slice(2, 1, &[0.0, 10.0]))
//!     .widths(DMatrix::from_column_slice(2, 1, &[2.0, 2.0]))
//!     .slopes(DMatrix::from_column_slice(2, 1, &[1.0, 1.0]))
//!     .offsets(DMatrix::from_column_slice(2, 1, &[0.0, 0.0]))
//!     .build()?;
//!
//! assert_eq!(model.get_parameter_vector_all_size(), 8);
//! let mask = model.get_parameter_vector_mask(["widths"])?;
//! assert_eq!(mask, vec![0, 0, 2, 2, 0, 0, 0, 0]);
//!
//! let mut values = model.get_parameter_vector_all();
//! values[4] = 1.5; // offset of the first line
//! model.set_parameter_vector_all(values.as_slice())?;
//! assert_eq!(model.offsets()[(0, 0)], 1.5);
//! # Ok::<(), LwrError>(())
//! ```
//!
//! ## Error Handling
//!
//! Recoverable errors (inconsistent shapes at construction, wrong-length
//! parameter vectors, unsupported grids) are returned as [`LwrError`](prelude::LwrError).
//! Shape violations in the low-level evaluation routines are preconditions
//! and panic.
//!
//! ## Numerical Caveat
//!
//! If some input produces zero total activation, `max(row_sums) / 1e5` is
//! added to every row sum before normalizing. This keeps the division finite
//! but slightly biases all rows of that batch.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - shared error types.
mod primitives;

// Layer 2: Math - pure mathematical functions.
//
// Contains the Gaussian kernel activations, row reductions over nalgebra
// matrices, and regular sampling grids.
mod math;

// Layer 3: Algorithms - local line evaluation and blending.
mod algorithms;

// Layer 4: Engine - the stateful model.
//
// Contains validation, the activation cache, the parameter-vector codec and
// the `LwrModel` itself.
mod engine;

// Layer 5: Evaluation - grid evaluation for diagnostics.
mod evaluation;

// High-level fluent API for building models.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard LWR prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use lwr_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        GridEvaluation, GridSink, GridSpec, LinePivot, LwrBuilder as Lwr, LwrError, LwrModel,
        Modifier, ParameterGroup,
    };
    pub use nalgebra::{DMatrix, DVector};
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal core algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal evaluation.
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
