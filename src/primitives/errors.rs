//! Error types for LWR operations.
//!
//! ## Purpose
//!
//! This module defines the recoverable error conditions of the LWR model:
//! construction-time shape checks, parameter-vector exchange with external
//! optimizers, and the diagnostic grid export.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., expected vs. actual sizes).
//! * **Deferred**: Builder misuse is recorded and reported at `build()`.
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic messages.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error` (when `std` is enabled).
//!
//! ## Key concepts
//!
//! 1. **Shape validation**: Centers, widths, slopes and offsets must agree.
//! 2. **Parameter exchange**: Flat vectors must match the model's vector size.
//! 3. **Grid export**: Only 1-D and 2-D grids are supported.
//!
//! ## Invariants
//!
//! * A call that returns an error leaves the model unmodified.
//! * Numeric values in errors use the same types as the public API.
//!
//! ## Non-goals
//!
//! * Precondition violations inside the low-level kernel and line routines
//!   are not reported here; they panic.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for LWR operations.
#[derive(Debug, Clone, PartialEq)]
pub enum LwrError {
    /// The model needs at least one basis function and one input dimension.
    EmptyModel,

    /// A parameter matrix does not have the shape implied by the centers.
    ShapeMismatch {
        /// Name of the offending matrix ("widths", "slopes", "offsets").
        name: &'static str,
        /// Expected number of rows.
        expected_rows: usize,
        /// Expected number of columns.
        expected_cols: usize,
        /// Actual number of rows.
        got_rows: usize,
        /// Actual number of columns.
        got_cols: usize,
    },

    /// A required matrix was never given to the builder.
    MissingParameter(&'static str),

    /// Flat parameter vector length differs from the model's vector size.
    WrongVectorSize {
        /// Size the model expects.
        expected: usize,
        /// Size that was provided.
        got: usize,
    },

    /// Parameter group name is not one of the selectable groups.
    UnknownParameterGroup(String),

    /// Parameter-vector modifier name is not recognized.
    UnknownModifier(String),

    /// Grid export only supports 1 or 2 input dimensions.
    UnsupportedGridDimensions(usize),

    /// Grid `min`, `max` and `n_samples_per_dim` must have the same length.
    MismatchedGridSpec {
        /// Length of `min`.
        min_len: usize,
        /// Length of `max`.
        max_len: usize,
        /// Length of `n_samples_per_dim`.
        samples_len: usize,
    },

    /// Grid dimensionality differs from the model's input dimensionality.
    GridDimensionMismatch {
        /// Dimensions of the grid.
        grid_dims: usize,
        /// Input dimensions of the model.
        model_dims: usize,
    },

    /// Input data contains NaN, infinite, or otherwise invalid values.
    InvalidNumericValue(String),

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for LwrError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyModel => {
                write!(f, "Model needs at least one basis function and one dimension")
            }
            Self::ShapeMismatch {
                name,
                expected_rows,
                expected_cols,
                got_rows,
                got_cols,
            } => write!(
                f,
                "Shape mismatch: {name} is {got_rows}x{got_cols}, expected {expected_rows}x{expected_cols}"
            ),
            Self::MissingParameter(name) => write!(f, "Missing parameter: {name}"),
            Self::WrongVectorSize { expected, got } => {
                write!(
                    f,
                    "Parameter vector has wrong size: got {got}, expected {expected}"
                )
            }
            Self::UnknownParameterGroup(name) => {
                write!(f, "Unknown parameter group: {name}")
            }
            Self::UnknownModifier(name) => write!(f, "Unknown parameter vector modifier: {name}"),
            Self::UnsupportedGridDimensions(dims) => {
                write!(f, "Unsupported grid dimensions: {dims} (must be 1 or 2)")
            }
            Self::MismatchedGridSpec {
                min_len,
                max_len,
                samples_len,
            } => write!(
                f,
                "Grid specification mismatch: min has {min_len} entries, max has {max_len}, n_samples_per_dim has {samples_len}"
            ),
            Self::GridDimensionMismatch {
                grid_dims,
                model_dims,
            } => write!(
                f,
                "Grid has {grid_dims} dimensions but the model has {model_dims}"
            ),
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for LwrError {}
