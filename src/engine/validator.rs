//! Input validation for LWR model construction.
//!
//! ## Purpose
//!
//! This module checks that the four parameter matrices of a model agree in
//! shape, and optionally that their values are usable.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `LwrFloat` types.
//!
//! ## Key concepts
//!
//! * **Shape Consistency**: centers, widths and slopes are `n_basis x n_dims`,
//!   offsets are `n_basis x 1`.
//! * **Finite Checks**: Ensures values are finite (strict mode only).
//! * **Width Positivity**: Widths must be strictly positive (strict mode only).
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not transform or correct invalid inputs.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use nalgebra::DMatrix;

// Internal dependencies
use crate::math::linalg::LwrFloat;
use crate::primitives::errors::LwrError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for LWR parameter matrices.
///
/// Provides static methods returning `Result<(), LwrError>` that fail fast
/// upon identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Shape Validation
    // ========================================================================

    /// Validate that widths, slopes and offsets match the shape of centers.
    pub fn validate_shapes<T: LwrFloat>(
        centers: &DMatrix<T>,
        widths: &DMatrix<T>,
        slopes: &DMatrix<T>,
        offsets: &DMatrix<T>,
    ) -> Result<(), LwrError> {
        let (n_basis_functions, n_dims) = centers.shape();

        // Check 1: Non-empty model
        if n_basis_functions == 0 || n_dims == 0 {
            return Err(LwrError::EmptyModel);
        }

        // Check 2: Matching shapes
        Self::validate_shape("widths", widths, n_basis_functions, n_dims)?;
        Self::validate_shape("slopes", slopes, n_basis_functions, n_dims)?;
        Self::validate_shape("offsets", offsets, n_basis_functions, 1)?;

        Ok(())
    }

    fn validate_shape<T: LwrFloat>(
        name: &'static str,
        matrix: &DMatrix<T>,
        expected_rows: usize,
        expected_cols: usize,
    ) -> Result<(), LwrError> {
        if matrix.shape() != (expected_rows, expected_cols) {
            return Err(LwrError::ShapeMismatch {
                name,
                expected_rows,
                expected_cols,
                got_rows: matrix.nrows(),
                got_cols: matrix.ncols(),
            });
        }
        Ok(())
    }

    // ========================================================================
    // Value Validation
    // ========================================================================

    /// Validate that every value of a matrix is finite.
    pub fn validate_finite<T: LwrFloat>(name: &str, matrix: &DMatrix<T>) -> Result<(), LwrError> {
        for row in 0..matrix.nrows() {
            for col in 0..matrix.ncols() {
                let val = matrix[(row, col)];
                if !val.is_finite() {
                    return Err(LwrError::InvalidNumericValue(format!(
                        "{}[{},{}]={}",
                        name,
                        row,
                        col,
                        val.to_f64().unwrap_or(f64::NAN)
                    )));
                }
            }
        }
        Ok(())
    }

    /// Validate that every width is strictly positive.
    pub fn validate_widths<T: LwrFloat>(widths: &DMatrix<T>) -> Result<(), LwrError> {
        for row in 0..widths.nrows() {
            for col in 0..widths.ncols() {
                let w = widths[(row, col)];
                if w <= T::zero() {
                    return Err(LwrError::InvalidNumericValue(format!(
                        "widths[{},{}]={} (must be > 0)",
                        row,
                        col,
                        w.to_f64().unwrap_or(f64::NAN)
                    )));
                }
            }
        }
        Ok(())
    }

    /// Validate values of all four matrices: finite, with positive widths.
    pub fn validate_values<T: LwrFloat>(
        centers: &DMatrix<T>,
        widths: &DMatrix<T>,
        slopes: &DMatrix<T>,
        offsets: &DMatrix<T>,
    ) -> Result<(), LwrError> {
        Self::validate_finite("centers", centers)?;
        Self::validate_finite("widths", widths)?;
        Self::validate_finite("slopes", slopes)?;
        Self::validate_finite("offsets", offsets)?;
        Self::validate_widths(widths)
    }

    // ========================================================================
    // Builder Validation
    // ========================================================================

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), LwrError> {
        if let Some(param) = duplicate_param {
            return Err(LwrError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
