//! High-level API for building LWR models.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point for LWR. It
//! implements a fluent builder for supplying the fitted parameters of a
//! model and choosing its representation flags.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all flags.
//! * **Validated**: Shapes are validated when `.build()` is called; values
//!   only in strict mode.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! ### Configuration Flow
//!
//! 1. Create a [`LwrBuilder`] via `Lwr::new()`.
//! 2. Supply `.centers()`, `.widths()`, `.slopes()` and `.offsets()`.
//! 3. Chain flag methods (`.asymmetric_kernels()`, ...).
//! 4. Call `.build()` to obtain an [`LwrModel`].

// External dependencies
use nalgebra::DMatrix;

// Internal dependencies
use crate::engine::cache::NormalizePassFn;
use crate::engine::validator::Validator;
use crate::math::linalg::LwrFloat;

// Publicly re-exported types
pub use crate::algorithms::lines::LinePivot;
pub use crate::engine::codec::ParameterGroup;
pub use crate::engine::model::{LwrModel, Modifier};
pub use crate::evaluation::grid::{GridEvaluation, GridSink, GridSpec};
pub use crate::primitives::errors::LwrError;

/// Fluent builder for LWR models.
#[derive(Debug, Clone)]
pub struct LwrBuilder<T: LwrFloat> {
    /// Kernel centers, `n_basis x n_dims`.
    pub centers: Option<DMatrix<T>>,

    /// Kernel widths, `n_basis x n_dims`.
    pub widths: Option<DMatrix<T>>,

    /// Line slopes, `n_basis x n_dims`.
    pub slopes: Option<DMatrix<T>>,

    /// Line offsets, `n_basis x 1`.
    pub offsets: Option<DMatrix<T>>,

    /// Borrow the previous kernel's width left of each center (default: false).
    pub asymmetric_kernels: Option<bool>,

    /// Offsets relative to kernel centers (default: false).
    pub lines_pivot_at_max_activation: Option<bool>,

    /// Exchange slopes as angles in the flat vector (default: false).
    pub slopes_as_angles: Option<bool>,

    /// Cache normalized activations (default: true).
    pub caching: Option<bool>,

    /// Also reject non-finite values and non-positive widths (default: false).
    pub strict: Option<bool>,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom normalization pass function.
    #[doc(hidden)]
    pub custom_normalize_pass: Option<NormalizePassFn<T>>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: LwrFloat> Default for LwrBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: LwrFloat> LwrBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            centers: None,
            widths: None,
            slopes: None,
            offsets: None,
            asymmetric_kernels: None,
            lines_pivot_at_max_activation: None,
            slopes_as_angles: None,
            caching: None,
            strict: None,
            custom_normalize_pass: None,
            duplicate_param: None,
        }
    }

    /// Set the kernel centers.
    pub fn centers(mut self, centers: DMatrix<T>) -> Self {
        if self.centers.is_some() {
            self.duplicate_param = Some("centers");
        }
        self.centers = Some(centers);
        self
    }

    /// Set the kernel widths.
    pub fn widths(mut self, widths: DMatrix<T>) -> Self {
        if self.widths.is_some() {
            self.duplicate_param = Some("widths");
        }
        self.widths = Some(widths);
        self
    }

    /// Set the line slopes.
    pub fn slopes(mut self, slopes: DMatrix<T>) -> Self {
        if self.slopes.is_some() {
            self.duplicate_param = Some("slopes");
        }
        self.slopes = Some(slopes);
        self
    }

    /// Set the line offsets.
    pub fn offsets(mut self, offsets: DMatrix<T>) -> Self {
        if self.offsets.is_some() {
            self.duplicate_param = Some("offsets");
        }
        self.offsets = Some(offsets);
        self
    }

    /// Use asymmetric kernels.
    pub fn asymmetric_kernels(mut self, asymmetric: bool) -> Self {
        if self.asymmetric_kernels.is_some() {
            self.duplicate_param = Some("asymmetric_kernels");
        }
        self.asymmetric_kernels = Some(asymmetric);
        self
    }

    /// Read offsets as line values at the kernel centers.
    pub fn lines_pivot_at_max_activation(mut self, pivot: bool) -> Self {
        if self.lines_pivot_at_max_activation.is_some() {
            self.duplicate_param = Some("lines_pivot_at_max_activation");
        }
        self.lines_pivot_at_max_activation = Some(pivot);
        self
    }

    /// Exchange slopes as angles in the flat parameter vector.
    pub fn slopes_as_angles(mut self, as_angles: bool) -> Self {
        if self.slopes_as_angles.is_some() {
            self.duplicate_param = Some("slopes_as_angles");
        }
        self.slopes_as_angles = Some(as_angles);
        self
    }

    /// Enable or disable the normalized-activation cache.
    pub fn caching(mut self, caching: bool) -> Self {
        if self.caching.is_some() {
            self.duplicate_param = Some("caching");
        }
        self.caching = Some(caching);
        self
    }

    /// Reject non-finite parameters and non-positive widths at build time.
    pub fn strict(mut self) -> Self {
        if self.strict.is_some() {
            self.duplicate_param = Some("strict");
        }
        self.strict = Some(true);
        self
    }

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++

    /// Set a custom normalization pass function (only for dev)
    #[doc(hidden)]
    pub fn custom_normalize_pass(mut self, pass: NormalizePassFn<T>) -> Self {
        self.custom_normalize_pass = Some(pass);
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Validate the configuration and build the model.
    pub fn build(self) -> Result<LwrModel<T>, LwrError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let centers = self.centers.ok_or(LwrError::MissingParameter("centers"))?;
        let widths = self.widths.ok_or(LwrError::MissingParameter("widths"))?;
        let slopes = self.slopes.ok_or(LwrError::MissingParameter("slopes"))?;
        let offsets = self.offsets.ok_or(LwrError::MissingParameter("offsets"))?;

        Validator::validate_shapes(&centers, &widths, &slopes, &offsets)?;
        if self.strict.unwrap_or(false) {
            Validator::validate_values(&centers, &widths, &slopes, &offsets)?;
        }

        let mut model = LwrModel::new(
            centers,
            widths,
            slopes,
            offsets,
            self.asymmetric_kernels.unwrap_or(false),
            self.lines_pivot_at_max_activation.unwrap_or(false),
        )?;
        model.set_slopes_as_angles(self.slopes_as_angles.unwrap_or(false));
        model.set_caching(self.caching.unwrap_or(true));
        if self.custom_normalize_pass.is_some() {
            model.set_custom_normalize_pass(self.custom_normalize_pass);
        }

        Ok(model)
    }
}
