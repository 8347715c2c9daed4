//! The LWR model: parameters, evaluation and parameter exchange.
//!
//! ## Purpose
//!
//! [`LwrModel`] owns the four parameter matrices of a fitted Locally Weighted
//! Regression model and exposes everything collaborators need: kernel
//! activations, local lines, the blended prediction, the flat parameter
//! vector used by optimizers, and the representation toggles.
//!
//! ## Design notes
//!
//! * **Fixed shape**: `n_basis` and `n_dims` are fixed at construction; later
//!   mutation only changes values.
//! * **Explicit cache**: Normalized activations are memoized in an owned
//!   [`ActivationCache`]. Methods that may fill the cache take `&mut self`.
//! * **Rule-driven invalidation**: Restoring the flat vector clears the cache
//!   exactly when [`ParameterGroup::invalidates_activations`] says so.
//!
//! ## Invariants
//!
//! * centers, widths, slopes are `n_basis x n_dims`; offsets is `n_basis x 1`.
//! * A cached entry always corresponds to the current centers and widths.
//! * Failed calls leave the model unmodified.
//!
//! ## Non-goals
//!
//! * Fitting the lines; they are supplied already fitted.
//! * Persistence of the model.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeSet, string::ToString, vec::Vec};
#[cfg(feature = "std")]
use std::{collections::BTreeSet, string::ToString, vec::Vec};

// External dependencies
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use nalgebra::{DMatrix, DVector};

// Internal dependencies
use crate::algorithms::blend;
use crate::algorithms::lines::{self, LinePivot};
use crate::engine::cache::{ActivationCache, NormalizePassFn};
use crate::engine::codec::{self, ParameterGroup, ParameterLayout};
use crate::engine::validator::Validator;
use crate::math::kernel;
use crate::math::linalg::LwrFloat;
use crate::primitives::errors::LwrError;

// ============================================================================
// Modifiers
// ============================================================================

/// Representation toggles that change how the flat vector or offsets are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// Offsets relative to the kernel centers instead of the origin.
    LinesPivotAtMaxActivation,

    /// Slopes exchanged as angles in the flat parameter vector.
    SlopesAsAngles,
}

impl Modifier {
    /// Name accepted by [`LwrModel::set_parameter_vector_modifier`].
    pub fn label(self) -> &'static str {
        match self {
            Self::LinesPivotAtMaxActivation => "lines_pivot_at_max_activation",
            Self::SlopesAsAngles => "slopes_as_angles",
        }
    }
}

impl FromStr for Modifier {
    type Err = LwrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::LinesPivotAtMaxActivation, Self::SlopesAsAngles]
            .into_iter()
            .find(|modifier| modifier.label() == s)
            .ok_or_else(|| LwrError::UnknownModifier(s.to_string()))
    }
}

// ============================================================================
// Model
// ============================================================================

/// Locally Weighted Regression model with Gaussian kernels.
#[derive(Debug)]
pub struct LwrModel<T: LwrFloat> {
    centers: DMatrix<T>,
    widths: DMatrix<T>,
    slopes: DMatrix<T>,
    offsets: DMatrix<T>,
    asymmetric_kernels: bool,
    pivot: LinePivot,
    slopes_as_angles: bool,
    caching: bool,
    layout: ParameterLayout,
    cache: ActivationCache<T>,
    normalize_pass: Option<NormalizePassFn<T>>,
}

impl<T: LwrFloat> Clone for LwrModel<T> {
    /// Copies parameters and flags; the clone starts with an empty cache.
    fn clone(&self) -> Self {
        Self {
            centers: self.centers.clone(),
            widths: self.widths.clone(),
            slopes: self.slopes.clone(),
            offsets: self.offsets.clone(),
            asymmetric_kernels: self.asymmetric_kernels,
            pivot: self.pivot,
            slopes_as_angles: self.slopes_as_angles,
            caching: self.caching,
            layout: self.layout,
            cache: ActivationCache::new(),
            normalize_pass: self.normalize_pass,
        }
    }
}

impl<T: LwrFloat> LwrModel<T> {
    /// Create a model from fitted parameters.
    ///
    /// `centers`, `widths` and `slopes` are `n_basis x n_dims`, `offsets` is
    /// `n_basis x 1`. Offsets are read in the convention selected by
    /// `lines_pivot_at_max_activation`.
    pub fn new(
        centers: DMatrix<T>,
        widths: DMatrix<T>,
        slopes: DMatrix<T>,
        offsets: DMatrix<T>,
        asymmetric_kernels: bool,
        lines_pivot_at_max_activation: bool,
    ) -> Result<Self, LwrError> {
        Validator::validate_shapes(&centers, &widths, &slopes, &offsets)?;
        let layout = ParameterLayout::new(centers.nrows(), centers.ncols());

        Ok(Self {
            centers,
            widths,
            slopes,
            offsets,
            asymmetric_kernels,
            pivot: LinePivot::from_flag(lines_pivot_at_max_activation),
            slopes_as_angles: false,
            caching: true,
            layout,
            cache: ActivationCache::new(),
            normalize_pass: None,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of basis functions (local lines).
    #[inline]
    pub fn n_basis_functions(&self) -> usize {
        self.centers.nrows()
    }

    /// Number of input dimensions.
    #[inline]
    pub fn n_dims(&self) -> usize {
        self.centers.ncols()
    }

    /// Kernel centers, `n_basis x n_dims`.
    pub fn centers(&self) -> &DMatrix<T> {
        &self.centers
    }

    /// Kernel widths, `n_basis x n_dims`.
    pub fn widths(&self) -> &DMatrix<T> {
        &self.widths
    }

    /// Line slopes, `n_basis x n_dims`.
    pub fn slopes(&self) -> &DMatrix<T> {
        &self.slopes
    }

    /// Line offsets, `n_basis x 1`, in the current pivot convention.
    pub fn offsets(&self) -> &DMatrix<T> {
        &self.offsets
    }

    /// Whether kernels borrow the previous width left of their center.
    pub fn asymmetric_kernels(&self) -> bool {
        self.asymmetric_kernels
    }

    /// Whether offsets are relative to the kernel centers.
    pub fn lines_pivot_at_max_activation(&self) -> bool {
        self.pivot.at_max_activation()
    }

    /// Whether slopes are exchanged as angles in the flat vector.
    pub fn slopes_as_angles(&self) -> bool {
        self.slopes_as_angles
    }

    /// Whether normalized activations are cached.
    pub fn caching(&self) -> bool {
        self.caching
    }

    /// Whether a normalized-activation cache entry is currently stored.
    pub fn has_cached_activations(&self) -> bool {
        !self.cache.is_empty()
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Unnormalized kernel activations, `n_samples x n_basis`.
    ///
    /// # Panics
    ///
    /// Panics if `inputs` does not have `n_dims` columns.
    pub fn kernel_activations(&self, inputs: &DMatrix<T>) -> DMatrix<T> {
        kernel::kernel_activations(&self.centers, &self.widths, inputs, self.asymmetric_kernels)
    }

    /// Normalized kernel activations, `n_samples x n_basis`.
    ///
    /// Served from the cache when caching is on and `inputs` is identical to
    /// the previous call's batch.
    ///
    /// # Panics
    ///
    /// Panics if `inputs` does not have `n_dims` columns.
    pub fn normalized_kernel_activations(&mut self, inputs: &DMatrix<T>) -> DMatrix<T> {
        let pass = self
            .normalize_pass
            .unwrap_or(kernel::normalized_kernel_activations::<T>);
        let (centers, widths, asymmetric) = (&self.centers, &self.widths, self.asymmetric_kernels);

        if !self.caching {
            return pass(centers, widths, inputs, asymmetric);
        }

        self.cache
            .get_or_compute(inputs, || pass(centers, widths, inputs, asymmetric))
    }

    /// Value of every local line at every input, `n_samples x n_basis`.
    ///
    /// # Panics
    ///
    /// Panics if `inputs` does not have `n_dims` columns.
    pub fn get_lines(&self, inputs: &DMatrix<T>) -> DMatrix<T> {
        lines::get_lines(&self.centers, &self.slopes, &self.offsets, inputs, self.pivot)
    }

    /// Model prediction: lines blended by normalized activations, `n_samples x 1`.
    ///
    /// # Panics
    ///
    /// Panics if `inputs` does not have `n_dims` columns.
    pub fn locally_weighted_lines(&mut self, inputs: &DMatrix<T>) -> DMatrix<T> {
        let lines = self.get_lines(inputs);
        let activations = self.normalized_kernel_activations(inputs);
        blend::locally_weighted_lines(&lines, &activations)
    }

    // ========================================================================
    // Mutators
    // ========================================================================

    /// Switch the offset convention, converting offsets so predictions are unchanged.
    ///
    /// Centers and widths are untouched, so cached activations stay valid.
    pub fn set_lines_pivot_at_max_activation(&mut self, lines_pivot_at_max_activation: bool) {
        let target = LinePivot::from_flag(lines_pivot_at_max_activation);
        if target == self.pivot {
            return;
        }

        lines::convert_offsets(
            &self.centers,
            &self.slopes,
            &mut self.offsets,
            self.pivot,
            target,
        );
        log::debug!("lines pivot changed from {:?} to {:?}", self.pivot, target);
        self.pivot = target;
    }

    /// Exchange slopes as angles (`atan2(slope, 1)`) in the flat vector.
    pub fn set_slopes_as_angles(&mut self, slopes_as_angles: bool) {
        self.slopes_as_angles = slopes_as_angles;
    }

    /// Apply a representation toggle.
    pub fn set_modifier(&mut self, modifier: Modifier, value: bool) {
        match modifier {
            Modifier::LinesPivotAtMaxActivation => self.set_lines_pivot_at_max_activation(value),
            Modifier::SlopesAsAngles => self.set_slopes_as_angles(value),
        }
    }

    /// Apply a representation toggle by name.
    pub fn set_parameter_vector_modifier(&mut self, name: &str, value: bool) -> Result<(), LwrError> {
        let modifier: Modifier = name.parse()?;
        self.set_modifier(modifier, value);
        Ok(())
    }

    /// Turn activation caching on or off. Turning it off drops the cache.
    pub fn set_caching(&mut self, caching: bool) {
        self.caching = caching;
        if !caching {
            self.cache.clear();
        }
    }

    /// Drop any cached normalized activations.
    pub fn clear_cache(&mut self) {
        if !self.cache.is_empty() {
            log::debug!("activation cache cleared");
        }
        self.cache.clear();
    }

    /// Replace the function computing normalized activations.
    #[doc(hidden)]
    pub fn set_custom_normalize_pass(&mut self, pass: Option<NormalizePassFn<T>>) {
        self.normalize_pass = pass;
        self.cache.clear();
    }

    // ========================================================================
    // Parameter Vector
    // ========================================================================

    /// Names of the groups that can be selected in a parameter mask.
    pub fn get_selectable_parameters(&self) -> BTreeSet<&'static str> {
        ParameterGroup::ALL.iter().map(|group| group.label()).collect()
    }

    /// Size of the flat parameter vector.
    #[inline]
    pub fn get_parameter_vector_all_size(&self) -> usize {
        self.layout.size()
    }

    /// Mask over the flat vector marking the scalars of the selected groups.
    ///
    /// Each scalar is 0 if its group is not selected, otherwise the group id
    /// (centers = 1, widths = 2, offsets = 3, slopes = 4).
    pub fn get_parameter_vector_mask<I, S>(&self, selected: I) -> Result<Vec<i32>, LwrError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let groups = codec::parse_groups(selected)?;
        Ok(self.layout.mask(&groups))
    }

    /// Mask for an already-parsed set of groups.
    pub fn parameter_vector_mask(&self, selected: &BTreeSet<ParameterGroup>) -> Vec<i32> {
        self.layout.mask(selected)
    }

    /// All parameters as one flat vector: centers, widths, offsets, slopes.
    pub fn get_parameter_vector_all(&self) -> DVector<T> {
        let mut values = DVector::from_element(self.layout.size(), T::zero());
        let slopes_as_angles = self.slopes_as_angles;

        for group in ParameterGroup::ALL {
            let range = self.layout.range(group);
            let out = &mut values.as_mut_slice()[range];
            match group {
                ParameterGroup::Slopes if slopes_as_angles => {
                    codec::encode_group(&self.slopes, out, codec::slope_to_angle)
                }
                _ => codec::encode_group(self.group(group), out, |v| v),
            }
        }

        values
    }

    /// Overwrite all parameters from a flat vector laid out as
    /// [`get_parameter_vector_all`](Self::get_parameter_vector_all).
    ///
    /// Clears cached activations if centers or widths change. A vector of the
    /// wrong length is rejected and the model is left unmodified.
    pub fn set_parameter_vector_all(&mut self, values: &[T]) -> Result<(), LwrError> {
        let expected = self.layout.size();
        if values.len() != expected {
            log::warn!(
                "parameter vector of size {} rejected, expected {}",
                values.len(),
                expected
            );
            return Err(LwrError::WrongVectorSize {
                expected,
                got: values.len(),
            });
        }

        let slopes_as_angles = self.slopes_as_angles;
        let mut invalidate = false;

        for group in ParameterGroup::ALL {
            let segment = &values[self.layout.range(group)];
            let changed = match group {
                ParameterGroup::Slopes if slopes_as_angles => {
                    codec::decode_group(&mut self.slopes, segment, codec::angle_to_slope)
                }
                _ => codec::decode_group(self.group_mut(group), segment, |v| v),
            };
            if changed && group.invalidates_activations() {
                invalidate = true;
            }
        }

        if invalidate {
            self.clear_cache();
        }

        Ok(())
    }

    fn group(&self, group: ParameterGroup) -> &DMatrix<T> {
        match group {
            ParameterGroup::Centers => &self.centers,
            ParameterGroup::Widths => &self.widths,
            ParameterGroup::Offsets => &self.offsets,
            ParameterGroup::Slopes => &self.slopes,
        }
    }

    fn group_mut(&mut self, group: ParameterGroup) -> &mut DMatrix<T> {
        match group {
            ParameterGroup::Centers => &mut self.centers,
            ParameterGroup::Widths => &mut self.widths,
            ParameterGroup::Offsets => &mut self.offsets,
            ParameterGroup::Slopes => &mut self.slopes,
        }
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

fn write_matrix<T: LwrFloat>(
    f: &mut Formatter<'_>,
    name: &str,
    matrix: &DMatrix<T>,
) -> core::fmt::Result {
    write!(f, "  {} ({}x{}): [", name, matrix.nrows(), matrix.ncols())?;
    for row in 0..matrix.nrows() {
        if row > 0 {
            write!(f, "; ")?;
        }
        for col in 0..matrix.ncols() {
            if col > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", matrix[(row, col)])?;
        }
    }
    writeln!(f, "]")
}

impl<T: LwrFloat> Display for LwrModel<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(
            f,
            "LwrModel(n_basis_functions={}, n_dims={}, asymmetric_kernels={}, lines_pivot_at_max_activation={}, slopes_as_angles={}, caching={})",
            self.n_basis_functions(),
            self.n_dims(),
            self.asymmetric_kernels,
            self.lines_pivot_at_max_activation(),
            self.slopes_as_angles,
            self.caching
        )?;
        write_matrix(f, "centers", &self.centers)?;
        write_matrix(f, "widths", &self.widths)?;
        write_matrix(f, "slopes", &self.slopes)?;
        write_matrix(f, "offsets", &self.offsets)
    }
}
