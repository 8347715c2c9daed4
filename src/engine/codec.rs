//! Flat parameter-vector codec for external optimizers.
//!
//! ## Purpose
//!
//! Black-box optimizers see a model as one flat vector of scalars. This module
//! defines the fixed layout of that vector, the per-group selection mask, and
//! which parameter groups the activation cache depends on.
//!
//! ## Design notes
//!
//! * **Fixed layout**: centers, widths, offsets, slopes, in that order. Each
//!   matrix is laid out column by column (all basis functions of dimension 0,
//!   then dimension 1, ...), which is nalgebra's storage order.
//! * **Rule table**: [`ParameterGroup::invalidates_activations`] is the single
//!   place deciding which groups invalidate cached activations.
//!
//! ## Key concepts
//!
//! * **Mask ids**: centers = 1, widths = 2, offsets = 3, slopes = 4; 0 marks
//!   an unselected scalar.
//! * **Angles**: When enabled, slopes are exchanged as `atan2(slope, 1)` and
//!   restored with `tan`.
//!
//! ## Invariants
//!
//! * Vector size is `3 * n_basis * n_dims + n_basis`.
//! * Encoding followed by decoding of the same vector leaves every matrix
//!   unchanged (exactly, unless slopes are exchanged as angles).
//!
//! ## Non-goals
//!
//! * This module does not check the values it restores.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeSet, string::ToString, vec::Vec};
#[cfg(feature = "std")]
use std::{collections::BTreeSet, string::ToString, vec::Vec};

// External dependencies
use core::fmt::{Display, Formatter};
use core::ops::Range;
use core::str::FromStr;
use nalgebra::DMatrix;

// Internal dependencies
use crate::math::linalg::LwrFloat;
use crate::primitives::errors::LwrError;

// ============================================================================
// Parameter Groups
// ============================================================================

/// One block of the flat parameter vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParameterGroup {
    /// Kernel centers, `n_basis x n_dims`.
    Centers,

    /// Kernel widths, `n_basis x n_dims`.
    Widths,

    /// Line offsets, `n_basis x 1`.
    Offsets,

    /// Line slopes, `n_basis x n_dims`.
    Slopes,
}

impl ParameterGroup {
    /// All groups in flat-vector order.
    pub const ALL: [ParameterGroup; 4] = [
        ParameterGroup::Centers,
        ParameterGroup::Widths,
        ParameterGroup::Offsets,
        ParameterGroup::Slopes,
    ];

    /// Name used when selecting groups by label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Centers => "centers",
            Self::Widths => "widths",
            Self::Offsets => "offsets",
            Self::Slopes => "slopes",
        }
    }

    /// Non-zero id written into the parameter mask for this group.
    pub fn mask_id(self) -> i32 {
        match self {
            Self::Centers => 1,
            Self::Widths => 2,
            Self::Offsets => 3,
            Self::Slopes => 4,
        }
    }

    /// Whether changing this group invalidates cached normalized activations.
    ///
    /// Normalized activations depend on centers and widths only.
    pub fn invalidates_activations(self) -> bool {
        match self {
            Self::Centers => true,
            Self::Widths => true,
            Self::Offsets => false,
            Self::Slopes => false,
        }
    }
}

impl Display for ParameterGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ParameterGroup {
    type Err = LwrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group| group.label() == s)
            .ok_or_else(|| LwrError::UnknownParameterGroup(s.to_string()))
    }
}

/// Parse a collection of group labels.
pub fn parse_groups<I, S>(labels: I) -> Result<BTreeSet<ParameterGroup>, LwrError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    labels
        .into_iter()
        .map(|label| label.as_ref().parse())
        .collect()
}

// ============================================================================
// Layout
// ============================================================================

/// Position of every parameter group inside the flat vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterLayout {
    n_basis_functions: usize,
    n_dims: usize,
}

impl ParameterLayout {
    /// Layout for a model with the given number of basis functions and dimensions.
    pub fn new(n_basis_functions: usize, n_dims: usize) -> Self {
        Self {
            n_basis_functions,
            n_dims,
        }
    }

    /// Number of scalars in `group`.
    pub fn group_size(&self, group: ParameterGroup) -> usize {
        match group {
            ParameterGroup::Offsets => self.n_basis_functions,
            _ => self.n_basis_functions * self.n_dims,
        }
    }

    /// Total number of scalars in the flat vector.
    pub fn size(&self) -> usize {
        ParameterGroup::ALL
            .iter()
            .map(|&group| self.group_size(group))
            .sum()
    }

    /// Range of the flat vector occupied by `group`.
    pub fn range(&self, group: ParameterGroup) -> Range<usize> {
        let start = ParameterGroup::ALL
            .iter()
            .take_while(|&&g| g != group)
            .map(|&g| self.group_size(g))
            .sum();
        start..start + self.group_size(group)
    }

    /// Mask with each selected group's scalars set to its id and the rest 0.
    pub fn mask(&self, selected: &BTreeSet<ParameterGroup>) -> Vec<i32> {
        let mut mask = vec![0; self.size()];
        for group in selected {
            mask[self.range(*group)].fill(group.mask_id());
        }
        mask
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Write `matrix` column by column into `out`, mapping every value.
pub fn encode_group<T: LwrFloat>(matrix: &DMatrix<T>, out: &mut [T], map: impl Fn(T) -> T) {
    debug_assert_eq!(matrix.len(), out.len());
    // nalgebra iterates in column-major order
    for (slot, &value) in out.iter_mut().zip(matrix.iter()) {
        *slot = map(value);
    }
}

/// Overwrite `matrix` column by column from `values`, mapping every value.
///
/// Returns whether any stored value changed.
pub fn decode_group<T: LwrFloat>(
    matrix: &mut DMatrix<T>,
    values: &[T],
    map: impl Fn(T) -> T,
) -> bool {
    debug_assert_eq!(matrix.len(), values.len());
    let mut changed = false;
    for (slot, &value) in matrix.iter_mut().zip(values.iter()) {
        let new_value = map(value);
        if *slot != new_value {
            changed = true;
        }
        *slot = new_value;
    }
    changed
}

/// Slope to angle with the x-axis.
#[inline]
pub fn slope_to_angle<T: LwrFloat>(slope: T) -> T {
    slope.atan2(T::one())
}

/// Angle with the x-axis to slope.
#[inline]
pub fn angle_to_slope<T: LwrFloat>(angle: T) -> T {
    angle.tan()
}
