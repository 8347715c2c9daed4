//! Grid evaluation for diagnostics and plotting.
//!
//! ## Purpose
//!
//! This module evaluates a model over a regular 1-D or 2-D grid and hands
//! every intermediate quantity (inputs, lines, blended output, raw and
//! normalized activations) to an external tabular writer.
//!
//! ## Design notes
//!
//! * **Writer-agnostic**: Output goes through the [`GridSink`] trait; file
//!   formats belong to the implementor.
//! * **Explicit limits**: Grids of 3 or more dimensions are rejected.
//!
//! ## Key concepts
//!
//! * **Tables**: `n_samples_per_dim`, `inputs_grid`, `lines`,
//!   `weighted_lines`, `activations`, `activations_normalized`.
//!
//! ## Non-goals
//!
//! * This module does not write files.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use nalgebra::DMatrix;

// Internal dependencies
use crate::engine::model::LwrModel;
use crate::math::grid::grid_inputs;
use crate::math::linalg::LwrFloat;
use crate::primitives::errors::LwrError;

// ============================================================================
// Grid Specification
// ============================================================================

/// Axis-aligned grid: bounds and number of samples per dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec<T> {
    /// Lower bound per dimension.
    pub min: Vec<T>,

    /// Upper bound per dimension.
    pub max: Vec<T>,

    /// Number of samples per dimension.
    pub n_samples_per_dim: Vec<usize>,
}

impl<T: LwrFloat> GridSpec<T> {
    /// Create a grid specification.
    pub fn new(min: Vec<T>, max: Vec<T>, n_samples_per_dim: Vec<usize>) -> Self {
        Self {
            min,
            max,
            n_samples_per_dim,
        }
    }

    /// Input matrix of the grid, one row per grid point.
    pub fn inputs(&self) -> Result<DMatrix<T>, LwrError> {
        grid_inputs(&self.min, &self.max, &self.n_samples_per_dim)
    }
}

// ============================================================================
// Grid Sink
// ============================================================================

/// Destination for the tables produced by a grid evaluation.
pub trait GridSink<T: LwrFloat> {
    /// Error raised by the writer.
    type Error;

    /// Write a table of sample counts.
    fn write_counts(&mut self, name: &str, counts: &[usize]) -> Result<(), Self::Error>;

    /// Write a real-valued table.
    fn write_table(&mut self, name: &str, table: &DMatrix<T>) -> Result<(), Self::Error>;
}

// ============================================================================
// Grid Evaluation
// ============================================================================

/// Everything computed for one grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridEvaluation<T: LwrFloat> {
    /// Number of samples per dimension.
    pub n_samples_per_dim: Vec<usize>,

    /// Grid inputs, `n_samples x n_dims`.
    pub inputs: DMatrix<T>,

    /// Line values, `n_samples x n_basis`.
    pub lines: DMatrix<T>,

    /// Model output, `n_samples x 1`.
    pub weighted_lines: DMatrix<T>,

    /// Raw kernel activations, `n_samples x n_basis`.
    pub activations: DMatrix<T>,

    /// Normalized kernel activations, `n_samples x n_basis`.
    pub normalized_activations: DMatrix<T>,
}

impl<T: LwrFloat> GridEvaluation<T> {
    /// Hand every table to `sink`, stopping at the first writer error.
    pub fn write_to<S: GridSink<T>>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.write_counts("n_samples_per_dim", &self.n_samples_per_dim)?;
        sink.write_table("inputs_grid", &self.inputs)?;
        sink.write_table("lines", &self.lines)?;
        sink.write_table("weighted_lines", &self.weighted_lines)?;
        sink.write_table("activations", &self.activations)?;
        sink.write_table("activations_normalized", &self.normalized_activations)
    }
}

impl<T: LwrFloat> LwrModel<T> {
    /// Evaluate the model over a 1-D or 2-D grid.
    pub fn evaluate_grid(&mut self, spec: &GridSpec<T>) -> Result<GridEvaluation<T>, LwrError> {
        let inputs = spec.inputs()?;
        if inputs.ncols() != self.n_dims() {
            return Err(LwrError::GridDimensionMismatch {
                grid_dims: inputs.ncols(),
                model_dims: self.n_dims(),
            });
        }

        let lines = self.get_lines(&inputs);
        let weighted_lines = self.locally_weighted_lines(&inputs);
        let activations = self.kernel_activations(&inputs);
        let normalized_activations = self.normalized_kernel_activations(&inputs);

        Ok(GridEvaluation {
            n_samples_per_dim: spec.n_samples_per_dim.clone(),
            inputs,
            lines,
            weighted_lines,
            activations,
            normalized_activations,
        })
    }
}
