//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used throughout LWR:
//! - Gaussian kernel activations, raw and normalized
//! - Row reductions over dense matrices
//! - Regular sampling grids
//!
//! These are reusable mathematical building blocks with no model state.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Evaluation
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Float bridge to nalgebra and row reductions.
pub mod linalg;

/// Gaussian kernel activations.
pub mod kernel;

/// Regular sampling grids.
pub mod grid;
