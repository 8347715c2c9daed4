//! Layer 5: Evaluation
//!
//! # Purpose
//!
//! This layer evaluates a model over regular grids for diagnostics and hands
//! the results to external writers.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Evaluation ← You are here
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Grid evaluation and export.
pub mod grid;
