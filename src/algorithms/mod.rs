//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer evaluates the local linear models of LWR and blends them into
//! the model output:
//! - Line evaluation, in either offset convention
//! - Offset conversion between conventions
//! - Blending of lines with normalized activations
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
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Local line evaluation and pivot conversion.
pub mod lines;

/// Weighted blending of local lines.
pub mod blend;
