//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer holds the stateful LWR model and the machinery around it:
//! - Construction-time validation
//! - The normalized-activation cache
//! - The flat parameter-vector codec for optimizers
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Evaluation
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Input validation.
pub mod validator;

/// Normalized-activation cache.
pub mod cache;

/// Flat parameter-vector layout and masks.
pub mod codec;

/// The LWR model.
pub mod model;
