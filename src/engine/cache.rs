//! Single-entry cache for normalized kernel activations.
//!
//! ## Purpose
//!
//! Models are often queried repeatedly on the same input batch (for example by
//! an optimizer that only changes offsets or slopes between evaluations). This
//! module remembers the most recent input batch together with its normalized
//! activations so the Gaussian kernels need not be recomputed.
//!
//! ## Design notes
//!
//! * **One entry**: Only the most recent call is remembered; no eviction policy.
//! * **Exact keys**: A hit requires identical shape and bit-identical values.
//! * **Owned**: The cache belongs to one model instance and is never shared.
//!
//! ## Invariants
//!
//! * A stored entry is only valid for the centers and widths it was computed
//!   with; the owner must call [`ActivationCache::clear`] when they change.
//!
//! ## Non-goals
//!
//! * Tolerance-based matching of inputs.
//! * Caching raw (unnormalized) activations.

// External dependencies
use nalgebra::DMatrix;

// Internal dependencies
use crate::math::linalg::{LwrFloat, exactly_equal};

// ============================================================================
// Normalization Pass
// ============================================================================

/// Signature of the function computing normalized activations from
/// `(centers, widths, inputs, asymmetric_kernels)`.
pub type NormalizePassFn<T> = fn(&DMatrix<T>, &DMatrix<T>, &DMatrix<T>, bool) -> DMatrix<T>;

// ============================================================================
// Activation Cache
// ============================================================================

#[derive(Debug)]
struct CacheEntry<T: LwrFloat> {
    inputs: DMatrix<T>,
    normalized_activations: DMatrix<T>,
}

/// Most-recent-call cache mapping an input batch to its normalized activations.
#[derive(Debug)]
pub struct ActivationCache<T: LwrFloat> {
    entry: Option<CacheEntry<T>>,
}

impl<T: LwrFloat> Default for ActivationCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: LwrFloat> ActivationCache<T> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self { entry: None }
    }

    /// Whether an entry is currently stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    /// Drop the stored entry, if any.
    #[inline]
    pub fn clear(&mut self) {
        self.entry = None;
    }

    /// Cached activations for `inputs`, if `inputs` equals the stored batch exactly.
    pub fn lookup(&self, inputs: &DMatrix<T>) -> Option<&DMatrix<T>> {
        self.entry
            .as_ref()
            .filter(|entry| exactly_equal(&entry.inputs, inputs))
            .map(|entry| &entry.normalized_activations)
    }

    /// Replace the stored entry.
    pub fn store(&mut self, inputs: DMatrix<T>, normalized_activations: DMatrix<T>) {
        self.entry = Some(CacheEntry {
            inputs,
            normalized_activations,
        });
    }

    /// Return cached activations for `inputs`, or compute, store and return them.
    pub fn get_or_compute<F>(&mut self, inputs: &DMatrix<T>, compute: F) -> DMatrix<T>
    where
        F: FnOnce() -> DMatrix<T>,
    {
        if let Some(cached) = self.lookup(inputs) {
            log::trace!("activation cache hit for {}x{} inputs", inputs.nrows(), inputs.ncols());
            return cached.clone();
        }

        let normalized = compute();
        self.store(inputs.clone(), normalized.clone());
        normalized
    }
}
