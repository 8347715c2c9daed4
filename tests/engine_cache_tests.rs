#![cfg(feature = "dev")]
//! Tests for the normalized-activation cache.
//!
//! ## Test Organization
//!
//! 1. **Cache Entry** - Exact-match lookup, replacement, clearing
//! 2. **Model Caching** - Recomputation counted through a custom normalization pass
//! 3. **Invalidation** - Centers/widths invalidate, offsets/slopes do not

use std::sync::atomic::{AtomicUsize, Ordering};

use nalgebra::DMatrix;

use lwr_rs::internals::api::{LwrBuilder, LwrModel};
use lwr_rs::internals::engine::cache::ActivationCache;
use lwr_rs::internals::math::kernel::normalized_kernel_activations;

fn column(values: &[f64]) -> DMatrix<f64> {
    DMatrix::from_column_slice(values.len(), 1, values)
}

fn model_with_pass(
    pass: fn(&DMatrix<f64>, &DMatrix<f64>, &DMatrix<f64>, bool) -> DMatrix<f64>,
) -> LwrModel<f64> {
    LwrBuilder::new()
        .centers(column(&[0.0, 10.0]))
        .widths(column(&[2.0, 2.0]))
        .slopes(column(&[1.0, 1.0]))
        .offsets(column(&[0.0, 0.0]))
        .custom_normalize_pass(pass)
        .build()
        .unwrap()
}

// Each test owns its counter so parallel tests do not interfere.
macro_rules! counting_pass {
    ($name:ident, $counter:ident) => {
        static $counter: AtomicUsize = AtomicUsize::new(0);

        fn $name(
            centers: &DMatrix<f64>,
            widths: &DMatrix<f64>,
            inputs: &DMatrix<f64>,
            asymmetric: bool,
        ) -> DMatrix<f64> {
            $counter.fetch_add(1, Ordering::SeqCst);
            normalized_kernel_activations(centers, widths, inputs, asymmetric)
        }
    };
}

// ============================================================================
// Cache Entry Tests
// ============================================================================

#[test]
fn test_cache_starts_empty() {
    let cache = ActivationCache::<f64>::new();
    assert!(cache.is_empty());
    assert!(cache.lookup(&column(&[1.0])).is_none());
}

#[test]
fn test_cache_hit_requires_identical_values() {
    let mut cache = ActivationCache::new();
    cache.store(column(&[1.0, 2.0]), column(&[0.5, 0.5]));

    assert_eq!(cache.lookup(&column(&[1.0, 2.0])), Some(&column(&[0.5, 0.5])));
    assert!(cache.lookup(&column(&[1.0, 2.0000001])).is_none());
}

#[test]
fn test_cache_hit_requires_identical_shape() {
    let mut cache = ActivationCache::new();
    cache.store(column(&[1.0, 2.0]), column(&[0.5, 0.5]));

    let same_values_other_shape = DMatrix::from_row_slice(1, 2, &[1.0, 2.0]);
    assert!(cache.lookup(&same_values_other_shape).is_none());
}

#[test]
fn test_cache_never_hits_on_nan() {
    let mut cache = ActivationCache::new();
    cache.store(column(&[f64::NAN]), column(&[1.0]));
    assert!(cache.lookup(&column(&[f64::NAN])).is_none());
}

#[test]
fn test_cache_holds_most_recent_entry_only() {
    let mut cache = ActivationCache::new();
    cache.store(column(&[1.0]), column(&[0.1]));
    cache.store(column(&[2.0]), column(&[0.2]));

    assert!(cache.lookup(&column(&[1.0])).is_none());
    assert_eq!(cache.lookup(&column(&[2.0])), Some(&column(&[0.2])));

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_get_or_compute_calls_closure_once_per_batch() {
    let mut cache = ActivationCache::new();
    let inputs = column(&[3.0]);
    let mut calls = 0;

    let first = cache.get_or_compute(&inputs, || {
        calls += 1;
        column(&[0.75])
    });
    let second = cache.get_or_compute(&inputs, || {
        calls += 1;
        column(&[0.0])
    });

    assert_eq!(calls, 1);
    assert_eq!(first, second);
}

// ============================================================================
// Model Caching Tests
// ============================================================================

#[test]
fn test_repeated_inputs_are_not_recomputed() {
    counting_pass!(pass, CALLS);
    let mut model = model_with_pass(pass);
    let inputs = column(&[0.0, 2.5, 5.0]);

    let first = model.normalized_kernel_activations(&inputs);
    let second = model.normalized_kernel_activations(&inputs);

    assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    assert_eq!(first, second);
    assert!(model.has_cached_activations());
}

#[test]
fn test_new_inputs_are_recomputed() {
    counting_pass!(pass, CALLS);
    let mut model = model_with_pass(pass);

    model.normalized_kernel_activations(&column(&[0.0]));
    model.normalized_kernel_activations(&column(&[1.0]));
    model.normalized_kernel_activations(&column(&[0.0]));

    assert_eq!(CALLS.load(Ordering::SeqCst), 3);
}

#[test]
fn test_prediction_uses_cache() {
    counting_pass!(pass, CALLS);
    let mut model = model_with_pass(pass);
    let inputs = column(&[1.0, 4.0]);

    model.locally_weighted_lines(&inputs);
    model.normalized_kernel_activations(&inputs);
    model.locally_weighted_lines(&inputs);

    assert_eq!(CALLS.load(Ordering::SeqCst), 1);
}

#[test]
fn test_caching_disabled_always_recomputes() {
    counting_pass!(pass, CALLS);
    let mut model = model_with_pass(pass);
    model.set_caching(false);
    let inputs = column(&[1.0]);

    model.normalized_kernel_activations(&inputs);
    model.normalized_kernel_activations(&inputs);

    assert_eq!(CALLS.load(Ordering::SeqCst), 2);
    assert!(!model.has_cached_activations());
}

#[test]
fn test_clear_cache_forces_recompute() {
    counting_pass!(pass, CALLS);
    let mut model = model_with_pass(pass);
    let inputs = column(&[1.0]);

    model.normalized_kernel_activations(&inputs);
    model.clear_cache();
    model.normalized_kernel_activations(&inputs);

    assert_eq!(CALLS.load(Ordering::SeqCst), 2);
}

// ============================================================================
// Invalidation Tests
// ============================================================================

#[test]
fn test_width_change_invalidates_cache() {
    counting_pass!(pass, CALLS);
    let mut model = model_with_pass(pass);
    let inputs = column(&[3.0]);

    let before = model.normalized_kernel_activations(&inputs);

    // Layout: centers [0, 1], widths [2, 3], offsets [4, 5], slopes [6, 7]
    let mut values = model.get_parameter_vector_all();
    values[3] = 6.0;
    model.set_parameter_vector_all(values.as_slice()).unwrap();
    assert!(!model.has_cached_activations());

    let after = model.normalized_kernel_activations(&inputs);
    assert_eq!(CALLS.load(Ordering::SeqCst), 2);
    assert!(after[(0, 1)] > before[(0, 1)]);
}

#[test]
fn test_center_change_invalidates_cache() {
    counting_pass!(pass, CALLS);
    let mut model = model_with_pass(pass);
    let inputs = column(&[3.0]);

    model.normalized_kernel_activations(&inputs);

    let mut values = model.get_parameter_vector_all();
    values[1] = 4.0;
    model.set_parameter_vector_all(values.as_slice()).unwrap();
    model.normalized_kernel_activations(&inputs);

    assert_eq!(CALLS.load(Ordering::SeqCst), 2);
}

#[test]
fn test_offset_and_slope_changes_keep_cache() {
    counting_pass!(pass, CALLS);
    let mut model = model_with_pass(pass);
    let inputs = column(&[3.0]);

    model.normalized_kernel_activations(&inputs);

    let mut values = model.get_parameter_vector_all();
    values[4] = 1.0;
    values[5] = -1.0;
    values[6] = 0.5;
    values[7] = 2.0;
    model.set_parameter_vector_all(values.as_slice()).unwrap();
    assert!(model.has_cached_activations());

    model.normalized_kernel_activations(&inputs);
    assert_eq!(CALLS.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unchanged_vector_keeps_cache() {
    counting_pass!(pass, CALLS);
    let mut model = model_with_pass(pass);
    let inputs = column(&[3.0]);

    model.normalized_kernel_activations(&inputs);
    let values = model.get_parameter_vector_all();
    model.set_parameter_vector_all(values.as_slice()).unwrap();
    model.normalized_kernel_activations(&inputs);

    assert_eq!(CALLS.load(Ordering::SeqCst), 1);
}

#[test]
fn test_pivot_toggle_keeps_cache() {
    counting_pass!(pass, CALLS);
    let mut model = model_with_pass(pass);
    let inputs = column(&[3.0]);

    model.normalized_kernel_activations(&inputs);
    model.set_lines_pivot_at_max_activation(true);
    model.normalized_kernel_activations(&inputs);

    assert_eq!(CALLS.load(Ordering::SeqCst), 1);
}

#[test]
fn test_rejected_vector_keeps_cache() {
    counting_pass!(pass, CALLS);
    let mut model = model_with_pass(pass);
    let inputs = column(&[3.0]);

    model.normalized_kernel_activations(&inputs);
    assert!(model.set_parameter_vector_all(&[1.0, 2.0]).is_err());
    model.normalized_kernel_activations(&inputs);

    assert_eq!(CALLS.load(Ordering::SeqCst), 1);
}

#[test]
fn test_clone_starts_with_empty_cache() {
    counting_pass!(pass, CALLS);
    let mut model = model_with_pass(pass);
    let inputs = column(&[3.0]);

    model.normalized_kernel_activations(&inputs);
    let mut cloned = model.clone();
    assert!(!cloned.has_cached_activations());

    cloned.normalized_kernel_activations(&inputs);
    assert_eq!(CALLS.load(Ordering::SeqCst), 2);
    assert!(model.has_cached_activations());
}
