#![cfg(feature = "dev")]
//! Tests for Gaussian kernel activations.
//!
//! ## Test Organization
//!
//! 1. **Raw Activations** - Values at and around centers, products over dimensions
//! 2. **Asymmetric Kernels** - Width borrowing left of the center
//! 3. **Normalization** - Row sums, single basis function, zero-sum floor
//! 4. **Preconditions** - Shape violations panic

use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::DMatrix;

use lwr_rs::internals::math::kernel::{kernel_activations, normalized_kernel_activations};

fn column(values: &[f64]) -> DMatrix<f64> {
    DMatrix::from_column_slice(values.len(), 1, values)
}

// ============================================================================
// Raw Activation Tests
// ============================================================================

#[test]
fn test_activation_at_center_is_one() {
    let centers = column(&[0.0]);
    let widths = column(&[1.0]);
    let inputs = column(&[0.0]);

    let act = kernel_activations(&centers, &widths, &inputs, false);
    assert_eq!(act.shape(), (1, 1));
    assert_eq!(act[(0, 0)], 1.0);
}

#[test]
fn test_activation_one_width_away() {
    let centers = column(&[0.0]);
    let widths = column(&[1.0]);
    let inputs = column(&[1.0, -1.0]);

    let act = kernel_activations(&centers, &widths, &inputs, false);
    assert_relative_eq!(act[(0, 0)], (-0.5f64).exp(), epsilon = 1e-15);
    assert_relative_eq!(act[(1, 0)], (-0.5f64).exp(), epsilon = 1e-15);
}

#[test]
fn test_activation_is_product_over_dimensions() {
    // Center (0, 0), widths (1, 2), input (1, 2)
    // exp(-0.5 * 1/1) * exp(-0.5 * 4/4) = exp(-1)
    let centers = DMatrix::from_row_slice(1, 2, &[0.0, 0.0]);
    let widths = DMatrix::from_row_slice(1, 2, &[1.0, 2.0]);
    let inputs = DMatrix::from_row_slice(1, 2, &[1.0, 2.0]);

    let act = kernel_activations(&centers, &widths, &inputs, false);
    assert_relative_eq!(act[(0, 0)], (-1.0f64).exp(), epsilon = 1e-15);
}

#[test]
fn test_activation_shape_is_samples_by_basis() {
    let centers = column(&[0.0, 1.0, 2.0]);
    let widths = column(&[1.0, 1.0, 1.0]);
    let inputs = column(&[0.0, 0.5, 1.0, 1.5, 2.0]);

    let act = kernel_activations(&centers, &widths, &inputs, false);
    assert_eq!(act.shape(), (5, 3));
    // Each basis peaks at its own center
    assert_eq!(act[(0, 0)], 1.0);
    assert_eq!(act[(2, 1)], 1.0);
    assert_eq!(act[(4, 2)], 1.0);
}

// ============================================================================
// Asymmetric Kernel Tests
// ============================================================================

#[test]
fn test_asymmetric_kernel_borrows_previous_width_left_of_center() {
    let centers = column(&[0.0, 10.0]);
    let widths = column(&[1.0, 4.0]);
    let inputs = column(&[8.0]);

    let symmetric = kernel_activations(&centers, &widths, &inputs, false);
    let asymmetric = kernel_activations(&centers, &widths, &inputs, true);

    // Basis 1, x=8 < c=10: symmetric uses w=4, asymmetric uses w=1
    assert_relative_eq!(symmetric[(0, 1)], (-0.125f64).exp(), epsilon = 1e-15);
    assert_relative_eq!(asymmetric[(0, 1)], (-2.0f64).exp(), epsilon = 1e-15);

    // Basis 0, x=8 > c=0: own width in both cases
    assert_eq!(symmetric[(0, 0)], asymmetric[(0, 0)]);
}

#[test]
fn test_asymmetric_kernel_keeps_own_width_right_of_center() {
    let centers = column(&[0.0, 10.0]);
    let widths = column(&[1.0, 4.0]);
    let inputs = column(&[12.0]);

    let symmetric = kernel_activations(&centers, &widths, &inputs, false);
    let asymmetric = kernel_activations(&centers, &widths, &inputs, true);
    assert_eq!(symmetric, asymmetric);
}

#[test]
fn test_asymmetric_kernel_first_basis_keeps_own_width() {
    let centers = column(&[0.0, 10.0]);
    let widths = column(&[1.0, 4.0]);
    let inputs = column(&[-2.0]);

    let asymmetric = kernel_activations(&centers, &widths, &inputs, true);
    // Basis 0 has no previous basis: w=1
    assert_relative_eq!(asymmetric[(0, 0)], (-2.0f64).exp(), epsilon = 1e-15);
}

#[test]
fn test_asymmetric_kernel_per_dimension() {
    // Only the dimension where x < c borrows the previous width
    let centers = DMatrix::from_row_slice(2, 2, &[0.0, 0.0, 4.0, 4.0]);
    let widths = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 2.0, 2.0]);
    let inputs = DMatrix::from_row_slice(1, 2, &[2.0, 6.0]);

    let act = kernel_activations(&centers, &widths, &inputs, true);
    // dim 0: x=2 < 4, w=1: exp(-0.5*4/1) = exp(-2)
    // dim 1: x=6 > 4, w=2: exp(-0.5*4/4) = exp(-0.5)
    assert_relative_eq!(act[(0, 1)], (-2.5f64).exp(), epsilon = 1e-15);
}

// ============================================================================
// Normalization Tests
// ============================================================================

#[test]
fn test_normalized_rows_sum_to_one() {
    let centers = DMatrix::from_row_slice(3, 2, &[0.0, 0.0, 1.0, 2.0, -1.0, 3.0]);
    let widths = DMatrix::from_row_slice(3, 2, &[1.0, 0.5, 2.0, 1.0, 0.7, 1.5]);
    let inputs = DMatrix::from_row_slice(
        4,
        2,
        &[0.0, 0.0, 0.5, 1.0, -1.0, 2.5, 2.0, -1.0],
    );

    for asymmetric in [false, true] {
        let normalized = normalized_kernel_activations(&centers, &widths, &inputs, asymmetric);
        assert_eq!(normalized.shape(), (4, 3));
        for row in 0..4 {
            let sum: f64 = normalized.row(row).iter().sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_normalized_single_basis_is_exactly_one() {
    let centers = column(&[5.0]);
    let widths = column(&[0.1]);
    let inputs = column(&[-100.0, 5.0, 1000.0]);

    let normalized = normalized_kernel_activations(&centers, &widths, &inputs, false);
    assert_eq!(normalized.shape(), (3, 1));
    assert!(normalized.iter().all(|&v| v == 1.0));
}

#[test]
fn test_normalized_midpoint_is_half() {
    let centers = column(&[0.0, 10.0]);
    let widths = column(&[2.0, 2.0]);
    let inputs = column(&[5.0]);

    let normalized = normalized_kernel_activations(&centers, &widths, &inputs, false);
    assert_eq!(normalized[(0, 0)], 0.5);
    assert_eq!(normalized[(0, 1)], 0.5);
}

#[test]
fn test_normalized_zero_sum_floor_is_global() {
    // Row 1 is far from both centers and underflows to zero activation.
    let centers = column(&[0.0, 1.0]);
    let widths = column(&[0.01, 0.01]);
    let inputs = column(&[0.0, 1000.0]);

    let normalized = normalized_kernel_activations(&centers, &widths, &inputs, false);

    // Zero row stays zero instead of NaN
    assert_eq!(normalized[(1, 0)], 0.0);
    assert_eq!(normalized[(1, 1)], 0.0);

    // The floor max(sums) / 1e5 is also added to the healthy row
    assert_relative_eq!(normalized[(0, 0)], 1.0 / 1.00001, epsilon = 1e-15);
    assert_abs_diff_eq!(normalized[(0, 1)], 0.0);
}

#[test]
fn test_normalized_without_zero_sum_has_no_floor() {
    let centers = column(&[0.0, 1.0]);
    let widths = column(&[0.01, 0.01]);
    let inputs = column(&[0.0]);

    let normalized = normalized_kernel_activations(&centers, &widths, &inputs, false);
    assert_eq!(normalized[(0, 0)], 1.0);
}

#[test]
fn test_normalized_works_for_f32() {
    let centers = DMatrix::from_column_slice(2, 1, &[0.0f32, 1.0]);
    let widths = DMatrix::from_column_slice(2, 1, &[0.5f32, 0.5]);
    let inputs = DMatrix::from_column_slice(3, 1, &[0.0f32, 0.5, 1.0]);

    let normalized = normalized_kernel_activations(&centers, &widths, &inputs, false);
    for row in 0..3 {
        let sum: f32 = normalized.row(row).iter().sum();
        assert_relative_eq!(sum, 1.0f32, epsilon = 1e-6);
    }
}

// ============================================================================
// Precondition Tests
// ============================================================================

#[test]
#[should_panic]
fn test_inputs_with_wrong_dimensions_panic() {
    let centers = column(&[0.0, 1.0]);
    let widths = column(&[1.0, 1.0]);
    let inputs = DMatrix::from_row_slice(1, 2, &[0.0, 0.0]);

    let _ = kernel_activations(&centers, &widths, &inputs, false);
}

#[test]
#[should_panic]
fn test_widths_with_wrong_shape_panic() {
    let centers = column(&[0.0, 1.0]);
    let widths = column(&[1.0]);
    let inputs = column(&[0.0]);

    let _ = kernel_activations(&centers, &widths, &inputs, false);
}
