#![cfg(feature = "dev")]

use lwr_rs::internals::primitives::errors::LwrError;

#[test]
fn test_lwr_error_display() {
    // EmptyModel
    let err = LwrError::EmptyModel;
    assert_eq!(
        format!("{}", err),
        "Model needs at least one basis function and one dimension"
    );

    // ShapeMismatch
    let err = LwrError::ShapeMismatch {
        name: "widths",
        expected_rows: 3,
        expected_cols: 2,
        got_rows: 2,
        got_cols: 2,
    };
    assert_eq!(
        format!("{}", err),
        "Shape mismatch: widths is 2x2, expected 3x2"
    );

    // MissingParameter
    let err = LwrError::MissingParameter("offsets");
    assert_eq!(format!("{}", err), "Missing parameter: offsets");

    // WrongVectorSize
    let err = LwrError::WrongVectorSize {
        expected: 8,
        got: 7,
    };
    assert_eq!(
        format!("{}", err),
        "Parameter vector has wrong size: got 7, expected 8"
    );

    // UnknownParameterGroup
    let err = LwrError::UnknownParameterGroup("phases".to_string());
    assert_eq!(format!("{}", err), "Unknown parameter group: phases");

    // UnknownModifier
    let err = LwrError::UnknownModifier("foo".to_string());
    assert_eq!(format!("{}", err), "Unknown parameter vector modifier: foo");

    // UnsupportedGridDimensions
    let err = LwrError::UnsupportedGridDimensions(3);
    assert_eq!(
        format!("{}", err),
        "Unsupported grid dimensions: 3 (must be 1 or 2)"
    );

    // MismatchedGridSpec
    let err = LwrError::MismatchedGridSpec {
        min_len: 1,
        max_len: 2,
        samples_len: 2,
    };
    assert_eq!(
        format!("{}", err),
        "Grid specification mismatch: min has 1 entries, max has 2, n_samples_per_dim has 2"
    );

    // GridDimensionMismatch
    let err = LwrError::GridDimensionMismatch {
        grid_dims: 1,
        model_dims: 2,
    };
    assert_eq!(
        format!("{}", err),
        "Grid has 1 dimensions but the model has 2"
    );

    // InvalidNumericValue
    let err = LwrError::InvalidNumericValue("NaN detected".to_string());
    assert_eq!(format!("{}", err), "Invalid numeric value: NaN detected");

    // DuplicateParameter
    let err = LwrError::DuplicateParameter {
        parameter: "centers",
    };
    assert_eq!(
        format!("{}", err),
        "Parameter 'centers' was set multiple times. Each parameter can only be configured once."
    );
}

#[test]
fn test_lwr_error_is_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(LwrError::EmptyModel);
    assert!(err.to_string().contains("basis function"));
}

#[test]
fn test_lwr_error_equality() {
    assert_eq!(
        LwrError::WrongVectorSize {
            expected: 4,
            got: 3
        },
        LwrError::WrongVectorSize {
            expected: 4,
            got: 3
        }
    );
    assert_ne!(
        LwrError::UnsupportedGridDimensions(0),
        LwrError::UnsupportedGridDimensions(3)
    );
}
