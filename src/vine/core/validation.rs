//! vine::core::validation — shape checks shared by the vine orchestrator.
//!
//! Purpose
//! -------
//! Centralize the dimension checks between the observation matrix, the
//! structure array and the two edge grids, so every entry point reports a
//! mismatch the same way and before any density work begins.
//!
//! Conventions
//! -----------
//! - `dim` is the number of variables, i.e. the structure array's size.
//! - Grids are `(dim−1)×(dim−1)`; for `dim = 1` they are `0×0`.
use crate::{
    copula::family::CopulaFamily,
    vine::errors::{VineError, VineResult},
};
use ndarray::ArrayView2;

/// Check that the observation matrix has `dim` columns.
///
/// Errors
/// ------
/// - `VineError::DimensionMismatch { what: "observation columns", .. }`.
pub fn validate_observations(data: ArrayView2<f64>, dim: usize) -> VineResult<()> {
    if data.ncols() != dim {
        return Err(VineError::DimensionMismatch {
            what: "observation columns",
            expected: dim,
            actual: data.ncols(),
        });
    }
    Ok(())
}

/// Check that both edge grids are `(dim−1)×(dim−1)`.
///
/// Errors
/// ------
/// - `VineError::DimensionMismatch` naming the first grid axis that
///   disagrees (family rows, family columns, parameter rows, parameter
///   columns).
pub fn validate_grid_shapes(
    families: ArrayView2<Option<CopulaFamily>>, params: ArrayView2<Vec<f64>>, dim: usize,
) -> VineResult<()> {
    let side = dim.saturating_sub(1);
    let checks = [
        ("family grid rows", families.nrows()),
        ("family grid columns", families.ncols()),
        ("parameter grid rows", params.nrows()),
        ("parameter grid columns", params.ncols()),
    ];
    for (what, actual) in checks {
        if actual != side {
            return Err(VineError::DimensionMismatch { what, expected: side, actual });
        }
    }
    Ok(())
}
