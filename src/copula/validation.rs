//! copula::validation — parameter-domain and argument guards.
//!
//! Purpose
//! -------
//! Centralize the family-specific parameter predicates and the open
//! unit-interval check applied to density / h-function arguments, so that
//! [`PairCopula`](crate::copula::pair::PairCopula) construction and its
//! vectorized primitives share one definition of "valid".
//!
//! Key behaviors
//! -------------
//! - [`validate_parameters`] checks the parameter count and the domain of
//!   every parameter for a [`CopulaFamily`], returning the first violation.
//! - [`validate_unit_interval`] scans a vector of pseudo-observations and
//!   reports the first entry outside (0, 1) (NaN included).
//! - [`validate_same_length`] guards the paired arguments of vectorized
//!   primitives.
//!
//! Invariants & assumptions
//! ------------------------
//! - All parameters must be finite.
//! - Independence accepts any parameter vector (including an empty one) and
//!   never fails validation.
//!
//! Testing notes
//! -------------
//! - Unit tests cover each domain boundary that differs between families
//!   (open vs closed endpoints) and the unit-interval scan.
use crate::copula::{
    errors::{CopulaError, CopulaResult},
    family::CopulaFamily,
};
use ndarray::ArrayView1;

/// Validate a parameter vector against the domain of `family`.
///
/// Parameters
/// ----------
/// - `family`: [`CopulaFamily`]
///   Family whose domain is enforced.
/// - `params`: `&[f64]`
///   Parameter vector; its required length is
///   [`CopulaFamily::parameter_count`] (ignored for independence).
///
/// Returns
/// -------
/// `CopulaResult<()>`
///   `Ok(())` when every parameter is finite and inside the family domain.
///
/// Errors
/// ------
/// - `CopulaError::ParameterCount`
///   The vector length does not match the family.
/// - `CopulaError::InvalidParameter`
///   A parameter is non-finite or outside the family domain; the first
///   offending index is reported.
pub fn validate_parameters(family: CopulaFamily, params: &[f64]) -> CopulaResult<()> {
    if family == CopulaFamily::Independence {
        return Ok(());
    }
    let expected = family.parameter_count();
    if params.len() != expected {
        return Err(CopulaError::ParameterCount { family, expected, actual: params.len() });
    }
    for (index, &value) in params.iter().enumerate() {
        if !value.is_finite() {
            return Err(CopulaError::InvalidParameter {
                family,
                index,
                value,
                reason: "Parameters must be finite.",
            });
        }
    }

    let invalid = |index: usize, reason: &'static str| CopulaError::InvalidParameter {
        family,
        index,
        value: params[index],
        reason,
    };

    match family {
        CopulaFamily::Independence => Ok(()),
        CopulaFamily::Gaussian => {
            if params[0].abs() < 1.0 {
                Ok(())
            } else {
                Err(invalid(0, "Correlation must lie in (-1, 1)."))
            }
        }
        CopulaFamily::StudentT => {
            if params[0].abs() >= 1.0 {
                Err(invalid(0, "Correlation must lie in (-1, 1)."))
            } else if params[1] <= 0.0 {
                Err(invalid(1, "Degrees of freedom must be > 0."))
            } else {
                Ok(())
            }
        }
        CopulaFamily::Clayton | CopulaFamily::SurvivalClayton | CopulaFamily::Plackett => {
            if params[0] > 0.0 { Ok(()) } else { Err(invalid(0, "theta must be > 0.")) }
        }
        CopulaFamily::Gumbel
        | CopulaFamily::SurvivalGumbel
        | CopulaFamily::Joe
        | CopulaFamily::SurvivalJoe => {
            if params[0] >= 1.0 { Ok(()) } else { Err(invalid(0, "theta must be >= 1.")) }
        }
        CopulaFamily::Frank => {
            if params[0] != 0.0 { Ok(()) } else { Err(invalid(0, "theta must be non-zero.")) }
        }
        CopulaFamily::Amh => {
            if (-1.0..1.0).contains(&params[0]) {
                Ok(())
            } else {
                Err(invalid(0, "theta must lie in [-1, 1)."))
            }
        }
        CopulaFamily::Fgm => {
            if (-1.0..=1.0).contains(&params[0]) {
                Ok(())
            } else {
                Err(invalid(0, "theta must lie in [-1, 1]."))
            }
        }
        CopulaFamily::Tawn => {
            if params[0] < 1.0 {
                return Err(invalid(0, "theta must be >= 1."));
            }
            for index in 1..3 {
                if params[index] <= 0.0 || params[index] > 1.0 {
                    return Err(invalid(index, "Asymmetry weights must lie in (0, 1]."));
                }
            }
            Ok(())
        }
    }
}

/// Ensure every entry of `values` is a finite number in the open interval
/// (0, 1).
///
/// Errors
/// ------
/// - `CopulaError::OutOfUnitInterval { row, value }` for the first offending
///   entry (`NaN` fails the check).
pub fn validate_unit_interval(values: ArrayView1<f64>) -> CopulaResult<()> {
    match values.iter().position(|&x| !(x > 0.0 && x < 1.0)) {
        Some(row) => Err(CopulaError::OutOfUnitInterval { row, value: values[row] }),
        None => Ok(()),
    }
}

/// Ensure paired arguments of a vectorized primitive have equal length.
pub fn validate_same_length(first: ArrayView1<f64>, second: ArrayView1<f64>) -> CopulaResult<()> {
    if first.len() != second.len() {
        return Err(CopulaError::LengthMismatch { first: first.len(), second: second.len() });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Parameter-count and domain checks, focusing on the boundaries that
    //   differ between families (open vs closed endpoints).
    // - The open unit-interval scan used by every primitive.
    //
    // They intentionally DO NOT cover:
    // - Formula correctness; see `copula::families`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Independence accepts any parameter vector.
    //
    // Given
    // -----
    // - An empty vector and a vector with a NaN.
    //
    // Expect
    // ------
    // - Both validate successfully.
    fn independence_accepts_any_parameters() {
        assert!(validate_parameters(CopulaFamily::Independence, &[]).is_ok());
        assert!(validate_parameters(CopulaFamily::Independence, &[f64::NAN, 3.0]).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // The Gaussian correlation must lie strictly inside (−1, 1).
    //
    // Given
    // -----
    // - ρ = 0.99 and ρ = 1.0.
    //
    // Expect
    // ------
    // - 0.99 passes; 1.0 fails with `InvalidParameter { index: 0 }`.
    fn gaussian_rejects_boundary_correlation() {
        assert!(validate_parameters(CopulaFamily::Gaussian, &[0.99]).is_ok());
        match validate_parameters(CopulaFamily::Gaussian, &[1.0]) {
            Err(CopulaError::InvalidParameter { index: 0, value, .. }) => assert_eq!(value, 1.0),
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // The t family checks both the length and the degrees of freedom.
    //
    // Given
    // -----
    // - `[0.5]` (too short) and `[0.5, 0.0]` (ν = 0).
    //
    // Expect
    // ------
    // - `ParameterCount { expected: 2, actual: 1 }` and
    //   `InvalidParameter { index: 1 }` respectively.
    fn student_t_checks_length_and_degrees_of_freedom() {
        match validate_parameters(CopulaFamily::StudentT, &[0.5]) {
            Err(CopulaError::ParameterCount { expected: 2, actual: 1, .. }) => (),
            other => panic!("expected ParameterCount, got {other:?}"),
        }
        match validate_parameters(CopulaFamily::StudentT, &[0.5, 0.0]) {
            Err(CopulaError::InvalidParameter { index: 1, .. }) => (),
            other => panic!("expected InvalidParameter at index 1, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Gumbel/Joe accept θ = 1 while Clayton rejects θ = 0.
    //
    // Given
    // -----
    // - Gumbel θ = 1, Joe θ = 0.5, Clayton θ = 0.
    //
    // Expect
    // ------
    // - Gumbel passes; Joe and Clayton fail.
    fn archimedean_domains_differ_at_boundaries() {
        assert!(validate_parameters(CopulaFamily::Gumbel, &[1.0]).is_ok());
        assert!(validate_parameters(CopulaFamily::SurvivalJoe, &[0.5]).is_err());
        assert!(validate_parameters(CopulaFamily::Clayton, &[0.0]).is_err());
    }

    #[test]
    // Purpose
    // -------
    // AMH is half-open while FGM is closed on [−1, 1].
    //
    // Given
    // -----
    // - AMH θ = 1 and θ = −1, FGM θ = 1.
    //
    // Expect
    // ------
    // - AMH 1 fails, AMH −1 passes, FGM 1 passes.
    fn amh_and_fgm_boundaries() {
        assert!(validate_parameters(CopulaFamily::Amh, &[1.0]).is_err());
        assert!(validate_parameters(CopulaFamily::Amh, &[-1.0]).is_ok());
        assert!(validate_parameters(CopulaFamily::Fgm, &[1.0]).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Tawn asymmetry weights must lie in (0, 1] and non-finite values fail.
    //
    // Given
    // -----
    // - `[2, 0, 0.5]`, `[2, 0.5, f64::INFINITY]`, `[2, 1, 1]`.
    //
    // Expect
    // ------
    // - Index 1 rejected, index 2 rejected, last accepted.
    fn tawn_checks_asymmetry_weights() {
        match validate_parameters(CopulaFamily::Tawn, &[2.0, 0.0, 0.5]) {
            Err(CopulaError::InvalidParameter { index: 1, .. }) => (),
            other => panic!("expected InvalidParameter at index 1, got {other:?}"),
        }
        match validate_parameters(CopulaFamily::Tawn, &[2.0, 0.5, f64::INFINITY]) {
            Err(CopulaError::InvalidParameter { index: 2, .. }) => (),
            other => panic!("expected InvalidParameter at index 2, got {other:?}"),
        }
        assert!(validate_parameters(CopulaFamily::Tawn, &[2.0, 1.0, 1.0]).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // The unit-interval scan reports the first offending row.
    //
    // Given
    // -----
    // - `[0.2, 0.0, 1.5]` and `[0.5, NaN]`.
    //
    // Expect
    // ------
    // - Row 1 (value 0.0) for the first; row 1 for the NaN case.
    fn unit_interval_scan_reports_first_offender() {
        match validate_unit_interval(array![0.2, 0.0, 1.5].view()) {
            Err(CopulaError::OutOfUnitInterval { row: 1, value }) => assert_eq!(value, 0.0),
            other => panic!("expected OutOfUnitInterval at row 1, got {other:?}"),
        }
        match validate_unit_interval(array![0.5, f64::NAN].view()) {
            Err(CopulaError::OutOfUnitInterval { row: 1, value }) => assert!(value.is_nan()),
            other => panic!("expected OutOfUnitInterval at row 1, got {other:?}"),
        }
        assert!(validate_unit_interval(array![0.1, 0.9].view()).is_ok());
    }
}
