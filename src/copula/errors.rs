//! copula::errors — error types for bivariate copula primitives.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used by the bivariate copula
//! layer: family-name parsing, parameter-domain validation, and argument
//! checks on the density / h-function primitives. The vine layer converts
//! these errors into [`VineError`](crate::vine::errors::VineError) values
//! enriched with grid coordinates or edge positions.
//!
//! Key behaviors
//! -------------
//! - Define [`CopulaResult`] and [`CopulaError`] as the canonical result and
//!   error types for everything under `copula`.
//! - Attach human-readable `Display` messages that embed the offending family,
//!   parameter value, or row index.
//! - Map errors into Python `ValueError`s when the `python-bindings` feature is
//!   enabled.
//!
//! Conventions
//! -----------
//! - Row indices in [`CopulaError::OutOfUnitInterval`] are 0-based and refer
//!   to positions inside the vectors passed to a single primitive call.
//! - Parameter indices refer to positions inside the family-specific
//!   parameter vector (e.g. `[ρ, ν]` for the t family).
//!
//! Testing notes
//! -------------
//! - Unit tests verify that each variant's message embeds its payload.
use crate::copula::family::CopulaFamily;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for copula-layer operations that may produce [`CopulaError`].
pub type CopulaResult<T> = Result<T, CopulaError>;

/// CopulaError — failures raised by the bivariate copula collaborator.
///
/// Variants
/// --------
/// - `UnknownFamily { name }`
///   A family tag could not be parsed into a [`CopulaFamily`].
/// - `ParameterCount { family, expected, actual }`
///   The parameter vector has the wrong length for `family`.
/// - `InvalidParameter { family, index, value, reason }`
///   Parameter `index` of `family` lies outside its admissible domain.
/// - `OutOfUnitInterval { row, value }`
///   A density / h-function argument is not a finite value in (0, 1).
/// - `LengthMismatch { first, second }`
///   The two argument vectors of a vectorized primitive differ in length.
/// - `DistributionSetup { name }`
///   A reference distribution (standard normal / Student t) could not be
///   constructed by `statrs`.
#[derive(Debug, Clone, PartialEq)]
pub enum CopulaError {
    // ---- Family / parameter validation ----
    UnknownFamily { name: String },
    ParameterCount { family: CopulaFamily, expected: usize, actual: usize },
    InvalidParameter { family: CopulaFamily, index: usize, value: f64, reason: &'static str },

    // ---- Argument domain ----
    OutOfUnitInterval { row: usize, value: f64 },
    LengthMismatch { first: usize, second: usize },

    // ---- statrs ----
    DistributionSetup { name: &'static str },
}

impl std::error::Error for CopulaError {}

impl std::fmt::Display for CopulaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CopulaError::UnknownFamily { name } => {
                write!(f, "Unknown copula family {name:?}.")
            }
            CopulaError::ParameterCount { family, expected, actual } => {
                write!(
                    f,
                    "Family '{family}' expects {expected} parameter(s), got {actual}."
                )
            }
            CopulaError::InvalidParameter { family, index, value, reason } => {
                write!(
                    f,
                    "Parameter {index} of family '{family}' is invalid: {value}. {reason}"
                )
            }
            CopulaError::OutOfUnitInterval { row, value } => {
                write!(f, "Argument at row {row} must lie in the open interval (0, 1); got {value}")
            }
            CopulaError::LengthMismatch { first, second } => {
                write!(f, "Argument lengths differ: {first} vs {second}")
            }
            CopulaError::DistributionSetup { name } => {
                write!(f, "Failed to construct the reference {name} distribution.")
            }
        }
    }
}

impl From<statrs::distribution::NormalError> for CopulaError {
    fn from(_: statrs::distribution::NormalError) -> CopulaError {
        CopulaError::DistributionSetup { name: "normal" }
    }
}

impl From<statrs::distribution::StudentsTError> for CopulaError {
    fn from(_: statrs::distribution::StudentsTError) -> CopulaError {
        CopulaError::DistributionSetup { name: "Student t" }
    }
}

#[cfg(feature = "python-bindings")]
impl From<CopulaError> for PyErr {
    fn from(err: CopulaError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
