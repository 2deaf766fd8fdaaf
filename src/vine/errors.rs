//! Errors for vine density evaluation (structure, shape, parameter, domain,
//! and option failures).
//!
//! This module defines [`VineError`], the single error type surfaced by the
//! vine layer, and [`VineErrorKind`], a coarse classifier that mirrors the
//! five failure categories callers branch on. Both implement
//! `Display`/`Error`; `VineError` converts to `PyErr` for PyO3.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy).
//! - Structure positions are `(row, column)` inside the structure array.
//! - Grid positions are `(row, col)` inside the family / parameter grids,
//!   where edge `(tree, column)` lives at `(tree, column - tree - 1)`.
//! - Domain errors report the **absolute** row of the observation matrix
//!   being evaluated, even when the batch was split into parallel chunks.
use crate::copula::{errors::CopulaError, family::CopulaFamily};

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Crate-wide result alias for vine operations that may produce [`VineError`].
pub type VineResult<T> = Result<T, VineError>;

/// Coarse failure category of a [`VineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VineErrorKind {
    /// The structure array is malformed or cannot be evaluated.
    Structure,
    /// Dimensions disagree, or the grids do not cover exactly the edge set.
    Shape,
    /// A family / parameter pair fails its domain predicate.
    Parameter,
    /// A density or h-function argument fell outside (0, 1).
    Domain,
    /// Evaluation options are invalid.
    Options,
}

/// Unified error type for vine density evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum VineError {
    // ---- Structure ----
    /// Structure array has zero rows and columns.
    EmptyStructure,

    /// Structure array is not square.
    NonSquareStructure { rows: usize, cols: usize },

    /// A label appears twice in the used prefix of a column.
    RepeatedLabel { column: usize, label: usize },

    /// A label does not name an observation column.
    LabelOutOfRange { row: usize, column: usize, label: usize, dim: usize },

    /// The diagonal is not a permutation of `0..d`.
    DiagonalNotPermutation { column: usize, label: usize },

    /// The conditioning partner of an edge is not computed before the edge.
    UnresolvedPartner { tree: usize, column: usize, partner: usize },

    // ---- Shape ----
    /// Two inputs disagree on a dimension.
    DimensionMismatch { what: &'static str, expected: usize, actual: usize },

    /// An active grid cell carries no family.
    MissingEdge { row: usize, col: usize },

    /// An inactive grid cell carries a family or parameters.
    UnexpectedEdge { row: usize, col: usize },

    // ---- Parameter ----
    /// A grid cell fails its family's parameter predicate.
    InvalidParameter { row: usize, col: usize, family: CopulaFamily, reason: String },

    // ---- Domain ----
    /// A primitive received an argument outside (0, 1) while evaluating edge
    /// `(tree, column)`.
    DomainViolation { tree: usize, column: usize, row: usize, value: f64 },

    // ---- Options ----
    /// An evaluation option is out of range.
    InvalidOptions { field: &'static str, value: f64, reason: &'static str },
}

impl VineError {
    /// Failure category of this error.
    pub fn kind(&self) -> VineErrorKind {
        match self {
            VineError::EmptyStructure
            | VineError::NonSquareStructure { .. }
            | VineError::RepeatedLabel { .. }
            | VineError::LabelOutOfRange { .. }
            | VineError::DiagonalNotPermutation { .. }
            | VineError::UnresolvedPartner { .. } => VineErrorKind::Structure,
            VineError::DimensionMismatch { .. }
            | VineError::MissingEdge { .. }
            | VineError::UnexpectedEdge { .. } => VineErrorKind::Shape,
            VineError::InvalidParameter { .. } => VineErrorKind::Parameter,
            VineError::DomainViolation { .. } => VineErrorKind::Domain,
            VineError::InvalidOptions { .. } => VineErrorKind::Options,
        }
    }

    /// Attach a grid coordinate to a parameter-construction failure.
    pub(crate) fn at_grid_cell(err: CopulaError, row: usize, col: usize, family: CopulaFamily) -> Self {
        VineError::InvalidParameter { row, col, family, reason: err.to_string() }
    }

    /// Attach an edge position to a failure raised while evaluating it.
    ///
    /// Argument-domain failures become [`VineError::DomainViolation`]; a
    /// length mismatch can only mean the tables were built for another batch
    /// and is reported as a shape error.
    pub(crate) fn at_edge(err: CopulaError, tree: usize, column: usize, family: CopulaFamily) -> Self {
        match err {
            CopulaError::OutOfUnitInterval { row, value } => {
                VineError::DomainViolation { tree, column, row, value }
            }
            CopulaError::LengthMismatch { first, second } => {
                VineError::DimensionMismatch { what: "edge arguments", expected: first, actual: second }
            }
            other => VineError::at_grid_cell(other, tree, column - tree - 1, family),
        }
    }

    /// Shift the row of a domain error by `offset` (rows of earlier chunks).
    pub(crate) fn offset_rows(self, offset: usize) -> Self {
        match self {
            VineError::DomainViolation { tree, column, row, value } => {
                VineError::DomainViolation { tree, column, row: row + offset, value }
            }
            other => other,
        }
    }
}

impl std::error::Error for VineError {}

impl std::fmt::Display for VineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Structure ----
            VineError::EmptyStructure => {
                write!(f, "Structure array is empty.")
            }
            VineError::NonSquareStructure { rows, cols } => {
                write!(f, "Structure array must be square; got {rows}x{cols}.")
            }
            VineError::RepeatedLabel { column, label } => {
                write!(f, "Column {column} of the structure array repeats label {label}.")
            }
            VineError::LabelOutOfRange { row, column, label, dim } => {
                write!(
                    f,
                    "Structure label {label} at ({row}, {column}) is out of range for dimension {dim}."
                )
            }
            VineError::DiagonalNotPermutation { column, label } => {
                write!(
                    f,
                    "Structure diagonal is not a permutation: label {label} repeats at column {column}."
                )
            }
            VineError::UnresolvedPartner { tree, column, partner } => {
                write!(
                    f,
                    "Edge (tree {tree}, column {column}) needs column {partner}, which is not computed before it."
                )
            }
            // ---- Shape ----
            VineError::DimensionMismatch { what, expected, actual } => {
                write!(f, "Dimension mismatch for {what}: expected {expected}, got {actual}")
            }
            VineError::MissingEdge { row, col } => {
                write!(f, "Grid cell ({row}, {col}) is an active edge but has no family.")
            }
            VineError::UnexpectedEdge { row, col } => {
                write!(f, "Grid cell ({row}, {col}) is outside the edge set but is populated.")
            }
            // ---- Parameter ----
            VineError::InvalidParameter { row, col, family, reason } => {
                write!(f, "Invalid parameters for family '{family}' at grid cell ({row}, {col}): {reason}")
            }
            // ---- Domain ----
            VineError::DomainViolation { tree, column, row, value } => {
                write!(
                    f,
                    "Edge (tree {tree}, column {column}) received {value} at row {row}; arguments must lie in (0, 1)."
                )
            }
            // ---- Options ----
            VineError::InvalidOptions { field, value, reason } => {
                write!(f, "Invalid option {field} = {value}: {reason}")
            }
        }
    }
}

/// Convert a [`VineError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<VineError> for PyErr {
    fn from(err: VineError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
