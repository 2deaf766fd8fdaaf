//! vine — regular-vine copula density evaluation.
//!
//! Purpose
//! -------
//! Evaluate the joint density of pseudo-observations under a regular vine:
//! a nested sequence of trees whose edges are bivariate copulas conditioned
//! on subsets of the other variables. Given a structure array, per-edge
//! families and parameters, and a batch of rows, the layer returns one
//! density per row.
//!
//! Key behaviors
//! -------------
//! - Collect structural building blocks and the recursive engine in
//!   [`core`]: structure validation and canonicalization, the conditioning
//!   index, the validated pair-copula grid, transform tables, options, and
//!   [`core::evaluate`].
//! - Expose the model API in [`models`] via [`RVineCopula`] and the one-shot
//!   [`vine_density`].
//! - Centralize failures in [`errors`] ([`VineError`], [`VineErrorKind`],
//!   [`VineResult`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Validation is all-or-nothing and completes before any density work:
//!   structure, then grid shapes, then the populated region, then
//!   parameters. Observation-domain failures abort the whole batch.
//! - The structure check is limited to square shape, label range and
//!   distinct column prefixes, plus a computability guard on every edge's
//!   partner column. It does not prove that the array is a regular vine.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based throughout; structure labels are observation
//!   column indices.
//! - Column `j` of the structure array uses rows `0..=j`, with its
//!   designated variable on the diagonal. Edge `(i, k)` lives at grid cell
//!   `[i, k − i − 1]`.
//! - Output rows follow input rows, whatever column permutation or
//!   chunking is used internally.
//! - The layer emits `tracing` events (`debug` per model and batch, `trace`
//!   per edge) and installs no subscriber.
//!
//! Downstream usage
//! ----------------
//! - Typical flow:
//!   1. Build a structure array (or use [`core::VineStructure::d_vine`] /
//!      [`core::VineStructure::c_vine`]).
//!   2. Fill `(d−1)×(d−1)` family and parameter grids.
//!   3. Construct an [`RVineCopula`] with [`core::EvalOptions`].
//!   4. Call `density`, `log_density` or `log_likelihood` per batch.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`core`] cover each building block; [`models`] covers
//!   validation order and batching; integration tests exercise golden
//!   values, permutation invariance, independence closure and batch
//!   consistency through the public API.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{EdgeLabel, EvalOptions, VineStructure};
pub use self::errors::{VineError, VineErrorKind, VineResult};
pub use self::models::{RVineCopula, vine_density};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_vines::vine::prelude::*;
//
// to import the main vine surface in a single line.

pub mod prelude {
    pub use super::{
        EdgeLabel, EvalOptions, RVineCopula, VineError, VineErrorKind, VineResult, VineStructure,
        vine_density,
    };
    pub use crate::copula::{CopulaFamily, HDirection, PairCopula};
}
