//! vine::models — user-facing regular-vine copula models.
//!
//! Purpose
//! -------
//! Expose the orchestrator that validates a complete vine definition and
//! evaluates densities on batches of observations.
//!
//! Key behaviors
//! -------------
//! - [`RVineCopula`] validates structure, grids and parameters once and then
//!   evaluates `density`, `log_density` and `log_likelihood` on any number of
//!   batches, optionally splitting rows across the rayon pool.
//! - [`vine_density`] is a one-shot call with default options.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`rvine`] cover validation order and chunked evaluation;
//!   whole-vine numerical properties live in the crate's integration tests.

pub mod rvine;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::rvine::{RVineCopula, vine_density};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::rvine::{RVineCopula, vine_density};
}
