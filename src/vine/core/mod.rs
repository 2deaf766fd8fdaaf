//! vine::core — structural building blocks and the recursive engine.
//!
//! Purpose
//! -------
//! Provide everything needed to turn a structure array, two edge grids and
//! an observation matrix into densities: structure validation and
//! canonicalization, the conditioning index, the validated pair-copula grid,
//! the transform tables, evaluation options, shape checks, and the engine
//! that ties them together.
//!
//! Key behaviors
//! -------------
//! - [`structure`]: [`VineStructure`] / [`CanonicalStructure`], D-vine and
//!   C-vine constructors, and edge labels.
//! - [`conditioning`]: [`ConditioningIndex`] and the partner of every edge.
//! - [`grid`]: [`PairCopulaGrid`] built from family and parameter grids.
//! - [`tables`]: [`TransformTable`], flat forward / backward storage.
//! - [`options`]: [`EvalOptions`].
//! - [`validation`]: observation and grid shape checks.
//! - [`engine`]: [`evaluate`], the level-by-level recursion.
//!
//! Invariants & assumptions
//! ------------------------
//! - All tables are call-scoped; nothing here holds shared mutable state.
//! - Indexing is 0-based throughout.

pub mod conditioning;
pub mod engine;
pub mod grid;
pub mod options;
pub mod structure;
pub mod tables;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::conditioning::{ConditioningIndex, Partner, PartnerSide};
pub use self::engine::evaluate;
pub use self::grid::PairCopulaGrid;
pub use self::options::EvalOptions;
pub use self::structure::{CanonicalStructure, EdgeLabel, VineStructure, validate_structure};
pub use self::tables::TransformTable;
pub use self::validation::{validate_grid_shapes, validate_observations};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_vines::vine::core::prelude::*;
//
// to import the main structural surface in a single line.

pub mod prelude {
    pub use super::conditioning::ConditioningIndex;
    pub use super::grid::PairCopulaGrid;
    pub use super::options::EvalOptions;
    pub use super::structure::{CanonicalStructure, EdgeLabel, VineStructure};
}
