//! vine::core::grid — validated pair-copula assignments per edge.
//!
//! Purpose
//! -------
//! Combine the family grid and the parameter grid into one
//! [`PairCopulaGrid`] holding a validated [`PairCopula`] for exactly the
//! edges the engine will evaluate.
//!
//! Key behaviors
//! -------------
//! - Both grids are `(d−1)×(d−1)`; edge `(tree, column)` lives at cell
//!   `[tree, column − tree − 1]` and the active region is
//!   `row + col ≤ d − 2`.
//! - Validation is two-pass and all-or-nothing: first the populated region
//!   must match the active region exactly, then every active cell's
//!   parameters are checked against its family.
//!
//! Invariants & assumptions
//! ------------------------
//! - Grid shapes are checked first (see `vine::core::validation`).
//! - A constructed grid yields `Some` from [`PairCopulaGrid::edge`] for
//!   every engine edge and `None` for everything else.
use crate::{
    copula::{family::CopulaFamily, pair::PairCopula},
    vine::{
        core::validation::validate_grid_shapes,
        errors::{VineError, VineResult},
    },
};
use ndarray::{Array2, ArrayView2};

/// Whether grid cell `(row, col)` belongs to an edge of a `dim`-variable vine.
pub fn is_active_cell(row: usize, col: usize, dim: usize) -> bool {
    dim >= 2 && row + col <= dim - 2
}

/// PairCopulaGrid — validated pair copula of every vine edge.
#[derive(Debug, Clone, PartialEq)]
pub struct PairCopulaGrid {
    dim: usize,
    cells: Array2<Option<PairCopula>>,
}

impl PairCopulaGrid {
    /// Validate the family and parameter grids of a `dim`-variable vine.
    ///
    /// Parameters
    /// ----------
    /// - `families`: `ArrayView2<Option<CopulaFamily>>`
    ///   `(dim−1)×(dim−1)` family grid; `None` marks an empty cell.
    /// - `params`: `ArrayView2<Vec<f64>>`
    ///   `(dim−1)×(dim−1)` parameter grid; empty vectors mark empty cells.
    /// - `dim`: `usize`
    ///   Number of variables.
    ///
    /// Errors
    /// ------
    /// - `VineError::MissingEdge` for the first active cell without a family.
    /// - `VineError::UnexpectedEdge` for the first inactive cell carrying a
    ///   family or parameters.
    /// - `VineError::InvalidParameter` for the first active cell whose
    ///   parameters fail the family predicate, with its grid coordinate.
    ///
    /// Cells are scanned in row-major order within each pass.
    pub fn from_parts(
        families: ArrayView2<Option<CopulaFamily>>, params: ArrayView2<Vec<f64>>, dim: usize,
    ) -> VineResult<Self> {
        validate_grid_shapes(families, params, dim)?;
        for ((row, col), family) in families.indexed_iter() {
            let active = is_active_cell(row, col, dim);
            if active && family.is_none() {
                return Err(VineError::MissingEdge { row, col });
            }
            if !active && (family.is_some() || !params[[row, col]].is_empty()) {
                return Err(VineError::UnexpectedEdge { row, col });
            }
        }

        let mut cells = Array2::<Option<PairCopula>>::from_elem(families.dim(), None);
        for ((row, col), family) in families.indexed_iter() {
            if let Some(family) = *family {
                let pair = PairCopula::new(family, &params[[row, col]])
                    .map_err(|err| VineError::at_grid_cell(err, row, col, family))?;
                cells[[row, col]] = Some(pair);
            }
        }

        Ok(PairCopulaGrid { dim, cells })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Pair copula of edge `(tree, column)`, or `None` outside the edge set.
    pub fn edge(&self, tree: usize, column: usize) -> Option<&PairCopula> {
        if tree >= column || column >= self.dim {
            return None;
        }
        self.cells.get((tree, column - tree - 1)).and_then(Option::as_ref)
    }

    /// Pair copula stored at grid cell `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> Option<&PairCopula> {
        self.cells.get((row, col)).and_then(Option::as_ref)
    }

    /// Number of populated cells.
    pub fn edge_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
