//! Regular-vine copula model: validated configuration and batch evaluation.
//!
//! [`RVineCopula`] owns everything that does not depend on the observations
//! (canonical structure, conditioning index, validated pair-copula grid and
//! options), so a model is validated once and can evaluate many batches.
//!
//! Key ideas:
//! - Construction is all-or-nothing and ordered: structure, then grid
//!   shapes, then the populated region, then parameters. A malformed
//!   structure therefore fails even when no observations are ever passed.
//! - Each batch is permuted into canonical column order once, then split
//!   into contiguous row chunks that run on the rayon pool when the batch is
//!   large enough. Rows are independent, so chunking never changes results.
//! - The first failing chunk (lowest rows) decides the reported error, and
//!   its row index is re-based onto the full batch.
use crate::{
    copula::{family::CopulaFamily, pair::PairCopula},
    vine::{
        core::{
            conditioning::ConditioningIndex,
            engine::evaluate,
            grid::PairCopulaGrid,
            options::EvalOptions,
            structure::{CanonicalStructure, EdgeLabel, VineStructure},
            validation::validate_observations,
        },
        errors::VineResult,
    },
};
use ndarray::{Array1, Array2, ArrayView2, s};
use rayon::prelude::*;
use tracing::debug;

/// Regular-vine copula with fixed structure and parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RVineCopula {
    structure: CanonicalStructure,
    index: ConditioningIndex,
    grid: PairCopulaGrid,
    options: EvalOptions,
}

impl RVineCopula {
    /// Validate a vine definition.
    ///
    /// # Arguments
    /// - `structure`: `d×d` structure array (0-based labels, diagonal = the
    ///   designated variable of each column).
    /// - `families`: `(d−1)×(d−1)` family grid; `None` marks an empty cell.
    /// - `params`: `(d−1)×(d−1)` parameter grid; empty vectors mark empty
    ///   cells.
    /// - `options`: evaluation options.
    ///
    /// # Errors
    /// The first failure in this order: structure errors, grid shape
    /// mismatches, missing / unexpected edges, invalid parameters.
    pub fn new(
        structure: ArrayView2<usize>, families: ArrayView2<Option<CopulaFamily>>,
        params: ArrayView2<Vec<f64>>, options: EvalOptions,
    ) -> VineResult<Self> {
        let structure = VineStructure::new(structure.to_owned())?;
        RVineCopula::from_structure(&structure, families, params, options)
    }

    /// Same as [`RVineCopula::new`] for an already validated structure (for
    /// example one built by [`VineStructure::d_vine`]).
    pub fn from_structure(
        structure: &VineStructure, families: ArrayView2<Option<CopulaFamily>>,
        params: ArrayView2<Vec<f64>>, options: EvalOptions,
    ) -> VineResult<Self> {
        let canonical = structure.canonicalize()?;
        let index = ConditioningIndex::build(&canonical)?;
        let grid = PairCopulaGrid::from_parts(families, params, canonical.dim())?;
        debug!(
            dim = canonical.dim(),
            edges = grid.edge_count(),
            parallel = options.parallel(),
            "validated vine copula"
        );
        Ok(RVineCopula { structure: canonical, index, grid, options })
    }

    /// Density of every row of `data`.
    ///
    /// # Arguments
    /// - `data`: `n × d` pseudo-observations in original column order.
    ///
    /// # Returns
    /// One non-negative density per row, in row order. Zero rows yield an
    /// empty vector; `d = 1` yields ones.
    ///
    /// # Errors
    /// - `VineError::DimensionMismatch` when `data` does not have `d`
    ///   columns.
    /// - `VineError::DomainViolation` when an edge receives an argument
    ///   outside (0, 1); `row` indexes `data`.
    pub fn density(&self, data: ArrayView2<f64>) -> VineResult<Array1<f64>> {
        validate_observations(data, self.dim())?;
        let permuted = self.structure.permute_columns(data)?;
        let rows = permuted.nrows();
        let chunk = self.options.min_rows_per_task();

        // Stay sequential on rayon workers to avoid nested parallelism.
        let can_par = self.options.parallel()
            && rows >= 2 * chunk
            && rayon::current_thread_index().is_none()
            && rayon::current_num_threads() > 1;
        debug!(rows, dim = self.dim(), parallel = can_par, "evaluating vine density");

        if !can_par {
            return self.evaluate_rows(&permuted, 0, rows);
        }

        let starts: Vec<usize> = (0..rows).step_by(chunk).collect();
        let pieces: Vec<VineResult<Array1<f64>>> = starts
            .par_iter()
            .map(|&start| self.evaluate_rows(&permuted, start, (start + chunk).min(rows)))
            .collect();

        let mut out = Vec::with_capacity(rows);
        for piece in pieces {
            out.extend(piece?);
        }
        Ok(Array1::from(out))
    }

    /// Natural log of [`RVineCopula::density`] per row.
    pub fn log_density(&self, data: ArrayView2<f64>) -> VineResult<Array1<f64>> {
        Ok(self.density(data)?.mapv_into(f64::ln))
    }

    /// Sum of log densities over all rows (`0.0` for an empty batch).
    pub fn log_likelihood(&self, data: ArrayView2<f64>) -> VineResult<f64> {
        Ok(self.log_density(data)?.sum())
    }

    pub fn dim(&self) -> usize {
        self.structure.dim()
    }

    /// Canonical structure used by the engine.
    pub fn structure(&self) -> &CanonicalStructure {
        &self.structure
    }

    /// `permutation()[j]` is the original column evaluated as canonical
    /// variable `j`.
    pub fn permutation(&self) -> &[usize] {
        self.structure.permutation()
    }

    pub fn options(&self) -> &EvalOptions {
        &self.options
    }

    /// Pair copula of edge `(tree, column)`.
    pub fn edge(&self, tree: usize, column: usize) -> Option<&PairCopula> {
        self.grid.edge(tree, column)
    }

    /// Every edge label with its pair copula, in evaluation order.
    pub fn edges(&self) -> Vec<(EdgeLabel, PairCopula)> {
        self.structure
            .edge_labels()
            .into_iter()
            .filter_map(|label| self.grid.edge(label.tree, label.column).map(|p| (label, *p)))
            .collect()
    }

    fn evaluate_rows(&self, permuted: &Array2<f64>, start: usize, end: usize) -> VineResult<Array1<f64>> {
        let rows = permuted.slice(s![start..end, ..]);
        evaluate(rows, &self.index, &self.grid, self.options.transform_floor())
            .map_err(|err| err.offset_rows(start))
    }
}

/// One-shot evaluation with default options.
///
/// Validates the full vine definition before touching `data`, so a malformed
/// structure fails even for an empty batch.
pub fn vine_density(
    data: ArrayView2<f64>, structure: ArrayView2<usize>,
    families: ArrayView2<Option<CopulaFamily>>, params: ArrayView2<Vec<f64>>,
) -> VineResult<Array1<f64>> {
    RVineCopula::new(structure, families, params, EvalOptions::default())?.density(data)
}
