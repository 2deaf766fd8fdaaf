//! vine::core::structure — structure-array validation and canonicalization.
//!
//! Purpose
//! -------
//! Represent the regular-vine structure array, enforce the column-prefix
//! checks it must satisfy, and relabel it into the canonical form consumed
//! by the recursive engine.
//!
//! Key behaviors
//! -------------
//! - [`validate_structure`] checks that the array is square and non-empty,
//!   that every used entry names an observation column, and that the used
//!   prefix of each column holds pairwise-distinct labels.
//! - [`VineStructure::canonicalize`] relabels the array so that diagonal
//!   entry `j` becomes label `j`, returning a [`CanonicalStructure`] together
//!   with the permutation to apply to observation columns.
//! - [`CanonicalStructure::permute_columns`] applies that permutation to an
//!   observation matrix as a separate, explicit step.
//! - [`VineStructure::d_vine`] / [`VineStructure::c_vine`] build the two
//!   classical sub-classes from a variable order.
//!
//! Invariants & assumptions
//! ------------------------
//! - Column `j` uses rows `0..=j`; the designated entry is the diagonal
//!   `A[j, j]` and entries below the diagonal are ignored.
//! - Edge `(i, k)` with `i < k` pairs `A[i, k]` with `A[k, k]`, conditioned on
//!   `A[0..i, k]`.
//! - The distinct-prefix check is not a proof of vine feasibility. Arrays
//!   that pass it but describe no regular vine are caught later only when
//!   an edge needs a column that is not computed before it.
//!
//! Conventions
//! -----------
//! - Labels are 0-based observation-column indices.
//! - `permutation[j]` is the original label on diagonal `j`; permuted
//!   observation column `j` is original column `permutation[j]`.
use crate::vine::errors::{VineError, VineResult};
use ndarray::{Array2, ArrayView2, Axis};

/// Validate a structure array without relabeling it.
///
/// Errors
/// ------
/// - `VineError::EmptyStructure` for a 0×0 array.
/// - `VineError::NonSquareStructure` when the array is not square.
/// - `VineError::LabelOutOfRange` for a used entry `≥ d`.
/// - `VineError::RepeatedLabel` for the first column whose prefix
///   `A[0..=j, j]` repeats a label.
pub fn validate_structure(matrix: ArrayView2<usize>) -> VineResult<()> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(VineError::NonSquareStructure { rows, cols });
    }
    if rows == 0 {
        return Err(VineError::EmptyStructure);
    }
    let dim = rows;
    let mut seen = vec![false; dim];
    for column in 0..dim {
        seen.iter_mut().for_each(|s| *s = false);
        for row in 0..=column {
            let label = matrix[[row, column]];
            if label >= dim {
                return Err(VineError::LabelOutOfRange { row, column, label, dim });
            }
            if seen[label] {
                return Err(VineError::RepeatedLabel { column, label });
            }
            seen[label] = true;
        }
    }
    Ok(())
}

/// VineStructure — a validated (not yet canonical) structure array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VineStructure {
    matrix: Array2<usize>,
}

impl VineStructure {
    /// Validate and wrap a structure array.
    ///
    /// Errors
    /// ------
    /// Propagates [`validate_structure`].
    pub fn new(matrix: Array2<usize>) -> VineResult<Self> {
        validate_structure(matrix.view())?;
        Ok(VineStructure { matrix })
    }

    /// D-vine (path) structure visiting variables in `order`.
    ///
    /// Tree 1 joins consecutive variables of `order`; tree `t` joins
    /// variables `t` apart, conditioned on those in between.
    pub fn d_vine(order: &[usize]) -> VineResult<Self> {
        let dim = order.len();
        let matrix = Array2::from_shape_fn((dim, dim), |(i, j)| match i.cmp(&j) {
            std::cmp::Ordering::Less => order[j - 1 - i],
            std::cmp::Ordering::Equal => order[j],
            std::cmp::Ordering::Greater => 0,
        });
        VineStructure::new(matrix)
    }

    /// C-vine (star) structure with roots taken in `order`.
    ///
    /// Tree `t` links root `order[t-1]` to every later variable, conditioned
    /// on the earlier roots.
    pub fn c_vine(order: &[usize]) -> VineResult<Self> {
        let dim = order.len();
        let matrix = Array2::from_shape_fn((dim, dim), |(i, j)| match i.cmp(&j) {
            std::cmp::Ordering::Less => order[i],
            std::cmp::Ordering::Equal => order[j],
            std::cmp::Ordering::Greater => 0,
        });
        VineStructure::new(matrix)
    }

    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn matrix(&self) -> ArrayView2<'_, usize> {
        self.matrix.view()
    }

    /// Relabel into canonical form.
    ///
    /// Returns
    /// -------
    /// [`CanonicalStructure`]
    ///   Array `A′` with `A′[i, j] = inv[A[i, j]]` where `inv` inverts the
    ///   diagonal permutation, so that `A′[j, j] = j`; entries below the
    ///   diagonal are zeroed.
    ///
    /// Errors
    /// ------
    /// - `VineError::DiagonalNotPermutation` when a label repeats on the
    ///   diagonal (the first repeated column is reported).
    pub fn canonicalize(&self) -> VineResult<CanonicalStructure> {
        let dim = self.dim();
        let permutation: Vec<usize> = self.matrix.diag().to_vec();
        let mut inverse = vec![usize::MAX; dim];
        for (column, &label) in permutation.iter().enumerate() {
            if inverse[label] != usize::MAX {
                return Err(VineError::DiagonalNotPermutation { column, label });
            }
            inverse[label] = column;
        }
        let matrix = Array2::from_shape_fn((dim, dim), |(i, j)| {
            if i <= j { inverse[self.matrix[[i, j]]] } else { 0 }
        });
        Ok(CanonicalStructure { matrix, permutation })
    }
}

/// CanonicalStructure — relabeled structure array plus the column
/// permutation that maps it back to the original variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalStructure {
    matrix: Array2<usize>,
    permutation: Vec<usize>,
}

impl CanonicalStructure {
    pub fn dim(&self) -> usize {
        self.permutation.len()
    }

    pub fn matrix(&self) -> ArrayView2<'_, usize> {
        self.matrix.view()
    }

    /// `permutation[j]` is the original label of canonical variable `j`.
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// Reorder observation columns so that column `j` holds canonical
    /// variable `j`.
    ///
    /// Errors
    /// ------
    /// - `VineError::DimensionMismatch` when `data` does not have `dim`
    ///   columns.
    pub fn permute_columns(&self, data: ArrayView2<f64>) -> VineResult<Array2<f64>> {
        if data.ncols() != self.dim() {
            return Err(VineError::DimensionMismatch {
                what: "observation columns",
                expected: self.dim(),
                actual: data.ncols(),
            });
        }
        Ok(data.select(Axis(1), &self.permutation))
    }

    /// Edges `(tree, column)` in evaluation order: column ascending, tree
    /// ascending within a column.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (1..self.dim()).flat_map(|column| (0..column).map(move |tree| (tree, column)))
    }

    /// Number of pair-copula edges, `d(d−1)/2`.
    pub fn edge_count(&self) -> usize {
        let dim = self.dim();
        dim * dim.saturating_sub(1) / 2
    }

    /// Label of edge `(tree, column)` in original variable labels, or `None`
    /// outside the edge set.
    pub fn edge_label(&self, tree: usize, column: usize) -> Option<EdgeLabel> {
        if tree >= column || column >= self.dim() {
            return None;
        }
        let original = |label: usize| self.permutation[label];
        Some(EdgeLabel {
            tree,
            column,
            conditioned: (original(self.matrix[[tree, column]]), original(column)),
            conditioning: (0..tree).map(|row| original(self.matrix[[row, column]])).collect(),
        })
    }

    /// Labels of every edge, in evaluation order.
    pub fn edge_labels(&self) -> Vec<EdgeLabel> {
        self.edges().filter_map(|(tree, column)| self.edge_label(tree, column)).collect()
    }
}

/// Human-readable identity of one vine edge, rendered as `a,b|c,d`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeLabel {
    /// 0-based tree level (the size of the conditioning set).
    pub tree: usize,
    /// Column of the structure array that owns the edge.
    pub column: usize,
    /// Conditioned pair `(partner, designated)` in original labels.
    pub conditioned: (usize, usize),
    /// Conditioning set in original labels, in structure-array row order.
    pub conditioning: Vec<usize>,
}

impl std::fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.conditioned.0, self.conditioned.1)?;
        if !self.conditioning.is_empty() {
            let joined: Vec<String> = self.conditioning.iter().map(|l| l.to_string()).collect();
            write!(f, "|{}", joined.join(","))?;
        }
        Ok(())
    }
}
