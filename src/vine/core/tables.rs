//! vine::core::tables — forward / backward transform storage.
//!
//! A [`TransformTable`] holds one length-`n` vector per `(level, column)`
//! cell of a `d×d` grid, backed by a single `(d, d, n)` array. Only the
//! triangle `level ≤ column` is ever populated: level 0 holds the permuted
//! observation columns and level `i + 1` of column `k` holds the transform
//! produced by edge `(i, k)`.
//!
//! Accessors are bounds-checked and refuse to read cells that were never
//! written, so a wiring mistake surfaces as `None` rather than as stale
//! values.
use ndarray::{Array2, Array3, ArrayView1, ArrayView2, ArrayViewMut1, s};

#[derive(Debug, Clone, PartialEq)]
pub struct TransformTable {
    values: Array3<f64>,
    filled: Array2<bool>,
}

impl TransformTable {
    /// Empty table for `dim` variables and `rows` observations.
    pub fn new(dim: usize, rows: usize) -> Self {
        TransformTable {
            values: Array3::zeros((dim, dim, rows)),
            filled: Array2::from_elem((dim, dim), false),
        }
    }

    /// Table whose level 0 holds the columns of `data` (`rows × dim`).
    pub fn from_observations(data: ArrayView2<f64>) -> Self {
        let (rows, dim) = data.dim();
        let mut table = TransformTable::new(dim, rows);
        if dim > 0 {
            table.values.slice_mut(s![0, .., ..]).assign(&data.t());
            table.filled.row_mut(0).fill(true);
        }
        table
    }

    pub fn dim(&self) -> usize {
        self.filled.nrows()
    }

    pub fn rows(&self) -> usize {
        self.values.len_of(ndarray::Axis(2))
    }

    /// Whether `(level, column)` lies in the storable triangle.
    pub fn in_region(&self, level: usize, column: usize) -> bool {
        column < self.dim() && level <= column
    }

    /// Values of a populated cell.
    pub fn get(&self, level: usize, column: usize) -> Option<ArrayView1<'_, f64>> {
        if !self.in_region(level, column) || !self.filled[[level, column]] {
            return None;
        }
        Some(self.values.slice(s![level, column, ..]))
    }

    /// Mutable access to a cell inside the triangle; the cell counts as
    /// populated from then on.
    pub fn cell_mut(&mut self, level: usize, column: usize) -> Option<ArrayViewMut1<'_, f64>> {
        if !self.in_region(level, column) {
            return None;
        }
        self.filled[[level, column]] = true;
        Some(self.values.slice_mut(s![level, column, ..]))
    }
}
