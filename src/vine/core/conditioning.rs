//! vine::core::conditioning — partner lookup for every vine edge.
//!
//! For edge `(i, k)` of a canonical structure `A′`, the conditioning index is
//! `M[i, k] = max(A′[0..=i, k])`. Column `M[i, k]` at level `i` holds the
//! transform of the edge's partner variable: its forward table when
//! `M[i, k] == A′[i, k]`, its backward table otherwise.
//!
//! Only a computability guard is enforced here: `M[i, k] < k`, so the partner
//! column is always finished before column `k` starts.
use crate::vine::{
    core::structure::CanonicalStructure,
    errors::{VineError, VineResult},
};
use ndarray::Array2;

/// Which transform table holds the partner value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartnerSide {
    Forward,
    Backward,
}

/// Partner of one edge: the column to read at the edge's level and the
/// table to read it from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Partner {
    pub column: usize,
    pub side: PartnerSide,
}

/// ConditioningIndex — `M` and the derived partner of every edge, stored in
/// flat `d×d` arrays populated on the strict upper triangle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditioningIndex {
    max_label: Array2<usize>,
    partners: Array2<Option<Partner>>,
}

impl ConditioningIndex {
    /// Build the index for a canonical structure.
    ///
    /// Errors
    /// ------
    /// - `VineError::UnresolvedPartner` for the first edge (in evaluation
    ///   order) whose partner column is not strictly left of its own column.
    pub fn build(structure: &CanonicalStructure) -> VineResult<Self> {
        let dim = structure.dim();
        let a = structure.matrix();
        let mut max_label = Array2::<usize>::zeros((dim, dim));
        let mut partners = Array2::<Option<Partner>>::from_elem((dim, dim), None);

        for column in 1..dim {
            let mut running = 0;
            for tree in 0..column {
                running = running.max(a[[tree, column]]);
                if running >= column {
                    return Err(VineError::UnresolvedPartner { tree, column, partner: running });
                }
                let side = if running == a[[tree, column]] {
                    PartnerSide::Forward
                } else {
                    PartnerSide::Backward
                };
                max_label[[tree, column]] = running;
                partners[[tree, column]] = Some(Partner { column: running, side });
            }
        }
        Ok(ConditioningIndex { max_label, partners })
    }

    pub fn dim(&self) -> usize {
        self.partners.nrows()
    }

    /// `M[tree, column]`, or `None` outside the edge set.
    pub fn max_label(&self, tree: usize, column: usize) -> Option<usize> {
        self.partner(tree, column).map(|_| self.max_label[[tree, column]])
    }

    /// Partner of edge `(tree, column)`, or `None` outside the edge set.
    pub fn partner(&self, tree: usize, column: usize) -> Option<Partner> {
        self.partners.get((tree, column)).copied().flatten()
    }
}
