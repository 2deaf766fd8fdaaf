//! Recursive pseudo-observation engine for regular-vine densities.
//!
//! Walks the edges of a canonical structure level by level, multiplying a
//! per-row density accumulator by each edge's pair-copula density and
//! producing the two conditional transforms the next levels need.
//!
//! ## Recursion
//! For `k = 1..d` and, within `k`, `i = 0..k`:
//! 1. `z1 = F[i, k]` (forward table).
//! 2. `z2 = F[i, m]` or `B[i, m]` with `m = M[i, k]`, per the partner side.
//! 3. `density *= c(z2, z1)`.
//! 4. `F[i+1, k] = ∂C/∂u1 (z2, z1)`, the transform of the column's own
//!    variable given the partner.
//! 5. `B[i+1, k] = ∂C/∂u2 (z2, z1)`, the transform of the partner given the
//!    column's own variable.
//!
//! Level 0 of both tables holds the permuted observation columns. Every
//! dependency of row `i + 1` sits at row `i` of a column `≤ k`, so the order
//! above never reads an unwritten cell.
//!
//! ## Numerical guards
//! Transforms are clamped to `[floor, 1 − floor]` before they are stored.
//! Observations themselves are not clamped; an argument outside (0, 1)
//! fails the edge that reads it.
use crate::{
    copula::pair::HDirection,
    vine::{
        core::{
            conditioning::{ConditioningIndex, PartnerSide},
            grid::PairCopulaGrid,
            tables::TransformTable,
        },
        errors::{VineError, VineResult},
    },
};
use ndarray::{Array1, ArrayView2};
use tracing::trace;

/// Evaluate the vine density of every row of `data`.
///
/// Parameters
/// ----------
/// - `data`: `ArrayView2<f64>`
///   `n × d` observations, already permuted into canonical column order.
/// - `index`: [`ConditioningIndex`]
///   Partner lookup built from the same canonical structure.
/// - `grid`: [`PairCopulaGrid`]
///   Validated pair copula of every edge.
/// - `floor`: `f64`
///   Clamp applied to stored transforms.
///
/// Returns
/// -------
/// `VineResult<Array1<f64>>`
///   One density per row, in row order. `d ≤ 1` yields all ones.
///
/// Errors
/// ------
/// - `VineError::DomainViolation`
///   An edge received an argument outside (0, 1); `row` is relative to
///   `data`.
/// - `VineError::UnresolvedPartner`
///   A partner or transform cell is missing, which means `index`, `grid`
///   and `data` were not built for the same structure.
pub fn evaluate(
    data: ArrayView2<f64>, index: &ConditioningIndex, grid: &PairCopulaGrid, floor: f64,
) -> VineResult<Array1<f64>> {
    let (rows, dim) = data.dim();
    let mut density = Array1::<f64>::ones(rows);
    if dim < 2 {
        return Ok(density);
    }

    let mut forward = TransformTable::from_observations(data);
    let mut backward = TransformTable::from_observations(data);

    for column in 1..dim {
        for tree in 0..column {
            let unresolved = |partner: usize| VineError::UnresolvedPartner { tree, column, partner };
            let partner = index.partner(tree, column).ok_or_else(|| unresolved(column))?;
            let pair = grid.edge(tree, column).ok_or_else(|| unresolved(column))?;

            let (c, mut h_self, mut h_partner) = {
                let z1 = forward.get(tree, column).ok_or_else(|| unresolved(column))?;
                let z2 = match partner.side {
                    PartnerSide::Forward => forward.get(tree, partner.column),
                    PartnerSide::Backward => backward.get(tree, partner.column),
                }
                .ok_or_else(|| unresolved(partner.column))?;

                let at_edge = |err| VineError::at_edge(err, tree, column, pair.family());
                let c = pair.density(z2, z1).map_err(at_edge)?;
                let h_self = pair.hfunction(HDirection::GivenFirst, z2, z1).map_err(at_edge)?;
                let h_partner = pair.hfunction(HDirection::GivenSecond, z2, z1).map_err(at_edge)?;
                (c, h_self, h_partner)
            };

            density *= &c;
            h_self.mapv_inplace(|u| guard_transform(u, floor));
            h_partner.mapv_inplace(|u| guard_transform(u, floor));
            forward.cell_mut(tree + 1, column).ok_or_else(|| unresolved(column))?.assign(&h_self);
            backward.cell_mut(tree + 1, column).ok_or_else(|| unresolved(column))?.assign(&h_partner);

            trace!(tree, column, partner = partner.column, family = %pair.family(), "evaluated edge");
        }
    }

    Ok(density)
}

/// Clamp a transform to `[floor, 1 − floor]`; `NaN` passes through so the
/// next edge reports it.
pub fn guard_transform(value: f64, floor: f64) -> f64 {
    if value < floor {
        floor
    } else if value > 1.0 - floor {
        1.0 - floor
    } else {
        value
    }
}
