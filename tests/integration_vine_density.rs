//! Integration tests for regular-vine density evaluation.
//!
//! Purpose
//! -------
//! - Validate the public pipeline end to end: structure array, family grid
//!   and parameter grid in; one density per observation out.
//! - Check evaluated densities against independently derived references
//!   (closed-form Gaussian copulas and a generic conditional-CDF recursion
//!   evaluated offline in high precision).
//!
//! Coverage
//! --------
//! - `vine::models::rvine`:
//!   - `RVineCopula::new`, `density`, `log_density`, `log_likelihood`.
//!   - `vine_density` one-shot evaluation and its validation order.
//! - Strong-dependence accuracy of a single Frank edge near the corner.
//! - `vine::core::structure`:
//!   - D-vine and C-vine constructors, relabelled structures, and a mixed
//!     R-vine whose last tree reads a backward transform.
//!
//! Exclusions
//! ----------
//! - Per-family formulas and h-function identities; covered by unit tests in
//!   `copula`.
//! - Python bindings.
use approx::assert_relative_eq;
use ndarray::{Array1, Array2, array, s};
use rust_vines::{
    copula::CopulaFamily,
    vine::{EvalOptions, RVineCopula, VineError, VineErrorKind, VineStructure, vine_density},
};
use statrs::distribution::{ContinuousCDF, Normal};

type FamilyGrid = Array2<Option<CopulaFamily>>;
type ParamGrid = Array2<Vec<f64>>;

/// Purpose
/// -------
/// Build `(d−1)×(d−1)` grids from `(row, col, family, params)` entries.
///
/// Cells not listed stay empty.
fn grids(dim: usize, entries: &[(usize, usize, CopulaFamily, &[f64])]) -> (FamilyGrid, ParamGrid) {
    let side = dim.saturating_sub(1);
    let mut families = Array2::from_elem((side, side), None);
    let mut params = Array2::from_elem((side, side), Vec::new());
    for &(row, col, family, values) in entries {
        families[[row, col]] = Some(family);
        params[[row, col]] = values.to_vec();
    }
    (families, params)
}

/// Purpose
/// -------
/// Three-variable Gaussian D-vine on order `[0, 1, 2]` with pair
/// correlations `ρ₀₁`, `ρ₁₂` and partial correlation `ρ₀₂|₁`.
fn gaussian_chain(rho01: f64, rho12: f64, partial02: f64) -> (Array2<usize>, FamilyGrid, ParamGrid) {
    let structure = VineStructure::d_vine(&[0, 1, 2]).expect("valid D-vine").matrix().to_owned();
    let g = CopulaFamily::Gaussian;
    let (families, params) =
        grids(3, &[(0, 0, g, &[rho01]), (0, 1, g, &[rho12]), (1, 0, g, &[partial02])]);
    (structure, families, params)
}

/// Purpose
/// -------
/// Mixed four-variable R-vine.
///
/// Trees
/// -----
/// - Tree 1: 0–1 Gaussian(0.6), 1–2 Clayton(1.5), 1–3 Frank(4).
/// - Tree 2: 0,2|1 Gumbel(1.7), 2,3|1 Gaussian(−0.3).
/// - Tree 3: 0,3|1,2 Clayton(0.8), whose first argument is the backward
///   transform of column 2.
fn mixed_rvine() -> (Array2<usize>, FamilyGrid, ParamGrid) {
    let structure = array![[0, 0, 1, 1], [0, 1, 0, 2], [0, 0, 2, 0], [0, 0, 0, 3]];
    let (families, params) = grids(
        4,
        &[
            (0, 0, CopulaFamily::Gaussian, &[0.6]),
            (0, 1, CopulaFamily::Clayton, &[1.5]),
            (0, 2, CopulaFamily::Frank, &[4.0]),
            (1, 0, CopulaFamily::Gumbel, &[1.7]),
            (1, 1, CopulaFamily::Gaussian, &[-0.3]),
            (2, 0, CopulaFamily::Clayton, &[0.8]),
        ],
    );
    (structure, families, params)
}

/// Purpose
/// -------
/// Closed-form trivariate Gaussian copula density
/// `|R|^{-1/2} exp(−½ xᵀ(R⁻¹ − I)x)` with `x = Φ⁻¹(u)`.
///
/// Parameters
/// ----------
/// - `r01`, `r02`, `r12`: off-diagonal entries of the correlation matrix.
/// - `u`: one observation in (0, 1)³.
fn gaussian_copula_3(r01: f64, r02: f64, r12: f64, u: [f64; 3]) -> f64 {
    let normal = Normal::standard();
    let x = u.map(|p| normal.inverse_cdf(p));
    let r = [[1.0, r01, r02], [r01, 1.0, r12], [r02, r12, 1.0]];
    let det = r[0][0] * (r[1][1] * r[2][2] - r[1][2] * r[2][1])
        - r[0][1] * (r[1][0] * r[2][2] - r[1][2] * r[2][0])
        + r[0][2] * (r[1][0] * r[2][1] - r[1][1] * r[2][0]);
    let mut quad = 0.0;
    for i in 0..3 {
        for j in 0..3 {
            let (i1, i2) = ((j + 1) % 3, (j + 2) % 3);
            let (j1, j2) = ((i + 1) % 3, (i + 2) % 3);
            let inv = (r[i1][j1] * r[i2][j2] - r[i1][j2] * r[i2][j1]) / det;
            let identity = if i == j { 1.0 } else { 0.0 };
            quad += x[i] * (inv - identity) * x[j];
        }
    }
    (-0.5 * quad).exp() / det.sqrt()
}

#[test]
// Purpose
// -------
// The Gaussian D-vine reproduces the reference density and the closed-form
// Gaussian copula with the implied correlation matrix.
//
// Given
// -----
// - ρ₀₁ = 0.5, ρ₁₂ = 0.3, ρ₀₂|₁ = 0.2 at (0.3, 0.5, 0.7) plus two more rows.
//
// Expect
// ------
// - Row 0 ≈ 1.0711079747881473.
// - Every row matches the closed form with
//   ρ₀₂ = ρ₀₂|₁·√((1−ρ₀₁²)(1−ρ₁₂²)) + ρ₀₁ρ₁₂.
fn gaussian_chain_matches_closed_form() {
    // Arrange
    let (structure, families, params) = gaussian_chain(0.5, 0.3, 0.2);
    let data = array![[0.3, 0.5, 0.7], [0.05, 0.9, 0.4], [0.99, 0.97, 0.93]];
    let r02 = 0.2 * ((1.0 - 0.25) * (1.0 - 0.09_f64)).sqrt() + 0.15;

    // Act
    let density =
        vine_density(data.view(), structure.view(), families.view(), params.view()).unwrap();

    // Assert
    assert_relative_eq!(density[0], 1.071_107_974_788_147_3, max_relative = 1e-10);
    for (row, value) in data.rows().into_iter().zip(density.iter()) {
        let expected = gaussian_copula_3(0.5, r02, 0.3, [row[0], row[1], row[2]]);
        assert_relative_eq!(*value, expected, max_relative = 1e-9);
    }
}

#[test]
// Purpose
// -------
// A C-vine built by the constructor matches the Gaussian closed form.
//
// Given
// -----
// - Root 0: ρ₀₁ = 0.4, ρ₀₂ = −0.5; ρ₁₂|₀ = 0.3.
//
// Expect
// ------
// - ρ₁₂ = ρ₁₂|₀·√((1−ρ₀₁²)(1−ρ₀₂²)) + ρ₀₁ρ₀₂ reproduces every row.
fn gaussian_c_vine_matches_closed_form() {
    // Arrange
    let structure = VineStructure::c_vine(&[0, 1, 2]).unwrap();
    let g = CopulaFamily::Gaussian;
    let (families, params) = grids(3, &[(0, 0, g, &[0.4]), (0, 1, g, &[-0.5]), (1, 0, g, &[0.3])]);
    let model = RVineCopula::from_structure(
        &structure,
        families.view(),
        params.view(),
        EvalOptions::sequential(),
    )
    .unwrap();
    let data = array![[0.2, 0.6, 0.3], [0.8, 0.1, 0.5]];
    let r12 = 0.3 * ((1.0 - 0.16) * (1.0 - 0.25_f64)).sqrt() - 0.2;

    // Act
    let density = model.density(data.view()).unwrap();

    // Assert
    for (row, value) in data.rows().into_iter().zip(density.iter()) {
        let expected = gaussian_copula_3(0.4, -0.5, r12, [row[0], row[1], row[2]]);
        assert_relative_eq!(*value, expected, max_relative = 1e-9);
    }
}

#[test]
// Purpose
// -------
// A mixed-family R-vine whose last tree needs a backward transform matches
// values from a generic conditional-CDF recursion.
//
// Expect
// ------
// - (0.2, 0.45, 0.7, 0.35) ↦ 0.62982981045104598.
// - (0.9, 0.15, 0.55, 0.8) ↦ 0.017938616731329145.
fn mixed_rvine_matches_reference() {
    let (structure, families, params) = mixed_rvine();
    let data = array![[0.2, 0.45, 0.7, 0.35], [0.9, 0.15, 0.55, 0.8]];

    let density =
        vine_density(data.view(), structure.view(), families.view(), params.view()).unwrap();

    assert_relative_eq!(density[0], 0.629_829_810_451_045_98, max_relative = 1e-8);
    assert_relative_eq!(density[1], 0.017_938_616_731_329_145, max_relative = 1e-8);
}

#[test]
// Purpose
// -------
// A strongly dependent Frank edge keeps full accuracy near the upper corner
// of the unit square, for both signs of θ.
//
// Given
// -----
// - Two-variable vine with one Frank edge; rows (0.99, 0.99),
//   (0.995, 0.99) and (0.5, 0.5).
//
// Expect
// ------
// - θ = 35 ↦ [20.860241245, 22.816637187, ·].
// - θ = 40 ↦ [22.623810187, 24.831710083, 10.000000041].
// - θ = −40 on (0.01, 0.99) equals θ = 40 on (0.99, 0.99).
fn strong_frank_edge_matches_reference() {
    let structure = VineStructure::d_vine(&[0, 1]).unwrap().matrix().to_owned();
    let data = array![[0.99, 0.99], [0.995, 0.99], [0.5, 0.5]];
    let frank_density = |theta: f64, rows: Array2<f64>| {
        let (families, params) = grids(2, &[(0, 0, CopulaFamily::Frank, &[theta])]);
        vine_density(rows.view(), structure.view(), families.view(), params.view()).unwrap()
    };

    let at_35 = frank_density(35.0, data.clone());
    let at_40 = frank_density(40.0, data);
    let reflected = frank_density(-40.0, array![[0.01, 0.99]]);

    assert_relative_eq!(at_35[0], 20.860_241_245_138_193, max_relative = 1e-10);
    assert_relative_eq!(at_35[1], 22.816_637_186_728_237, max_relative = 1e-10);
    assert_relative_eq!(at_40[0], 22.623_810_187_280_678, max_relative = 1e-10);
    assert_relative_eq!(at_40[1], 24.831_710_082_724_024, max_relative = 1e-10);
    assert_relative_eq!(at_40[2], 10.000_000_041_223_073, max_relative = 1e-10);
    assert_relative_eq!(reflected[0], 22.623_810_187_280_678, max_relative = 1e-10);
}

#[test]
// Purpose
// -------
// Relabelling the variables and permuting the data columns the same way
// leaves every density unchanged.
//
// Given
// -----
// - The mixed R-vine, relabelled by σ = [2, 0, 3, 1] (old label v becomes
//   σ[v], data column v moves to column σ[v]).
fn relabelled_structure_gives_same_density() {
    // Arrange
    let (structure, families, params) = mixed_rvine();
    let sigma = [2usize, 0, 3, 1];
    let relabelled = Array2::from_shape_fn((4, 4), |(i, j)| {
        if i <= j { sigma[structure[[i, j]]] } else { 0 }
    });
    let data = array![[0.2, 0.45, 0.7, 0.35], [0.9, 0.15, 0.55, 0.8], [0.5, 0.5, 0.5, 0.5]];
    let mut moved = Array2::<f64>::zeros(data.dim());
    for (old, &new) in sigma.iter().enumerate() {
        moved.column_mut(new).assign(&data.column(old));
    }

    // Act
    let original =
        vine_density(data.view(), structure.view(), families.view(), params.view()).unwrap();
    let permuted =
        vine_density(moved.view(), relabelled.view(), families.view(), params.view()).unwrap();

    // Assert
    for (a, b) in original.iter().zip(permuted.iter()) {
        assert_relative_eq!(*a, *b, max_relative = 1e-12);
    }
}

#[test]
// Purpose
// -------
// An all-independence vine has density one everywhere.
fn independence_vine_is_uniform() {
    let structure = VineStructure::d_vine(&[3, 1, 0, 2]).unwrap().matrix().to_owned();
    let none: &[f64] = &[];
    let entries: Vec<(usize, usize, CopulaFamily, &[f64])> = (0..3)
        .flat_map(|row| (0..3 - row).map(move |col| (row, col, CopulaFamily::Independence, none)))
        .collect();
    let (families, params) = grids(4, &entries);
    let data = array![[0.1, 0.2, 0.3, 0.4], [0.99, 0.01, 0.5, 0.75]];

    let density =
        vine_density(data.view(), structure.view(), families.view(), params.view()).unwrap();

    for value in density.iter() {
        assert_relative_eq!(*value, 1.0, epsilon = 1e-14);
    }
}

#[test]
// Purpose
// -------
// One variable has no edges; two variables reduce to the single pair.
fn degenerate_dimensions() {
    // d = 1
    let families = Array2::<Option<CopulaFamily>>::from_elem((0, 0), None);
    let params = Array2::<Vec<f64>>::from_elem((0, 0), Vec::new());
    let ones = vine_density(
        array![[0.3], [0.8]].view(),
        array![[0]].view(),
        families.view(),
        params.view(),
    )
    .unwrap();
    assert_eq!(ones, array![1.0, 1.0]);

    // d = 2, with the structure listing variable 0 as the designated one
    let (families, params) = grids(2, &[(0, 0, CopulaFamily::Frank, &[-3.0])]);
    let data = array![[0.25, 0.6], [0.7, 0.4]];
    let swapped = vine_density(
        data.view(),
        array![[1, 1], [0, 0]].view(),
        families.view(),
        params.view(),
    )
    .unwrap();
    let direct = rust_vines::copula::PairCopula::Frank { theta: -3.0 }
        .density(data.column(1), data.column(0))
        .unwrap();
    assert_relative_eq!(swapped[0], direct[0], max_relative = 1e-13);
    assert_relative_eq!(swapped[1], direct[1], max_relative = 1e-13);
}

#[test]
// Purpose
// -------
// A malformed structure fails even when there is no data to evaluate.
//
// Given
// -----
// - Column 2 lists label 1 twice; the batch has zero rows.
//
// Expect
// ------
// - `RepeatedLabel { column: 2, label: 1 }`.
fn structure_errors_fail_fast_on_empty_batch() {
    let (_, families, params) = gaussian_chain(0.5, 0.3, 0.2);
    let structure = array![[0, 0, 1], [0, 1, 1], [0, 0, 2]];
    let empty = Array2::<f64>::zeros((0, 3));

    let err = vine_density(empty.view(), structure.view(), families.view(), params.view())
        .unwrap_err();

    assert_eq!(err, VineError::RepeatedLabel { column: 2, label: 1 });
    assert_eq!(err.kind(), VineErrorKind::Structure);
}

#[test]
// Purpose
// -------
// Shape, parameter and domain failures carry their location.
fn errors_are_classified_and_located() {
    let (structure, families, params) = gaussian_chain(0.5, 0.3, 0.2);
    let data = array![[0.3, 0.5, 0.7]];

    // Grid of the wrong size.
    let (small_f, small_p) = grids(2, &[(0, 0, CopulaFamily::Gaussian, &[0.5])]);
    let err = vine_density(data.view(), structure.view(), small_f.view(), small_p.view())
        .unwrap_err();
    assert_eq!(err.kind(), VineErrorKind::Shape);

    // Data with the wrong number of columns.
    let err = vine_density(
        array![[0.3, 0.5]].view(),
        structure.view(),
        families.view(),
        params.view(),
    )
    .unwrap_err();
    assert!(matches!(err, VineError::DimensionMismatch { expected: 3, actual: 2, .. }));

    // Correlation outside (−1, 1) at grid cell (0, 1).
    let mut bad = params.clone();
    bad[[0, 1]] = vec![1.5];
    let err =
        vine_density(data.view(), structure.view(), families.view(), bad.view()).unwrap_err();
    assert!(matches!(err, VineError::InvalidParameter { row: 0, col: 1, .. }));
    assert_eq!(err.kind(), VineErrorKind::Parameter);

    // Observation on the boundary of the unit square.
    let err = vine_density(
        array![[0.3, 0.5, 0.7], [0.0, 0.5, 0.7]].view(),
        structure.view(),
        families.view(),
        params.view(),
    )
    .unwrap_err();
    assert!(matches!(err, VineError::DomainViolation { tree: 0, row: 1, .. }));
    assert_eq!(err.kind(), VineErrorKind::Domain);
}

#[test]
// Purpose
// -------
// Splitting a batch never changes the per-row densities, and chunked
// parallel evaluation agrees with sequential evaluation.
//
// Given
// -----
// - 600 deterministic rows through the mixed R-vine.
// - Sequential options versus parallel options with 32-row chunks.
//
// Expect
// ------
// - Identical densities; each half of the batch matches its slice of the
//   full result; log_likelihood is the sum of log densities.
fn batches_are_consistent_across_splits_and_schedules() {
    // Arrange
    let (structure, families, params) = mixed_rvine();
    let n = 600;
    let data = Array2::from_shape_fn((n, 4), |(r, c)| {
        let x = ((r * 37 + c * 101) % 997) as f64 / 997.0;
        0.001 + 0.998 * x
    });
    let sequential =
        RVineCopula::new(structure.view(), families.view(), params.view(), EvalOptions::sequential())
            .unwrap();
    let chunked = RVineCopula::new(
        structure.view(),
        families.view(),
        params.view(),
        EvalOptions::new(1e-10, true, 32).unwrap(),
    )
    .unwrap();

    // Act
    let full = sequential.density(data.view()).unwrap();
    let parallel = chunked.density(data.view()).unwrap();
    let head = sequential.density(data.slice(s![..250, ..])).unwrap();
    let tail = sequential.density(data.slice(s![250.., ..])).unwrap();
    let loglik = chunked.log_likelihood(data.view()).unwrap();

    // Assert
    assert_eq!(full, parallel);
    assert_eq!(full.slice(s![..250]), head);
    assert_eq!(full.slice(s![250..]), tail);
    assert!(full.iter().all(|v| v.is_finite() && *v >= 0.0));
    let expected: f64 = full.iter().map(|v| v.ln()).sum();
    assert_relative_eq!(loglik, expected, max_relative = 1e-12);
}

#[test]
// Purpose
// -------
// An empty batch evaluates to an empty vector with zero log-likelihood.
fn empty_batch_is_empty() {
    let (structure, families, params) = mixed_rvine();
    let model =
        RVineCopula::new(structure.view(), families.view(), params.view(), EvalOptions::default())
            .unwrap();
    let empty = Array2::<f64>::zeros((0, 4));

    assert_eq!(model.density(empty.view()).unwrap(), Array1::<f64>::zeros(0));
    assert_eq!(model.log_likelihood(empty.view()).unwrap(), 0.0);
}
