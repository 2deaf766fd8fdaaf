//! copula::pair — validated bivariate copulas with vectorized primitives.
//!
//! Purpose
//! -------
//! Attach a validated parameter payload to a [`CopulaFamily`] and expose the
//! two primitives consumed by the vine engine: the copula density and the
//! conditional-distribution transform (h-function), both vectorized over
//! rows.
//!
//! Key behaviors
//! -------------
//! - [`PairCopula::new`] is the single validation entry point; every variant
//!   of [`PairCopula`] therefore holds parameters inside its family domain.
//! - [`PairCopula::density`] and [`PairCopula::hfunction`] check that both
//!   argument vectors have equal length and lie in the open unit interval,
//!   then dispatch through an exhaustive `match` on the variant.
//! - Survival families are 180° rotations of their base family.
//!
//! Conventions
//! -----------
//! - Arguments are `(u1, u2)` for a copula `C(u1, u2)`.
//! - [`HDirection::GivenFirst`] evaluates `∂C/∂u1 = P(U2 ≤ u2 | U1 = u1)`;
//!   [`HDirection::GivenSecond`] evaluates `∂C/∂u2 = P(U1 ≤ u1 | U2 = u2)`.
//! - Independence: density ≡ 1 and the h-function returns the conditioned
//!   argument unchanged.
//!
//! Performance notes
//! -----------------
//! - Elliptical kernels (normal / Student t reference distributions) are
//!   built once per vectorized call, not once per row.
//!
//! Testing notes
//! -------------
//! - Unit tests cover dispatch for symmetric, asymmetric and rotated
//!   families, independence, and the domain checks of the vectorized
//!   primitives. Formula accuracy is tested in `copula::families`.
use crate::copula::{
    errors::CopulaResult,
    families::{
        archimedean::{
            amh_h, amh_pdf, clayton_h, clayton_pdf, frank_h, frank_pdf, gumbel_h, gumbel_pdf,
            joe_h, joe_pdf,
        },
        elliptical::{GaussianKernel, StudentKernel},
        extreme_value::{tawn_h_given_first, tawn_h_given_second, tawn_pdf},
        non_archimedean::{fgm_h, fgm_pdf, plackett_h, plackett_pdf},
    },
    family::CopulaFamily,
    validation::{validate_parameters, validate_same_length, validate_unit_interval},
};
use ndarray::{Array1, ArrayView1, Zip};

/// Which argument of `C(u1, u2)` the h-function conditions on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HDirection {
    /// `∂C/∂u1`: distribution of the second argument given the first.
    GivenFirst,
    /// `∂C/∂u2`: distribution of the first argument given the second.
    GivenSecond,
}

/// PairCopula — a bivariate copula with a validated parameter payload.
///
/// Variants mirror [`CopulaFamily`]; construct through [`PairCopula::new`]
/// so the payload is guaranteed to lie inside the family domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairCopula {
    Independence,
    Gaussian { rho: f64 },
    StudentT { rho: f64, nu: f64 },
    Clayton { theta: f64 },
    Gumbel { theta: f64 },
    Frank { theta: f64 },
    Joe { theta: f64 },
    Amh { theta: f64 },
    Tawn { theta: f64, psi1: f64, psi2: f64 },
    Fgm { theta: f64 },
    Plackett { theta: f64 },
    SurvivalClayton { theta: f64 },
    SurvivalGumbel { theta: f64 },
    SurvivalJoe { theta: f64 },
}

impl PairCopula {
    /// Validate `params` for `family` and build the pair copula.
    ///
    /// Parameters
    /// ----------
    /// - `family`: [`CopulaFamily`]
    ///   Family tag.
    /// - `params`: `&[f64]`
    ///   Parameter vector in the family's order (`[ρ]`, `[ρ, ν]`, `[θ]`, or
    ///   `[θ, ψ₁, ψ₂]`). Ignored for independence.
    ///
    /// Errors
    /// ------
    /// - `CopulaError::ParameterCount` / `CopulaError::InvalidParameter`
    ///   Propagated from [`validate_parameters`].
    pub fn new(family: CopulaFamily, params: &[f64]) -> CopulaResult<Self> {
        validate_parameters(family, params)?;
        let pair = match family {
            CopulaFamily::Independence => PairCopula::Independence,
            CopulaFamily::Gaussian => PairCopula::Gaussian { rho: params[0] },
            CopulaFamily::StudentT => PairCopula::StudentT { rho: params[0], nu: params[1] },
            CopulaFamily::Clayton => PairCopula::Clayton { theta: params[0] },
            CopulaFamily::Gumbel => PairCopula::Gumbel { theta: params[0] },
            CopulaFamily::Frank => PairCopula::Frank { theta: params[0] },
            CopulaFamily::Joe => PairCopula::Joe { theta: params[0] },
            CopulaFamily::Amh => PairCopula::Amh { theta: params[0] },
            CopulaFamily::Tawn => {
                PairCopula::Tawn { theta: params[0], psi1: params[1], psi2: params[2] }
            }
            CopulaFamily::Fgm => PairCopula::Fgm { theta: params[0] },
            CopulaFamily::Plackett => PairCopula::Plackett { theta: params[0] },
            CopulaFamily::SurvivalClayton => PairCopula::SurvivalClayton { theta: params[0] },
            CopulaFamily::SurvivalGumbel => PairCopula::SurvivalGumbel { theta: params[0] },
            CopulaFamily::SurvivalJoe => PairCopula::SurvivalJoe { theta: params[0] },
        };
        Ok(pair)
    }

    /// Family tag of this copula.
    pub fn family(&self) -> CopulaFamily {
        match self {
            PairCopula::Independence => CopulaFamily::Independence,
            PairCopula::Gaussian { .. } => CopulaFamily::Gaussian,
            PairCopula::StudentT { .. } => CopulaFamily::StudentT,
            PairCopula::Clayton { .. } => CopulaFamily::Clayton,
            PairCopula::Gumbel { .. } => CopulaFamily::Gumbel,
            PairCopula::Frank { .. } => CopulaFamily::Frank,
            PairCopula::Joe { .. } => CopulaFamily::Joe,
            PairCopula::Amh { .. } => CopulaFamily::Amh,
            PairCopula::Tawn { .. } => CopulaFamily::Tawn,
            PairCopula::Fgm { .. } => CopulaFamily::Fgm,
            PairCopula::Plackett { .. } => CopulaFamily::Plackett,
            PairCopula::SurvivalClayton { .. } => CopulaFamily::SurvivalClayton,
            PairCopula::SurvivalGumbel { .. } => CopulaFamily::SurvivalGumbel,
            PairCopula::SurvivalJoe { .. } => CopulaFamily::SurvivalJoe,
        }
    }

    /// Parameter vector in the family's order (empty for independence).
    pub fn parameters(&self) -> Vec<f64> {
        match *self {
            PairCopula::Independence => Vec::new(),
            PairCopula::Gaussian { rho } => vec![rho],
            PairCopula::StudentT { rho, nu } => vec![rho, nu],
            PairCopula::Tawn { theta, psi1, psi2 } => vec![theta, psi1, psi2],
            PairCopula::Clayton { theta }
            | PairCopula::Gumbel { theta }
            | PairCopula::Frank { theta }
            | PairCopula::Joe { theta }
            | PairCopula::Amh { theta }
            | PairCopula::Fgm { theta }
            | PairCopula::Plackett { theta }
            | PairCopula::SurvivalClayton { theta }
            | PairCopula::SurvivalGumbel { theta }
            | PairCopula::SurvivalJoe { theta } => vec![theta],
        }
    }

    /// Copula density `c(u1[r], u2[r])` for every row `r`.
    ///
    /// Errors
    /// ------
    /// - `CopulaError::LengthMismatch` when `u1` and `u2` differ in length.
    /// - `CopulaError::OutOfUnitInterval` for the first argument outside
    ///   (0, 1), scanning `u1` before `u2`.
    pub fn density(&self, u1: ArrayView1<f64>, u2: ArrayView1<f64>) -> CopulaResult<Array1<f64>> {
        check_arguments(u1, u2)?;
        let kernel = Kernel::prepare(self)?;
        Ok(Zip::from(&u1).and(&u2).map_collect(|&a, &b| kernel.pdf(a, b)))
    }

    /// h-function in the requested `direction` for every row.
    ///
    /// Returns
    /// -------
    /// `Array1<f64>`
    ///   `∂C/∂u1` (`GivenFirst`) or `∂C/∂u2` (`GivenSecond`) evaluated at
    ///   `(u1[r], u2[r])`, clamped to `[0, 1]` so rounding in the closed
    ///   forms never leaves the unit interval. NaN passes through. Callers
    ///   that feed outputs back as arguments still apply their own floor.
    ///
    /// Errors
    /// ------
    /// Same as [`PairCopula::density`].
    pub fn hfunction(
        &self, direction: HDirection, u1: ArrayView1<f64>, u2: ArrayView1<f64>,
    ) -> CopulaResult<Array1<f64>> {
        check_arguments(u1, u2)?;
        let kernel = Kernel::prepare(self)?;
        let out = match direction {
            HDirection::GivenFirst => {
                Zip::from(&u1).and(&u2).map_collect(|&a, &b| kernel.h_given_first(a, b))
            }
            HDirection::GivenSecond => {
                Zip::from(&u1).and(&u2).map_collect(|&a, &b| kernel.h_given_second(a, b))
            }
        };
        Ok(out)
    }
}

fn check_arguments(u1: ArrayView1<f64>, u2: ArrayView1<f64>) -> CopulaResult<()> {
    validate_same_length(u1, u2)?;
    validate_unit_interval(u1)?;
    validate_unit_interval(u2)
}

/// Per-call evaluator: the pair copula with any reference distributions
/// already constructed.
enum Kernel {
    Independence,
    Gaussian(GaussianKernel),
    StudentT(StudentKernel),
    Clayton(f64),
    Gumbel(f64),
    Frank(f64),
    Joe(f64),
    Amh(f64),
    Tawn(f64, f64, f64),
    Fgm(f64),
    Plackett(f64),
    SurvivalClayton(f64),
    SurvivalGumbel(f64),
    SurvivalJoe(f64),
}

impl Kernel {
    fn prepare(pair: &PairCopula) -> CopulaResult<Self> {
        let kernel = match *pair {
            PairCopula::Independence => Kernel::Independence,
            PairCopula::Gaussian { rho } => Kernel::Gaussian(GaussianKernel::new(rho)?),
            PairCopula::StudentT { rho, nu } => Kernel::StudentT(StudentKernel::new(rho, nu)?),
            PairCopula::Clayton { theta } => Kernel::Clayton(theta),
            PairCopula::Gumbel { theta } => Kernel::Gumbel(theta),
            PairCopula::Frank { theta } => Kernel::Frank(theta),
            PairCopula::Joe { theta } => Kernel::Joe(theta),
            PairCopula::Amh { theta } => Kernel::Amh(theta),
            PairCopula::Tawn { theta, psi1, psi2 } => Kernel::Tawn(theta, psi1, psi2),
            PairCopula::Fgm { theta } => Kernel::Fgm(theta),
            PairCopula::Plackett { theta } => Kernel::Plackett(theta),
            PairCopula::SurvivalClayton { theta } => Kernel::SurvivalClayton(theta),
            PairCopula::SurvivalGumbel { theta } => Kernel::SurvivalGumbel(theta),
            PairCopula::SurvivalJoe { theta } => Kernel::SurvivalJoe(theta),
        };
        Ok(kernel)
    }

    fn pdf(&self, u: f64, v: f64) -> f64 {
        match *self {
            Kernel::Independence => 1.0,
            Kernel::Gaussian(ref k) => k.pdf(u, v),
            Kernel::StudentT(ref k) => k.pdf(u, v),
            Kernel::Clayton(theta) => clayton_pdf(u, v, theta),
            Kernel::Gumbel(theta) => gumbel_pdf(u, v, theta),
            Kernel::Frank(theta) => frank_pdf(u, v, theta),
            Kernel::Joe(theta) => joe_pdf(u, v, theta),
            Kernel::Amh(theta) => amh_pdf(u, v, theta),
            Kernel::Tawn(theta, psi1, psi2) => tawn_pdf(u, v, theta, psi1, psi2),
            Kernel::Fgm(theta) => fgm_pdf(u, v, theta),
            Kernel::Plackett(theta) => plackett_pdf(u, v, theta),
            Kernel::SurvivalClayton(theta) => clayton_pdf(1.0 - u, 1.0 - v, theta),
            Kernel::SurvivalGumbel(theta) => gumbel_pdf(1.0 - u, 1.0 - v, theta),
            Kernel::SurvivalJoe(theta) => joe_pdf(1.0 - u, 1.0 - v, theta),
        }
    }

    /// `∂C/∂u` clamped to `[0, 1]`.
    fn h_given_first(&self, u: f64, v: f64) -> f64 {
        self.unclamped_h_given_first(u, v).clamp(0.0, 1.0)
    }

    /// `∂C/∂v` clamped to `[0, 1]`.
    fn h_given_second(&self, u: f64, v: f64) -> f64 {
        let h = match *self {
            Kernel::Independence => u,
            Kernel::Tawn(theta, psi1, psi2) => tawn_h_given_second(u, v, theta, psi1, psi2),
            // exchangeable families
            _ => self.unclamped_h_given_first(v, u),
        };
        h.clamp(0.0, 1.0)
    }

    fn unclamped_h_given_first(&self, u: f64, v: f64) -> f64 {
        match *self {
            Kernel::Independence => v,
            Kernel::Gaussian(ref k) => k.h_given_first(u, v),
            Kernel::StudentT(ref k) => k.h_given_first(u, v),
            Kernel::Clayton(theta) => clayton_h(u, v, theta),
            Kernel::Gumbel(theta) => gumbel_h(u, v, theta),
            Kernel::Frank(theta) => frank_h(u, v, theta),
            Kernel::Joe(theta) => joe_h(u, v, theta),
            Kernel::Amh(theta) => amh_h(u, v, theta),
            Kernel::Tawn(theta, psi1, psi2) => tawn_h_given_first(u, v, theta, psi1, psi2),
            Kernel::Fgm(theta) => fgm_h(u, v, theta),
            Kernel::Plackett(theta) => plackett_h(u, v, theta),
            Kernel::SurvivalClayton(theta) => 1.0 - clayton_h(1.0 - u, 1.0 - v, theta),
            Kernel::SurvivalGumbel(theta) => 1.0 - gumbel_h(1.0 - u, 1.0 - v, theta),
            Kernel::SurvivalJoe(theta) => 1.0 - joe_h(1.0 - u, 1.0 - v, theta),
        }
    }
}
