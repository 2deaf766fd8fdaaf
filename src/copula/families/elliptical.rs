//! Elliptical pair copulas: Gaussian and Student t.
//!
//! Both families are evaluated on normal / Student-t scores of the uniform
//! arguments, so each kernel carries its reference distributions and is
//! built once per vectorized call rather than once per row.
//!
//! ## Formulas
//! With `x = Q(u)`, `y = Q(v)` (Q the reference quantile function):
//! - Gaussian: `ln c = −½ ln(1−ρ²) − (ρ²(x²+y²) − 2ρxy) / (2(1−ρ²))`,
//!   `h(v | u) = Φ((y − ρx) / √(1−ρ²))`.
//! - Student t: `ln c = K − (ν+2)/2 · ln(1 + Q/ν) + (ν+1)/2 · (ln(1+x²/ν) + ln(1+y²/ν))`
//!   with `Q = (x² + y² − 2ρxy)/(1−ρ²)` and
//!   `K = lnΓ((ν+2)/2) + lnΓ(ν/2) − 2 lnΓ((ν+1)/2) − ½ ln(1−ρ²)`;
//!   `h(v | u) = T_{ν+1}((y − ρx) / √((ν + x²)(1−ρ²)/(ν+1)))`.
//!
//! Both families are exchangeable, so `h(u | v)` is `h(v | u)` with the
//! arguments swapped.
use crate::copula::errors::CopulaResult;
use statrs::{
    distribution::{ContinuousCDF, Normal, StudentsT},
    function::gamma::ln_gamma,
};

/// Gaussian copula kernel with correlation `rho ∈ (−1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianKernel {
    rho: f64,
    one_minus_rho_sq: f64,
    normal: Normal,
}

impl GaussianKernel {
    /// Build the kernel; `rho` is assumed validated upstream.
    pub fn new(rho: f64) -> CopulaResult<Self> {
        Ok(GaussianKernel { rho, one_minus_rho_sq: 1.0 - rho * rho, normal: Normal::new(0.0, 1.0)? })
    }

    /// Copula density `c(u, v)`.
    pub fn pdf(&self, u: f64, v: f64) -> f64 {
        let x = self.normal.inverse_cdf(u);
        let y = self.normal.inverse_cdf(v);
        let rho = self.rho;
        let quad = rho * rho * (x * x + y * y) - 2.0 * rho * x * y;
        (-0.5 * self.one_minus_rho_sq.ln() - quad / (2.0 * self.one_minus_rho_sq)).exp()
    }

    /// `∂C/∂u = P(V ≤ v | U = u)`.
    pub fn h_given_first(&self, u: f64, v: f64) -> f64 {
        let x = self.normal.inverse_cdf(u);
        let y = self.normal.inverse_cdf(v);
        self.normal.cdf((y - self.rho * x) / self.one_minus_rho_sq.sqrt())
    }
}

/// Student t copula kernel with correlation `rho ∈ (−1, 1)` and `nu > 0`
/// degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentKernel {
    rho: f64,
    nu: f64,
    one_minus_rho_sq: f64,
    log_const: f64,
    marginal: StudentsT,
    conditional: StudentsT,
}

impl StudentKernel {
    /// Build the kernel; `rho` and `nu` are assumed validated upstream.
    pub fn new(rho: f64, nu: f64) -> CopulaResult<Self> {
        let one_minus_rho_sq = 1.0 - rho * rho;
        let log_const = ln_gamma(0.5 * (nu + 2.0)) + ln_gamma(0.5 * nu)
            - 2.0 * ln_gamma(0.5 * (nu + 1.0))
            - 0.5 * one_minus_rho_sq.ln();
        Ok(StudentKernel {
            rho,
            nu,
            one_minus_rho_sq,
            log_const,
            marginal: StudentsT::new(0.0, 1.0, nu)?,
            conditional: StudentsT::new(0.0, 1.0, nu + 1.0)?,
        })
    }

    /// Copula density `c(u, v)`.
    pub fn pdf(&self, u: f64, v: f64) -> f64 {
        let x = self.marginal.inverse_cdf(u);
        let y = self.marginal.inverse_cdf(v);
        let nu = self.nu;
        let quad = (x * x + y * y - 2.0 * self.rho * x * y) / self.one_minus_rho_sq;
        let log_c = self.log_const - 0.5 * (nu + 2.0) * (quad / nu).ln_1p()
            + 0.5 * (nu + 1.0) * ((x * x / nu).ln_1p() + (y * y / nu).ln_1p());
        log_c.exp()
    }

    /// `∂C/∂u = P(V ≤ v | U = u)`.
    pub fn h_given_first(&self, u: f64, v: f64) -> f64 {
        let x = self.marginal.inverse_cdf(u);
        let y = self.marginal.inverse_cdf(v);
        let scale = ((self.nu + x * x) * self.one_minus_rho_sq / (self.nu + 1.0)).sqrt();
        self.conditional.cdf((y - self.rho * x) / scale)
    }
}
