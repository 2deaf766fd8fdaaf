//! Asymmetric Tawn extreme-value copula.
//!
//! The three-parameter Tawn copula is written through its stable tail
//! dependence function. With `x = −ln u`, `y = −ln v`:
//!
//! ```text
//! ℓ(x, y) = (1−ψ₁)x + (1−ψ₂)y + W^(1/θ),   W = (ψ₁x)^θ + (ψ₂y)^θ
//! C(u, v) = exp(−ℓ(x, y))
//! ```
//!
//! so that `∂C/∂u = C ℓₓ / u`, `∂C/∂v = C ℓ_y / v` and
//! `c = C (ℓₓ ℓ_y − ℓₓ_y) / (uv)`. The family is not exchangeable, so both
//! h-function directions are provided.
//!
//! Parameters: `θ ≥ 1`, `ψ₁, ψ₂ ∈ (0, 1]` (validated upstream). `ψ₁ = ψ₂ = 1`
//! recovers the Gumbel copula.

/// Partial derivatives of the stable tail dependence function at `(x, y)`.
struct TailDerivatives {
    ell: f64,
    ell_x: f64,
    ell_y: f64,
    ell_xy: f64,
}

/// Powers are normalized by `m = max(ψ₁x, ψ₂y)`: with `p = ψ₁x/m`,
/// `q = ψ₂y/m` and `w = p^θ + q^θ ∈ [1, 2]`, `W^(1/θ) = m w^(1/θ)` and the
/// derivatives only involve `p`, `q` and `w`, so large θ or arguments near
/// 1 cannot underflow `W` to zero.
fn tail_derivatives(x: f64, y: f64, theta: f64, psi1: f64, psi2: f64) -> TailDerivatives {
    let (sx, sy) = (psi1 * x, psi2 * y);
    let m = sx.max(sy);
    let (p, q) = (sx / m, sy / m);
    let w = p.powf(theta) + q.powf(theta);
    let w_pow = w.powf(1.0 / theta - 1.0);
    let (px, qy) = (p.powf(theta - 1.0), q.powf(theta - 1.0));
    TailDerivatives {
        ell: (1.0 - psi1) * x + (1.0 - psi2) * y + m * w * w_pow,
        ell_x: (1.0 - psi1) + psi1 * px * w_pow,
        ell_y: (1.0 - psi2) + psi2 * qy * w_pow,
        ell_xy: (1.0 - theta) * psi1 * psi2 * px * qy * w_pow / (w * m),
    }
}

/// Tawn density `c(u, v)`.
pub fn tawn_pdf(u: f64, v: f64, theta: f64, psi1: f64, psi2: f64) -> f64 {
    let (ln_u, ln_v) = (u.ln(), v.ln());
    let t = tail_derivatives(-ln_u, -ln_v, theta, psi1, psi2);
    (-t.ell - ln_u - ln_v).exp() * (t.ell_x * t.ell_y - t.ell_xy)
}

/// Tawn h-function `∂C/∂u = P(V ≤ v | U = u)`.
pub fn tawn_h_given_first(u: f64, v: f64, theta: f64, psi1: f64, psi2: f64) -> f64 {
    let ln_u = u.ln();
    let t = tail_derivatives(-ln_u, -v.ln(), theta, psi1, psi2);
    (-t.ell - ln_u).exp() * t.ell_x
}

/// Tawn h-function `∂C/∂v = P(U ≤ u | V = v)`.
pub fn tawn_h_given_second(u: f64, v: f64, theta: f64, psi1: f64, psi2: f64) -> f64 {
    let ln_v = v.ln();
    let t = tail_derivatives(-u.ln(), -ln_v, theta, psi1, psi2);
    (-t.ell - ln_v).exp() * t.ell_y
}
