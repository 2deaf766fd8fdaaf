//! One-parameter Archimedean pair copulas: Clayton, Gumbel, Frank, Joe, AMH.
//!
//! Each family exposes a density `*_pdf(u, v, θ)` and the h-function
//! `*_h(u, v, θ) = ∂C/∂u = P(V ≤ v | U = u)`. All five families are
//! exchangeable; the reverse direction is obtained by swapping arguments.
//! Parameters are assumed validated upstream (see `copula::validation`).
//!
//! Densities with power terms are evaluated in log space, and sums of powers
//! are factored around their largest term so that strong dependence or
//! arguments near the corners neither overflow nor cancel. Extreme parameters
//! may still underflow to 0 rather than produce NaN.

/// `ln(u^−θ + v^−θ − 1)` for Clayton, written as
/// `m + ln(1 + e^(n−m)(1 − e^−n))` with `m ≥ n` the two exponents `−θ ln u`,
/// `−θ ln v`.
fn clayton_log_sum(ln_u: f64, ln_v: f64, theta: f64) -> f64 {
    let (a, b) = (-theta * ln_u, -theta * ln_v);
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    hi + ((lo - hi).exp() * -(-lo).exp_m1()).ln_1p()
}

/// Clayton density, `θ > 0`.
///
/// `c = (1+θ)(uv)^(−1−θ) (u^−θ + v^−θ − 1)^(−1/θ−2)`.
pub fn clayton_pdf(u: f64, v: f64, theta: f64) -> f64 {
    let (ln_u, ln_v) = (u.ln(), v.ln());
    let ln_s = clayton_log_sum(ln_u, ln_v, theta);
    (theta.ln_1p() - (1.0 + theta) * (ln_u + ln_v) - (2.0 + 1.0 / theta) * ln_s).exp()
}

/// Clayton h-function, `θ > 0`.
///
/// `h = u^(−θ−1) (u^−θ + v^−θ − 1)^(−1/θ−1)`.
pub fn clayton_h(u: f64, v: f64, theta: f64) -> f64 {
    let (ln_u, ln_v) = (u.ln(), v.ln());
    let ln_s = clayton_log_sum(ln_u, ln_v, theta);
    (-(1.0 + theta) * ln_u - (1.0 + 1.0 / theta) * ln_s).exp()
}

/// `ln(x^θ + y^θ)` for `x, y > 0`, factored around the larger base.
fn gumbel_log_sum(x: f64, y: f64, theta: f64) -> f64 {
    let (hi, lo) = if x >= y { (x, y) } else { (y, x) };
    theta * hi.ln() + (lo / hi).powf(theta).ln_1p()
}

/// Gumbel density, `θ ≥ 1`.
///
/// With `x = −ln u`, `y = −ln v`, `s = x^θ + y^θ`, `A = s^(1/θ)`:
/// `c = e^(−A) (uv)^(−1) (xy)^(θ−1) s^(2/θ−2) (1 + (θ−1)/A)`.
pub fn gumbel_pdf(u: f64, v: f64, theta: f64) -> f64 {
    let (ln_u, ln_v) = (u.ln(), v.ln());
    let (x, y) = (-ln_u, -ln_v);
    let ln_s = gumbel_log_sum(x, y, theta);
    let a = (ln_s / theta).exp();
    let log_c = -a - ln_u - ln_v
        + (theta - 1.0) * (x.ln() + y.ln())
        + (2.0 / theta - 2.0) * ln_s
        + ((theta - 1.0) / a).ln_1p();
    log_c.exp()
}

/// Gumbel h-function, `θ ≥ 1`.
///
/// `h = e^(−A) s^(1/θ−1) x^(θ−1) / u`.
pub fn gumbel_h(u: f64, v: f64, theta: f64) -> f64 {
    let ln_u = u.ln();
    let (x, y) = (-ln_u, -v.ln());
    let ln_s = gumbel_log_sum(x, y, theta);
    let a = (ln_s / theta).exp();
    (-a + (1.0 / theta - 1.0) * ln_s + (theta - 1.0) * x.ln() - ln_u).exp()
}

/// Frank normalizer for `θ > 0`.
///
/// With `l = min(u, v)`, `g = max(u, v)`, the denominator
/// `(1 − e^−θ) − (1 − e^−θu)(1 − e^−θv)` equals `e^(−θl) K` where
/// `K = (1 − e^(−θ(1−l))) + e^(−θ(g−l)) (1 − e^(−θl))` is a sum of
/// non-negative terms. Returns `(K, l, g)`.
fn frank_normalizer(u: f64, v: f64, theta: f64) -> (f64, f64, f64) {
    let (lo, hi) = if u <= v { (u, v) } else { (v, u) };
    let k = -(-theta * (1.0 - lo)).exp_m1() - (-theta * (hi - lo)).exp() * (-theta * lo).exp_m1();
    (k, lo, hi)
}

/// Frank density, `θ ≠ 0`.
///
/// `c = θ(1 − e^−θ) e^(−θ(u+v)) / [(e^−θ − 1) + (e^−θu − 1)(e^−θv − 1)]²`,
/// evaluated as `θ(1 − e^−θ) e^(−θ(g−l)) / K²` (see `frank_normalizer`).
/// Negative `θ` uses the reflection `c_θ(u, v) = c_−θ(1−u, v)`.
pub fn frank_pdf(u: f64, v: f64, theta: f64) -> f64 {
    if theta < 0.0 {
        return frank_pdf(1.0 - u, v, -theta);
    }
    let (k, lo, hi) = frank_normalizer(u, v, theta);
    theta * -(-theta).exp_m1() * (-theta * (hi - lo)).exp() / (k * k)
}

/// Frank h-function, `θ ≠ 0`.
///
/// `h = e^(−θu)(e^−θv − 1) / [(e^−θ − 1) + (e^−θu − 1)(e^−θv − 1)]`,
/// evaluated as `e^(−θ(u−l)) (1 − e^−θv) / K`. Negative `θ` uses
/// `h_θ(u, v) = h_−θ(1−u, v)`.
pub fn frank_h(u: f64, v: f64, theta: f64) -> f64 {
    if theta < 0.0 {
        return frank_h(1.0 - u, v, -theta);
    }
    let (k, lo, _) = frank_normalizer(u, v, theta);
    (-theta * (u - lo)).exp() * -(-theta * v).exp_m1() / k
}

/// `ln(ū^θ + v̄^θ − ū^θ v̄^θ)` for Joe from `ln ū`, `ln v̄`.
///
/// Written as `ā + b̄(1 − ā)` and factored around the larger exponent so
/// that neither power underflows on its own.
fn joe_log_sum(ln_ub: f64, ln_vb: f64, theta: f64) -> f64 {
    let (la, lb) = (theta * ln_ub, theta * ln_vb);
    let m = la.max(lb);
    m + ((la - m).exp() + (lb - m).exp() * -la.exp_m1()).ln()
}

/// Joe density, `θ ≥ 1`.
///
/// With `ū = 1−u`, `v̄ = 1−v`, `S = ū^θ + v̄^θ − ū^θ v̄^θ`:
/// `c = S^(1/θ−2) ū^(θ−1) v̄^(θ−1) (θ − 1 + S)`.
pub fn joe_pdf(u: f64, v: f64, theta: f64) -> f64 {
    let (ln_ub, ln_vb) = ((-u).ln_1p(), (-v).ln_1p());
    let ln_s = joe_log_sum(ln_ub, ln_vb, theta);
    ((1.0 / theta - 2.0) * ln_s + (theta - 1.0) * (ln_ub + ln_vb)).exp()
        * (theta - 1.0 + ln_s.exp())
}

/// Joe h-function, `θ ≥ 1`.
///
/// `h = S^(1/θ−1) ū^(θ−1) (1 − v̄^θ)`.
pub fn joe_h(u: f64, v: f64, theta: f64) -> f64 {
    let (ln_ub, ln_vb) = ((-u).ln_1p(), (-v).ln_1p());
    let ln_s = joe_log_sum(ln_ub, ln_vb, theta);
    ((1.0 / theta - 1.0) * ln_s + (theta - 1.0) * ln_ub).exp() * -(theta * ln_vb).exp_m1()
}

/// Ali–Mikhail–Haq density, `−1 ≤ θ < 1`.
///
/// With `D = 1 − θ(1−u)(1−v)`:
/// `c = [1 + θ((1+u)(1+v) − 3) + θ²(1−u)(1−v)] / D³`.
pub fn amh_pdf(u: f64, v: f64, theta: f64) -> f64 {
    let d = 1.0 - theta * (1.0 - u) * (1.0 - v);
    (1.0 + theta * ((1.0 + u) * (1.0 + v) - 3.0) + theta * theta * (1.0 - u) * (1.0 - v))
        / (d * d * d)
}

/// Ali–Mikhail–Haq h-function, `−1 ≤ θ < 1`.
///
/// `h = v(1 − θ(1−v)) / D²`.
pub fn amh_h(u: f64, v: f64, theta: f64) -> f64 {
    let d = 1.0 - theta * (1.0 - u) * (1.0 - v);
    v * (1.0 - theta * (1.0 - v)) / (d * d)
}
