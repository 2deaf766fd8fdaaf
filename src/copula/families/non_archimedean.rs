//! Farlie–Gumbel–Morgenstern and Plackett pair copulas.
//!
//! Both families are exchangeable; `*_h(u, v, θ)` is `∂C/∂u`.

/// Threshold below which `|θ − 1|` is treated as the Plackett independence
/// limit.
const PLACKETT_UNIT_TOL: f64 = 1e-12;

/// FGM density, `−1 ≤ θ ≤ 1`: `c = 1 + θ(1−2u)(1−2v)`.
pub fn fgm_pdf(u: f64, v: f64, theta: f64) -> f64 {
    1.0 + theta * (1.0 - 2.0 * u) * (1.0 - 2.0 * v)
}

/// FGM h-function: `h = v(1 + θ(1−v)(1−2u))`.
pub fn fgm_h(u: f64, v: f64, theta: f64) -> f64 {
    v * (1.0 + theta * (1.0 - v) * (1.0 - 2.0 * u))
}

/// Plackett density, `θ > 0`.
///
/// With `η = θ − 1` and `R = (1 + η(u+v))² − 4θηuv`:
/// `c = θ(1 + η(u + v − 2uv)) / R^(3/2)`. `θ = 1` is independence.
pub fn plackett_pdf(u: f64, v: f64, theta: f64) -> f64 {
    let eta = theta - 1.0;
    if eta.abs() < PLACKETT_UNIT_TOL {
        return 1.0;
    }
    let r = plackett_discriminant(u, v, theta);
    theta * (1.0 + eta * (u + v - 2.0 * u * v)) / (r * r.sqrt())
}

/// Plackett h-function: `h = ½ − (1 + ηu − (θ+1)v) / (2√R)`.
pub fn plackett_h(u: f64, v: f64, theta: f64) -> f64 {
    let eta = theta - 1.0;
    if eta.abs() < PLACKETT_UNIT_TOL {
        return v;
    }
    let r = plackett_discriminant(u, v, theta);
    0.5 - (1.0 + eta * u - (theta + 1.0) * v) / (2.0 * r.sqrt())
}

fn plackett_discriminant(u: f64, v: f64, theta: f64) -> f64 {
    let eta = theta - 1.0;
    let lin = 1.0 + eta * (u + v);
    lin * lin - 4.0 * theta * eta * u * v
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - FGM and Plackett reference values at (u, v) = (0.3, 0.6).
    // - The Plackett independence limit θ = 1.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // FGM (θ = 0.5) matches hand-computed values.
    //
    // Given
    // -----
    // - (u, v) = (0.3, 0.6).
    //
    // Expect
    // ------
    // - c = 0.96, h(v|u) = 0.648, h(u|v) = 0.279.
    fn fgm_matches_reference_values() {
        assert_relative_eq!(fgm_pdf(0.3, 0.6, 0.5), 0.96, epsilon = 1e-14);
        assert_relative_eq!(fgm_h(0.3, 0.6, 0.5), 0.648, epsilon = 1e-14);
        assert_relative_eq!(fgm_h(0.6, 0.3, 0.5), 0.279, epsilon = 1e-14);
    }

    #[test]
    // Purpose
    // -------
    // Plackett (θ = 3) matches the symbolic reference values.
    //
    // Given
    // -----
    // - (u, v) = (0.3, 0.6).
    //
    // Expect
    // ------
    // - c ≈ 0.944866811, h(v|u) ≈ 0.713200716, h(u|v) ≈ 0.233499105.
    fn plackett_matches_reference_values() {
        assert_relative_eq!(plackett_pdf(0.3, 0.6, 3.0), 0.944_866_811_121_455_3, max_relative = 1e-12);
        assert_relative_eq!(plackett_h(0.3, 0.6, 3.0), 0.713_200_716_355_610_4, max_relative = 1e-12);
        assert_relative_eq!(plackett_h(0.6, 0.3, 3.0), 0.233_499_104_555_486_96, max_relative = 1e-12);
    }

    #[test]
    fn plackett_unit_theta_is_independence() {
        assert_eq!(plackett_pdf(0.2, 0.7, 1.0), 1.0);
        assert_eq!(plackett_h(0.2, 0.7, 1.0), 0.7);
    }
}
