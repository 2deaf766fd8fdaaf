//! Closed-form bivariate copula formulas, grouped by family class.
//!
//! Every function here is a scalar kernel on arguments already known to lie
//! in (0, 1) with parameters already validated; domain checks and
//! vectorization live in [`PairCopula`](crate::copula::pair::PairCopula).

pub mod archimedean;
pub mod elliptical;
pub mod extreme_value;
pub mod non_archimedean;
