//! copula — bivariate copula families, parameter validation, and vectorized
//! density / h-function primitives.
//!
//! Purpose
//! -------
//! Provide the pair-copula building blocks consumed by the vine layer. Each
//! vine edge carries one [`PairCopula`]; the vine engine only ever calls its
//! vectorized [`PairCopula::density`] and [`PairCopula::hfunction`].
//!
//! Key behaviors
//! -------------
//! - [`CopulaFamily`] is the closed vocabulary of supported families with
//!   case-insensitive parsing from string tags.
//! - [`PairCopula::new`] validates a parameter vector against the family
//!   domain (see [`validation`]) and returns a variant carrying the payload.
//! - [`families`] holds the scalar closed-form formulas, grouped by family
//!   class (elliptical, Archimedean, extreme-value, others).
//! - [`errors`] defines [`CopulaError`] / [`CopulaResult`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Density and h-function arguments must lie in the open interval (0, 1);
//!   violations are reported with the first offending row.
//! - Scalar kernels in [`families`] assume validated inputs and perform no
//!   checks of their own.
//!
//! Conventions
//! -----------
//! - For `C(u1, u2)`, [`HDirection::GivenFirst`] is `∂C/∂u1` and
//!   [`HDirection::GivenSecond`] is `∂C/∂u2`.
//! - The layer performs no I/O and no logging.

pub mod errors;
pub mod families;
pub mod family;
pub mod pair;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{CopulaError, CopulaResult};
pub use self::family::CopulaFamily;
pub use self::pair::{HDirection, PairCopula};
pub use self::validation::validate_parameters;
