//! Copula family tags.
//!
//! [`CopulaFamily`] is the closed vocabulary of bivariate families that may
//! sit on a vine edge. It is a pure tag: parameters are attached (and
//! validated) by [`PairCopula`](crate::copula::pair::PairCopula).
//!
//! ## Names
//! Canonical names follow the lower-case vocabulary
//! `independence, gauss, t, clayton, gumbel, frank, joe, amhaq, tawn, fgm,
//! plackett, survival-clayton, survival-gumbel, survival-joe`. Parsing is
//! case-insensitive and accepts a few common aliases (`gaussian`, `student`,
//! `amh`, `indep`, `surclayton`, ...).
use crate::copula::errors::CopulaError;
use std::str::FromStr;

/// Bivariate copula family tag.
///
/// - `Independence`: product copula, no parameters.
/// - `Gaussian`, `StudentT`: elliptical families (`[ρ]`, `[ρ, ν]`).
/// - `Clayton`, `Gumbel`, `Frank`, `Joe`, `Amh`: one-parameter Archimedean.
/// - `Tawn`: asymmetric extreme-value family (`[θ, ψ₁, ψ₂]`).
/// - `Fgm`, `Plackett`: one-parameter non-Archimedean families.
/// - `Survival*`: 180° rotations of Clayton, Gumbel and Joe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopulaFamily {
    Independence,
    Gaussian,
    StudentT,
    Clayton,
    Gumbel,
    Frank,
    Joe,
    Amh,
    Tawn,
    Fgm,
    Plackett,
    SurvivalClayton,
    SurvivalGumbel,
    SurvivalJoe,
}

impl CopulaFamily {
    /// Every supported family, in vocabulary order.
    pub const ALL: [CopulaFamily; 14] = [
        CopulaFamily::Independence,
        CopulaFamily::Gaussian,
        CopulaFamily::StudentT,
        CopulaFamily::Clayton,
        CopulaFamily::Gumbel,
        CopulaFamily::Frank,
        CopulaFamily::Joe,
        CopulaFamily::Amh,
        CopulaFamily::Tawn,
        CopulaFamily::Fgm,
        CopulaFamily::Plackett,
        CopulaFamily::SurvivalClayton,
        CopulaFamily::SurvivalGumbel,
        CopulaFamily::SurvivalJoe,
    ];

    /// Canonical lower-case name.
    pub const fn name(&self) -> &'static str {
        match self {
            CopulaFamily::Independence => "independence",
            CopulaFamily::Gaussian => "gauss",
            CopulaFamily::StudentT => "t",
            CopulaFamily::Clayton => "clayton",
            CopulaFamily::Gumbel => "gumbel",
            CopulaFamily::Frank => "frank",
            CopulaFamily::Joe => "joe",
            CopulaFamily::Amh => "amhaq",
            CopulaFamily::Tawn => "tawn",
            CopulaFamily::Fgm => "fgm",
            CopulaFamily::Plackett => "plackett",
            CopulaFamily::SurvivalClayton => "survival-clayton",
            CopulaFamily::SurvivalGumbel => "survival-gumbel",
            CopulaFamily::SurvivalJoe => "survival-joe",
        }
    }

    /// Number of parameters the family consumes.
    ///
    /// `Independence` reports 0 but accepts (and ignores) any parameter vector.
    pub const fn parameter_count(&self) -> usize {
        match self {
            CopulaFamily::Independence => 0,
            CopulaFamily::StudentT => 2,
            CopulaFamily::Tawn => 3,
            _ => 1,
        }
    }

    /// Whether `C(u, v) = C(v, u)` for every parameter value.
    pub const fn is_exchangeable(&self) -> bool {
        !matches!(self, CopulaFamily::Tawn)
    }
}

impl std::fmt::Display for CopulaFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CopulaFamily {
    type Err = CopulaError;

    /// Parse a family tag (case-insensitive; `_` and `-` are interchangeable).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        let family = match normalized.as_str() {
            "independence" | "indep" | "independent" => CopulaFamily::Independence,
            "gauss" | "gaussian" | "normal" => CopulaFamily::Gaussian,
            "t" | "student" | "student-t" => CopulaFamily::StudentT,
            "clayton" => CopulaFamily::Clayton,
            "gumbel" => CopulaFamily::Gumbel,
            "frank" => CopulaFamily::Frank,
            "joe" => CopulaFamily::Joe,
            "amhaq" | "amh" | "ali-mikhail-haq" => CopulaFamily::Amh,
            "tawn" => CopulaFamily::Tawn,
            "fgm" => CopulaFamily::Fgm,
            "plackett" => CopulaFamily::Plackett,
            "survival-clayton" | "surclayton" | "clayton180" => CopulaFamily::SurvivalClayton,
            "survival-gumbel" | "surgumbel" | "gumbel180" => CopulaFamily::SurvivalGumbel,
            "survival-joe" | "surjoe" | "joe180" => CopulaFamily::SurvivalJoe,
            _ => return Err(CopulaError::UnknownFamily { name: s.to_string() }),
        };
        Ok(family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Round-tripping canonical names through `FromStr`.
    // - Alias and case handling of the parser.
    // - Rejection of unknown names.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Every canonical name parses back to its own family.
    //
    // Given
    // -----
    // - All entries of `CopulaFamily::ALL`.
    //
    // Expect
    // ------
    // - `name().parse()` returns the same family.
    fn canonical_names_parse_back_to_their_family() {
        for family in CopulaFamily::ALL {
            let parsed: CopulaFamily = family.name().parse().expect("canonical name parses");
            assert_eq!(parsed, family);
        }
    }

    #[test]
    // Purpose
    // -------
    // The parser ignores case and accepts aliases.
    //
    // Given
    // -----
    // - "Gaussian", "AMH", "survival_clayton", " T ".
    //
    // Expect
    // ------
    // - Gaussian, Amh, SurvivalClayton, StudentT.
    fn parser_accepts_aliases_and_mixed_case() {
        assert_eq!("Gaussian".parse::<CopulaFamily>().unwrap(), CopulaFamily::Gaussian);
        assert_eq!("AMH".parse::<CopulaFamily>().unwrap(), CopulaFamily::Amh);
        assert_eq!(
            "survival_clayton".parse::<CopulaFamily>().unwrap(),
            CopulaFamily::SurvivalClayton
        );
        assert_eq!(" T ".parse::<CopulaFamily>().unwrap(), CopulaFamily::StudentT);
    }

    #[test]
    // Purpose
    // -------
    // Unknown names are rejected with `UnknownFamily` carrying the input.
    //
    // Given
    // -----
    // - The string "bb1".
    //
    // Expect
    // ------
    // - `Err(CopulaError::UnknownFamily { name: "bb1" })`.
    fn parser_rejects_unknown_family() {
        match "bb1".parse::<CopulaFamily>() {
            Err(CopulaError::UnknownFamily { name }) => assert_eq!(name, "bb1"),
            other => panic!("expected UnknownFamily, got {other:?}"),
        }
    }

    #[test]
    fn parameter_counts_match_vocabulary() {
        assert_eq!(CopulaFamily::Independence.parameter_count(), 0);
        assert_eq!(CopulaFamily::StudentT.parameter_count(), 2);
        assert_eq!(CopulaFamily::Tawn.parameter_count(), 3);
        assert_eq!(CopulaFamily::SurvivalJoe.parameter_count(), 1);
    }
}
