//! The two supported content locales.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a string is not one of the two locale tokens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown locale token: '{0}'")]
pub struct ParseLocaleError(pub String);

/// One of exactly two supported content languages.
///
/// The design targets two locales; no third value exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    /// The language the site is authored and rendered in.
    Primary,
    /// The translated language.
    Secondary,
}

impl Locale {
    /// Returns the opposite locale.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }

    /// The literal token used in storage and markup attributes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "primary" => Ok(Self::Primary),
            "secondary" => Ok(Self::Secondary),
            other => Err(ParseLocaleError(other.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Locale::Primary, Locale::Secondary)]
    #[case(Locale::Secondary, Locale::Primary)]
    fn other_flips(#[case] locale: Locale, #[case] expected: Locale) {
        assert_that!(locale.other(), eq(expected));
        assert_that!(locale.other().other(), eq(locale));
    }

    #[rstest]
    #[case("primary", Locale::Primary)]
    #[case("secondary", Locale::Secondary)]
    fn parse_valid_tokens(#[case] token: &str, #[case] expected: Locale) {
        assert_that!(token.parse::<Locale>(), ok(eq(&expected)));
    }

    #[rstest]
    #[case("")]
    #[case("Primary")]
    #[case("en")]
    #[case("primary ")]
    fn parse_rejects_everything_else(#[case] token: &str) {
        assert_that!(token.parse::<Locale>(), err(anything()));
    }

    #[googletest::test]
    fn display_matches_token() {
        expect_that!(Locale::Primary.to_string(), eq("primary"));
        expect_that!(Locale::Secondary.to_string(), eq("secondary"));
    }
}
