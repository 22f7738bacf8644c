//! Active-locale resolution from URL path, stored preference and a default.

use super::types::Locale;

/// Configuration for locale resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// URL path prefix under which secondary-locale documents live.
    ///
    /// This prefix is the sole URL signal the resolver reads.
    pub secondary_prefix: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { secondary_prefix: "/alt/".to_string() }
    }
}

impl ResolverConfig {
    /// Computes the active locale.
    ///
    /// Precedence: a path under the secondary prefix always wins, then a
    /// valid stored preference, then `default`. Pure function of its inputs.
    #[must_use]
    pub fn resolve(&self, path: &str, stored: Option<Locale>, default: Locale) -> Locale {
        if path.starts_with(&self.secondary_prefix) {
            return Locale::Secondary;
        }
        stored.unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn config() -> ResolverConfig {
        ResolverConfig { secondary_prefix: "/alt/".to_string() }
    }

    #[rstest]
    // Secondary prefix on the path wins regardless of stored preference
    #[case("/alt/posts/hello/", None, Locale::Primary, Locale::Secondary)]
    #[case("/alt/posts/hello/", Some(Locale::Primary), Locale::Primary, Locale::Secondary)]
    #[case("/alt/", Some(Locale::Primary), Locale::Primary, Locale::Secondary)]
    // Otherwise a stored preference wins over the default
    #[case("/posts/hello/", Some(Locale::Secondary), Locale::Primary, Locale::Secondary)]
    #[case("/posts/hello/", Some(Locale::Primary), Locale::Primary, Locale::Primary)]
    // No signal at all falls back to the default
    #[case("/posts/hello/", None, Locale::Primary, Locale::Primary)]
    #[case("/", None, Locale::Primary, Locale::Primary)]
    // The prefix must be a prefix, not merely contained
    #[case("/posts/alt/", None, Locale::Primary, Locale::Primary)]
    fn resolve_cases(
        #[case] path: &str,
        #[case] stored: Option<Locale>,
        #[case] default: Locale,
        #[case] expected: Locale,
    ) {
        assert_that!(config().resolve(path, stored, default), eq(expected));
    }

    #[googletest::test]
    fn resolve_is_deterministic() {
        let config = config();
        let first = config.resolve("/posts/a/", Some(Locale::Secondary), Locale::Primary);
        let second = config.resolve("/posts/a/", Some(Locale::Secondary), Locale::Primary);

        expect_that!(first, eq(second));
    }
}
