//! Static bidirectional table of per-locale document paths.

use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

use crate::locale::Locale;

/// One translated-document pair: the same document under each locale.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RoutePair {
    /// Absolute path of the primary-locale document.
    pub primary: String,
    /// Absolute path of the secondary-locale document.
    pub secondary: String,
}

/// Closed lookup table linking primary and secondary document paths.
///
/// The table is fixed data: adding a translated document means adding one
/// pair, not code.
#[derive(Debug, Clone, Default)]
pub struct RouteMap {
    /// primary path → secondary path
    to_secondary: HashMap<String, String>,
    /// secondary path → primary path
    to_primary: HashMap<String, String>,
}

impl RouteMap {
    /// Builds the table from literal path pairs.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = RoutePair>) -> Self {
        let mut to_secondary = HashMap::new();
        let mut to_primary = HashMap::new();
        for pair in pairs {
            to_secondary.insert(pair.primary.clone(), pair.secondary.clone());
            to_primary.insert(pair.secondary, pair.primary);
        }
        Self { to_secondary, to_primary }
    }

    /// Builds the table from a JSON array of pairs.
    ///
    /// # Errors
    /// Returns the underlying parse error for malformed JSON.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let pairs: Vec<RoutePair> = serde_json::from_str(raw)?;
        Ok(Self::from_pairs(pairs))
    }

    /// Looks up the counterpart of `path` under `target`.
    ///
    /// Works from either side of a pair; a path already on the target side
    /// maps to itself. Returns `None` for paths outside the table — callers
    /// must not synthesize a guessed path.
    #[must_use]
    pub fn translate(&self, path: &str, target: Locale) -> Option<&str> {
        let (forward, reverse) = match target {
            Locale::Secondary => (&self.to_secondary, &self.to_primary),
            Locale::Primary => (&self.to_primary, &self.to_secondary),
        };
        if let Some(counterpart) = forward.get(path) {
            return Some(counterpart.as_str());
        }
        // Already on the target side of a known pair
        reverse.get_key_value(path).map(|(key, _)| key.as_str())
    }

    /// Number of pairs in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.to_secondary.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_secondary.is_empty()
    }
}
