//! Immutable translation dictionaries passed into the engine.
//!
//! All tables map a canonical primary-locale string to its secondary-locale
//! equivalent. They are constructor inputs, never module-level singletons, so
//! independent documents and tests use independent instances.

use std::collections::HashMap;
use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Error describing one invalid dictionary field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("dictionary error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "phrases[0]")
    pub field_path: String,
    /// Human-readable description.
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error.
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Error loading or validating a dictionary file.
#[derive(Error, Debug)]
pub enum DictionaryError {
    /// One or more fields failed validation.
    #[error("dictionary validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// The dictionary file could not be read.
    #[error("failed to load dictionary file: {0}")]
    Io(#[from] std::io::Error),

    /// The dictionary file is not valid JSON.
    #[error("failed to parse dictionary: {0}")]
    Parse(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One ordered phrase replacement for the partial-substring fallback.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PhraseEntry {
    /// Primary-locale phrase to search for.
    pub from: String,
    /// Secondary-locale replacement.
    pub to: String,
}

/// Fixed UI-string dictionaries for one site.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UiDictionary {
    /// Whole-string labels: navigation, search placeholder and cancel,
    /// panel headings, post-meta posted/updated prefixes, share and
    /// related-posts labels, prev/next aria-labels, footer license text,
    /// the external call-to-action button.
    pub labels: HashMap<String, String>,

    /// Fixed tag vocabulary.
    pub tags: HashMap<String, String>,

    /// Known post titles.
    pub titles: HashMap<String, String>,

    /// Known post descriptions, matched as whole strings.
    pub descriptions: HashMap<String, String>,

    /// Known post paths on listing pages (primary path → secondary path).
    pub paths: HashMap<String, String>,

    /// Ordered phrase table for the partial-substring fallback.
    ///
    /// The scan runs in table order; when several phrases overlap in one
    /// string, the first-listed phrase wins. That tie-break is load-bearing,
    /// which is why this is a `Vec` and not a map.
    pub phrases: Vec<PhraseEntry>,
}

impl UiDictionary {
    /// # Errors
    /// - A phrase with an empty source string
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (index, phrase) in self.phrases.iter().enumerate() {
            if phrase.from.is_empty() {
                errors.push(ValidationError::new(
                    format!("phrases[{index}]"),
                    "the source phrase cannot be empty",
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Loads and validates a dictionary JSON file.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation error
    pub fn load_from_path(path: &Path) -> Result<Self, DictionaryError> {
        tracing::debug!("Loading dictionary from: {:?}", path);

        let content = std::fs::read_to_string(path)?;
        let dictionary: Self = serde_json::from_str(&content)?;
        dictionary.validate().map_err(DictionaryError::ValidationErrors)?;

        Ok(dictionary)
    }

    /// Applies the ordered phrase table to `text`.
    ///
    /// Returns `None` when no phrase matched at all, so callers can skip the
    /// original-value cache and leave the text untouched.
    #[must_use]
    pub fn apply_phrases(&self, text: &str) -> Option<String> {
        let mut result = text.to_string();
        let mut matched = false;
        for phrase in &self.phrases {
            if phrase.from.is_empty() {
                continue;
            }
            if result.contains(&phrase.from) {
                result = result.replace(&phrase.from, &phrase.to);
                matched = true;
            }
        }
        matched.then_some(result)
    }
}
