//! Embedded per-document translation payload.
//!
//! The build pipeline extracts translated title/body strings from document
//! metadata and serializes them into the rendered page; this module is the
//! consuming side of that contract.

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::locale::Locale;

/// Error parsing an embedded payload.
#[derive(Error, Debug)]
pub enum PayloadError {
    /// The embedded string is not valid JSON.
    #[error("failed to parse translation payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One string per locale; either side may be absent.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LocaleText {
    /// Primary-locale string.
    pub primary: Option<String>,
    /// Secondary-locale string.
    pub secondary: Option<String>,
}

impl LocaleText {
    /// The string for `locale`, if present.
    #[must_use]
    pub fn get(&self, locale: Locale) -> Option<&str> {
        match locale {
            Locale::Primary => self.primary.as_deref(),
            Locale::Secondary => self.secondary.as_deref(),
        }
    }
}

/// Per-document translated title and body.
///
/// Body strings use the restricted markdown subset and are rendered through
/// [`ContentRenderer`](super::ContentRenderer) before insertion. Absence of
/// a payload or of a locale side simply means no content-body translation is
/// available for that document.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct TranslationPayload {
    /// Translated document title.
    pub title: LocaleText,
    /// Translated document body (raw restricted markdown).
    pub content: LocaleText,
}

impl TranslationPayload {
    /// Parses an embedded payload string.
    ///
    /// # Errors
    /// Returns [`PayloadError::Parse`] for malformed JSON.
    pub fn parse(raw: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Parses an embedded payload, logging and discarding malformed input.
    ///
    /// A malformed payload skips the whole content-translation step;
    /// dictionary translation proceeds independently.
    #[must_use]
    pub fn parse_embedded(raw: &str) -> Option<Self> {
        match Self::parse(raw) {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::warn!("skipping content translation: {e}");
                None
            }
        }
    }
}
