//! Translation data and the engines that apply it.

/// Immutable dictionary configuration
mod dictionary;
/// In-place document translation
mod engine;
/// Embedded per-document payload
mod payload;
/// Restricted markdown rendering
mod render;

pub use dictionary::{
    DictionaryError,
    PhraseEntry,
    UiDictionary,
    ValidationError,
};
pub use engine::{
    DomTranslationEngine,
    EngineSelectors,
};
pub use payload::{
    LocaleText,
    PayloadError,
    TranslationPayload,
};
pub use render::ContentRenderer;
