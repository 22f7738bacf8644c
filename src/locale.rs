//! Locale state: the two supported locales, resolution and persistence.

/// Active-locale resolution
mod resolver;
/// Persisted locale preference
mod store;
/// Locale type and parsing
mod types;

pub use resolver::ResolverConfig;
pub use store::{
    DEFAULT_PREFERENCE_KEY,
    FileStorage,
    LocaleStore,
    MemoryStorage,
    PreferenceStorage,
    StorageError,
};
pub use types::{
    Locale,
    ParseLocaleError,
};
