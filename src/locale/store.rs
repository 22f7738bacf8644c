//! Persisted locale preference.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::types::Locale;

/// Storage key holding the locale preference unless overridden.
pub const DEFAULT_PREFERENCE_KEY: &str = "page.locale";

/// Error from a preference storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backend is unavailable or blocked.
    #[error("storage backend unavailable: {0}")]
    Io(#[from] io::Error),
}

/// Key-value storage shared with the rest of the client.
///
/// Values stored here outlive a single page lifetime; the backend may
/// legitimately be cleared at any time by the user or the environment.
pub trait PreferenceStorage {
    /// Reads the value stored under `key`.
    fn read(&self, key: &str) -> Option<String>;
    /// Writes `value` under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    /// Removes `key` if present.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory backend; state lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    /// Stored key-value pairs.
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed backend: one file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Directory holding one file per stored key.
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a storage rooted at `dir`. The directory is created lazily on
    /// the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl PreferenceStorage for FileStorage {
    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.dir.join(key)).ok()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.dir.join(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Reads and writes the persisted locale preference.
///
/// When the backend fails, the last value set is kept in memory so the
/// current page keeps working; it simply will not survive a reload. That
/// degradation is silent: no error ever reaches the visitor path.
pub struct LocaleStore {
    /// Backend shared with the rest of the client.
    storage: Box<dyn PreferenceStorage>,
    /// Key the locale token is stored under.
    key: String,
    /// In-memory fallback for the current page lifetime.
    session: Option<Locale>,
}

impl LocaleStore {
    /// Creates a store using [`DEFAULT_PREFERENCE_KEY`].
    #[must_use]
    pub fn new(storage: Box<dyn PreferenceStorage>) -> Self {
        Self::with_key(storage, DEFAULT_PREFERENCE_KEY)
    }

    /// Creates a store using a custom key.
    #[must_use]
    pub fn with_key(storage: Box<dyn PreferenceStorage>, key: impl Into<String>) -> Self {
        Self { storage, key: key.into(), session: None }
    }

    /// Returns the stored preference.
    ///
    /// An unrecognized stored token is treated as absent.
    #[must_use]
    pub fn get(&self) -> Option<Locale> {
        match self.storage.read(&self.key) {
            Some(token) => match token.parse() {
                Ok(locale) => Some(locale),
                Err(_) => {
                    tracing::debug!("ignoring unrecognized stored locale token: {token:?}");
                    self.session
                }
            },
            None => self.session,
        }
    }

    /// Persists `locale`. Backend failure degrades to the session value.
    pub fn set(&mut self, locale: Locale) {
        self.session = Some(locale);
        if let Err(e) = self.storage.write(&self.key, locale.as_str()) {
            tracing::debug!("locale preference not persisted: {e}");
        }
    }

    /// Clears the preference.
    pub fn clear(&mut self) {
        self.session = None;
        if let Err(e) = self.storage.remove(&self.key) {
            tracing::debug!("locale preference not cleared from backend: {e}");
        }
    }
}

impl fmt::Debug for LocaleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocaleStore")
            .field("storage", &"<dyn PreferenceStorage>")
            .field("key", &self.key)
            .field("session", &self.session)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    /// Backend whose writes always fail, as when client storage is blocked.
    #[derive(Debug, Default)]
    struct BlockedStorage;

    impl PreferenceStorage for BlockedStorage {
        fn read(&self, _key: &str) -> Option<String> {
            None
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "blocked")))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(io::Error::new(io::ErrorKind::PermissionDenied, "blocked")))
        }
    }

    #[googletest::test]
    fn get_returns_none_on_empty_storage() {
        let store = LocaleStore::new(Box::new(MemoryStorage::new()));

        expect_that!(store.get(), none());
    }

    #[googletest::test]
    fn set_then_get_round_trips() {
        let mut store = LocaleStore::new(Box::new(MemoryStorage::new()));

        store.set(Locale::Secondary);

        expect_that!(store.get(), some(eq(Locale::Secondary)));
    }

    #[googletest::test]
    fn clear_removes_the_preference() {
        let mut store = LocaleStore::new(Box::new(MemoryStorage::new()));
        store.set(Locale::Secondary);

        store.clear();

        expect_that!(store.get(), none());
    }

    #[rstest]
    #[case("en")]
    #[case("Secondary")]
    #[case("")]
    fn unrecognized_stored_token_is_absent(#[case] token: &str) {
        let mut backend = MemoryStorage::new();
        backend.write(DEFAULT_PREFERENCE_KEY, token).unwrap();
        let store = LocaleStore::new(Box::new(backend));

        assert_that!(store.get(), none());
    }

    #[googletest::test]
    fn blocked_backend_degrades_to_session_value() {
        let mut store = LocaleStore::new(Box::new(BlockedStorage));

        store.set(Locale::Secondary);

        // Works for the current page lifetime
        expect_that!(store.get(), some(eq(Locale::Secondary)));

        // But does not survive a "reload" (a fresh store over the same backend)
        let fresh = LocaleStore::new(Box::new(BlockedStorage));
        expect_that!(fresh.get(), none());
    }

    #[googletest::test]
    fn file_storage_survives_a_new_store() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = LocaleStore::new(Box::new(FileStorage::new(temp_dir.path())));

        store.set(Locale::Secondary);

        let fresh = LocaleStore::new(Box::new(FileStorage::new(temp_dir.path())));
        expect_that!(fresh.get(), some(eq(Locale::Secondary)));
    }

    #[googletest::test]
    fn file_storage_clear_removes_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = LocaleStore::new(Box::new(FileStorage::new(temp_dir.path())));
        store.set(Locale::Primary);

        store.clear();

        let fresh = LocaleStore::new(Box::new(FileStorage::new(temp_dir.path())));
        expect_that!(fresh.get(), none());
    }

    #[googletest::test]
    fn custom_key_is_respected() {
        let mut store = LocaleStore::with_key(Box::new(MemoryStorage::new()), "site.lang");

        store.set(Locale::Secondary);

        expect_that!(store.get(), some(eq(Locale::Secondary)));
    }
}
