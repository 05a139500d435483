//! Local key/value storage for forms and answers.
//!
//! Everything is kept as whole JSON arrays under two keys, [`ALL_FORMS_KEY`]
//! and [`ALL_ANSWERS_KEY`]. Every write replaces the whole array.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use formbuilder_types::FormData;
use thiserror::Error;

/// Key holding the JSON array of saved forms.
pub const ALL_FORMS_KEY: &str = "allForms";

/// Key holding the JSON array of stored answers.
pub const ALL_ANSWERS_KEY: &str = "allAnswers";

/// Error type for storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O error.
    #[error("Failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Temp file written but could not be moved into place.
    #[error("Failed to complete write of {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Key cannot be mapped to a storage location.
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    /// Stored document does not match the form model.
    #[error("Stored value under '{key}' could not be read")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Value could not be encoded as JSON.
    #[error("Failed to serialize value for '{key}'")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A string key/value store, modelled on browser local storage.
pub trait Storage {
    /// Read the value stored under `key`, `None` if nothing is stored.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the value under `key`. Removing a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory storage, lost when dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `key`/`value` pairs.
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }

    /// Get the number of stored keys.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Directory-backed storage with one `<key>.json` file per key.
///
/// Writes go to a temp file that is renamed into place, so an interrupted
/// write leaves the previous document.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir` as the storage directory. It is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The storage directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file holding `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error<'a>(operation: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> StoreError + 'a {
    move |source| StoreError::Io {
        operation,
        path: path.to_path_buf(),
        source,
    }
}

/// Write `value` to a new file at `path` and flush it to disk.
fn write_synced(path: &Path, value: &str) -> Result<(), StoreError> {
    let mut file = File::create(path).map_err(io_error("create", path))?;
    file.write_all(value.as_bytes()).map_err(io_error("write", path))?;
    file.sync_all().map_err(io_error("sync", path))
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io {
                operation: "read",
                path,
                source: e,
            }),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let temp_path = path.with_extension("json.tmp");

        fs::create_dir_all(&self.dir).map_err(|e| StoreError::Io {
            operation: "create directory",
            path: self.dir.clone(),
            source: e,
        })?;

        let written = write_synced(&temp_path, value).and_then(|()| {
            fs::rename(&temp_path, &path).map_err(|e| StoreError::AtomicWriteFailed {
                temp_path: temp_path.clone(),
                target_path: path.clone(),
                source: e,
            })
        });
        if written.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        written?;

        tracing::debug!(key, path = %path.display(), "stored item");
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io {
                operation: "remove",
                path,
                source: e,
            }),
        }
    }
}

/// Typed access to the form and answer arrays of a [`Storage`].
#[derive(Debug, Clone)]
pub struct FormStore<S> {
    storage: S,
}

impl<S: Storage> FormStore<S> {
    /// Wrap a storage.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Get the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Unwrap the underlying storage.
    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Load the saved forms. A missing key means no forms.
    pub fn forms(&self) -> Result<Vec<FormData>, StoreError> {
        self.read_list(ALL_FORMS_KEY)
    }

    /// Replace the saved forms.
    pub fn save_forms(&mut self, forms: &[FormData]) -> Result<(), StoreError> {
        self.write_list(ALL_FORMS_KEY, forms)
    }

    /// Load the stored answers. A missing key means no answers.
    pub fn answers(&self) -> Result<Vec<FormData>, StoreError> {
        self.read_list(ALL_ANSWERS_KEY)
    }

    /// Replace the stored answers.
    pub fn save_answers(&mut self, answers: &[FormData]) -> Result<(), StoreError> {
        self.write_list(ALL_ANSWERS_KEY, answers)
    }

    fn read_list(&self, key: &str) -> Result<Vec<FormData>, StoreError> {
        match self.storage.get_item(key)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Deserialize {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write_list(&mut self, key: &str, list: &[FormData]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(list).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.storage.set_item(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formbuilder_types::{FieldType, initialize_field};
    use tempfile::tempdir;

    fn sample_form() -> FormData {
        FormData::new("Contact").with_field(initialize_field(
            FieldType::Email,
            "email",
            true,
            0.0,
            100.0,
            Vec::new(),
        ))
    }

    #[test]
    fn missing_keys_are_empty_lists() {
        let store = FormStore::new(MemoryStorage::new());
        assert!(store.forms().unwrap().is_empty());
        assert!(store.answers().unwrap().is_empty());
    }

    #[test]
    fn memory_round_trip() {
        let mut store = FormStore::new(MemoryStorage::new());
        let form = sample_form();
        store.save_forms(std::slice::from_ref(&form)).unwrap();

        assert_eq!(store.forms().unwrap(), vec![form]);
        assert!(store.answers().unwrap().is_empty());
        assert_eq!(store.storage().len(), 1);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let store = FormStore::new(MemoryStorage::new().with_item(ALL_FORMS_KEY, "{not json"));
        let err = store.forms().unwrap_err();
        assert!(matches!(err, StoreError::Deserialize { ref key, .. } if key == ALL_FORMS_KEY));
    }

    #[test]
    fn file_storage_round_trip() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("data"));

        assert_eq!(storage.get_item(ALL_FORMS_KEY).unwrap(), None);

        storage.set_item(ALL_FORMS_KEY, "[]").unwrap();
        assert_eq!(storage.get_item(ALL_FORMS_KEY).unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("data").join("allForms.json").exists());
        assert!(!dir.path().join("data").join("allForms.json.tmp").exists());

        storage.remove_item(ALL_FORMS_KEY).unwrap();
        assert_eq!(storage.get_item(ALL_FORMS_KEY).unwrap(), None);
        storage.remove_item(ALL_FORMS_KEY).unwrap();
    }

    #[test]
    fn failed_write_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        // A non-empty directory where the document should go makes the rename fail.
        let blocker = dir.path().join("allForms.json");
        fs::create_dir_all(blocker.join("inner")).unwrap();

        let mut storage = FileStorage::new(dir.path());
        let err = storage.set_item(ALL_FORMS_KEY, "[]").unwrap_err();

        assert!(matches!(err, StoreError::AtomicWriteFailed { .. }));
        assert!(!dir.path().join("allForms.json.tmp").exists());
        assert!(blocker.join("inner").is_dir());
    }

    #[test]
    fn file_storage_rejects_path_like_keys() {
        let storage = FileStorage::new("/tmp/unused");
        assert!(matches!(
            storage.path_for("../escape"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(storage.path_for(""), Err(StoreError::InvalidKey(_))));
    }

    #[test]
    fn form_store_over_files() {
        let dir = tempdir().unwrap();
        let mut store = FormStore::new(FileStorage::new(dir.path()));
        let form = sample_form();

        store.save_answers(std::slice::from_ref(&form)).unwrap();

        let reopened = FormStore::new(FileStorage::new(dir.path()));
        assert_eq!(reopened.answers().unwrap(), vec![form]);
        assert!(reopened.forms().unwrap().is_empty());
    }
}
