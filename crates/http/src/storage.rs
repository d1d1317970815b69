//! Durable key-value backends for the token store

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

/// Storage backend errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem failure
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document could not be encoded or decoded
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend is not reachable (e.g. no `window.localStorage`)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A string key-value store that survives restarts of the client
///
/// Implementations must apply each call immediately: a value written by
/// `set` is visible to a fresh store instance built on the same backend.
pub trait TokenStorage: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage, mainly for tests and headless use
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held
    pub fn len(&self) -> usize {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no keys are held
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.remove(key);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(not(target_arch = "wasm32"))]
mod file {
    use super::{StorageError, TokenStorage};
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};
    use std::sync::{Mutex, PoisonError};

    /// Default token file name
    pub const TOKEN_FILE: &str = "dashboard-tokens.json";

    /// JSON file backed storage for native clients
    ///
    /// The whole document is rewritten on every mutation. When the last key
    /// is removed the file is deleted.
    #[derive(Debug)]
    pub struct FileStorage {
        path: PathBuf,
        lock: Mutex<()>,
    }

    impl FileStorage {
        /// Store tokens in `path`
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self {
                path: path.into(),
                lock: Mutex::new(()),
            }
        }

        /// Store tokens in [`TOKEN_FILE`] under `dir`
        pub fn in_dir(dir: &Path) -> Self {
            Self::new(dir.join(TOKEN_FILE))
        }

        /// Location of the token file
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn read(&self) -> Result<BTreeMap<String, String>, StorageError> {
            match std::fs::read_to_string(&self.path) {
                Ok(content) => Ok(serde_json::from_str(&content)?),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
                Err(e) => Err(e.into()),
            }
        }

        fn write(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
            if values.is_empty() {
                return match std::fs::remove_file(&self.path) {
                    Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
                    _ => Ok(()),
                };
            }

            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(values)?;
            std::fs::write(&self.path, json)?;
            Ok(())
        }
    }

    impl TokenStorage for FileStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(self.read()?.remove(key))
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
            let mut values = self.read()?;
            values.insert(key.to_string(), value.to_string());
            self.write(&values)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
            let mut values = self.read()?;
            if values.remove(key).is_some() {
                self.write(&values)?;
            }
            Ok(())
        }
    }
}
