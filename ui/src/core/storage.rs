//! Local persistence for user preferences (currently just the theme).
//!
//! - Web: `window.localStorage`.
//! - Native: a small JSON map under the platform config directory.
//! - Tests: [`MemoryStore`].

use std::collections::BTreeMap;

use crate::core::error::StorageError;

pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::PreferenceStore;
    use crate::core::error::StorageError;

    /// `window.localStorage`; every call re-resolves the storage object.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct LocalStorage;

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    impl PreferenceStore for LocalStorage {
        fn get(&self, key: &str) -> Option<String> {
            storage()?.get_item(key).ok().flatten()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            storage()
                .ok_or(StorageError::Unavailable)?
                .set_item(key, value)
                .map_err(|_| StorageError::Unavailable)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::{Path, PathBuf};

    use directories::ProjectDirs;
    use tracing::warn;

    use super::PreferenceStore;
    use crate::core::error::StorageError;

    const FILE_NAME: &str = "preferences.json";

    /// JSON key/value file, rewritten on every `set`.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
        values: BTreeMap<String, String>,
    }

    impl FileStore {
        pub fn open<P: AsRef<Path>>(path: P) -> Self {
            let path = path.as_ref().to_path_buf();
            let values = match fs::read_to_string(&path) {
                Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                    warn!(path = %path.display(), %err, "ignoring unreadable preferences");
                    BTreeMap::new()
                }),
                Err(_) => BTreeMap::new(),
            };
            Self { path, values }
        }

        /// `<config dir>/velostat/preferences.json`, `None` when the platform has no home.
        pub fn open_default() -> Option<Self> {
            let dirs = ProjectDirs::from("org", "velostat", "velostat")?;
            Some(Self::open(dirs.config_dir().join(FILE_NAME)))
        }

        pub fn path(&self) -> &Path {
            &self.path
        }

        fn flush(&self) -> Result<(), StorageError> {
            let io_err = |source| StorageError::Io {
                path: self.path.clone(),
                source,
            };
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
            let encoded = serde_json::to_string_pretty(&self.values)?;
            fs::write(&self.path, encoded).map_err(io_err)
        }
    }

    impl PreferenceStore for FileStore {
        fn get(&self, key: &str) -> Option<String> {
            self.values.get(key).cloned()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            self.values.insert(key.to_string(), value.to_string());
            self.flush()
        }
    }
}

/// Best store for the current target.
pub fn default_store() -> Box<dyn PreferenceStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Box::new(LocalStorage)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        match FileStore::open_default() {
            Some(store) => Box::new(store),
            None => Box::new(MemoryStore::new()),
        }
    }
}
