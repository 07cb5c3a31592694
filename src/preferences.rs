use crate::error::AppError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

// Boolean key/value store. Missing keys read as false.
pub trait PreferencesStore: Send + Sync {
    fn save_pref(&self, key: &str, value: bool);
    fn get_boolean_pref(&self, key: &str) -> bool;
}

#[derive(Default)]
pub struct InMemoryPreferences {
    values: Mutex<BTreeMap<String, bool>>,
}

impl InMemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferencesStore for InMemoryPreferences {
    fn save_pref(&self, key: &str, value: bool) {
        match self.values.lock() {
            Ok(mut values) => {
                values.insert(key.to_string(), value);
            }
            Err(e) => tracing::error!("Failed to acquire preferences lock for key {}: {}", key, e),
        }
    }

    fn get_boolean_pref(&self, key: &str) -> bool {
        match self.values.lock() {
            Ok(values) => values.get(key).copied().unwrap_or(false),
            Err(e) => {
                tracing::error!("Failed to acquire preferences lock for key {}: {}", key, e);
                false
            }
        }
    }
}

/// Preferences kept in a TOML file of `key = bool` pairs.
///
/// The file is read once when opened and rewritten after every save.
pub struct FilePreferences {
    path: PathBuf,
    values: Mutex<BTreeMap<String, bool>>,
}

impl FilePreferences {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            toml::from_str(&contents).map_err(|e| {
                tracing::error!("Failed to parse preferences file {}: {}", path.display(), e);
                AppError::ParseError(e.to_string())
            })?
        } else {
            tracing::debug!("No preferences file at {}, starting empty", path.display());
            BTreeMap::new()
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    fn persist(&self, values: &BTreeMap<String, bool>) -> Result<(), AppError> {
        let contents = toml::to_string(values)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl PreferencesStore for FilePreferences {
    fn save_pref(&self, key: &str, value: bool) {
        match self.values.lock() {
            Ok(mut values) => {
                values.insert(key.to_string(), value);
                if let Err(e) = self.persist(&values) {
                    tracing::warn!(
                        "Failed to write preferences to {}: {}",
                        self.path.display(),
                        e
                    );
                }
            }
            Err(e) => tracing::error!("Failed to acquire preferences lock for key {}: {}", key, e),
        }
    }

    fn get_boolean_pref(&self, key: &str) -> bool {
        match self.values.lock() {
            Ok(values) => values.get(key).copied().unwrap_or(false),
            Err(e) => {
                tracing::error!("Failed to acquire preferences lock for key {}: {}", key, e);
                false
            }
        }
    }
}

#[derive(Clone)]
pub struct PreferencesUseCase {
    store: Arc<dyn PreferencesStore>,
}

impl PreferencesUseCase {
    pub fn new(store: Arc<dyn PreferencesStore>) -> Self {
        Self { store }
    }

    pub fn save_pref(&self, key: &str, value: bool) {
        tracing::debug!("Saving preference {} = {}", key, value);
        self.store.save_pref(key, value);
    }

    pub fn get_boolean_pref(&self, key: &str) -> bool {
        self.store.get_boolean_pref(key)
    }
}
