/// File-backed preference store
///
/// Persists settings as a flat JSON object (string keys, string values) so
/// the file stays hand-editable. The store loads the whole map once at
/// construction; reads after that never touch the disk.

use crate::error::{Result, WatchError};
use crate::prefs::store::PreferenceStore;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory under the home dir where nestwatch keeps its state
const SETTINGS_DIR: &str = ".nestwatch";

/// Settings file name inside that directory
const SETTINGS_FILE: &str = "settings.json";

/// JSON-file-backed preference store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl JsonFileStore {
    /// Open a settings file, creating the parent directory if needed.
    ///
    /// # Arguments
    /// * `path` - Path to the JSON settings file
    ///
    /// # Returns
    /// * `Ok(JsonFileStore)` - Store loaded from the file (empty if the file
    ///   does not exist yet)
    /// * `Err(WatchError)` - If the file exists but cannot be read or parsed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let values = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            Self::parse_map(&raw)?
        } else {
            HashMap::new()
        };

        Ok(Self { path, values })
    }

    /// Open a settings file, swallowing every failure into an empty store.
    ///
    /// This is the variant the monitoring loop uses: a corrupted or
    /// unreadable settings file must never stop analysis, it just means
    /// every preference falls back to its default.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();

        match Self::open(&path) {
            Ok(store) => store,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "settings file unreadable, continuing with defaults"
                );
                Self {
                    path,
                    values: HashMap::new(),
                }
            }
        }
    }

    /// Default settings file location: `~/.nestwatch/settings.json`
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| WatchError::Preferences("could not locate home directory".to_string()))?;

        Ok(home.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    /// Set a value and write the whole map back to disk
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.values.insert(key.into(), value.into());
        self.save()
    }

    /// Path this store reads from and writes to
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let map: serde_json::Map<String, Value> = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();

        let serialized = serde_json::to_string_pretty(&Value::Object(map))?;
        fs::write(&self.path, serialized)?;

        Ok(())
    }

    // Accept only a flat object of strings. Non-string values are skipped
    // rather than failing the whole file, so one bad entry doesn't wipe
    // every other setting.
    fn parse_map(raw: &str) -> Result<HashMap<String, String>> {
        let value: Value = serde_json::from_str(raw)?;

        let object = value
            .as_object()
            .ok_or_else(|| WatchError::Preferences("settings root must be a JSON object".to_string()))?;

        let mut values = HashMap::new();
        for (key, entry) in object {
            if let Some(s) = entry.as_str() {
                values.insert(key.clone(), s.to_string());
            }
        }

        Ok(values)
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
