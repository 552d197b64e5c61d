//! JSON-file preference store
//!
//! Persists player preferences as a flat string map in a single JSON
//! document, rewritten in full on every change. The document is read once
//! at open; a missing file starts an empty store and a corrupt document is
//! discarded with a warning so a damaged profile never blocks startup.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use chorus_playback::PreferenceStore;

use crate::error::{Result, StorageError};

/// Preference store backed by a single JSON file
#[derive(Debug)]
pub struct JsonPreferenceStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl JsonPreferenceStore {
    /// Open the store at `path`, loading any existing document
    ///
    /// # Errors
    ///
    /// Returns an error only when the file exists but cannot be read.
    /// A missing file and an unparseable document both yield an empty
    /// store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(values) => values,
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Discarding unreadable preference document"
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StorageError::Io(e)),
        };
        debug!(
            path = %path.display(),
            entries = values.len(),
            "Opened preference store"
        );
        Ok(Self { path, values })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove_value(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let contents = serde_json::to_string_pretty(&self.values)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn get(&self, key: &str) -> chorus_playback::Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> chorus_playback::Result<()> {
        self.set_value(key, value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> chorus_playback::Result<()> {
        self.remove_value(key)?;
        Ok(())
    }
}
