//! Durable key/value storage for document collections.
//!
//! Each collection lives under one string key and is always written whole.
use std::{
    collections::HashMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::{debug, error, info, trace};
use tempfile::NamedTempFile;

/// Key holding the active documents.
pub const ACTIVE_KEY: &str = "brutalNotes_documents";

/// Key holding the archived documents.
pub const ARCHIVED_KEY: &str = "brutalNotes_archived";

/// A string-keyed store of serialized collections.
///
/// A missing key reads as `Ok(None)`. Writes replace the whole value.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> io::Result<Option<String>>;

    fn write(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// Stores each key as `<key>.json` inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        let path = self.key_path(key);
        debug!("Reading {} from {}", key, path.display());

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                trace!("No stored value for {}", key);
                Ok(None)
            }
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                Err(e)
            }
        }
    }

    /// Writes through a temporary file in the same directory and renames it
    /// into place, so readers never observe a partial collection.
    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        if !self.data_dir.exists() {
            debug!("Creating data directory: {}", self.data_dir.display());
            fs::create_dir_all(&self.data_dir).map_err(|e| {
                error!(
                    "Failed to create directory {}: {}",
                    self.data_dir.display(),
                    e
                );
                e
            })?;
        }

        let path = self.key_path(key);
        let mut temp_file = NamedTempFile::new_in(&self.data_dir).map_err(|e| {
            error!("Failed to create temporary file: {}", e);
            e
        })?;

        trace!("Writing {} bytes to temporary file", value.len());
        temp_file.write_all(value.as_bytes())?;
        temp_file.flush()?;

        temp_file.persist(&path).map_err(|e| {
            error!("Failed to persist file {}: {}", path.display(), e.error);
            e.error
        })?;

        info!("Wrote {} to {}", key, path.display());
        Ok(())
    }
}

/// Keeps values in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a key, e.g. with collections written by another install.
    pub fn with_value(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
