//! LocalStorage - key/value JSON file
//!
//! Mirrors the browser's local storage: a flat map of string keys to JSON
//! values, rewritten as a whole on each change.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    file_path: PathBuf,
}

impl LocalStorage {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_all(&self) -> Result<BTreeMap<String, Value>, StorageError> {
        if !self.file_path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.file_path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, data: &BTreeMap<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(data)?;
        std::fs::write(&self.file_path, content)?;
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.read_all()?.remove(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let mut data = self.read_all()?;
        data.insert(key.to_string(), serde_json::to_value(value)?);
        self.write_all(&data)
    }

    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut data = self.read_all()?;
        if data.remove(key).is_some() {
            self.write_all(&data)?;
        }
        Ok(())
    }

    /// Replace the whole file with an empty map
    pub fn reset(&self) -> Result<(), StorageError> {
        self.write_all(&BTreeMap::new())
    }
}
