//! File-backed local storage.
//!
//! All entries live in one JSON object on disk. Every read goes back to the
//! file so changes made by another process are picked up, which is what
//! poll subscriptions rely on.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use super::{check_quota, entry_size};
use crate::error::LocalError;
use crate::port::outbound::local::LocalStorage;

/// Local storage persisted to a JSON file.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    quota: Option<usize>,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Open (or prepare to create) the storage file at `path`.
    ///
    /// The parent directory is created if needed; the file itself is only
    /// written on the first mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LocalError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            path,
            quota: None,
            write_lock: Mutex::new(()),
        })
    }

    /// Reject writes once keys and values together exceed `bytes`.
    #[must_use]
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, LocalError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text).map_err(LocalError::Corrupt)
    }

    /// Write the entries atomically (temp file, then rename).
    fn persist(&self, items: &BTreeMap<String, String>) -> Result<(), LocalError> {
        let json = serde_json::to_string_pretty(items).map_err(LocalError::Corrupt)?;

        let temp_path = self.path.with_extension("tmp");
        let cleanup_and_err = |e: std::io::Error| {
            let _ = fs::remove_file(&temp_path);
            LocalError::Io(e)
        };

        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes()).map_err(cleanup_and_err)?;
        file.sync_all().map_err(cleanup_and_err)?;
        fs::rename(&temp_path, &self.path).map_err(cleanup_and_err)?;

        debug!(path = %self.path.display(), entries = items.len(), "Local storage file written");
        Ok(())
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, LocalError> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), LocalError> {
        let _guard = self.write_lock.lock();
        let mut items = self.load()?;
        if self.quota.is_some() {
            let others: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| entry_size(k, v))
                .sum();
            check_quota(self.quota, others, key, value)?;
        }
        items.insert(key.to_string(), value.to_string());
        self.persist(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), LocalError> {
        let _guard = self.write_lock.lock();
        let mut items = self.load()?;
        if items.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&items)
    }
}
