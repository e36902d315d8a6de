//! In-memory local storage.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::{check_quota, entry_size};
use crate::error::LocalError;
use crate::port::outbound::local::LocalStorage;

/// Process-local storage backed by a map.
///
/// Used when no storage file is configured and throughout the tests. A quota
/// makes writes fail the way a full browser `localStorage` does.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create a new empty storage without a size limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage that rejects writes once keys and values together
    /// exceed `bytes`.
    #[must_use]
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            items: RwLock::default(),
            quota: Some(bytes),
        }
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, LocalError> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), LocalError> {
        let mut items = self.items.write();
        if self.quota.is_some() {
            let others: usize = items
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| entry_size(k, v))
                .sum();
            check_quota(self.quota, others, key, value)?;
        }
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), LocalError> {
        self.items.write().remove(key);
        Ok(())
    }
}
