//! Local storage port.
//!
//! A synchronous, same-process string key-value store in the shape of the
//! browser's `localStorage`. Values are opaque text; JSON encoding is the
//! caller's job.

use crate::error::LocalError;

/// Synchronous string-keyed storage.
pub trait LocalStorage: Send + Sync {
    /// Return the text stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>, LocalError>;

    /// Store `value` under `key`, replacing any previous text.
    fn set_item(&self, key: &str, value: &str) -> Result<(), LocalError>;

    /// Remove `key`. Removing a missing key succeeds.
    fn remove_item(&self, key: &str) -> Result<(), LocalError>;
}
