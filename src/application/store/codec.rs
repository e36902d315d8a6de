//! JSON encoding around [`LocalStorage`].

use serde_json::Value;
use tracing::{error, warn};

use crate::error::StoreError;
use crate::port::outbound::local::LocalStorage;

/// Store `value` under `key` as JSON text.
pub(crate) fn write(local: &dyn LocalStorage, key: &str, value: &Value) -> Result<(), StoreError> {
    local
        .set_item(key, &value.to_string())
        .map_err(|source| StoreError::LocalOperationFailed { op: "write", source })
}

/// Read and decode the entry for `key`.
///
/// Missing entries and empty text both read as absent.
pub(crate) fn read(local: &dyn LocalStorage, key: &str) -> Result<Option<Value>, StoreError> {
    let text = local
        .get_item(key)
        .map_err(|source| StoreError::LocalOperationFailed { op: "read", source })?;
    match text {
        Some(text) if !text.is_empty() => serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StoreError::MalformedStoredValue {
                key: key.to_string(),
                source,
            }),
        _ => Ok(None),
    }
}

pub(crate) fn remove(local: &dyn LocalStorage, key: &str) -> Result<(), StoreError> {
    local
        .remove_item(key)
        .map_err(|source| StoreError::LocalOperationFailed { op: "remove", source })
}

/// [`read`], logging failures and reporting them as absent.
pub(crate) fn load(local: &dyn LocalStorage, key: &str) -> Option<Value> {
    match read(local, key) {
        Ok(value) => value,
        Err(err @ StoreError::MalformedStoredValue { .. }) => {
            warn!(key = %key, error = %err, "Ignoring malformed local entry");
            None
        }
        Err(err) => {
            error!(key = %key, error = %err, "Local read failed");
            None
        }
    }
}
