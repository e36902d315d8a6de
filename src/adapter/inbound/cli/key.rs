//! Handlers for raw key commands: `get`, `set`, `remove`, `exists`.

use serde_json::{json, Value};

use crate::adapter::inbound::cli::output;
use crate::application::store::KeyValueStore;
use crate::domain::Collection;
use crate::error::{Error, Result};

/// Map a collection alias to its storage key; other keys pass through.
#[must_use]
pub fn resolve_key(key: &str) -> String {
    key.parse::<Collection>()
        .map(|c| c.key().to_string())
        .unwrap_or_else(|_| key.to_string())
}

fn failed(op: &'static str, key: &str) -> Error {
    Error::OperationFailed {
        op,
        key: key.to_string(),
    }
}

/// Execute `get`.
pub async fn get(store: &KeyValueStore, key: &str) -> Result<()> {
    let key = resolve_key(key);
    let value = store.get(&key).await;
    output::value(&key, value.as_ref());
    Ok(())
}

/// Execute `set`.
pub async fn set(store: &KeyValueStore, key: &str, raw: &str) -> Result<()> {
    let key = resolve_key(key);
    let value: Value = serde_json::from_str(raw)?;
    if !store.set(&key, &value).await {
        return Err(failed("set", &key));
    }

    output::report(
        "set",
        json!({ "key": key, "backend": store.mode() }),
        &format!("Stored {}", output::highlight(&key)),
    );
    output::field("Backend", store.mode());
    Ok(())
}

/// Execute `remove`.
pub async fn remove(store: &KeyValueStore, key: &str) -> Result<()> {
    let key = resolve_key(key);
    if !store.remove(&key).await {
        return Err(failed("remove", &key));
    }

    output::report(
        "remove",
        json!({ "key": key }),
        &format!("Removed {}", output::highlight(&key)),
    );
    Ok(())
}

/// Execute `exists`.
pub async fn exists(store: &KeyValueStore, key: &str) -> Result<()> {
    let key = resolve_key(key);
    output::exists(&key, store.exists(&key).await);
    Ok(())
}
