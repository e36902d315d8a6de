//! Infrastructure bootstrap helpers for store wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::firebase::FirebaseClient;
use crate::adapter::outbound::local::{FileStorage, MemoryStorage};
use crate::application::store::KeyValueStore;
use crate::error::Result;
use crate::infrastructure::config::local::{LocalBackend, LocalConfig};
use crate::infrastructure::config::remote::RemoteConfig;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::local::LocalStorage;
use crate::port::outbound::remote::RemoteClient;

/// Build local storage from the `[local]` section.
pub(crate) fn build_local(config: &LocalConfig) -> Result<Arc<dyn LocalStorage>> {
    match config.backend {
        LocalBackend::File => {
            let path = config.resolved_path();
            let mut storage = FileStorage::open(&path)?;
            if let Some(quota) = config.quota_bytes {
                storage = storage.with_quota(quota);
            }
            info!(path = %path.display(), "Using file-backed local storage");
            Ok(Arc::new(storage))
        }
        LocalBackend::Memory => {
            let storage = match config.quota_bytes {
                Some(quota) => MemoryStorage::with_quota(quota),
                None => MemoryStorage::new(),
            };
            info!("Using in-memory local storage");
            Ok(Arc::new(storage))
        }
    }
}

/// Build the remote client when `[remote]` is enabled.
pub(crate) fn build_remote(config: &RemoteConfig) -> Result<Option<Arc<dyn RemoteClient>>> {
    if !config.enabled {
        return Ok(None);
    }
    let settings = config.firebase_settings()?;
    info!(url = %settings.database_url, "Connecting to Firebase Realtime Database");
    let client: Arc<dyn RemoteClient> = Arc::new(FirebaseClient::new(settings)?);
    Ok(Some(client))
}

/// Compose the key-value store from configuration.
///
/// # Errors
///
/// Returns an error if the local storage file cannot be opened or the remote
/// client settings are invalid.
pub fn build_store(config: &Config) -> Result<KeyValueStore> {
    let local = build_local(&config.local)?;
    let remote = build_remote(&config.remote)?;
    Ok(KeyValueStore::new(remote, local).with_poll_interval(config.subscription.poll_interval()))
}
