//! The key-value facade.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::codec;
use super::feed::{ChangeFeed, FeedKind, PollFeed, PushFeed, MIN_POLL_INTERVAL};
use super::subscription::Subscription;
use crate::domain::BackendMode;
use crate::error::StoreError;
use crate::port::outbound::local::LocalStorage;
use crate::port::outbound::remote::RemoteClient;

/// Interval between local re-reads for poll subscriptions.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Uniform get/set/remove/subscribe over a remote database and local
/// storage.
///
/// In remote mode every operation goes to the remote client first and falls
/// back to local storage, within the same call, when it fails. Successful
/// remote writes and deletes are mirrored into local storage. Reads are not
/// cross-checked against local storage while the remote answers.
///
/// No operation returns an error or panics: failures are logged and
/// reported as `false` or `None`.
pub struct KeyValueStore {
    mode: BackendMode,
    remote: Option<Arc<dyn RemoteClient>>,
    local: Arc<dyn LocalStorage>,
    poll_interval: Duration,
}

impl KeyValueStore {
    /// Build a store. Supplying a remote client selects remote mode for the
    /// store's whole lifetime.
    pub fn new(remote: Option<Arc<dyn RemoteClient>>, local: Arc<dyn LocalStorage>) -> Self {
        let mode = match &remote {
            Some(client) => {
                info!(client = client.name(), "Remote backend configured");
                BackendMode::Remote
            }
            None => {
                info!(reason = %StoreError::RemoteUnavailable, "Using local storage only");
                BackendMode::Local
            }
        };
        Self {
            mode,
            remote,
            local,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Build a store without a remote client.
    pub fn local_only(local: Arc<dyn LocalStorage>) -> Self {
        Self::new(None, local)
    }

    /// Override the poll-subscription interval.
    ///
    /// Values below [`MIN_POLL_INTERVAL`] are raised to it.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        if interval < MIN_POLL_INTERVAL {
            warn!(?interval, "Poll interval too short, using the minimum");
        }
        self.poll_interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    #[must_use]
    pub fn mode(&self) -> BackendMode {
        self.mode
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Store `value` under `key`. Returns whether the value was persisted.
    pub async fn set(&self, key: &str, value: &Value) -> bool {
        let Some(remote) = &self.remote else {
            return self.local_set(key, value);
        };

        match remote.write(key, value).await {
            Ok(()) => {
                if let Err(err) = codec::write(self.local.as_ref(), key, value) {
                    warn!(key = %key, error = %err, "Local mirror write failed");
                }
                debug!(key = %key, "Value written remotely");
                true
            }
            Err(source) => {
                let err = StoreError::RemoteOperationFailed { op: "write", source };
                warn!(key = %key, error = %err, "Falling back to local storage");
                self.local_set(key, value)
            }
        }
    }

    /// Fetch the value under `key`; `None` when nothing is stored.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let Some(remote) = &self.remote else {
            return codec::load(self.local.as_ref(), key);
        };

        match remote.read(key).await {
            Ok(value) => value,
            Err(source) => {
                let err = StoreError::RemoteOperationFailed { op: "read", source };
                warn!(key = %key, error = %err, "Falling back to local storage");
                codec::load(self.local.as_ref(), key)
            }
        }
    }

    /// Delete `key`. Returns whether the delete went through.
    pub async fn remove(&self, key: &str) -> bool {
        let Some(remote) = &self.remote else {
            return self.local_remove(key);
        };

        match remote.delete(key).await {
            Ok(()) => {
                if let Err(err) = codec::remove(self.local.as_ref(), key) {
                    warn!(key = %key, error = %err, "Local mirror removal failed");
                }
                debug!(key = %key, "Value removed remotely");
                true
            }
            Err(source) => {
                let err = StoreError::RemoteOperationFailed { op: "remove", source };
                warn!(key = %key, error = %err, "Falling back to local storage");
                self.local_remove(key)
            }
        }
    }

    /// Read `key` from local storage only, whatever the mode.
    ///
    /// In remote mode this is the backup copy written by earlier mirrors or
    /// fallbacks.
    pub fn local_snapshot(&self, key: &str) -> Option<Value> {
        codec::load(self.local.as_ref(), key)
    }

    /// Whether [`get`](Self::get) finds a value for `key`.
    pub async fn exists(&self, key: &str) -> bool {
        self.get(key).await.is_some()
    }

    /// Fetch and deserialize the value under `key`.
    ///
    /// A value of the wrong shape is logged and treated as absent.
    pub async fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key).await?;
        match serde_json::from_value(value) {
            Ok(typed) => Some(typed),
            Err(e) => {
                warn!(key = %key, error = %e, "Stored value has an unexpected shape");
                None
            }
        }
    }

    /// Serialize `value` and store it under `key`.
    pub async fn set_as<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match serde_json::to_value(value) {
            Ok(json) => self.set(key, &json).await,
            Err(e) => {
                error!(key = %key, error = %e, "Value could not be serialized");
                false
            }
        }
    }

    /// Call `callback` with the value under `key` whenever it may have
    /// changed.
    ///
    /// Remote mode uses a push listener when the remote client accepts one
    /// (the first call carries the current value). Otherwise local storage is
    /// polled every [`poll_interval`](Self::poll_interval) and the callback
    /// fires on every tick, changed or not. A push listener that fails later
    /// hands over to polling within the same subscription.
    ///
    /// Must be called within a tokio runtime. Dropping the returned handle
    /// cancels the subscription.
    pub fn subscribe<F>(&self, key: &str, callback: F) -> Subscription
    where
        F: FnMut(Option<Value>) + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();

        let poll = PollFeed::new(Arc::clone(&self.local), self.poll_interval);

        if let Some(remote) = &self.remote {
            let push = PushFeed::new(Arc::clone(remote));
            match push.attach(key, tx.clone()) {
                Ok(detach) => {
                    return Subscription::start(key, push.kind(), rx, detach, Some(poll), callback);
                }
                Err(err) => {
                    warn!(key = %key, error = %err, "Change listener unavailable, polling local storage");
                }
            }
        }

        let detach = poll.start(key, tx);
        Subscription::start(key, FeedKind::Poll, rx, detach, None, callback)
    }

    fn local_set(&self, key: &str, value: &Value) -> bool {
        match codec::write(self.local.as_ref(), key, value) {
            Ok(()) => true,
            Err(err) => {
                error!(key = %key, error = %err, "Local write failed");
                false
            }
        }
    }

    fn local_remove(&self, key: &str) -> bool {
        match codec::remove(self.local.as_ref(), key) {
            Ok(()) => true,
            Err(err) => {
                error!(key = %key, error = %err, "Local removal failed");
                false
            }
        }
    }
}

impl fmt::Debug for KeyValueStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyValueStore")
            .field("mode", &self.mode)
            .field("remote", &self.remote.as_ref().map(|r| r.name()))
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}
