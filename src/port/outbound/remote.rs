//! Remote database port.
//!
//! Defines the contract for a hierarchical, network-backed key-value
//! database reached through an injected client (Firebase Realtime Database
//! in production, an in-memory double in tests).

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::error::RemoteError;

/// One message from a remote change listener.
#[derive(Debug)]
pub enum ChangeEvent {
    /// The full value at the listened path, or `None` when the path holds no
    /// data.
    Snapshot(Option<Value>),
    /// The listener broke and sends nothing further.
    Failed(RemoteError),
}

/// Channel on which a remote change listener delivers its events.
pub type ChangeSink = mpsc::UnboundedSender<ChangeEvent>;

/// Handle identifying one registered change listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0)
    }
}

/// Client for a remote hierarchical database.
///
/// Paths are the store keys; implementations map them onto their own
/// addressing scheme.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the facade shares one client
/// across all operations and subscriptions.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Return the client name for logging.
    fn name(&self) -> &'static str;

    /// Write `value` at `path`, replacing whatever was there.
    async fn write(&self, path: &str, value: &Value) -> Result<(), RemoteError>;

    /// Read the value at `path`. `Ok(None)` means the remote holds no entry.
    async fn read(&self, path: &str) -> Result<Option<Value>, RemoteError>;

    /// Delete the entry at `path`. Deleting a missing entry succeeds.
    async fn delete(&self, path: &str) -> Result<(), RemoteError>;

    /// Register a change listener for `path`.
    ///
    /// The listener sends the current value shortly after registration and
    /// the new value on every subsequent change. Sends stop once the
    /// listener is removed with [`unlisten`](Self::unlisten) or the
    /// receiving end is dropped. A listener that connects in the background
    /// and then fails reports [`ChangeEvent::Failed`] as its last message.
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot listen on this path; the
    /// default implementation reports listeners as unsupported.
    fn listen(&self, path: &str, sink: ChangeSink) -> Result<ListenerId, RemoteError> {
        let _ = (path, sink);
        Err(RemoteError::Unsupported {
            client: self.name(),
        })
    }

    /// Remove a listener registered with [`listen`](Self::listen).
    ///
    /// Unknown ids are ignored.
    fn unlisten(&self, id: ListenerId) {
        let _ = id;
    }
}
