//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod http;

use std::sync::Arc;
use std::time::Duration;

use quizstore::adapter::outbound::local::MemoryStorage;
use quizstore::application::store::KeyValueStore;
use quizstore::port::outbound::local::LocalStorage;
use quizstore::port::outbound::remote::RemoteClient;
use quizstore::testkit::MemoryRemote;
use serde_json::Value;
use tokio::sync::mpsc;

/// Poll interval short enough for tests to observe several ticks.
pub const FAST_POLL: Duration = Duration::from_millis(40);

/// A remote-mode store plus handles on both of its backends.
pub struct Fixture {
    pub remote: Arc<MemoryRemote>,
    pub local: Arc<MemoryStorage>,
    pub store: KeyValueStore,
}

impl Fixture {
    pub fn new(remote: MemoryRemote) -> Self {
        let remote = Arc::new(remote);
        let local = Arc::new(MemoryStorage::new());
        let client: Arc<dyn RemoteClient> = remote.clone();
        let storage: Arc<dyn LocalStorage> = local.clone();
        let store = KeyValueStore::new(Some(client), storage).with_poll_interval(FAST_POLL);
        Self {
            remote,
            local,
            store,
        }
    }

    /// A local-only store sharing this fixture's local storage.
    pub fn local_view(&self) -> KeyValueStore {
        let storage: Arc<dyn LocalStorage> = self.local.clone();
        KeyValueStore::local_only(storage).with_poll_interval(FAST_POLL)
    }

    /// Raw text stored locally under `key`.
    pub fn local_text(&self, key: &str) -> Option<String> {
        self.local.get_item(key).expect("memory storage read")
    }
}

/// Channel-backed callback for subscription tests.
pub fn recorder() -> (
    impl FnMut(Option<Value>) + Send + 'static,
    mpsc::UnboundedReceiver<Option<Value>>,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        move |value| {
            let _ = tx.send(value);
        },
        rx,
    )
}

/// Wait for the next notification, failing the test after `within`.
pub async fn next_change(
    rx: &mut mpsc::UnboundedReceiver<Option<Value>>,
    within: Duration,
) -> Option<Value> {
    tokio::time::timeout(within, rx.recv())
        .await
        .expect("notification within deadline")
        .expect("subscription channel open")
}
