//! In-memory [`RemoteClient`] double.
//!
//! Behaves like a tiny hierarchical database: writes replace values, writing
//! `null` deletes, and listeners get the current value on registration and
//! every change after. Failures can be switched on, and live listeners
//! broken, to exercise the local fallback paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;

use crate::error::RemoteError;
use crate::port::outbound::remote::{ChangeEvent, ChangeSink, ListenerId, RemoteClient};

#[derive(Debug, Default)]
pub struct MemoryRemote {
    entries: RwLock<HashMap<String, Value>>,
    listeners: Mutex<HashMap<ListenerId, (String, ChangeSink)>>,
    next_listener: AtomicU64,
    failing: AtomicBool,
    listeners_disabled: AtomicBool,
    calls: AtomicUsize,
}

impl MemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// A remote whose every operation fails, listeners included.
    pub fn failing() -> Self {
        let remote = Self::default();
        remote.set_failing(true);
        remote
    }

    /// A remote that serves point operations but refuses listeners.
    pub fn without_listeners() -> Self {
        let remote = Self::default();
        remote.listeners_disabled.store(true, Ordering::SeqCst);
        remote
    }

    /// Switch failure injection on or off.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Current remote value for `key`, bypassing failure injection.
    pub fn entry(&self, key: &str) -> Option<Value> {
        self.entries.read().get(key).cloned()
    }

    /// Change a value as another client would, notifying listeners.
    pub fn put_external(&self, key: &str, value: Value) {
        self.store(key, value);
    }

    /// Number of point operations attempted (failed ones included).
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Break every registered listener, as a dropped connection would.
    ///
    /// Each listener receives a final [`ChangeEvent::Failed`] and is
    /// removed.
    pub fn break_listeners(&self) {
        for (_, (_, sink)) in self.listeners.lock().drain() {
            let _ = sink.send(ChangeEvent::Failed(RemoteError::Rejected(
                "injected stream failure".into(),
            )));
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    fn check(&self, op: &str) -> Result<(), RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(RemoteError::Rejected(format!("injected {op} failure")));
        }
        Ok(())
    }

    fn store(&self, key: &str, value: Value) {
        {
            let mut entries = self.entries.write();
            if value.is_null() {
                entries.remove(key);
            } else {
                entries.insert(key.to_string(), value.clone());
            }
        }
        let snapshot = (!value.is_null()).then_some(value);
        self.listeners
            .lock()
            .retain(|_, (path, sink)| {
                path != key || sink.send(ChangeEvent::Snapshot(snapshot.clone())).is_ok()
            });
    }
}

#[async_trait]
impl RemoteClient for MemoryRemote {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn write(&self, path: &str, value: &Value) -> Result<(), RemoteError> {
        self.check("write")?;
        self.store(path, value.clone());
        Ok(())
    }

    async fn read(&self, path: &str) -> Result<Option<Value>, RemoteError> {
        self.check("read")?;
        Ok(self.entry(path))
    }

    async fn delete(&self, path: &str) -> Result<(), RemoteError> {
        self.check("delete")?;
        self.store(path, Value::Null);
        Ok(())
    }

    fn listen(&self, path: &str, sink: ChangeSink) -> Result<ListenerId, RemoteError> {
        if self.listeners_disabled.load(Ordering::SeqCst) {
            return Err(RemoteError::Unsupported {
                client: self.name(),
            });
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(RemoteError::Rejected("injected listen failure".into()));
        }

        let id = ListenerId::new(self.next_listener.fetch_add(1, Ordering::SeqCst));
        let mut listeners = self.listeners.lock();
        let _ = sink.send(ChangeEvent::Snapshot(self.entry(path)));
        listeners.insert(id, (path.to_string(), sink));
        Ok(id)
    }

    fn unlisten(&self, id: ListenerId) {
        self.listeners.lock().remove(&id);
    }
}
