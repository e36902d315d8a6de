//! Firebase Realtime Database REST client.
//!
//! Point operations map to `PUT`/`GET`/`DELETE` on `<path>.json`. Change
//! listeners hold open a streaming `GET` (`Accept: text/event-stream`) on a
//! background task each.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

use super::event::{Change, EventParser, FirebaseEvent};
use super::path;
use crate::error::RemoteError;
use crate::port::outbound::remote::{ChangeEvent, ChangeSink, ListenerId, RemoteClient};

/// Connection settings for a Firebase Realtime Database.
#[derive(Debug, Clone)]
pub struct FirebaseSettings {
    /// Database URL, e.g. `https://my-project-default-rtdb.firebaseio.com`.
    pub database_url: Url,
    /// Optional path prefix under which all keys are stored.
    pub root: Option<String>,
    /// Database secret or ID token appended as `auth=`.
    pub auth_token: Option<String>,
    /// Timeout for point operations. Streams are not subject to it.
    pub timeout: Duration,
}

/// Firebase Realtime Database client.
///
/// Implements [`RemoteClient`] over the REST API.
#[derive(Debug)]
pub struct FirebaseClient {
    /// HTTP client for point operations.
    http: Client,
    /// HTTP client for long-lived event streams.
    stream_http: Client,
    settings: FirebaseSettings,
    listeners: DashMap<ListenerId, JoinHandle<()>>,
    next_listener: AtomicU64,
}

impl FirebaseClient {
    /// Create a client for the configured database.
    ///
    /// # Errors
    ///
    /// Returns an error if the root prefix is not a valid Firebase path or
    /// the HTTP client cannot be built.
    pub fn new(settings: FirebaseSettings) -> Result<Self, RemoteError> {
        if let Some(root) = &settings.root {
            path::segments(root)?;
        }
        if settings.database_url.cannot_be_a_base() {
            return Err(RemoteError::InvalidPath {
                path: settings.database_url.to_string(),
                reason: "database URL cannot carry a path",
            });
        }

        let http = Client::builder().timeout(settings.timeout).build()?;
        let stream_http = Client::builder()
            .connect_timeout(settings.timeout)
            .build()?;

        Ok(Self {
            http,
            stream_http,
            settings,
            listeners: DashMap::new(),
            next_listener: AtomicU64::new(1),
        })
    }

    /// Number of change listeners currently registered.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Build the REST endpoint for `key`.
    fn endpoint(&self, key: &str) -> Result<Url, RemoteError> {
        let mut segments: Vec<&str> = Vec::new();
        if let Some(root) = &self.settings.root {
            segments.extend(path::segments(root)?);
        }
        segments.extend(path::segments(key)?);

        let mut url = self.settings.database_url.clone();
        let last = segments.pop().map(|s| format!("{s}.json"));
        if let Ok(mut parts) = url.path_segments_mut() {
            parts.pop_if_empty();
            parts.extend(segments);
            parts.extend(last);
        }
        if let Some(token) = &self.settings.auth_token {
            url.query_pairs_mut().append_pair("auth", token);
        }
        Ok(url)
    }
}

/// Turn non-2xx responses into [`RemoteError::Status`].
async fn ensure_success(response: Response) -> Result<Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(RemoteError::Status {
        status: status.as_u16(),
        body,
    })
}

fn present(value: &Value) -> Option<Value> {
    (!value.is_null()).then(|| value.clone())
}

/// Follow the event stream at `url`, forwarding snapshots to `sink`.
///
/// Returns `Ok` when the server closes or cancels the stream, or the sink is
/// dropped. Connection failures, error statuses and undecodable events are
/// returned as errors.
async fn stream_changes(http: Client, url: Url, sink: &ChangeSink) -> Result<(), RemoteError> {
    let response = http
        .get(url)
        .header(ACCEPT, "text/event-stream")
        .send()
        .await?;
    let response = ensure_success(response).await?;

    let mut body = response.bytes_stream();
    let mut parser = EventParser::default();
    let mut snapshot = Value::Null;

    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        for raw in parser.feed(&chunk) {
            let Some(event) = FirebaseEvent::parse(&raw)? else {
                debug!(event = %raw.name, "Ignoring unknown stream event");
                continue;
            };
            match event.apply(&mut snapshot) {
                Change::Updated => {
                    if sink.send(ChangeEvent::Snapshot(present(&snapshot))).is_err() {
                        return Ok(());
                    }
                }
                Change::Unchanged => {}
                Change::Closed(reason) => {
                    info!(reason = %reason, "Firebase stream closed");
                    return Ok(());
                }
            }
        }
    }
    Ok(())
}

#[async_trait]
impl RemoteClient for FirebaseClient {
    fn name(&self) -> &'static str {
        "firebase"
    }

    async fn write(&self, key: &str, value: &Value) -> Result<(), RemoteError> {
        let url = self.endpoint(key)?;
        let response = self.http.put(url).json(value).send().await?;
        ensure_success(response).await?;
        debug!(key = %key, "Firebase write succeeded");
        Ok(())
    }

    async fn read(&self, key: &str) -> Result<Option<Value>, RemoteError> {
        let url = self.endpoint(key)?;
        let response = ensure_success(self.http.get(url).send().await?).await?;
        let text = response.text().await?;
        let value: Value = serde_json::from_str(&text).map_err(RemoteError::Decode)?;
        Ok(present(&value))
    }

    async fn delete(&self, key: &str) -> Result<(), RemoteError> {
        let url = self.endpoint(key)?;
        ensure_success(self.http.delete(url).send().await?).await?;
        debug!(key = %key, "Firebase delete succeeded");
        Ok(())
    }

    fn listen(&self, key: &str, sink: ChangeSink) -> Result<ListenerId, RemoteError> {
        let url = self.endpoint(key)?;
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| RemoteError::NoRuntime)?;

        let id = ListenerId::new(self.next_listener.fetch_add(1, Ordering::Relaxed));
        let http = self.stream_http.clone();
        let key = key.to_string();
        let handle = runtime.spawn(async move {
            if let Err(e) = stream_changes(http, url, &sink).await {
                warn!(key = %key, error = %e, "Firebase listener stopped");
                let _ = sink.send(ChangeEvent::Failed(e));
            }
        });
        self.listeners.insert(id, handle);
        debug!(listener = %id, "Firebase listener registered");
        Ok(id)
    }

    fn unlisten(&self, id: ListenerId) {
        if let Some((_, handle)) = self.listeners.remove(&id) {
            handle.abort();
            debug!(listener = %id, "Firebase listener removed");
        }
    }
}

impl Drop for FirebaseClient {
    fn drop(&mut self) {
        for entry in self.listeners.iter() {
            entry.value().abort();
        }
    }
}
