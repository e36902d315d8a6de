//! Firebase streaming protocol: server-sent events and snapshot updates.
//!
//! The REST streaming endpoint emits `put` and `patch` events carrying a
//! path relative to the listened location. The listener keeps a local
//! snapshot and applies each event to it, so subscribers always receive the
//! full value at their key.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::RemoteError;

/// One dispatched server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SseEvent {
    pub name: String,
    pub data: String,
}

/// Incremental `text/event-stream` parser.
///
/// Bytes are buffered until a full line is available, so multi-byte UTF-8
/// sequences split across network chunks decode correctly.
#[derive(Debug, Default)]
pub(crate) struct EventParser {
    buffer: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
}

impl EventParser {
    /// Feed a chunk and return every event it completes.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);
        let mut events = Vec::new();

        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&raw);
            let line = line.trim_end_matches(|c| c == '\n' || c == '\r');

            if line.is_empty() {
                events.extend(self.dispatch());
                continue;
            }
            if line.starts_with(':') {
                continue;
            }

            let (field, value) = match line.split_once(':') {
                Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
                None => (line, ""),
            };
            match field {
                "event" => self.event = Some(value.to_string()),
                "data" => self.data.push(value.to_string()),
                _ => {}
            }
        }

        events
    }

    fn dispatch(&mut self) -> Option<SseEvent> {
        let name = self.event.take();
        if name.is_none() && self.data.is_empty() {
            return None;
        }
        let data = std::mem::take(&mut self.data).join("\n");
        Some(SseEvent {
            name: name.unwrap_or_else(|| "message".to_string()),
            data,
        })
    }
}

#[derive(Debug, Deserialize)]
struct Payload {
    path: String,
    data: Value,
}

/// Events the Firebase streaming endpoint sends.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FirebaseEvent {
    Put { path: String, data: Value },
    Patch { path: String, data: Value },
    KeepAlive,
    Cancel(String),
    AuthRevoked,
}

/// Effect of an event on the listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Change {
    /// The snapshot changed and should be delivered.
    Updated,
    /// Nothing to deliver.
    Unchanged,
    /// The server ended the stream.
    Closed(String),
}

impl FirebaseEvent {
    /// Interpret a raw event. Unknown event names yield `Ok(None)`.
    pub fn parse(event: &SseEvent) -> Result<Option<Self>, RemoteError> {
        let parsed = match event.name.as_str() {
            "put" | "patch" => {
                let payload: Payload =
                    serde_json::from_str(&event.data).map_err(RemoteError::Decode)?;
                if event.name == "put" {
                    Self::Put {
                        path: payload.path,
                        data: payload.data,
                    }
                } else {
                    Self::Patch {
                        path: payload.path,
                        data: payload.data,
                    }
                }
            }
            "keep-alive" => Self::KeepAlive,
            "cancel" => Self::Cancel(event.data.clone()),
            "auth_revoked" => Self::AuthRevoked,
            _ => return Ok(None),
        };
        Ok(Some(parsed))
    }

    /// Apply this event to `snapshot`.
    pub fn apply(self, snapshot: &mut Value) -> Change {
        match self {
            Self::Put { path, data } => {
                set_at(snapshot, &split(&path), data);
                Change::Updated
            }
            Self::Patch { path, data } => {
                let base = split(&path);
                match data {
                    Value::Object(children) => {
                        for (key, value) in children {
                            let mut target = base.clone();
                            target.extend(split(&key));
                            set_at(snapshot, &target, value);
                        }
                    }
                    other => set_at(snapshot, &base, other),
                }
                Change::Updated
            }
            Self::KeepAlive => Change::Unchanged,
            Self::Cancel(reason) => Change::Closed(format!("cancelled by server: {reason}")),
            Self::AuthRevoked => Change::Closed("auth token revoked".to_string()),
        }
    }
}

fn split(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Replace the value at `segments` below `node`; `null` deletes.
///
/// Parents left empty by a delete collapse to `null`, as they do in the
/// database itself.
fn set_at(node: &mut Value, segments: &[&str], data: Value) {
    let Some((head, rest)) = segments.split_first() else {
        *node = data;
        return;
    };

    if let Value::Array(items) = node {
        if let Ok(index) = head.parse::<usize>() {
            if index < items.len() {
                set_at(&mut items[index], rest, data);
                while items.last().is_some_and(Value::is_null) {
                    items.pop();
                }
                if items.is_empty() {
                    *node = Value::Null;
                }
                return;
            }
        }
        let map: Map<String, Value> = items
            .drain(..)
            .enumerate()
            .filter(|(_, v)| !v.is_null())
            .map(|(i, v)| (i.to_string(), v))
            .collect();
        *node = Value::Object(map);
    }

    if !node.is_object() {
        if data.is_null() {
            return;
        }
        *node = Value::Object(Map::new());
    }

    let now_empty = match node {
        Value::Object(map) => {
            let child = map.entry((*head).to_string()).or_insert(Value::Null);
            set_at(child, rest, data);
            if child.is_null() {
                map.remove(*head);
            }
            map.is_empty()
        }
        _ => false,
    };
    if now_empty {
        *node = Value::Null;
    }
}
