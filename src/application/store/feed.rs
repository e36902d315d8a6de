//! Change-notification strategies.
//!
//! A subscription is fed by exactly one [`ChangeFeed`]:
//!
//! - [`PushFeed`] - a remote change listener; preferred in remote mode
//! - [`PollFeed`] - a timer re-reading local storage; the degraded fallback
//!
//! Both deliver snapshots into a [`ChangeSink`]; the subscription drains
//! that channel and runs the callback.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use super::codec;
use crate::error::StoreError;
use crate::port::outbound::local::LocalStorage;
use crate::port::outbound::remote::{ChangeEvent, ChangeSink, RemoteClient};

/// Which strategy feeds a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    Push,
    Poll,
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Push => f.write_str("push"),
            Self::Poll => f.write_str("poll"),
        }
    }
}

/// Shortest interval a [`PollFeed`] ticks at.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Releases whatever a feed set up for one subscription.
///
/// Runs on [`run`](Self::run) or, failing that, when dropped.
pub struct Detach(Option<Box<dyn FnOnce() + Send>>);

impl Detach {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self(Some(Box::new(release)))
    }

    pub fn run(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(release) = self.0.take() {
            release();
        }
    }
}

impl Drop for Detach {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Detach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Detach")
    }
}

/// A source of change notifications for one key.
pub trait ChangeFeed: Send + Sync {
    fn kind(&self) -> FeedKind;

    /// Start delivering values for `key` into `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error when the feed cannot serve this key; the caller
    /// moves on to the next strategy.
    fn attach(&self, key: &str, sink: ChangeSink) -> Result<Detach, StoreError>;
}

/// Remote change listener.
pub struct PushFeed {
    remote: Arc<dyn RemoteClient>,
}

impl PushFeed {
    pub fn new(remote: Arc<dyn RemoteClient>) -> Self {
        Self { remote }
    }
}

impl ChangeFeed for PushFeed {
    fn kind(&self) -> FeedKind {
        FeedKind::Push
    }

    fn attach(&self, key: &str, sink: ChangeSink) -> Result<Detach, StoreError> {
        let id = self
            .remote
            .listen(key, sink)
            .map_err(|source| StoreError::RemoteOperationFailed {
                op: "listen",
                source,
            })?;
        let remote = Arc::clone(&self.remote);
        Ok(Detach::new(move || remote.unlisten(id)))
    }
}

/// Periodic re-read of local storage.
///
/// Sends on every tick, changed or not. The first tick fires one interval
/// after attaching. Intervals below [`MIN_POLL_INTERVAL`] are raised to it.
pub struct PollFeed {
    local: Arc<dyn LocalStorage>,
    interval: Duration,
}

impl PollFeed {
    pub fn new(local: Arc<dyn LocalStorage>, interval: Duration) -> Self {
        Self {
            local,
            interval: interval.max(MIN_POLL_INTERVAL),
        }
    }

    /// Start the timer. Requires a running tokio runtime.
    pub fn start(&self, key: &str, sink: ChangeSink) -> Detach {
        let local = Arc::clone(&self.local);
        let period = self.interval;
        let key = key.to_string();

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let value = codec::load(local.as_ref(), &key);
                if sink.send(ChangeEvent::Snapshot(value)).is_err() {
                    debug!(key = %key, "Poll receiver gone, stopping timer");
                    break;
                }
            }
        });
        Detach::new(move || handle.abort())
    }
}

impl ChangeFeed for PollFeed {
    fn kind(&self) -> FeedKind {
        FeedKind::Poll
    }

    fn attach(&self, key: &str, sink: ChangeSink) -> Result<Detach, StoreError> {
        Ok(self.start(key, sink))
    }
}
