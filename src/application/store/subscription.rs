//! Subscription handles.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::feed::{Detach, FeedKind, PollFeed};
use crate::error::StoreError;
use crate::port::outbound::remote::ChangeEvent;

/// State shared between the handle and its dispatcher.
///
/// The dispatcher holds the lock for the whole of each callback, so taking
/// it in [`Subscription::cancel`] waits out an invocation in flight.
#[derive(Debug)]
struct Gate {
    active: bool,
    kind: FeedKind,
}

/// A live change subscription on one key.
///
/// Callback invocations run one at a time on a dedicated task, in the order
/// the feed produced them. Once [`cancel`](Self::cancel) returns, or the
/// handle is dropped, no invocation is running or will start, and the
/// feed's listener or timer is released. Cancelling from inside the
/// callback itself deadlocks.
///
/// A push subscription whose remote listener fails switches to polling
/// local storage for the rest of its life.
pub struct Subscription {
    key: String,
    gate: Arc<Mutex<Gate>>,
    dispatcher: Option<JoinHandle<()>>,
    detach: Option<Detach>,
}

impl Subscription {
    /// Spawn the dispatcher that drains `rx` into `callback`.
    ///
    /// `fallback` takes over when the feed reports a failure.
    pub(crate) fn start<F>(
        key: &str,
        kind: FeedKind,
        rx: UnboundedReceiver<ChangeEvent>,
        detach: Detach,
        fallback: Option<PollFeed>,
        callback: F,
    ) -> Self
    where
        F: FnMut(Option<Value>) + Send + 'static,
    {
        let gate = Arc::new(Mutex::new(Gate { active: true, kind }));
        let dispatcher = tokio::spawn(dispatch(
            key.to_string(),
            Arc::clone(&gate),
            rx,
            fallback,
            callback,
        ));

        debug!(key = %key, feed = %kind, "Subscription started");
        Self {
            key: key.to_string(),
            gate,
            dispatcher: Some(dispatcher),
            detach: Some(detach),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Strategy currently feeding this subscription.
    #[must_use]
    pub fn kind(&self) -> FeedKind {
        self.gate.lock().kind
    }

    /// Whether notifications can still arrive.
    ///
    /// False after cancellation, and also once a push feed's remote stream
    /// has closed normally.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.gate.lock().active
            && self
                .dispatcher
                .as_ref()
                .is_some_and(|task| !task.is_finished())
    }

    /// Stop notifications and release the feed.
    pub fn cancel(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.gate.lock().active = false;
        if let Some(detach) = self.detach.take() {
            detach.run();
        }
        if let Some(dispatcher) = self.dispatcher.take() {
            dispatcher.abort();
            debug!(key = %self.key, "Subscription cancelled");
        }
    }
}

async fn dispatch<F>(
    key: String,
    gate: Arc<Mutex<Gate>>,
    mut rx: UnboundedReceiver<ChangeEvent>,
    mut fallback: Option<PollFeed>,
    mut callback: F,
) where
    F: FnMut(Option<Value>) + Send + 'static,
{
    // Timer started after a feed failure; released when this task ends.
    let mut timer: Option<Detach> = None;

    while let Some(event) = rx.recv().await {
        match event {
            ChangeEvent::Snapshot(value) => {
                let state = gate.lock();
                if !state.active {
                    break;
                }
                callback(value);
            }
            ChangeEvent::Failed(source) => {
                let err = StoreError::RemoteOperationFailed {
                    op: "listen",
                    source,
                };
                let Some(poll) = fallback.take() else {
                    warn!(key = %key, error = %err, "Change feed failed");
                    break;
                };

                let mut state = gate.lock();
                if !state.active {
                    break;
                }
                warn!(key = %key, error = %err, "Change listener failed, polling local storage");
                let (tx, next) = mpsc::unbounded_channel();
                timer = Some(poll.start(&key, tx));
                state.kind = FeedKind::Poll;
                rx = next;
            }
        }
    }

    drop(timer);
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("key", &self.key)
            .field("kind", &self.kind())
            .field("active", &self.is_active())
            .finish()
    }
}
