//! Key-value persistence facade with remote → local fallback.
//!
//! - [`KeyValueStore`] - get/set/remove/exists/subscribe
//! - [`ChangeFeed`] - push and poll notification strategies
//! - [`Subscription`] - cancellation handle for a subscription

mod codec;
mod feed;
mod kv;
mod subscription;

pub use feed::{ChangeFeed, Detach, FeedKind, PollFeed, PushFeed, MIN_POLL_INTERVAL};
pub use kv::{KeyValueStore, DEFAULT_POLL_INTERVAL};
pub use subscription::Subscription;
