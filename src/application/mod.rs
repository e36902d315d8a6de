//! Application layer: the persistence facade and the quiz catalog built on
//! it.
//!
//! - [`store`] - [`KeyValueStore`](store::KeyValueStore) and subscriptions
//! - [`catalog`] - typed question/topic/class collections

pub mod catalog;
pub mod store;
