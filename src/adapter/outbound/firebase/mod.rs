//! Firebase Realtime Database adapter.
//!
//! - [`FirebaseClient`] - REST point operations and streaming listeners
//! - `event` - server-sent event parsing and snapshot maintenance
//! - `path` - key validation against Firebase naming rules

mod client;
mod event;
mod path;

pub use client::{FirebaseClient, FirebaseSettings};
