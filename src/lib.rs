//! Quizstore - persistence for the Math Millionaire quiz admin.
//!
//! A key-value facade that prefers a Firebase Realtime Database and falls
//! back to local storage whenever the remote is missing or fails. Values are
//! JSON documents. Successful remote writes are mirrored locally so the data
//! stays readable offline.
//!
//! # Architecture
//!
//! - **`port`** - traits for remote databases and local storage
//! - **`adapter`** - Firebase REST client, file and memory storage, the CLI
//! - **`application`** - [`KeyValueStore`](application::store::KeyValueStore)
//!   and the typed [`QuizCatalog`](application::catalog::QuizCatalog)
//! - **`infrastructure`** - configuration and store composition
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use quizstore::adapter::outbound::local::MemoryStorage;
//! use quizstore::application::store::KeyValueStore;
//!
//! # async fn demo() {
//! let store = KeyValueStore::local_only(Arc::new(MemoryStorage::new()));
//! store.set("mathMillionaireClasses", &serde_json::json!(["7A"])).await;
//! assert!(store.exists("mathMillionaireClasses").await);
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
