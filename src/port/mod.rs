//! Trait definitions (hexagonal ports). Depend only on domain and errors.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │   KeyValueStore facade  │
//!                    └────────────┬────────────┘
//!                ┌────────────────┴────────────────┐
//!                ▼                                 ▼
//!        ┌───────────────┐                 ┌───────────────┐
//!        │ RemoteClient  │                 │ LocalStorage  │
//!        │   (Firebase)  │                 │ (file/memory) │
//!        └───────────────┘                 └───────────────┘
//! ```

pub mod outbound;

pub use outbound::local::LocalStorage;
pub use outbound::remote::{ChangeEvent, ChangeSink, ListenerId, RemoteClient};
