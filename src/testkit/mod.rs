//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`remote`] - [`MemoryRemote`](remote::MemoryRemote), an in-memory
//!   [`RemoteClient`](crate::port::RemoteClient) with switchable failures.

pub mod remote;

pub use remote::MemoryRemote;
