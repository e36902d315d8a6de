//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the two storage backends the key-value facade
//! sits on: a remote database and local storage.

pub mod local;
pub mod remote;
