//! Outbound adapters (driven side).

pub mod firebase;
pub mod local;
