//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic: configuration loading and composition of the store from
//! configured adapters.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for the key-value store
//! - [`config`] - Configuration loading and validation

pub mod bootstrap;
pub mod config;
