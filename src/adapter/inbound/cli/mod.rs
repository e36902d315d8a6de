//! CLI module graph.

pub mod classes;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod key;
pub mod output;
pub mod questions;
pub mod topics;
pub mod watch;
