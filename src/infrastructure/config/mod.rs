//! Infrastructure configuration modules.

pub mod local;
pub mod logging;
pub mod remote;
pub mod settings;
pub mod subscription;

pub use settings::Config;
