//! Local storage configuration.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const DEFAULT_FILE_NAME: &str = "quizstore.json";

/// Local storage backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocalBackend {
    /// JSON file on disk, survives restarts.
    #[default]
    File,
    /// Process memory only.
    Memory,
}

impl fmt::Display for LocalBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// `[local]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LocalConfig {
    pub backend: LocalBackend,
    /// Storage file for the `file` backend.
    ///
    /// Defaults to `quizstore/quizstore.json` under the user data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Upper bound on the total stored size in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_bytes: Option<usize>,
}

impl LocalConfig {
    /// Storage file the `file` backend opens.
    #[must_use]
    pub fn resolved_path(&self) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }
        dirs::data_dir()
            .map(|dir| dir.join("quizstore").join(DEFAULT_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME))
    }
}
