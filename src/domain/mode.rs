//! Backend selection for the key-value facade.

use std::fmt;

use serde::Serialize;

/// Which backing store serves primary operations.
///
/// Decided once when the store is built and never re-probed; per-call
/// fallback to local storage does not change the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// A remote database client was supplied.
    Remote,
    /// Only local storage is available.
    Local,
}

impl BackendMode {
    #[must_use]
    pub const fn is_remote(self) -> bool {
        matches!(self, Self::Remote)
    }
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote => f.write_str("remote"),
            Self::Local => f.write_str("local"),
        }
    }
}
