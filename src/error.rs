use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures reported by a remote database client.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("change listeners are not supported by {client}")]
    Unsupported { client: &'static str },

    #[error("invalid remote path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("remote request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("remote returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("remote payload could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("no async runtime available to drive the listener")]
    NoRuntime,

    #[error("remote rejected the operation: {0}")]
    Rejected(String),
}

/// Failures reported by a local key-value storage backend.
#[derive(Error, Debug)]
pub enum LocalError {
    #[error("storage quota exceeded: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded { needed: usize, limit: usize },

    #[error("local storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("local storage file is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
}

/// Failure taxonomy of the key-value facade.
///
/// These never cross the facade boundary as `Err`; they are logged and
/// turned into `false` or `None` return values.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("remote backend not configured, serving from local storage")]
    RemoteUnavailable,

    #[error("remote {op} failed: {source}")]
    RemoteOperationFailed {
        op: &'static str,
        #[source]
        source: RemoteError,
    },

    #[error("local {op} failed: {source}")]
    LocalOperationFailed {
        op: &'static str,
        #[source]
        source: LocalError,
    },

    #[error("stored value for '{key}' is not valid JSON: {source}")]
    MalformedStoredValue {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while editing the quiz catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{what} name cannot be empty")]
    EmptyName { what: &'static str },

    #[error("{what} '{name}' already exists")]
    Duplicate { what: &'static str, name: String },

    #[error("{what} '{name}' not found")]
    NotFound { what: &'static str, name: String },

    #[error("question index {index} out of range ({len} questions)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("nothing to export: the question list is empty")]
    NothingToExport,

    #[error("invalid import: {0}")]
    InvalidImport(String),

    #[error("failed to persist {key}")]
    PersistFailed { key: &'static str },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Local(#[from] LocalError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("{op} '{key}' failed on every backend")]
    OperationFailed { op: &'static str, key: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
