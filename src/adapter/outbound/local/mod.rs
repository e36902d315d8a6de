//! Local storage adapters.
//!
//! - [`MemoryStorage`] - process-local map, optionally size-capped
//! - [`FileStorage`] - JSON file on disk, shared between processes

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::LocalError;

/// Size in bytes an entry counts against a storage quota.
fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

/// Check that replacing `key` with `value` keeps the total under `quota`.
///
/// `others` is the size of every entry except `key`.
fn check_quota(
    quota: Option<usize>,
    others: usize,
    key: &str,
    value: &str,
) -> Result<(), LocalError> {
    let Some(limit) = quota else {
        return Ok(());
    };
    let needed = others + entry_size(key, value);
    if needed > limit {
        return Err(LocalError::QuotaExceeded { needed, limit });
    }
    Ok(())
}
