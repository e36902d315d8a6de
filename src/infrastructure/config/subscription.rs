//! Change subscription configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::application::store::DEFAULT_POLL_INTERVAL;

/// `[subscription]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SubscriptionConfig {
    /// Period of the local polling fallback (milliseconds).
    pub poll_interval_ms: u64,
}

impl SubscriptionConfig {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for SubscriptionConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: u64::try_from(DEFAULT_POLL_INTERVAL.as_millis()).unwrap_or(2000),
        }
    }
}
