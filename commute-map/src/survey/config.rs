//! Survey configuration.

use serde::Deserialize;

/// Default number of trip queries in flight per destination.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Configuration for fanning out trip queries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Maximum number of trip queries in flight at once.
    /// Zero is treated as one.
    pub max_concurrency: usize,
}

impl DispatchConfig {
    pub fn new(max_concurrency: usize) -> Self {
        Self { max_concurrency }
    }

    /// Concurrency actually used, never below one.
    pub fn effective_concurrency(&self) -> usize {
        self.max_concurrency.max(1)
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

/// What to do when a configured destination is not in the station directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingDestinationPolicy {
    /// Abort the survey with an error.
    #[default]
    Fail,
    /// Leave the destination out of the result set.
    Skip,
    /// Query anyway and emit the batch with an empty name and zero coordinates.
    Placeholder,
}
