//! Configuration options for normalization.

use serde::{Deserialize, Serialize};

/// How records whose `(date, time)` cannot be ordered lexically are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKeyPolicy {
    /// Fail normalization on the first offending record.
    Strict,
    /// Log a warning and sort lexically anyway.
    #[default]
    Lenient,
}

/// Options for the grouping and deduplication passes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizeOptions {
    pub sort_keys: SortKeyPolicy,
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that reject unorderable dates and times.
    pub fn strict() -> Self {
        Self {
            sort_keys: SortKeyPolicy::Strict,
        }
    }

    pub fn with_sort_keys(mut self, policy: SortKeyPolicy) -> Self {
        self.sort_keys = policy;
        self
    }
}
