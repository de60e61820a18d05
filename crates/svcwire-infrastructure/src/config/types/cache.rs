//! Query cache configuration types

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_QUERY_CACHE_CAPACITY;

/// Query cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryCacheConfig {
    /// Cache enabled
    pub enabled: bool,

    /// Maximum number of cached query outcomes
    pub max_capacity: u64,
}

impl Default for QueryCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_capacity: DEFAULT_QUERY_CACHE_CAPACITY,
        }
    }
}
