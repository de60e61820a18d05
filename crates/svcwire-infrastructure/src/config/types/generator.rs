//! Top-level generator configuration

use serde::{Deserialize, Serialize};
use svcwire_domain::value_objects::EngineConfig;

use super::{LoggingConfig, QueryCacheConfig};

/// Complete generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Catalog builder and validation settings
    pub engine: EngineConfig,

    /// Incremental query cache
    pub cache: QueryCacheConfig,

    /// Logging
    pub logging: LoggingConfig,

    /// Evaluate insertion points in parallel
    pub parallel: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            cache: QueryCacheConfig::default(),
            logging: LoggingConfig::default(),
            parallel: true,
        }
    }
}
