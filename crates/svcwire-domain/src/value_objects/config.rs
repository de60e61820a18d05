//! Engine Configuration Value Objects

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_EXCLUDED_INTERFACES, DEFAULT_MAX_TYPE_DEPTH, DEFAULT_SERVICE_COLLECTION_TYPE,
    DEFAULT_TYPE_PARAMETER_TYPE,
};

/// Settings of the catalog builder and insertion point validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Inheritance / interface nesting ceiling
    pub max_type_depth: usize,
    /// Interfaces left out of every flattened interface set
    pub excluded_interfaces: Vec<String>,
    /// Services collection type of regular insertion points
    pub service_collection_type: String,
    /// Parameter type of non-generic key selector methods
    pub type_parameter_type: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_type_depth: DEFAULT_MAX_TYPE_DEPTH,
            excluded_interfaces: DEFAULT_EXCLUDED_INTERFACES
                .iter()
                .map(ToString::to_string)
                .collect(),
            service_collection_type: DEFAULT_SERVICE_COLLECTION_TYPE.to_string(),
            type_parameter_type: DEFAULT_TYPE_PARAMETER_TYPE.to_string(),
        }
    }
}

impl EngineConfig {
    /// Whether `display_name` is on the interface deny-list
    pub fn is_excluded_interface(&self, display_name: &str) -> bool {
        self.excluded_interfaces.iter().any(|i| i == display_name)
    }
}
