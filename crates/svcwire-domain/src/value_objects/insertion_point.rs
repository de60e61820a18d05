//! Insertion Points
//!
//! The partial method a set of registration attributes decorates, with just
//! enough of its containing type to validate key selectors and handlers.

use serde::{Deserialize, Serialize};

use super::{QueryAttribute, SourceLocation};

/// One value parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterFact {
    /// Parameter name
    pub name: String,
    /// Fully qualified parameter type
    pub type_name: String,
}

impl ParameterFact {
    /// Create a parameter
    pub fn new<N: Into<String>, T: Into<String>>(name: N, type_name: T) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Signature of a static method on the containing type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodFact {
    /// Method name
    pub name: String,
    /// Type parameter names
    #[serde(default)]
    pub type_parameters: Vec<String>,
    /// Fully qualified parameter types
    #[serde(default)]
    pub parameter_types: Vec<String>,
    /// Return type, `None` for void
    #[serde(default)]
    pub return_type: Option<String>,
}

/// Value Object: annotated partial method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionPoint {
    /// Namespace of the containing type, `None` for the global namespace
    #[serde(default)]
    pub namespace: Option<String>,
    /// Simple name of the containing type
    pub containing_type: String,
    /// Lookup name of the containing type
    pub containing_type_metadata_name: String,
    /// Method name
    pub method_name: String,
    /// Partial definition without a body
    #[serde(default = "default_true")]
    pub is_partial_definition: bool,
    /// `this` modifier on the first parameter
    #[serde(default)]
    pub is_extension_method: bool,
    /// Return type, `None` for void
    #[serde(default)]
    pub return_type: Option<String>,
    /// Value parameters
    #[serde(default)]
    pub parameters: Vec<ParameterFact>,
    /// Static methods visible on the containing type
    #[serde(default)]
    pub static_methods: Vec<MethodFact>,
    /// Names of instance methods on the containing type
    #[serde(default)]
    pub instance_method_names: Vec<String>,
    /// Registration attributes in source order
    #[serde(default)]
    pub attributes: Vec<QueryAttribute>,
    /// Method declaration span
    #[serde(default)]
    pub location: SourceLocation,
}

fn default_true() -> bool {
    true
}

impl InsertionPoint {
    /// Create a void, parameterless partial method
    pub fn new<T: Into<String>, M: Into<String>>(containing_type: T, method_name: M) -> Self {
        let containing_type = containing_type.into();
        Self {
            namespace: None,
            containing_type_metadata_name: containing_type.clone(),
            containing_type,
            method_name: method_name.into(),
            is_partial_definition: true,
            is_extension_method: false,
            return_type: None,
            parameters: Vec::new(),
            static_methods: Vec::new(),
            instance_method_names: Vec::new(),
            attributes: Vec::new(),
            location: SourceLocation::default(),
        }
    }

    /// Whether any attribute names a custom handler
    pub fn uses_custom_handler(&self) -> bool {
        self.attributes.iter().any(|a| a.custom_handler.is_some())
    }

    /// Static method by name
    pub fn static_method(&self, name: &str) -> Option<&MethodFact> {
        self.static_methods.iter().find(|m| m.name == name)
    }

    /// `Type.Method` identity used in logs and reports
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.containing_type_metadata_name, self.method_name)
    }
}
