//! Catalog Feed Facts
//!
//! Plain declaration facts supplied by the host for every assembly visible
//! to a compilation. They are copied into [`super::TypeDescriptor`] values
//! when a catalog is built and never referenced afterwards.

use serde::{Deserialize, Serialize};

use super::TypeRef;

/// Kind of a named type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// Class type
    #[default]
    Class,
    /// Interface type
    Interface,
    /// Struct, enum, delegate or anything else
    Other,
}

impl TypeKind {
    /// Lowercase name used in fingerprints and logs
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Other => "other",
        }
    }
}

/// One assembly and its namespace tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyFact {
    /// Assembly name
    pub name: String,
    /// Global namespace
    #[serde(default)]
    pub root: NamespaceFact,
}

impl AssemblyFact {
    /// Create an assembly with an empty global namespace
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            root: NamespaceFact::default(),
        }
    }
}

/// A namespace with its types and child namespaces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NamespaceFact {
    /// Simple name (empty for the global namespace)
    #[serde(default)]
    pub name: String,
    /// Child namespaces in declaration order
    #[serde(default)]
    pub namespaces: Vec<NamespaceFact>,
    /// Types in declaration order
    #[serde(default)]
    pub types: Vec<TypeFact>,
}

impl NamespaceFact {
    /// Create an empty namespace
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

fn default_true() -> bool {
    true
}

/// Declaration facts of one named type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeFact {
    /// Simple name without type parameters
    pub name: String,
    /// Type parameter names of a generic definition
    #[serde(default)]
    pub type_parameters: Vec<String>,
    /// Kind
    #[serde(default)]
    pub kind: TypeKind,
    /// Abstract modifier
    #[serde(default)]
    pub is_abstract: bool,
    /// Static modifier
    #[serde(default)]
    pub is_static: bool,
    /// False for compiler-generated or otherwise unspeakable types
    #[serde(default = "default_true")]
    pub can_be_referenced_by_name: bool,
    /// Fully qualified attribute type names
    #[serde(default)]
    pub attributes: Vec<String>,
    /// Directly declared interfaces, may use the type parameters
    #[serde(default)]
    pub interfaces: Vec<TypeRef>,
    /// Direct base type
    #[serde(default)]
    pub base_type: Option<TypeRef>,
    /// Nested types in declaration order
    #[serde(default)]
    pub nested_types: Vec<TypeFact>,
}

impl TypeFact {
    /// Create a concrete, non-generic class with no relationships
    pub fn new<S: Into<String>>(name: S, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            type_parameters: Vec::new(),
            kind,
            is_abstract: false,
            is_static: false,
            can_be_referenced_by_name: true,
            attributes: Vec::new(),
            interfaces: Vec::new(),
            base_type: None,
            nested_types: Vec::new(),
        }
    }
}
