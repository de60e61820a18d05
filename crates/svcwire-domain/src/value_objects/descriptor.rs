//! Type Descriptors
//!
//! Immutable, structurally comparable view of one named type as seen by
//! the matching engine.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use sha2::{Digest, Sha256};

use super::TypeKind;

/// Value Object: one named type of the catalog
///
/// ## Business Rules
///
/// - Two descriptors are equal iff their `display_name` is equal
/// - `all_interfaces` is transitively flattened and never includes the type itself
/// - `original_definition` is set only for constructed generic instances
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Abstract modifier
    pub is_abstract: bool,
    /// Static modifier
    pub is_static: bool,
    /// Kind
    pub kind: TypeKind,
    /// Whether source code can name the type
    pub can_be_referenced_by_name: bool,
    /// Fully qualified display name, e.g. `Ns.Handler<T>` or `Ns.IHandler<int>`
    pub display_name: String,
    /// Display name with generic arguments erased, e.g. `Ns.Handler<>`
    pub unbound_generic_name: String,
    /// Whether the type has a generic argument list
    pub is_generic: bool,
    /// Whether this is the open generic definition itself
    pub is_unbound_generic: bool,
    /// Display strings of the type arguments (parameter names for definitions)
    pub type_arguments: Vec<String>,
    /// Flattened interface set in discovery order
    pub all_interfaces: Vec<Arc<TypeDescriptor>>,
    /// Direct base type
    pub base_type: Option<Arc<TypeDescriptor>>,
    /// Open definition of a constructed generic instance
    pub original_definition: Option<Arc<TypeDescriptor>>,
    /// Fully qualified attribute type names
    pub declared_attributes: Vec<String>,
    /// Name of the declaring assembly (empty for types outside the feed)
    pub owning_assembly: String,
    /// Longest base, interface or definition path below this type
    pub inheritance_depth: usize,
    /// Hex SHA-256 over every fact that can influence matching
    pub fingerprint: String,
}

impl TypeDescriptor {
    /// Create a leaf descriptor for a type known only by reference
    pub fn external<S: Into<String>>(display_name: S, kind: TypeKind) -> Self {
        let display_name = display_name.into();
        let mut descriptor = Self {
            is_abstract: false,
            is_static: false,
            kind,
            can_be_referenced_by_name: true,
            unbound_generic_name: display_name.clone(),
            display_name,
            is_generic: false,
            is_unbound_generic: false,
            type_arguments: Vec::new(),
            all_interfaces: Vec::new(),
            base_type: None,
            original_definition: None,
            declared_attributes: Vec::new(),
            owning_assembly: String::new(),
            inheritance_depth: 0,
            fingerprint: String::new(),
        };
        descriptor.fingerprint = descriptor.compute_fingerprint();
        descriptor
    }

    /// Open generic definition (`X<>` in a query)
    pub fn is_open_definition(&self) -> bool {
        self.is_generic && self.is_unbound_generic
    }

    /// Whether `attribute` is among the declared attributes
    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.declared_attributes.iter().any(|a| a == attribute)
    }

    /// Iterate the base chain, nearest first
    pub fn base_chain(&self) -> BaseChain<'_> {
        BaseChain {
            next: self.base_type.as_deref(),
        }
    }

    /// Digest of the matching-relevant facts
    ///
    /// Interface order is kept because emission order follows it.
    pub fn compute_fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        let mut field = |label: &str, value: &str| {
            hasher.update(label.as_bytes());
            hasher.update([0x1f]);
            hasher.update(value.as_bytes());
            hasher.update([0x1e]);
        };
        field("name", &self.display_name);
        field("kind", self.kind.as_str());
        field(
            "modifiers",
            &format!(
                "{}{}{}",
                u8::from(self.is_abstract),
                u8::from(self.is_static),
                u8::from(self.can_be_referenced_by_name)
            ),
        );
        field("assembly", &self.owning_assembly);
        for attribute in &self.declared_attributes {
            field("attribute", attribute);
        }
        for interface in &self.all_interfaces {
            field("interface", &interface.display_name);
        }
        for base in self.base_chain() {
            field("base", &base.display_name);
        }
        if let Some(definition) = &self.original_definition {
            field("definition", &definition.display_name);
        }
        hex::encode(hasher.finalize())
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.display_name == other.display_name
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.display_name.hash(state);
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

/// Iterator over a base type chain
pub struct BaseChain<'a> {
    next: Option<&'a TypeDescriptor>,
}

impl<'a> Iterator for BaseChain<'a> {
    type Item = &'a TypeDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.base_type.as_deref();
        Some(current)
    }
}
