//! Query Attributes and Specifications
//!
//! A [`QueryAttribute`] is the typed form of one registration attribute
//! occurrence as written by the user. A [`QuerySpecification`] is the same
//! query with every type reference resolved against the catalog; it is the
//! structural cache key of the matching engine.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{SourceLocation, TypeDescriptor, TypeRef, WildcardPattern};
use crate::constants::{
    ARG_AS_IMPLEMENTED_INTERFACES, ARG_AS_SELF, ARG_ASSEMBLY_NAME_FILTER, ARG_ASSIGNABLE_TO,
    ARG_ATTRIBUTE_FILTER, ARG_CUSTOM_HANDLER, ARG_EXCLUDE_ASSIGNABLE_TO, ARG_EXCLUDE_BY_ATTRIBUTE,
    ARG_EXCLUDE_BY_TYPE_NAME, ARG_FROM_ASSEMBLY_OF, ARG_KEY_SELECTOR, ARG_LIFETIME,
    ARG_TYPE_NAME_FILTER, LIFETIME_SCOPED, LIFETIME_SINGLETON,
};

/// Container lifetime of a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Lifetime {
    /// One instance per container
    Singleton,
    /// One instance per scope
    Scoped,
    /// New instance per resolution
    #[default]
    Transient,
}

impl Lifetime {
    /// Map the raw attribute value: 0 singleton, 1 scoped, anything else transient
    pub fn from_raw(value: Option<i64>) -> Self {
        match value {
            Some(LIFETIME_SINGLETON) => Self::Singleton,
            Some(LIFETIME_SCOPED) => Self::Scoped,
            _ => Self::Transient,
        }
    }

    /// Name used in registration method names
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Singleton => "Singleton",
            Self::Scoped => "Scoped",
            Self::Transient => "Transient",
        }
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which service types a match is registered as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputShape {
    /// The matched assignable-to type, or the type itself
    MatchedTypeOnly,
    /// The implementation type itself
    SelfOnly,
    /// Every flattened interface
    ImplementedInterfaces,
    /// The type itself plus forwarding interface registrations
    SelfAndInterfaces,
}

impl OutputShape {
    /// Shape selected by the `AsSelf` / `AsImplementedInterfaces` flags
    pub fn from_flags(as_self: bool, as_implemented_interfaces: bool) -> Self {
        match (as_self, as_implemented_interfaces) {
            (true, true) => Self::SelfAndInterfaces,
            (false, true) => Self::ImplementedInterfaces,
            (true, false) => Self::SelfOnly,
            (false, false) => Self::MatchedTypeOnly,
        }
    }
}

/// Where candidate types are taken from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssemblySelector {
    /// Assembly of the insertion point
    CurrentAssembly,
    /// Assembly declaring the given type
    NamedType(Arc<TypeDescriptor>),
    /// Current and referenced assemblies whose name matches
    AssemblyNameWildcard(WildcardPattern),
}

/// Classified form of a key selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeySelectorKind {
    /// Static generic method invoked with the implementation type
    GenericMethod,
    /// Static method taking a type object
    TypeObjectMethod,
    /// Member of the implementation type
    TypeMember,
}

/// Key selector reference after validation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeySelectorRef {
    /// Method or member name
    pub name: String,
    /// How the key is obtained
    pub kind: KeySelectorKind,
}

/// Custom handler reference after validation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomDispatchRef {
    /// Handler method name
    pub handler: String,
    /// Number of type parameters the handler declares
    pub type_parameter_count: usize,
}

/// Value of one named attribute argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeValue {
    /// `typeof(...)` argument
    Type(TypeRef),
    /// `typeof(...)` argument the host failed to resolve
    ErrorType(String),
    /// String argument
    String(String),
    /// Integer or enum argument
    Int(i64),
    /// Boolean argument
    Bool(bool),
}

/// Named argument of an attribute occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedArgument {
    /// Argument name
    pub name: String,
    /// Argument value
    pub value: AttributeValue,
}

/// Raw attribute occurrence: named arguments plus application span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeOccurrence {
    /// Named arguments in source order
    #[serde(default)]
    pub arguments: Vec<NamedArgument>,
    /// Attribute application span
    #[serde(default)]
    pub location: SourceLocation,
}

/// Value Object: one registration attribute, typed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "AttributeOccurrence", into = "AttributeOccurrence")]
pub struct QueryAttribute {
    /// Scan the assembly of this type
    pub from_assembly_of: Option<TypeRef>,
    /// Scan assemblies whose name matches
    pub assembly_name_filter: Option<String>,
    /// Keep types assignable to this type
    pub assignable_to: Option<TypeRef>,
    /// Drop types assignable to this type
    pub exclude_assignable_to: Option<TypeRef>,
    /// Raw lifetime value
    pub lifetime: Option<i64>,
    /// Register as implemented interfaces
    pub as_implemented_interfaces: bool,
    /// Register as self
    pub as_self: bool,
    /// Keep types whose name matches
    pub type_name_filter: Option<String>,
    /// Drop types whose name matches
    pub exclude_by_type_name: Option<String>,
    /// Keep types carrying this attribute
    pub attribute_filter: Option<String>,
    /// Drop types carrying this attribute
    pub exclude_by_attribute: Option<String>,
    /// Key selector member name
    pub key_selector: Option<String>,
    /// Custom handler method name
    pub custom_handler: Option<String>,
    /// Set when a type argument failed to resolve in the host
    pub has_errors: bool,
    /// Set when the unresolved argument is a search criterion
    pub unresolved_criterion: bool,
    /// Attribute application span
    pub location: SourceLocation,
}

impl QueryAttribute {
    /// Parse a named-argument bag
    ///
    /// Unknown names are ignored. A value of the wrong kind is ignored.
    /// Blank name filters count as absent.
    pub fn from_named_arguments<I, K>(arguments: I, location: SourceLocation) -> Self
    where
        I: IntoIterator<Item = (K, AttributeValue)>,
        K: AsRef<str>,
    {
        let mut attribute = Self {
            location,
            ..Self::default()
        };

        for (name, value) in arguments {
            let name = name.as_ref();
            if let AttributeValue::ErrorType(reference) = &value {
                debug!(argument = name, reference = %reference, "unresolved attribute argument");
                match name {
                    ARG_ASSIGNABLE_TO | ARG_ATTRIBUTE_FILTER => {
                        attribute.has_errors = true;
                        attribute.unresolved_criterion = true;
                    }
                    ARG_FROM_ASSEMBLY_OF => attribute.has_errors = true,
                    _ => {}
                }
                continue;
            }

            match (name, value) {
                (ARG_FROM_ASSEMBLY_OF, AttributeValue::Type(t)) => attribute.from_assembly_of = Some(t),
                (ARG_ASSIGNABLE_TO, AttributeValue::Type(t)) => attribute.assignable_to = Some(t),
                (ARG_EXCLUDE_ASSIGNABLE_TO, AttributeValue::Type(t)) => {
                    attribute.exclude_assignable_to = Some(t);
                }
                (ARG_ATTRIBUTE_FILTER, AttributeValue::Type(t)) => {
                    attribute.attribute_filter = Some(t.display());
                }
                (ARG_EXCLUDE_BY_ATTRIBUTE, AttributeValue::Type(t)) => {
                    attribute.exclude_by_attribute = Some(t.display());
                }
                (ARG_ASSEMBLY_NAME_FILTER, AttributeValue::String(s)) => {
                    attribute.assembly_name_filter = Some(s);
                }
                (ARG_TYPE_NAME_FILTER, AttributeValue::String(s)) => {
                    attribute.type_name_filter = non_blank(s);
                }
                (ARG_EXCLUDE_BY_TYPE_NAME, AttributeValue::String(s)) => {
                    attribute.exclude_by_type_name = non_blank(s);
                }
                (ARG_KEY_SELECTOR, AttributeValue::String(s)) => attribute.key_selector = Some(s),
                (ARG_CUSTOM_HANDLER, AttributeValue::String(s)) => {
                    attribute.custom_handler = Some(s);
                }
                (ARG_LIFETIME, AttributeValue::Int(v)) => attribute.lifetime = Some(v),
                (ARG_AS_IMPLEMENTED_INTERFACES, AttributeValue::Bool(b)) => {
                    attribute.as_implemented_interfaces = b;
                }
                (ARG_AS_SELF, AttributeValue::Bool(b)) => attribute.as_self = b,
                (
                    ARG_FROM_ASSEMBLY_OF
                    | ARG_ASSIGNABLE_TO
                    | ARG_EXCLUDE_ASSIGNABLE_TO
                    | ARG_ATTRIBUTE_FILTER
                    | ARG_EXCLUDE_BY_ATTRIBUTE
                    | ARG_ASSEMBLY_NAME_FILTER
                    | ARG_TYPE_NAME_FILTER
                    | ARG_EXCLUDE_BY_TYPE_NAME
                    | ARG_KEY_SELECTOR
                    | ARG_CUSTOM_HANDLER
                    | ARG_LIFETIME
                    | ARG_AS_IMPLEMENTED_INTERFACES
                    | ARG_AS_SELF,
                    value,
                ) => {
                    warn!(argument = name, ?value, "ignoring attribute argument of unexpected kind");
                }
                (other, _) => debug!(argument = other, "ignoring unknown attribute argument"),
            }
        }

        attribute
    }

    /// Whether at least one search criterion is set
    ///
    /// A criterion the host failed to resolve still counts.
    pub fn has_search_criteria(&self) -> bool {
        self.unresolved_criterion
            || self.assignable_to.is_some()
            || self.type_name_filter.is_some()
            || self.attribute_filter.is_some()
    }

    /// Output shape selected by the flags
    pub fn output_shape(&self) -> OutputShape {
        OutputShape::from_flags(self.as_self, self.as_implemented_interfaces)
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl From<AttributeOccurrence> for QueryAttribute {
    fn from(occurrence: AttributeOccurrence) -> Self {
        Self::from_named_arguments(
            occurrence
                .arguments
                .into_iter()
                .map(|argument| (argument.name, argument.value)),
            occurrence.location,
        )
    }
}

impl From<QueryAttribute> for AttributeOccurrence {
    fn from(attribute: QueryAttribute) -> Self {
        let mut arguments = Vec::new();
        let mut push = |name: &str, value: AttributeValue| {
            arguments.push(NamedArgument {
                name: name.to_string(),
                value,
            });
        };

        let type_arg = |reference: Option<TypeRef>| reference.map(AttributeValue::Type);
        let name_arg = |name: Option<String>| {
            name.map(|n| match TypeRef::parse(&n) {
                Ok(reference) => AttributeValue::Type(reference),
                Err(_) => AttributeValue::ErrorType(n),
            })
        };

        if let Some(v) = type_arg(attribute.from_assembly_of) {
            push(ARG_FROM_ASSEMBLY_OF, v);
        }
        if let Some(v) = attribute.assembly_name_filter {
            push(ARG_ASSEMBLY_NAME_FILTER, AttributeValue::String(v));
        }
        if let Some(v) = type_arg(attribute.assignable_to) {
            push(ARG_ASSIGNABLE_TO, v);
        }
        if let Some(v) = type_arg(attribute.exclude_assignable_to) {
            push(ARG_EXCLUDE_ASSIGNABLE_TO, v);
        }
        if let Some(v) = attribute.lifetime {
            push(ARG_LIFETIME, AttributeValue::Int(v));
        }
        if attribute.as_implemented_interfaces {
            push(ARG_AS_IMPLEMENTED_INTERFACES, AttributeValue::Bool(true));
        }
        if attribute.as_self {
            push(ARG_AS_SELF, AttributeValue::Bool(true));
        }
        if let Some(v) = attribute.type_name_filter {
            push(ARG_TYPE_NAME_FILTER, AttributeValue::String(v));
        }
        if let Some(v) = attribute.exclude_by_type_name {
            push(ARG_EXCLUDE_BY_TYPE_NAME, AttributeValue::String(v));
        }
        if let Some(v) = name_arg(attribute.attribute_filter) {
            push(ARG_ATTRIBUTE_FILTER, v);
        }
        if let Some(v) = name_arg(attribute.exclude_by_attribute) {
            push(ARG_EXCLUDE_BY_ATTRIBUTE, v);
        }
        if let Some(v) = attribute.key_selector {
            push(ARG_KEY_SELECTOR, AttributeValue::String(v));
        }
        if let Some(v) = attribute.custom_handler {
            push(ARG_CUSTOM_HANDLER, AttributeValue::String(v));
        }
        if attribute.has_errors {
            let name = if attribute.unresolved_criterion {
                ARG_ASSIGNABLE_TO
            } else {
                ARG_FROM_ASSEMBLY_OF
            };
            push(name, AttributeValue::ErrorType(String::new()));
        }

        Self {
            arguments,
            location: attribute.location,
        }
    }
}

/// Value Object: one query resolved against the catalog
///
/// Equality and hashing are structural over every field; descriptors
/// compare by display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuerySpecification {
    /// Candidate assemblies
    pub assembly_selector: AssemblySelector,
    /// Assignable-to target (the definition when closed arguments are given)
    pub assignable_to: Option<Arc<TypeDescriptor>>,
    /// Arguments re-closing an open `assignable_to` definition
    pub assignable_to_type_arguments: Option<Vec<TypeRef>>,
    /// Excluded assignable-to target
    pub exclude_assignable_to: Option<Arc<TypeDescriptor>>,
    /// Arguments re-closing an open `exclude_assignable_to` definition
    pub exclude_assignable_to_type_arguments: Option<Vec<TypeRef>>,
    /// Type name include filter
    pub type_name_include_pattern: Option<WildcardPattern>,
    /// Type name exclude filter
    pub type_name_exclude_pattern: Option<WildcardPattern>,
    /// Required attribute type name
    pub attribute_include_filter: Option<String>,
    /// Excluded attribute type name
    pub attribute_exclude_filter: Option<String>,
    /// Registration shape
    pub output_shape: OutputShape,
    /// Registration lifetime
    pub lifetime: Lifetime,
    /// Key selector
    pub key_selector: Option<KeySelectorRef>,
    /// Custom handler
    pub custom_dispatch: Option<CustomDispatchRef>,
    /// Attribute application span
    pub source_location: SourceLocation,
    /// A referenced type failed to resolve upstream
    pub has_errors: bool,
}

impl QuerySpecification {
    /// Create a specification over the current assembly with no criteria
    pub fn new(source_location: SourceLocation) -> Self {
        Self {
            assembly_selector: AssemblySelector::CurrentAssembly,
            assignable_to: None,
            assignable_to_type_arguments: None,
            exclude_assignable_to: None,
            exclude_assignable_to_type_arguments: None,
            type_name_include_pattern: None,
            type_name_exclude_pattern: None,
            attribute_include_filter: None,
            attribute_exclude_filter: None,
            output_shape: OutputShape::MatchedTypeOnly,
            lifetime: Lifetime::Transient,
            key_selector: None,
            custom_dispatch: None,
            source_location,
            has_errors: false,
        }
    }

    /// Whether at least one search criterion is set
    pub fn has_search_criteria(&self) -> bool {
        self.assignable_to.is_some()
            || self.type_name_include_pattern.is_some()
            || self.attribute_include_filter.is_some()
    }
}
