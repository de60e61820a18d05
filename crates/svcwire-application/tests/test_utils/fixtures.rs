//! Declaration fact fixtures
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::test_utils::*;
//!
//! let catalog = TestFeed::new("App")
//!     .with_types("App", "App", vec![interface("IService"), class("MyService").implements("App.IService")])
//!     .catalog();
//! ```

#![allow(dead_code)]

use std::sync::Arc;

use svcwire_application::catalog::TypeCatalog;
use svcwire_domain::ports::CatalogFeed;
use svcwire_domain::value_objects::{
    AssemblyFact, EngineConfig, InsertionPoint, MatchResult, MethodFact, NamespaceFact,
    ParameterFact, QueryAttribute, QuerySpecification, SourceLocation, TypeDescriptor, TypeFact,
    TypeKind, TypeRef,
};

/// Services collection type used by regular insertion points
pub const SERVICES: &str = "Microsoft.Extensions.DependencyInjection.IServiceCollection";

/// In-memory catalog feed
#[derive(Debug, Clone)]
pub struct TestFeed {
    current: String,
    assemblies: Vec<AssemblyFact>,
}

impl TestFeed {
    /// Feed compiling `current`, with no assemblies yet
    pub fn new(current: &str) -> Self {
        Self {
            current: current.to_string(),
            assemblies: Vec::new(),
        }
    }

    /// Add `types` under `namespace` of `assembly`, creating the assembly on first use
    pub fn with_types(mut self, assembly: &str, namespace: &str, types: Vec<TypeFact>) -> Self {
        let mut ns = NamespaceFact::new(namespace);
        ns.types = types;

        if let Some(existing) = self.assemblies.iter_mut().find(|a| a.name == assembly) {
            existing.root.namespaces.push(ns);
        } else {
            let mut fact = AssemblyFact::new(assembly);
            fact.root.namespaces.push(ns);
            self.assemblies.push(fact);
        }
        self
    }

    /// Catalog with default engine settings
    pub fn catalog(&self) -> TypeCatalog {
        TypeCatalog::build(self, &EngineConfig::default())
    }

    /// Catalog with the given engine settings
    pub fn catalog_with(&self, config: &EngineConfig) -> TypeCatalog {
        TypeCatalog::build(self, config)
    }
}

impl CatalogFeed for TestFeed {
    fn current_assembly(&self) -> &str {
        &self.current
    }

    fn assemblies(&self) -> &[AssemblyFact] {
        &self.assemblies
    }
}

/// Concrete class fact
pub fn class(name: &str) -> TypeFact {
    TypeFact::new(name, TypeKind::Class)
}

/// Interface fact
pub fn interface(name: &str) -> TypeFact {
    TypeFact::new(name, TypeKind::Interface)
}

/// Fluent modifiers for type facts
pub trait TypeFactExt: Sized {
    /// Add a declared interface
    fn implements(self, reference: &str) -> Self;
    /// Set the base type
    fn extends(self, reference: &str) -> Self;
    /// Declare type parameters
    fn generic(self, parameters: &[&str]) -> Self;
    /// Mark abstract
    fn abstract_type(self) -> Self;
    /// Mark static
    fn static_type(self) -> Self;
    /// Mark as not nameable
    fn unnameable(self) -> Self;
    /// Add a declared attribute
    fn attribute(self, name: &str) -> Self;
    /// Add a nested type
    fn nested(self, fact: TypeFact) -> Self;
}

impl TypeFactExt for TypeFact {
    fn implements(mut self, reference: &str) -> Self {
        self.interfaces.push(type_ref(reference));
        self
    }

    fn extends(mut self, reference: &str) -> Self {
        self.base_type = Some(type_ref(reference));
        self
    }

    fn generic(mut self, parameters: &[&str]) -> Self {
        self.type_parameters = parameters.iter().map(ToString::to_string).collect();
        self
    }

    fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    fn static_type(mut self) -> Self {
        self.is_static = true;
        self
    }

    fn unnameable(mut self) -> Self {
        self.can_be_referenced_by_name = false;
        self
    }

    fn attribute(mut self, name: &str) -> Self {
        self.attributes.push(name.to_string());
        self
    }

    fn nested(mut self, fact: TypeFact) -> Self {
        self.nested_types.push(fact);
        self
    }
}

/// Parse a type reference
pub fn type_ref(text: &str) -> TypeRef {
    TypeRef::parse(text).unwrap()
}

/// Resolve a reference the catalog must know
pub fn resolved(catalog: &TypeCatalog, reference: &str) -> Arc<TypeDescriptor> {
    catalog
        .resolve(&type_ref(reference))
        .unwrap()
        .unwrap_or_else(|| panic!("{reference} is not in the catalog"))
}

/// Empty specification at a fixed location
pub fn spec() -> QuerySpecification {
    QuerySpecification::new(location())
}

/// Specification over types assignable to `reference`
pub fn assignable_spec(catalog: &TypeCatalog, reference: &str) -> QuerySpecification {
    let mut spec = spec();
    spec.assignable_to = Some(resolved(catalog, reference));
    spec
}

/// Location of attributes built by these fixtures
pub fn location() -> SourceLocation {
    SourceLocation::new("Startup.cs", 100, 140)
}

/// Location of insertion points built by these fixtures
pub fn method_location() -> SourceLocation {
    SourceLocation::new("Startup.cs", 200, 260)
}

/// Implementation display names of `matches`
pub fn implementation_names(matches: &[MatchResult]) -> Vec<String> {
    matches
        .iter()
        .map(|m| m.implementation_type.display_name.clone())
        .collect()
}

/// Attribute with `AssignableTo` set
pub fn assignable_attribute(reference: &str) -> QueryAttribute {
    QueryAttribute {
        assignable_to: Some(type_ref(reference)),
        location: location(),
        ..QueryAttribute::default()
    }
}

/// Valid regular insertion point `App.Startup.AddServices(IServiceCollection services)`
pub fn services_point(attributes: Vec<QueryAttribute>) -> InsertionPoint {
    let mut point = InsertionPoint::new("Startup", "AddServices");
    point.namespace = Some("App".to_string());
    point.containing_type_metadata_name = "App.Startup".to_string();
    point.is_extension_method = true;
    point.return_type = Some(SERVICES.to_string());
    point.parameters = vec![ParameterFact::new("services", SERVICES)];
    point.attributes = attributes;
    point.location = method_location();
    point
}

/// Static method fact
pub fn static_method(
    name: &str,
    type_parameters: &[&str],
    parameter_types: &[&str],
    return_type: Option<&str>,
) -> MethodFact {
    MethodFact {
        name: name.to_string(),
        type_parameters: type_parameters.iter().map(ToString::to_string).collect(),
        parameter_types: parameter_types.iter().map(ToString::to_string).collect(),
        return_type: return_type.map(ToString::to_string),
    }
}
