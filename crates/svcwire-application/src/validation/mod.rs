//! Insertion Point Validation
//!
//! Checks the shape of an annotated method and of each of its attributes,
//! then resolves every attribute into a [`QuerySpecification`]. Checks run
//! in a fixed order and stop at the first error:
//!
//! 1. partial definition
//! 2. custom handler mode conflicts
//! 3. return type and parameters
//! 4. per attribute: search criteria, upstream errors, assembly selector,
//!    key selector, custom handler

use std::sync::Arc;

use svcwire_domain::value_objects::{
    AssemblySelector, CustomDispatchRef, Diagnostic, DiagnosticKind, EngineConfig, InsertionPoint,
    KeySelectorKind, KeySelectorRef, Lifetime, QueryAttribute, QuerySpecification, TypeDescriptor,
    TypeRef, WildcardPattern,
};
use tracing::{debug, warn};

use crate::catalog::TypeCatalog;

/// Result of validating one insertion point
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// Every attribute resolved; specifications in attribute order
    Valid(Vec<QuerySpecification>),
    /// A usage error; nothing is generated
    Failed(Diagnostic),
    /// A referenced type failed upstream; nothing is generated or reported
    Suppressed,
}

enum Resolution<T> {
    Resolved(T),
    Failed(Diagnostic),
    Suppressed,
}

macro_rules! resolve_or_return {
    ($expr:expr) => {
        match $expr {
            Resolution::Resolved(value) => value,
            Resolution::Failed(diagnostic) => return Validation::Failed(diagnostic),
            Resolution::Suppressed => return Validation::Suppressed,
        }
    };
}

/// Validate `point` and resolve its attributes against `catalog`
pub fn validate_insertion_point(catalog: &TypeCatalog, point: &InsertionPoint) -> Validation {
    let config = catalog.config();

    if !point.is_partial_definition {
        return fail(DiagnosticKind::NotPartialDefinition, point);
    }

    let custom_count = point
        .attributes
        .iter()
        .filter(|a| a.custom_handler.is_some())
        .count();
    if custom_count > 0 && custom_count < point.attributes.len() {
        return fail(DiagnosticKind::CantMixRegularAndCustomHandlerRegistrations, point);
    }
    if custom_count > 1 {
        return fail(DiagnosticKind::OnlyOneCustomHandlerAllowed, point);
    }

    if let Some(kind) = method_shape_error(point, config, custom_count == 1) {
        return fail(kind, point);
    }

    let mut specifications = Vec::with_capacity(point.attributes.len());
    for attribute in &point.attributes {
        if !attribute.has_search_criteria() {
            return Validation::Failed(Diagnostic::new(
                DiagnosticKind::MissingSearchCriteria,
                attribute.location.clone(),
            ));
        }
        if attribute.has_errors {
            debug!(method = %point.qualified_name(), "attribute references unresolved types");
            return Validation::Suppressed;
        }
        if attribute.from_assembly_of.is_some() && attribute.assembly_name_filter.is_some() {
            return Validation::Failed(Diagnostic::new(
                DiagnosticKind::CantUseBothFromAssemblyOfAndAssemblyNameFilter,
                attribute.location.clone(),
            ));
        }

        let key_selector = resolve_or_return!(classify_key_selector(point, attribute, config));
        let custom_dispatch = resolve_or_return!(check_custom_handler(point, attribute));
        let spec = resolve_or_return!(resolve_specification(
            catalog,
            attribute,
            key_selector,
            custom_dispatch
        ));
        specifications.push(spec);
    }

    Validation::Valid(specifications)
}

fn fail(kind: DiagnosticKind, point: &InsertionPoint) -> Validation {
    Validation::Failed(Diagnostic::new(kind, point.location.clone()))
}

fn method_shape_error(
    point: &InsertionPoint,
    config: &EngineConfig,
    custom_mode: bool,
) -> Option<DiagnosticKind> {
    if custom_mode {
        let first_parameter = point.parameters.first().map(|p| p.type_name.as_str());
        let returns_ok = match point.return_type.as_deref() {
            None => true,
            Some(return_type) => Some(return_type) == first_parameter,
        };
        return (!returns_ok).then_some(DiagnosticKind::WrongReturnTypeForCustomHandler);
    }

    let services = config.service_collection_type.as_str();
    if point
        .return_type
        .as_deref()
        .is_some_and(|return_type| return_type != services)
    {
        return Some(DiagnosticKind::WrongReturnType);
    }
    if point.parameters.len() != 1 || point.parameters[0].type_name != services {
        return Some(DiagnosticKind::WrongMethodParameters);
    }
    None
}

/// Classify the key selector of `attribute`
///
/// A static method of the containing type must either be generic without
/// parameters or take a single type object, and must return a value. An
/// instance method is not a valid selector. Any other name is taken as a
/// member of the implementation type.
fn classify_key_selector(
    point: &InsertionPoint,
    attribute: &QueryAttribute,
    config: &EngineConfig,
) -> Resolution<Option<KeySelectorRef>> {
    let Some(name) = &attribute.key_selector else {
        return Resolution::Resolved(None);
    };
    let incorrect = || {
        Resolution::Failed(Diagnostic::new(
            DiagnosticKind::KeySelectorMethodHasIncorrectSignature,
            attribute.location.clone(),
        ))
    };

    let kind = match point.static_method(name) {
        Some(method) if method.return_type.is_none() => return incorrect(),
        Some(method) if !method.type_parameters.is_empty() => {
            if !method.parameter_types.is_empty() {
                return incorrect();
            }
            KeySelectorKind::GenericMethod
        }
        Some(method) => {
            if method.parameter_types != [config.type_parameter_type.as_str()] {
                return incorrect();
            }
            KeySelectorKind::TypeObjectMethod
        }
        None if point.instance_method_names.iter().any(|m| m == name) => {
            return Resolution::Failed(Diagnostic::new(
                DiagnosticKind::KeySelectorMethodNotFound,
                attribute.location.clone(),
            ));
        }
        None => KeySelectorKind::TypeMember,
    };

    Resolution::Resolved(Some(KeySelectorRef {
        name: name.clone(),
        kind,
    }))
}

/// Check the custom handler of `attribute` against the containing type
fn check_custom_handler(
    point: &InsertionPoint,
    attribute: &QueryAttribute,
) -> Resolution<Option<CustomDispatchRef>> {
    let Some(handler) = &attribute.custom_handler else {
        return Resolution::Resolved(None);
    };
    let failed = |kind| Resolution::Failed(Diagnostic::new(kind, attribute.location.clone()));

    let Some(method) = point.static_method(handler) else {
        return failed(DiagnosticKind::CustomHandlerMethodNotFound);
    };

    let same_parameters = method.parameter_types.len() == point.parameters.len()
        && method
            .parameter_types
            .iter()
            .zip(&point.parameters)
            .all(|(handler_type, parameter)| *handler_type == parameter.type_name);
    if method.type_parameters.is_empty() || !same_parameters {
        return failed(DiagnosticKind::CustomHandlerMethodHasIncorrectSignature);
    }

    let type_parameter_count = method.type_parameters.len();
    if type_parameter_count > 1 {
        let assignable_arity = attribute.assignable_to.as_ref().map_or(0, TypeRef::arity);
        if assignable_arity + 1 != type_parameter_count {
            return failed(DiagnosticKind::CustomHandlerMethodHasIncorrectSignature);
        }
    }

    Resolution::Resolved(Some(CustomDispatchRef {
        handler: handler.clone(),
        type_parameter_count,
    }))
}

type Target = (Option<Arc<TypeDescriptor>>, Option<Vec<TypeRef>>);

/// Split an assignable-to reference into its definition and closing arguments
///
/// `None` when the definition is not in the catalog.
fn resolve_target(catalog: &TypeCatalog, reference: Option<&TypeRef>) -> Option<Target> {
    let Some(reference) = reference else {
        return Some((None, None));
    };

    let (lookup, arguments) = match reference.bound_arguments() {
        [] => (reference.clone(), None),
        arguments => (
            TypeRef::unbound(reference.name.clone(), arguments.len()),
            Some(arguments.to_vec()),
        ),
    };

    match catalog.resolve(&lookup) {
        Ok(Some(definition)) => Some((Some(definition), arguments)),
        Ok(None) => {
            debug!(reference = %reference, "type is not in the catalog");
            None
        }
        Err(e) => {
            warn!(reference = %reference, error = %e, "type reference could not be resolved");
            None
        }
    }
}

/// Resolve every reference of `attribute` into a specification
fn resolve_specification(
    catalog: &TypeCatalog,
    attribute: &QueryAttribute,
    key_selector: Option<KeySelectorRef>,
    custom_dispatch: Option<CustomDispatchRef>,
) -> Resolution<QuerySpecification> {
    let assembly_selector = if let Some(reference) = &attribute.from_assembly_of {
        match catalog.resolve(reference) {
            Ok(Some(ty)) => AssemblySelector::NamedType(ty),
            Ok(None) | Err(_) => {
                debug!(reference = %reference, "assembly marker type is not in the catalog");
                return Resolution::Suppressed;
            }
        }
    } else if let Some(filter) = &attribute.assembly_name_filter {
        match WildcardPattern::new(filter.as_str()) {
            Ok(pattern) => AssemblySelector::AssemblyNameWildcard(pattern),
            Err(e) => {
                warn!(filter = %filter, error = %e, "assembly name filter rejected");
                return Resolution::Suppressed;
            }
        }
    } else {
        AssemblySelector::CurrentAssembly
    };

    let Some((assignable_to, assignable_to_type_arguments)) =
        resolve_target(catalog, attribute.assignable_to.as_ref())
    else {
        return Resolution::Suppressed;
    };
    let Some((exclude_assignable_to, exclude_assignable_to_type_arguments)) =
        resolve_target(catalog, attribute.exclude_assignable_to.as_ref())
    else {
        return Resolution::Suppressed;
    };

    let (type_name_include_pattern, type_name_exclude_pattern) = match (
        WildcardPattern::optional(attribute.type_name_filter.as_deref()),
        WildcardPattern::optional(attribute.exclude_by_type_name.as_deref()),
    ) {
        (Ok(include), Ok(exclude)) => (include, exclude),
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "type name filter rejected");
            return Resolution::Suppressed;
        }
    };

    Resolution::Resolved(QuerySpecification {
        assembly_selector,
        assignable_to,
        assignable_to_type_arguments,
        exclude_assignable_to,
        exclude_assignable_to_type_arguments,
        type_name_include_pattern,
        type_name_exclude_pattern,
        attribute_include_filter: attribute.attribute_filter.clone(),
        attribute_exclude_filter: attribute.exclude_by_attribute.clone(),
        output_shape: attribute.output_shape(),
        lifetime: Lifetime::from_raw(attribute.lifetime),
        key_selector,
        custom_dispatch,
        source_location: attribute.location.clone(),
        has_errors: false,
    })
}
