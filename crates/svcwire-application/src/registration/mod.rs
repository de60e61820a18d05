//! Registration Derivation
//!
//! Turns match results into registration records according to the output
//! shape, or into custom handler calls when the query names a handler.

use std::sync::Arc;

use svcwire_domain::value_objects::{
    CustomDispatchRecord, CustomDispatchRef, Diagnostic, DiagnosticKind, KeyExpression,
    KeySelectorKind, KeySelectorRef, MatchResult, OutputShape, QueryOutcome, QuerySpecification,
    RegistrationRecord, TypeDescriptor,
};

use crate::catalog::TypeCatalog;

/// Key expression carried into every record of a keyed query
pub fn key_expression(selector: &KeySelectorRef) -> KeyExpression {
    match selector.kind {
        KeySelectorKind::GenericMethod => KeyExpression::GenericMethod {
            method: selector.name.clone(),
        },
        KeySelectorKind::TypeObjectMethod => KeyExpression::TypeObjectMethod {
            method: selector.name.clone(),
        },
        KeySelectorKind::TypeMember => KeyExpression::TypeMember {
            member: selector.name.clone(),
        },
    }
}

/// Service types a match is registered as, in emission order
pub fn service_types(
    catalog: &TypeCatalog,
    shape: OutputShape,
    matched: &MatchResult,
) -> Vec<Arc<TypeDescriptor>> {
    let implementation = &matched.implementation_type;
    match shape {
        OutputShape::MatchedTypeOnly if matched.matched_types.is_empty() => {
            vec![Arc::clone(implementation)]
        }
        OutputShape::MatchedTypeOnly => matched.matched_types.clone(),
        OutputShape::SelfOnly => vec![Arc::clone(implementation)],
        OutputShape::ImplementedInterfaces => catalog.flatten_interfaces(implementation).to_vec(),
        OutputShape::SelfAndInterfaces => std::iter::once(Arc::clone(implementation))
            .chain(catalog.flatten_interfaces(implementation).iter().cloned())
            .collect(),
    }
}

/// Registration records for every match, grouped by match in match order
///
/// Generic implementations are registered through their unbound forms and
/// never forward. With [`OutputShape::SelfAndInterfaces`] every service
/// other than the implementation itself resolves via the self registration.
pub fn derive_registrations(
    catalog: &TypeCatalog,
    spec: &QuerySpecification,
    matches: &[MatchResult],
) -> Vec<RegistrationRecord> {
    let key = spec.key_selector.as_ref().map(key_expression);
    let mut records = Vec::new();

    for matched in matches {
        let implementation = &matched.implementation_type;
        for service in service_types(catalog, spec.output_shape, matched) {
            let record = if implementation.is_generic {
                RegistrationRecord {
                    lifetime: spec.lifetime,
                    service_type_name: if service.is_generic {
                        service.unbound_generic_name.clone()
                    } else {
                        service.display_name.clone()
                    },
                    implementation_type_name: implementation.unbound_generic_name.clone(),
                    resolve_via_self: false,
                    is_open_generic: true,
                    key_expression: key.clone(),
                }
            } else {
                RegistrationRecord {
                    lifetime: spec.lifetime,
                    resolve_via_self: spec.output_shape == OutputShape::SelfAndInterfaces
                        && service != *implementation,
                    service_type_name: service.display_name.clone(),
                    implementation_type_name: implementation.display_name.clone(),
                    is_open_generic: false,
                    key_expression: key.clone(),
                }
            };
            records.push(record);
        }
    }
    records
}

/// Handler calls for every match
///
/// A handler with more than one type parameter receives the matched
/// supertype's type arguments after the implementation type; their count
/// must fill the remaining parameters exactly.
pub fn derive_dispatches(
    handler: &CustomDispatchRef,
    spec: &QuerySpecification,
    matches: &[MatchResult],
) -> Result<Vec<CustomDispatchRecord>, Diagnostic> {
    let mut records = Vec::with_capacity(matches.len());
    for matched in matches {
        let implementation = &matched.implementation_type;
        let mut type_arguments = vec![implementation.display_name.clone()];

        if handler.type_parameter_count > 1 {
            let extra = matched
                .matched_types
                .first()
                .map(|m| m.type_arguments.as_slice())
                .unwrap_or_default();
            if extra.len() + 1 != handler.type_parameter_count {
                return Err(Diagnostic::new(
                    DiagnosticKind::CustomHandlerMethodHasIncorrectSignature,
                    spec.source_location.clone(),
                ));
            }
            type_arguments.extend(extra.iter().cloned());
        }

        records.push(CustomDispatchRecord {
            handler_reference: handler.handler.clone(),
            implementation_type_name: implementation.display_name.clone(),
            type_arguments,
        });
    }
    Ok(records)
}

/// Everything a matched query contributes
pub fn derive(
    catalog: &TypeCatalog,
    spec: &QuerySpecification,
    matches: &[MatchResult],
) -> Result<QueryOutcome, Diagnostic> {
    let mut outcome = QueryOutcome::default();
    match &spec.custom_dispatch {
        Some(handler) => outcome.dispatches = derive_dispatches(handler, spec, matches)?,
        None => outcome.registrations = derive_registrations(catalog, spec, matches),
    }
    Ok(outcome)
}
