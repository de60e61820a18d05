//! Matching Engine
//!
//! Evaluates one [`QuerySpecification`] against a [`TypeCatalog`]:
//! selects the candidate assemblies, runs the filter pipeline in its fixed
//! order and records, per surviving type, the supertype that made it match.
//!
//! Filter order:
//!
//! 1. non-abstract, non-static, nameable classes
//! 2. attribute include
//! 3. attribute exclude
//! 4. type name include
//! 5. type name exclude
//! 6. exclude-assignable-to
//! 7. assignable-to

use std::sync::Arc;

use svcwire_domain::error::Result;
use svcwire_domain::value_objects::{
    AssemblySelector, Diagnostic, DiagnosticKind, MatchResult, QuerySpecification, TypeDescriptor,
    TypeKind, TypeRef,
};
use tracing::{debug, warn};

use crate::catalog::TypeCatalog;

/// Assignability targets of a specification, closed over their arguments
#[derive(Debug, Clone, Default)]
pub struct ResolvedTargets {
    /// Types must be assignable to this
    pub assignable_to: Option<Arc<TypeDescriptor>>,
    /// Types assignable to this are dropped
    pub exclude_assignable_to: Option<Arc<TypeDescriptor>>,
}

/// Assemblies whose types are candidates, in scan order
///
/// A name wildcard scans referenced assemblies first and the current
/// assembly last.
pub fn select_assemblies(catalog: &TypeCatalog, selector: &AssemblySelector) -> Vec<String> {
    match selector {
        AssemblySelector::CurrentAssembly => vec![catalog.current_assembly().to_string()],
        AssemblySelector::NamedType(ty) => {
            if ty.owning_assembly.is_empty() {
                Vec::new()
            } else {
                vec![ty.owning_assembly.clone()]
            }
        }
        AssemblySelector::AssemblyNameWildcard(pattern) => {
            let current = catalog.current_assembly();
            catalog
                .assembly_names()
                .filter(|name| *name != current)
                .chain(std::iter::once(current))
                .filter(|name| pattern.is_match(name))
                .map(ToString::to_string)
                .collect()
        }
    }
}

/// Concrete class that user code can name
pub fn is_registrable_class(ty: &TypeDescriptor) -> bool {
    !ty.is_abstract && !ty.is_static && ty.can_be_referenced_by_name && ty.kind == TypeKind::Class
}

/// Filter steps 1 to 5, in declaration order
///
/// These steps depend only on a candidate's own facts; the result is also
/// what the incremental cache summarizes.
pub fn prefilter(catalog: &TypeCatalog, spec: &QuerySpecification) -> Vec<Arc<TypeDescriptor>> {
    let assemblies = select_assemblies(catalog, &spec.assembly_selector);
    catalog
        .build_catalog(&assemblies)
        .into_iter()
        .filter(|ty| is_registrable_class(ty))
        .filter(|ty| {
            spec.attribute_include_filter
                .as_deref()
                .is_none_or(|attribute| ty.has_attribute(attribute))
        })
        .filter(|ty| {
            spec.attribute_exclude_filter
                .as_deref()
                .is_none_or(|attribute| !ty.has_attribute(attribute))
        })
        .filter(|ty| {
            spec.type_name_include_pattern
                .as_ref()
                .is_none_or(|pattern| pattern.is_match(&ty.display_name))
        })
        .filter(|ty| {
            spec.type_name_exclude_pattern
                .as_ref()
                .is_none_or(|pattern| !pattern.is_match(&ty.display_name))
        })
        .collect()
}

/// Close the assignable-to targets over the specification's arguments
pub fn resolve_targets(catalog: &TypeCatalog, spec: &QuerySpecification) -> Result<ResolvedTargets> {
    let close = |target: &Option<Arc<TypeDescriptor>>, arguments: &Option<Vec<TypeRef>>| {
        match (target, arguments) {
            (Some(definition), Some(arguments)) => catalog.construct(definition, arguments).map(Some),
            (target, _) => Ok(target.clone()),
        }
    };
    Ok(ResolvedTargets {
        assignable_to: close(&spec.assignable_to, &spec.assignable_to_type_arguments)?,
        exclude_assignable_to: close(
            &spec.exclude_assignable_to,
            &spec.exclude_assignable_to_type_arguments,
        )?,
    })
}

/// Supertype of `candidate` that satisfies `target`, if any
///
/// An open generic definition matches any instance of it; anything else
/// matches only itself.
pub fn is_assignable_to(
    candidate: &Arc<TypeDescriptor>,
    target: &Arc<TypeDescriptor>,
) -> Option<Arc<TypeDescriptor>> {
    if candidate == target {
        return Some(Arc::clone(candidate));
    }

    let instance_of_target = |ty: &Arc<TypeDescriptor>| {
        ty.is_generic
            && ty
                .original_definition
                .as_ref()
                .is_some_and(|definition| definition == target)
    };

    if target.is_open_definition() {
        if target.kind == TypeKind::Interface {
            return candidate
                .all_interfaces
                .iter()
                .find(|interface| instance_of_target(*interface))
                .cloned();
        }
        return walk_bases(candidate, instance_of_target);
    }

    if target.kind == TypeKind::Interface {
        return candidate
            .all_interfaces
            .contains(target)
            .then(|| Arc::clone(target));
    }
    walk_bases(candidate, |base| base == target)
}

fn walk_bases(
    candidate: &TypeDescriptor,
    mut matches: impl FnMut(&Arc<TypeDescriptor>) -> bool,
) -> Option<Arc<TypeDescriptor>> {
    let mut base = candidate.base_type.as_ref();
    while let Some(current) = base {
        if matches(current) {
            return Some(Arc::clone(current));
        }
        base = current.base_type.as_ref();
    }
    None
}

/// Run the full pipeline for one specification
///
/// Returns an error diagnostic when the specification has no search
/// criteria and a `NoMatchingTypesFound` warning when nothing matched.
/// Specifications with upstream resolution errors yield no matches and
/// no diagnostic.
pub fn evaluate(
    catalog: &TypeCatalog,
    spec: &QuerySpecification,
) -> std::result::Result<Vec<MatchResult>, Diagnostic> {
    if spec.has_errors {
        return Ok(Vec::new());
    }
    if !spec.has_search_criteria() {
        return Err(Diagnostic::new(
            DiagnosticKind::MissingSearchCriteria,
            spec.source_location.clone(),
        ));
    }

    let targets = match resolve_targets(catalog, spec) {
        Ok(targets) => targets,
        Err(e) => {
            warn!(error = %e, location = %spec.source_location, "assignable-to target could not be closed");
            return Ok(Vec::new());
        }
    };

    let mut matches = Vec::new();
    for candidate in prefilter(catalog, spec) {
        if let Some(excluded) = &targets.exclude_assignable_to {
            if is_assignable_to(&candidate, excluded).is_some() {
                continue;
            }
        }

        let matched_types = match &targets.assignable_to {
            Some(target) => match is_assignable_to(&candidate, target) {
                Some(matched) => vec![matched],
                None => continue,
            },
            None => Vec::new(),
        };

        matches.push(MatchResult {
            implementation_type: candidate,
            matched_types,
        });
    }

    debug!(
        location = %spec.source_location,
        matches = matches.len(),
        "query evaluated"
    );

    if matches.is_empty() {
        return Err(Diagnostic::new(
            DiagnosticKind::NoMatchingTypesFound,
            spec.source_location.clone(),
        ));
    }
    Ok(matches)
}
