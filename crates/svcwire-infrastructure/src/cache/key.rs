//! Structural cache keys

use serde::{Deserialize, Serialize};
use svcwire_application::catalog::TypeCatalog;
use svcwire_application::matching::{prefilter, resolve_targets};
use svcwire_domain::value_objects::QuerySpecification;
use tracing::trace;

/// Catalog facts one query depends on
///
/// Candidates surviving the query's own-fact filters, in declaration order,
/// with their content fingerprints, followed by the fingerprints of the
/// closed assignable-to and exclusion targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CandidateSummary {
    /// `(display name, fingerprint)` per candidate
    pub candidates: Vec<(String, String)>,
    /// Fingerprint of the closed assignable-to target
    pub assignable_to: Option<String>,
    /// Fingerprint of the closed exclusion target
    pub exclude_assignable_to: Option<String>,
}

impl CandidateSummary {
    /// Summarize what `spec` reads from `catalog`
    ///
    /// Queries whose outcome does not depend on the catalog (upstream errors,
    /// missing search criteria) get an empty summary.
    pub fn collect(catalog: &TypeCatalog, spec: &QuerySpecification) -> Self {
        if spec.has_errors || !spec.has_search_criteria() {
            return Self::default();
        }

        let candidates = prefilter(catalog, spec)
            .into_iter()
            .map(|ty| (ty.display_name.clone(), ty.fingerprint.clone()))
            .collect::<Vec<_>>();

        let (assignable_to, exclude_assignable_to) = match resolve_targets(catalog, spec) {
            Ok(targets) => (
                targets.assignable_to.map(|ty| ty.fingerprint.clone()),
                targets.exclude_assignable_to.map(|ty| ty.fingerprint.clone()),
            ),
            Err(_) => (None, None),
        };

        trace!(candidates = candidates.len(), "candidate summary collected");
        Self {
            candidates,
            assignable_to,
            exclude_assignable_to,
        }
    }
}

/// Cache key of one query evaluation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryCacheKey {
    /// The query, compared field by field
    pub specification: QuerySpecification,
    /// Catalog facts the query reads
    pub summary: CandidateSummary,
}

impl QueryCacheKey {
    /// Key of `spec` evaluated against `catalog`
    pub fn new(catalog: &TypeCatalog, spec: &QuerySpecification) -> Self {
        Self {
            specification: spec.clone(),
            summary: CandidateSummary::collect(catalog, spec),
        }
    }
}
