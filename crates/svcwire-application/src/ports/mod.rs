//! Application Ports
//!
//! [`QueryEvaluator`] is the seam between per-insertion-point generation and
//! whatever evaluates a single query. [`ScanEvaluator`] runs the matching
//! engine and registration derivation directly; outer layers wrap it, for
//! instance with a cache.

use svcwire_domain::value_objects::{QueryOutcome, QuerySpecification};

use crate::catalog::TypeCatalog;
use crate::matching;
use crate::registration;

/// Evaluates one query against one catalog
pub trait QueryEvaluator: Send + Sync {
    /// Registrations, dispatches and diagnostic of `spec`
    fn evaluate(&self, catalog: &TypeCatalog, spec: &QuerySpecification) -> QueryOutcome;
}

/// Uncached evaluator: matching followed by derivation
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanEvaluator;

impl ScanEvaluator {
    /// Create a new scan evaluator
    pub fn new() -> Self {
        Self
    }
}

impl QueryEvaluator for ScanEvaluator {
    fn evaluate(&self, catalog: &TypeCatalog, spec: &QuerySpecification) -> QueryOutcome {
        let matches = match matching::evaluate(catalog, spec) {
            Ok(matches) => matches,
            Err(diagnostic) => return QueryOutcome::from_diagnostic(diagnostic),
        };
        registration::derive(catalog, spec, &matches).unwrap_or_else(QueryOutcome::from_diagnostic)
    }
}
