//! Registration Generator
//!
//! Produces what one insertion point contributes: validates it, evaluates
//! each of its queries and aggregates the results. An error diagnostic from
//! any query aborts the insertion point; the first warning is kept and the
//! remaining queries still contribute.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use svcwire_domain::value_objects::{
    CustomDispatchRecord, Diagnostic, InsertionPoint, RegistrationRecord,
};
use tracing::debug;

use crate::catalog::TypeCatalog;
use crate::ports::QueryEvaluator;
use crate::validation::{Validation, validate_insertion_point};

/// Aggregated contribution of one insertion point
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MethodImplementation {
    /// Registrations in emission order
    pub registrations: Vec<RegistrationRecord>,
    /// Handler calls in emission order
    pub dispatches: Vec<CustomDispatchRecord>,
    /// First warning raised by any query
    pub warning: Option<Diagnostic>,
}

/// Outcome of generating one insertion point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationOutcome {
    /// Code is generated, possibly with a warning
    Generated(MethodImplementation),
    /// A usage error; no code is generated
    Failed(Diagnostic),
    /// Upstream resolution errors; nothing is generated or reported
    Suppressed,
}

impl GenerationOutcome {
    /// Diagnostic to report, if any
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Generated(implementation) => implementation.warning.as_ref(),
            Self::Failed(diagnostic) => Some(diagnostic),
            Self::Suppressed => None,
        }
    }
}

/// Generates insertion points through a query evaluator
#[derive(Clone)]
pub struct RegistrationGenerator {
    evaluator: Arc<dyn QueryEvaluator>,
}

impl RegistrationGenerator {
    /// Create a generator over `evaluator`
    pub fn new(evaluator: Arc<dyn QueryEvaluator>) -> Self {
        Self { evaluator }
    }

    /// Generate one insertion point
    pub fn generate(&self, catalog: &TypeCatalog, point: &InsertionPoint) -> GenerationOutcome {
        let specifications = match validate_insertion_point(catalog, point) {
            Validation::Valid(specifications) => specifications,
            Validation::Failed(diagnostic) => {
                debug!(method = %point.qualified_name(), diagnostic = %diagnostic, "insertion point rejected");
                return GenerationOutcome::Failed(diagnostic);
            }
            Validation::Suppressed => return GenerationOutcome::Suppressed,
        };

        let mut implementation = MethodImplementation::default();
        for spec in &specifications {
            let outcome = self.evaluator.evaluate(catalog, spec);
            if let Some(diagnostic) = outcome.diagnostic {
                if diagnostic.is_error() {
                    return GenerationOutcome::Failed(diagnostic);
                }
                implementation.warning.get_or_insert(diagnostic);
            }
            implementation.registrations.extend(outcome.registrations);
            implementation.dispatches.extend(outcome.dispatches);
        }

        debug!(
            method = %point.qualified_name(),
            registrations = implementation.registrations.len(),
            dispatches = implementation.dispatches.len(),
            "insertion point generated"
        );
        GenerationOutcome::Generated(implementation)
    }
}

impl std::fmt::Debug for RegistrationGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationGenerator").finish_non_exhaustive()
    }
}
