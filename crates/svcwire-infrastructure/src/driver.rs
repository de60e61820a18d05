//! Generation driver
//!
//! One pass takes a compilation snapshot, builds a fresh type catalog from
//! it and generates every insertion point. The evaluator, and with it the
//! query cache, outlives passes so unchanged queries are not recomputed.

use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use svcwire_application::catalog::TypeCatalog;
use svcwire_application::generator::{GenerationOutcome, RegistrationGenerator};
use svcwire_application::ports::{QueryEvaluator, ScanEvaluator};
use svcwire_domain::error::Result;
use svcwire_domain::ports::CatalogFeed;
use svcwire_domain::value_objects::{AssemblyFact, InsertionPoint};
use tracing::{debug, info};

use crate::cache::{CacheStats, CachedEvaluator};
use crate::config::GeneratorConfig;
use crate::emit::render_method_body;
use crate::error_ext::ErrorContext;
use crate::logging::log_pass_summary;

/// Everything the host hands over for one compilation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompilationSnapshot {
    /// Assembly being compiled
    pub current_assembly: String,
    /// Visible assemblies, current one included, in declaration order
    #[serde(default)]
    pub assemblies: Vec<AssemblyFact>,
    /// Annotated methods to generate
    #[serde(default)]
    pub insertion_points: Vec<InsertionPoint>,
}

impl CatalogFeed for CompilationSnapshot {
    fn current_assembly(&self) -> &str {
        &self.current_assembly
    }

    fn assemblies(&self) -> &[AssemblyFact] {
        &self.assemblies
    }
}

/// Load a JSON compilation snapshot
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<CompilationSnapshot> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .io_context(format!("Failed to read snapshot: {}", path.display()))?;
    let snapshot: CompilationSnapshot = serde_json::from_str(&raw)?;
    debug!(
        path = %path.display(),
        assemblies = snapshot.assemblies.len(),
        insertion_points = snapshot.insertion_points.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

/// What one insertion point produced in a pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// `Type.Method` identity
    pub method: String,
    /// Name of the generated source unit
    pub source_name: String,
    /// Generated contribution or diagnostic
    pub outcome: GenerationOutcome,
    /// Rendered method body, for generated insertion points
    pub body: Option<String>,
}

/// Runs generation passes over compilation snapshots
pub struct GenerationDriver {
    generator: RegistrationGenerator,
    cache: Option<Arc<CachedEvaluator<ScanEvaluator>>>,
    config: GeneratorConfig,
}

impl GenerationDriver {
    /// Driver with the evaluator described by `config`
    pub fn new(config: GeneratorConfig) -> Self {
        if config.cache.enabled {
            let cache = Arc::new(CachedEvaluator::new(ScanEvaluator::new(), &config.cache));
            let evaluator: Arc<dyn QueryEvaluator> = cache.clone();
            Self {
                generator: RegistrationGenerator::new(evaluator),
                cache: Some(cache),
                config,
            }
        } else {
            Self::with_evaluator(Arc::new(ScanEvaluator::new()), config)
        }
    }

    /// Driver over a caller-supplied evaluator
    pub fn with_evaluator(evaluator: Arc<dyn QueryEvaluator>, config: GeneratorConfig) -> Self {
        Self {
            generator: RegistrationGenerator::new(evaluator),
            cache: None,
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Statistics of the built-in query cache, when enabled
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|cache| cache.stats())
    }

    /// Generate every insertion point of `snapshot`, in input order
    pub fn run(&self, snapshot: &CompilationSnapshot) -> Vec<GenerationReport> {
        let catalog = TypeCatalog::build(snapshot, &self.config.engine);
        info!(
            assembly = %snapshot.current_assembly,
            types = catalog.len(),
            skipped = catalog.skipped_types().len(),
            insertion_points = snapshot.insertion_points.len(),
            "Generation pass started"
        );

        let reports: Vec<GenerationReport> = if self.config.parallel {
            snapshot
                .insertion_points
                .par_iter()
                .map(|point| self.generate(&catalog, point))
                .collect()
        } else {
            snapshot
                .insertion_points
                .iter()
                .map(|point| self.generate(&catalog, point))
                .collect()
        };

        let count = |f: fn(&GenerationOutcome) -> bool| reports.iter().filter(|r| f(&r.outcome)).count();
        log_pass_summary(
            count(|o| matches!(o, GenerationOutcome::Generated(_))),
            count(|o| matches!(o, GenerationOutcome::Failed(_))),
            count(|o| matches!(o, GenerationOutcome::Suppressed)),
        );
        reports
    }

    /// Load a snapshot file and run one pass over it
    pub fn run_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<GenerationReport>> {
        let snapshot = load_snapshot(path)?;
        Ok(self.run(&snapshot))
    }

    fn generate(&self, catalog: &TypeCatalog, point: &InsertionPoint) -> GenerationReport {
        let outcome = self.generator.generate(catalog, point);
        let body = match &outcome {
            GenerationOutcome::Generated(implementation) => {
                Some(render_method_body(point, implementation))
            }
            GenerationOutcome::Failed(_) | GenerationOutcome::Suppressed => None,
        };
        GenerationReport {
            method: point.qualified_name(),
            source_name: format!(
                "{}_{}.Generated.cs",
                point.containing_type_metadata_name, point.method_name
            ),
            outcome,
            body,
        }
    }
}

impl std::fmt::Debug for GenerationDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationDriver")
            .field("config", &self.config)
            .field("cached", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}
