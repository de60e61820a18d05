//! Moka-based cached query evaluator
//!
//! Wraps any [`QueryEvaluator`] behind a concurrent Moka cache. Concurrent
//! lookups of the same key join one computation instead of racing.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use svcwire_application::catalog::TypeCatalog;
use svcwire_application::ports::QueryEvaluator;
use svcwire_domain::value_objects::{QueryOutcome, QuerySpecification};
use tracing::{debug, info};

use super::key::QueryCacheKey;
use crate::config::QueryCacheConfig;

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that ran the inner evaluator
    pub misses: u64,
    /// Number of cache entries
    pub entries: u64,
}

impl CacheStats {
    /// Calculate hit rate from hits and misses
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Query evaluator memoizing outcomes by structural key
pub struct CachedEvaluator<E> {
    inner: E,
    cache: Cache<QueryCacheKey, Arc<QueryOutcome>>,
    lookups: AtomicU64,
    misses: AtomicU64,
}

impl<E: QueryEvaluator> CachedEvaluator<E> {
    /// Create a cached evaluator around `inner`
    pub fn new(inner: E, config: &QueryCacheConfig) -> Self {
        info!(
            max_capacity = config.max_capacity,
            "[CACHE] Initializing query cache"
        );
        Self {
            inner,
            cache: Cache::builder().max_capacity(config.max_capacity).build(),
            lookups: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Current statistics
    pub fn stats(&self) -> CacheStats {
        self.cache.run_pending_tasks();
        let misses = self.misses.load(Ordering::Relaxed);
        CacheStats {
            hits: self.lookups.load(Ordering::Relaxed).saturating_sub(misses),
            misses,
            entries: self.cache.entry_count(),
        }
    }

    /// Drop every cached outcome
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
        debug!("[CACHE] Query cache cleared");
    }

    /// The wrapped evaluator
    pub fn inner(&self) -> &E {
        &self.inner
    }
}

impl<E: QueryEvaluator> QueryEvaluator for CachedEvaluator<E> {
    fn evaluate(&self, catalog: &TypeCatalog, spec: &QuerySpecification) -> QueryOutcome {
        let key = QueryCacheKey::new(catalog, spec);
        self.lookups.fetch_add(1, Ordering::Relaxed);

        let outcome = self.cache.get_with(key, || {
            self.misses.fetch_add(1, Ordering::Relaxed);
            debug!(location = %spec.source_location, "[CACHE] query cache miss");
            Arc::new(self.inner.evaluate(catalog, spec))
        });
        QueryOutcome::clone(&outcome)
    }
}

impl<E> std::fmt::Debug for CachedEvaluator<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedEvaluator")
            .field("entries", &self.cache.entry_count())
            .finish_non_exhaustive()
    }
}
