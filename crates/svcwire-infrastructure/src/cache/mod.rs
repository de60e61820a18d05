//! Incremental query cache
//!
//! Query outcomes are cached across generation passes under a structural
//! key: the query itself plus a summary of the catalog facts that can
//! change its outcome. A new compilation with identical contents hits the
//! cache; an edit to any candidate of a query misses only for that query.

pub mod key;
pub mod provider;

pub use key::{CandidateSummary, QueryCacheKey};
pub use provider::{CacheStats, CachedEvaluator};
