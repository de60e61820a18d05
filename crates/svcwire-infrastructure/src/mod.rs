//! # Infrastructure Layer
//!
//! Technical concerns around the matching engine: the incremental cache,
//! configuration, logging, statement rendering and the generation driver.
//!
//! ## Module Categories
//!
//! ### Caching
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Moka-backed structural query cache with statistics |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration via figment |
//! | [`constants`] | Centralized infrastructure constants |
//!
//! ### Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//!
//! ### Generation
//! | Module | Description |
//! |--------|-------------|
//! | [`emit`] | Registration statement and method body rendering |
//! | [`driver`] | Snapshot loading and per-pass generation |

pub mod cache;
pub mod config;
pub mod constants;
pub mod driver;
pub mod emit;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use cache::{CacheStats, CachedEvaluator, QueryCacheKey};
pub use config::{ConfigLoader, GeneratorConfig};
pub use driver::{CompilationSnapshot, GenerationDriver, GenerationReport, load_snapshot};
pub use error_ext::ErrorContext;
