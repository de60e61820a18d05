//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Engine defaults are defined in `svcwire_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "svcwire.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "svcwire";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "SVCWIRE";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "SVCWIRE_LOG";

/// Maximum number of rotated log files to keep
pub const LOG_MAX_FILES: usize = 5;

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Default number of query outcomes kept across passes
pub const DEFAULT_QUERY_CACHE_CAPACITY: u64 = 10_000;

// ============================================================================
// RENDERING CONSTANTS
// ============================================================================

/// Indentation of one rendered statement line
pub const STATEMENT_INDENT: &str = "    ";

/// Parameter name used in resolve-via-self lambdas
pub const PROVIDER_LAMBDA_PARAMETER: &str = "s";
