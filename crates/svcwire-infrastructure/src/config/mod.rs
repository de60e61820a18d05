//! Configuration
//!
//! Generator settings merged from defaults, an optional TOML file and
//! `SVCWIRE_` environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::*;
