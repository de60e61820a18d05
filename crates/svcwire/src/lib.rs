//! # svcwire
//!
//! Compile-time service registration discovery: given the declarations of
//! one compilation and the query attributes on designated insertion
//! points, find the matching types and derive the container registrations
//! that wire them in.
//!
//! This crate provides the public API and re-exports the three layers.
//!
//! ## Example
//!
//! ```ignore
//! use svcwire::infrastructure::{ConfigLoader, GenerationDriver, load_snapshot};
//!
//! let config = ConfigLoader::new().load()?;
//! let driver = GenerationDriver::new(config);
//! for report in driver.run(&load_snapshot("snapshot.json")?) {
//!     println!("{}: {:?}", report.method, report.body);
//! }
//! ```
//!
//! ## Architecture
//!
//! - `domain` - value model, diagnostics, errors and the catalog feed port
//! - `application` - type catalog, validation, matching and derivation
//! - `infrastructure` - query cache, config, logging, rendering and driver

/// Domain layer - value model and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use svcwire_domain::*;
}

/// Application layer - catalog, matching and registration derivation
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use svcwire_application::*;
}

/// Infrastructure layer - cache, config, logging and generation driver
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use svcwire_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the engine entry points at the crate root
pub use application::{RegistrationGenerator, TypeCatalog, evaluate};
pub use infrastructure::{GenerationDriver, GeneratorConfig, load_snapshot};
