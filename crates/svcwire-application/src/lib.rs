//! Application Layer - svcwire
//!
//! Type matching engine of the svcwire registration generator.
//!
//! ## Architecture
//!
//! The application layer:
//! - Builds the per-compilation [`catalog::TypeCatalog`] from a feed
//! - Validates insertion points and resolves their queries
//! - Runs the matching engine and registration derivation
//! - Defines the [`ports::QueryEvaluator`] seam used by the cache layer
//!
//! Everything here is synchronous and free of I/O. Independent queries may
//! be evaluated in parallel; a single evaluation is sequential and
//! deterministic.
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `svcwire-domain`: value model and ports
//! - `tracing`: diagnostics logging

pub mod catalog;
pub mod generator;
pub mod matching;
pub mod ports;
pub mod registration;
pub mod validation;

pub use catalog::{CatalogView, TypeCatalog};
pub use generator::{GenerationOutcome, MethodImplementation, RegistrationGenerator};
pub use matching::{ResolvedTargets, evaluate, is_assignable_to, prefilter};
pub use ports::{QueryEvaluator, ScanEvaluator};
pub use registration::{derive, derive_dispatches, derive_registrations};
pub use validation::{Validation, validate_insertion_point};
