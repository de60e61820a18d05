//! # Domain Layer
//!
//! Immutable value model shared by every svcwire layer. Nothing in here
//! performs matching; it only describes types, queries and their results.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | Feed facts, descriptors, queries, records and diagnostics |
//! | [`ports`] | Boundary contracts implemented by outer layers |
//! | [`error`] | Domain error type and `Result` alias |
//! | [`constants`] | Engine defaults and attribute argument names |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

// Re-export commonly used types
pub use error::{Error, Result};
pub use ports::CatalogFeed;
pub use value_objects::{
    AssemblyFact, AssemblySelector, AttributeOccurrence, AttributeValue, CustomDispatchRecord,
    CustomDispatchRef, Diagnostic, DiagnosticKind, EngineConfig, InsertionPoint, KeyExpression,
    KeySelectorKind, KeySelectorRef, Lifetime, MatchResult, MethodFact, NamedArgument,
    NamespaceFact, OutputShape, ParameterFact, QueryAttribute, QueryOutcome, QuerySpecification,
    RegistrationRecord, Severity, SourceLocation, TypeArguments, TypeDescriptor, TypeFact,
    TypeKind, TypeRef, WildcardPattern,
};
