//! Domain Value Objects
//!
//! Immutable value objects compared by their fields. Everything the engine
//! needs from the host is copied into these types so that results can be
//! compared across compilation passes.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`TypeRef`] | Textual reference to a named type |
//! | [`TypeFact`] | Declaration facts supplied by the catalog feed |
//! | [`TypeDescriptor`] | Flattened, structurally comparable type view |
//! | [`WildcardPattern`] | Comma separated `*` name filter |
//! | [`QueryAttribute`] | One registration attribute, typed |
//! | [`QuerySpecification`] | One query resolved against the catalog |
//! | [`InsertionPoint`] | Annotated partial method |
//! | [`RegistrationRecord`] | One service registration |
//! | [`Diagnostic`] | Usage error or warning |

/// Engine configuration
pub mod config;
/// Type descriptors
pub mod descriptor;
/// Diagnostics and source spans
pub mod diagnostics;
/// Catalog feed facts
pub mod facts;
/// Insertion points
pub mod insertion_point;
/// Query attributes and specifications
pub mod query;
/// Match and registration records
pub mod records;
/// Type references
pub mod type_ref;
/// Wildcard name patterns
pub mod wildcard;

pub use config::EngineConfig;
pub use descriptor::{BaseChain, TypeDescriptor};
pub use diagnostics::{Diagnostic, DiagnosticKind, Severity, SourceLocation};
pub use facts::{AssemblyFact, NamespaceFact, TypeFact, TypeKind};
pub use insertion_point::{InsertionPoint, MethodFact, ParameterFact};
pub use query::{
    AssemblySelector, AttributeOccurrence, AttributeValue, CustomDispatchRef, KeySelectorKind,
    KeySelectorRef, Lifetime, NamedArgument, OutputShape, QueryAttribute, QuerySpecification,
};
pub use records::{
    CustomDispatchRecord, KeyExpression, MatchResult, QueryOutcome, RegistrationRecord,
};
pub use type_ref::{TypeArguments, TypeRef, metadata_name};
pub use wildcard::WildcardPattern;
