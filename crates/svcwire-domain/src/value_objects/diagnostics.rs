//! Diagnostics
//!
//! Usage errors and warnings reported against an insertion point or one of
//! its query attributes. Diagnostics are plain values carried through the
//! pipeline; they are formatted and reported by the host.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Source span in the host's source text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct SourceLocation {
    /// Source file path
    pub file: String,
    /// Start offset
    pub start: usize,
    /// End offset
    pub end: usize,
}

impl SourceLocation {
    /// Create a source span
    pub fn new<S: Into<String>>(file: S, start: usize, end: usize) -> Self {
        Self {
            file: file.into(),
            start,
            end,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}..{}]", self.file, self.start, self.end)
    }
}

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Aborts generation for the insertion point
    Error,
    /// Generation continues with an empty contribution
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Warning => write!(f, "WARNING"),
        }
    }
}

/// Every diagnostic the generator can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// Insertion point is not a partial method definition
    NotPartialDefinition,
    /// Insertion point returns something other than void or the services collection
    WrongReturnType,
    /// Insertion point does not take a single services collection parameter
    WrongMethodParameters,
    /// Query sets none of assignable-to, type name filter or attribute filter
    MissingSearchCriteria,
    /// Query is valid but matched no type
    NoMatchingTypesFound,
    /// Key selector names an instance method
    KeySelectorMethodNotFound,
    /// Key selector method has the wrong shape
    KeySelectorMethodHasIncorrectSignature,
    /// More than one query attribute uses a custom handler
    OnlyOneCustomHandlerAllowed,
    /// Custom handler insertion point returns something other than void or its first parameter type
    WrongReturnTypeForCustomHandler,
    /// Custom handler and regular queries on one insertion point
    CantMixRegularAndCustomHandlerRegistrations,
    /// Custom handler method has the wrong shape
    CustomHandlerMethodHasIncorrectSignature,
    /// Custom handler names no method of the containing type
    CustomHandlerMethodNotFound,
    /// Both assembly selectors are set
    CantUseBothFromAssemblyOfAndAssemblyNameFilter,
}

impl DiagnosticKind {
    /// Stable diagnostic identifier
    pub fn id(self) -> &'static str {
        match self {
            Self::NotPartialDefinition => "SW0001",
            Self::WrongReturnType => "SW0002",
            Self::WrongMethodParameters => "SW0003",
            Self::MissingSearchCriteria => "SW0004",
            Self::NoMatchingTypesFound => "SW0005",
            Self::KeySelectorMethodNotFound => "SW0006",
            Self::KeySelectorMethodHasIncorrectSignature => "SW0007",
            Self::OnlyOneCustomHandlerAllowed => "SW0008",
            Self::WrongReturnTypeForCustomHandler => "SW0009",
            Self::CantMixRegularAndCustomHandlerRegistrations => "SW0010",
            Self::CustomHandlerMethodHasIncorrectSignature => "SW0011",
            Self::CustomHandlerMethodNotFound => "SW0012",
            Self::CantUseBothFromAssemblyOfAndAssemblyNameFilter => "SW0013",
        }
    }

    /// Severity of this kind
    pub fn severity(self) -> Severity {
        match self {
            Self::NoMatchingTypesFound => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Message shown to the user
    pub fn message(self) -> &'static str {
        match self {
            Self::NotPartialDefinition => {
                "Method with a registration attribute must be a partial definition"
            }
            Self::WrongReturnType => {
                "Method with a registration attribute must return void or the services collection"
            }
            Self::WrongMethodParameters => {
                "Method with a registration attribute must take a single services collection parameter"
            }
            Self::MissingSearchCriteria => {
                "Registration attribute needs AssignableTo, TypeNameFilter or AttributeFilter"
            }
            Self::NoMatchingTypesFound => "No types match the registration attribute's criteria",
            Self::KeySelectorMethodNotFound => {
                "KeySelector must name a static method or a member of the implementation type"
            }
            Self::KeySelectorMethodHasIncorrectSignature => {
                "KeySelector method must return a value and be either generic without parameters or non-generic with one Type parameter"
            }
            Self::OnlyOneCustomHandlerAllowed => {
                "Only one registration attribute may use CustomHandler"
            }
            Self::WrongReturnTypeForCustomHandler => {
                "Method with CustomHandler must return void or the type of its first parameter"
            }
            Self::CantMixRegularAndCustomHandlerRegistrations => {
                "CustomHandler attributes cannot be mixed with regular registration attributes"
            }
            Self::CustomHandlerMethodHasIncorrectSignature => {
                "CustomHandler method must be generic and take the same parameters as the annotated method"
            }
            Self::CustomHandlerMethodNotFound => {
                "CustomHandler must name a method of the containing type"
            }
            Self::CantUseBothFromAssemblyOfAndAssemblyNameFilter => {
                "FromAssemblyOf and AssemblyNameFilter cannot be used together"
            }
        }
    }
}

/// One reported diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    /// What went wrong
    pub kind: DiagnosticKind,
    /// Severity, fixed by the kind
    pub severity: Severity,
    /// Where it went wrong
    pub location: SourceLocation,
    /// Message shown to the user
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic with the kind's default message
    pub fn new(kind: DiagnosticKind, location: SourceLocation) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            location,
            message: kind.message().to_string(),
        }
    }

    /// Whether this diagnostic aborts generation
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} at {}: {}",
            self.severity,
            self.kind.id(),
            self.location,
            self.message
        )
    }
}
