//! Match and Registration Records
//!
//! Outputs of the matching engine and of registration derivation, consumed
//! by the statement renderer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Diagnostic, Lifetime, TypeDescriptor};

/// One candidate that survived every filter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchResult {
    /// Type to construct
    pub implementation_type: Arc<TypeDescriptor>,
    /// Assignable-to target as instantiated for this candidate
    pub matched_types: Vec<Arc<TypeDescriptor>>,
}

/// Key passed to a keyed registration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KeyExpression {
    /// `Method<Impl>()`
    GenericMethod {
        /// Static method name
        method: String,
    },
    /// `Method(typeof(Impl))`
    TypeObjectMethod {
        /// Static method name
        method: String,
    },
    /// `Impl.Member`
    TypeMember {
        /// Member name
        member: String,
    },
}

/// One service registration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegistrationRecord {
    /// Lifetime
    pub lifetime: Lifetime,
    /// Service type display name (unbound form for open generics)
    pub service_type_name: String,
    /// Implementation type display name (unbound form for open generics)
    pub implementation_type_name: String,
    /// Forward to the self registration instead of constructing
    pub resolve_via_self: bool,
    /// Use the type-object overload
    pub is_open_generic: bool,
    /// Service key
    pub key_expression: Option<KeyExpression>,
}

/// One call to a user-supplied handler
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomDispatchRecord {
    /// Handler method name
    pub handler_reference: String,
    /// Implementation type display name
    pub implementation_type_name: String,
    /// Implementation type followed by the matched supertype's arguments
    pub type_arguments: Vec<String>,
}

/// Everything one query contributes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct QueryOutcome {
    /// Registrations in emission order
    pub registrations: Vec<RegistrationRecord>,
    /// Handler calls in emission order
    pub dispatches: Vec<CustomDispatchRecord>,
    /// Warning or error, if any
    pub diagnostic: Option<Diagnostic>,
}

impl QueryOutcome {
    /// Outcome carrying only a diagnostic
    pub fn from_diagnostic(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostic: Some(diagnostic),
            ..Self::default()
        }
    }

    /// Whether the query produced nothing to emit
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty() && self.dispatches.is_empty()
    }
}
