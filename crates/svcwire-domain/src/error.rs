//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for svcwire
///
/// Diagnostics reported to the user are values ([`crate::value_objects::Diagnostic`]),
/// not errors. This type covers malformed engine input and infrastructure failures.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (simple form)
    #[error("I/O error: {source}")]
    IoSimple {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// I/O operation error (with context)
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// A type reference string could not be parsed
    #[error("Invalid type reference '{reference}': {message}")]
    InvalidTypeReference {
        /// The offending reference text
        reference: String,
        /// What is wrong with it
        message: String,
    },

    /// A type reference does not name any type in the catalog
    #[error("Unresolved type: {name}")]
    UnresolvedType {
        /// Metadata or display name that was looked up
        name: String,
    },

    /// A type inherits from itself, directly or through other types
    #[error("Cyclic inheritance detected at {type_name}")]
    CyclicInheritance {
        /// Display name of the type where the cycle closed
        type_name: String,
    },

    /// Inheritance or interface chain is deeper than the configured ceiling
    #[error("Inheritance depth of {type_name} exceeds limit of {limit}")]
    DepthExceeded {
        /// Display name of the type being built
        type_name: String,
        /// Configured depth ceiling
        limit: usize,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Infrastructure failure (snapshot loading, rendering, caching)
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

// Basic error creation methods
impl Error {
    /// Create an invalid type reference error
    pub fn invalid_type_reference<R: Into<String>, M: Into<String>>(reference: R, message: M) -> Self {
        Self::InvalidTypeReference {
            reference: reference.into(),
            message: message.into(),
        }
    }

    /// Create an unresolved type error
    pub fn unresolved_type<S: Into<String>>(name: S) -> Self {
        Self::UnresolvedType { name: name.into() }
    }

    /// Create a cyclic inheritance error
    pub fn cyclic_inheritance<S: Into<String>>(type_name: S) -> Self {
        Self::CyclicInheritance {
            type_name: type_name.into(),
        }
    }

    /// Create a depth exceeded error
    pub fn depth_exceeded<S: Into<String>>(type_name: S, limit: usize) -> Self {
        Self::DepthExceeded {
            type_name: type_name.into(),
            limit,
        }
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }
}
