//! Wildcard Name Patterns

use std::fmt;
use std::hash::{Hash, Hasher};

use regex::Regex;

use crate::error::{Error, Result};

/// Value Object: comma separated wildcard alternatives
///
/// `*` matches any substring, `,` separates alternatives and the whole
/// pattern is anchored. Everything else is literal.
///
/// ```rust
/// use svcwire_domain::value_objects::WildcardPattern;
///
/// let pattern = WildcardPattern::new("*Service").unwrap();
/// assert!(pattern.is_match("FooService"));
/// assert!(!pattern.is_match("ServiceFoo"));
/// ```
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    source: String,
    regex: Regex,
}

impl WildcardPattern {
    /// Compile a wildcard filter string
    pub fn new<S: Into<String>>(source: S) -> Result<Self> {
        let source = source.into();
        let translated = regex::escape(&source)
            .replace(r"\*", ".*")
            .replace(',', "|");
        let regex = Regex::new(&format!("^({translated})$")).map_err(|e| {
            Error::invalid_type_reference(source.clone(), format!("invalid wildcard: {e}"))
        })?;
        Ok(Self { source, regex })
    }

    /// Compile a filter that may be absent or blank
    pub fn optional(source: Option<&str>) -> Result<Option<Self>> {
        match source {
            Some(text) if !text.trim().is_empty() => Self::new(text).map(Some),
            _ => Ok(None),
        }
    }

    /// Whether `name` matches one of the alternatives
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Original filter string
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl PartialEq for WildcardPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for WildcardPattern {}

impl Hash for WildcardPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
    }
}

impl fmt::Display for WildcardPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
