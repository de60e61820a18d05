//! Type References
//!
//! Textual references to named types as they appear in the catalog feed
//! and in query attributes: `Ns.Type`, `Ns.Type<A, B>`, `Ns.Type<>`,
//! `Ns.Type<,>`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Generic argument list of a [`TypeRef`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeArguments {
    /// Not generic
    None,
    /// Open generic definition referenced by arity only (`X<>`, `X<,>`)
    Unbound(usize),
    /// Closed generic instance (or an instance over type parameters)
    Bound(Vec<TypeRef>),
}

/// Value Object: reference to a named type
///
/// `name` is the fully qualified name without any generic argument list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeRef {
    /// Fully qualified name without generic arguments
    pub name: String,
    /// Generic arguments
    pub arguments: TypeArguments,
}

impl TypeRef {
    /// Reference to a non-generic type
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            arguments: TypeArguments::None,
        }
    }

    /// Reference to a closed generic instance
    pub fn generic<S: Into<String>>(name: S, arguments: Vec<TypeRef>) -> Self {
        if arguments.is_empty() {
            return Self::named(name);
        }
        Self {
            name: name.into(),
            arguments: TypeArguments::Bound(arguments),
        }
    }

    /// Reference to an open generic definition of the given arity
    pub fn unbound<S: Into<String>>(name: S, arity: usize) -> Self {
        if arity == 0 {
            return Self::named(name);
        }
        Self {
            name: name.into(),
            arguments: TypeArguments::Unbound(arity),
        }
    }

    /// Parse a display string into a reference
    pub fn parse(text: &str) -> Result<Self> {
        let mut parser = Parser {
            source: text,
            chars: text.char_indices().peekable(),
        };
        let parsed = parser.parse_ref()?;
        parser.skip_whitespace();
        if let Some((idx, ch)) = parser.chars.next() {
            return Err(Error::invalid_type_reference(
                text,
                format!("unexpected '{ch}' at offset {idx}"),
            ));
        }
        Ok(parsed)
    }

    /// Number of generic parameters
    pub fn arity(&self) -> usize {
        match &self.arguments {
            TypeArguments::None => 0,
            TypeArguments::Unbound(arity) => *arity,
            TypeArguments::Bound(args) => args.len(),
        }
    }

    /// Whether this names an open generic definition (`X<>`)
    pub fn is_unbound(&self) -> bool {
        matches!(self.arguments, TypeArguments::Unbound(_))
    }

    /// Lookup key of the referenced definition: `Ns.Type` or ``Ns.Type`2``
    pub fn metadata_name(&self) -> String {
        metadata_name(&self.name, self.arity())
    }

    /// Display string, e.g. `Ns.Type<A, B>`
    pub fn display(&self) -> String {
        self.to_string()
    }

    /// Display string with the argument list erased, e.g. `Ns.Type<,>`
    pub fn unbound_display(&self) -> String {
        match self.arity() {
            0 => self.name.clone(),
            arity => format!("{}<{}>", self.name, ",".repeat(arity - 1)),
        }
    }

    /// Replace type parameters by the given arguments
    ///
    /// A parameter is a bare name (no generic list) found in `parameters`;
    /// it is replaced by the argument at the same position.
    #[must_use]
    pub fn substitute(&self, parameters: &[String], arguments: &[TypeRef]) -> TypeRef {
        match &self.arguments {
            TypeArguments::None => parameters
                .iter()
                .position(|p| *p == self.name)
                .and_then(|idx| arguments.get(idx))
                .cloned()
                .unwrap_or_else(|| self.clone()),
            TypeArguments::Unbound(_) => self.clone(),
            TypeArguments::Bound(args) => TypeRef {
                name: self.name.clone(),
                arguments: TypeArguments::Bound(
                    args.iter()
                        .map(|arg| arg.substitute(parameters, arguments))
                        .collect(),
                ),
            },
        }
    }

    /// Bound argument list, empty for non-generic and unbound references
    pub fn bound_arguments(&self) -> &[TypeRef] {
        match &self.arguments {
            TypeArguments::Bound(args) => args,
            _ => &[],
        }
    }
}

/// Lookup key for a type name of the given arity
pub fn metadata_name(name: &str, arity: usize) -> String {
    if arity == 0 {
        name.to_string()
    } else {
        format!("{name}`{arity}")
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.arguments {
            TypeArguments::None => write!(f, "{}", self.name),
            TypeArguments::Unbound(arity) => {
                write!(f, "{}<{}>", self.name, ",".repeat(arity.saturating_sub(1)))
            }
            TypeArguments::Bound(args) => {
                write!(f, "{}<", self.name)?;
                for (idx, arg) in args.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ">")
            }
        }
    }
}

impl std::str::FromStr for TypeRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TypeRef {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl Parser<'_> {
    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::invalid_type_reference(self.source, message)
    }

    fn parse_ref(&mut self) -> Result<TypeRef> {
        self.skip_whitespace();
        let mut name = String::new();
        while let Some((_, ch)) = self
            .chars
            .next_if(|(_, c)| c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+'))
        {
            name.push(ch);
        }
        if name.is_empty() || name.starts_with('.') || name.ends_with('.') || name.contains("..") {
            return Err(self.error("expected a type name"));
        }

        self.skip_whitespace();
        if self.chars.next_if(|(_, c)| *c == '<').is_none() {
            return Ok(TypeRef::named(name));
        }

        self.skip_whitespace();
        // `<>` and `<,,>` name an open definition by arity
        if matches!(self.chars.peek(), Some((_, '>' | ','))) {
            let mut arity = 1;
            loop {
                self.skip_whitespace();
                match self.chars.next() {
                    Some((_, ',')) => arity += 1,
                    Some((_, '>')) => return Ok(TypeRef::unbound(name, arity)),
                    _ => return Err(self.error("unterminated unbound argument list")),
                }
            }
        }

        let mut args = Vec::new();
        loop {
            args.push(self.parse_ref()?);
            self.skip_whitespace();
            match self.chars.next() {
                Some((_, ',')) => {}
                Some((_, '>')) => return Ok(TypeRef::generic(name, args)),
                _ => return Err(self.error("unterminated generic argument list")),
            }
        }
    }
}
