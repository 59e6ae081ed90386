//! Symbolic names and identifier quoting.

use std::fmt;

use super::expression::Expression;
use super::projection::{MapProjection, ProjectionEntry};

/// A bound variable: the name of a node, relationship, path, alias or
/// comprehension variable. Rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolicName(String);

impl SymbolicName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `name.key`
    pub fn property(&self, key: impl Into<String>) -> Expression {
        Expression::Property {
            container: Box::new(Expression::Variable(self.clone())),
            key: key.into(),
        }
    }

    /// `name{...}`
    pub fn project<I>(&self, entries: I) -> Expression
    where
        I: IntoIterator,
        I::Item: Into<ProjectionEntry>,
    {
        Expression::MapProjection(MapProjection {
            name: self.clone(),
            entries: entries.into_iter().map(Into::into).collect(),
        })
    }
}

impl From<&str> for SymbolicName {
    fn from(v: &str) -> Self { Self(v.to_owned()) }
}

impl From<String> for SymbolicName {
    fn from(v: String) -> Self { Self(v) }
}

impl From<&SymbolicName> for SymbolicName {
    fn from(v: &SymbolicName) -> Self { v.clone() }
}

impl fmt::Display for SymbolicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Quoting
// ============================================================================

/// True if `value` can appear unquoted: a letter or underscore followed by
/// letters, digits or underscores.
pub fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Back-tick quote `value`, doubling embedded back-ticks.
pub fn quote(value: &str) -> String {
    format!("`{}`", value.replace('`', "``"))
}

/// Quote `value` only if it is not a plain identifier.
pub fn escape_if_necessary(value: &str) -> String {
    if is_identifier(value) {
        value.to_owned()
    } else {
        quote(value)
    }
}
