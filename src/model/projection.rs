//! Map projections: `n{.name, key: expr, .*}`.

use crate::{Error, Result};

use super::expression::Expression;
use super::name::SymbolicName;

#[derive(Debug, Clone, PartialEq)]
pub struct MapProjection {
    pub name: SymbolicName,
    pub entries: Vec<ProjectionEntry>,
}

/// One entry of a map projection, rendered in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionEntry {
    /// `.key`
    Property(String),
    /// `key: value`
    Entry { key: String, value: Expression },
    /// A bare variable, `name`.
    Variable(SymbolicName),
    /// `.*`
    AllProperties,
}

impl ProjectionEntry {
    pub fn property(key: impl Into<String>) -> Self {
        ProjectionEntry::Property(key.into())
    }

    pub fn entry(key: impl Into<String>, value: impl Into<Expression>) -> Self {
        ProjectionEntry::Entry { key: key.into(), value: value.into() }
    }

    pub fn all_properties() -> Self {
        ProjectionEntry::AllProperties
    }

    /// Derive an entry from an expression with an implicit key: an alias
    /// becomes the key, a property lookup becomes `.key`. Anything else has
    /// no name to use and is rejected.
    pub fn from_expression(expression: Expression) -> Result<Self> {
        match expression {
            Expression::Aliased { expression, alias } => Ok(ProjectionEntry::Entry {
                key: alias.as_str().to_owned(),
                value: *expression,
            }),
            Expression::Property { key, .. } => Ok(ProjectionEntry::Property(key)),
            Expression::Variable(name) => Ok(ProjectionEntry::Variable(name)),
            Expression::Asterisk => Ok(ProjectionEntry::AllProperties),
            Expression::Function(function) => {
                Err(Error::InvalidProjectionEntry(format!("function invocation {}()", function.name)))
            }
            other => Err(Error::InvalidProjectionEntry(format!("{other:?}"))),
        }
    }
}

impl From<&str> for ProjectionEntry {
    fn from(v: &str) -> Self { ProjectionEntry::Property(v.to_owned()) }
}

impl From<String> for ProjectionEntry {
    fn from(v: String) -> Self { ProjectionEntry::Property(v) }
}
