//! Literal values embedded in a statement.

use serde_json::Value as JsonValue;

use crate::{Error, Result};

/// A constant rendered inline: `'text'`, `42`, `0.5`, `true`, `NULL`, `[1, 'a']`.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Literal>),
}

impl Literal {
    /// Convert a dynamically typed JSON value. Objects have no literal form
    /// and are rejected.
    pub fn from_json(value: &JsonValue) -> Result<Self> {
        match value {
            JsonValue::Null => Ok(Literal::Null),
            JsonValue::Bool(b) => Ok(Literal::Boolean(*b)),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Literal::Integer(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Literal::Float(f))
                } else {
                    Err(Error::UnsupportedLiteral(n.to_string()))
                }
            }
            JsonValue::String(s) => Ok(Literal::String(s.clone())),
            JsonValue::Array(items) => items
                .iter()
                .map(Literal::from_json)
                .collect::<Result<Vec<_>>>()
                .map(Literal::List),
            JsonValue::Object(_) => Err(Error::UnsupportedLiteral(format!("object {value}"))),
        }
    }

    pub fn is_null(&self) -> bool { matches!(self, Literal::Null) }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Literal { fn from(v: bool) -> Self { Literal::Boolean(v) } }
impl From<i32> for Literal { fn from(v: i32) -> Self { Literal::Integer(v as i64) } }
impl From<i64> for Literal { fn from(v: i64) -> Self { Literal::Integer(v) } }
impl From<u32> for Literal { fn from(v: u32) -> Self { Literal::Integer(v as i64) } }
impl From<f64> for Literal { fn from(v: f64) -> Self { Literal::Float(v) } }
impl From<String> for Literal { fn from(v: String) -> Self { Literal::String(v) } }
impl From<&str> for Literal { fn from(v: &str) -> Self { Literal::String(v.to_owned()) } }
impl<T: Into<Literal>> From<Vec<T>> for Literal {
    fn from(v: Vec<T>) -> Self { Literal::List(v.into_iter().map(Into::into).collect()) }
}
impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Literal::Null) }
}
