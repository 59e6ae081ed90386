//! Translation of a foreign predicate tree into statement expressions.
//!
//! The foreign model is a closed, serde-deserializable enum; [`translate`]
//! matches it exhaustively. Kinds and operators without a mapping fail
//! with an unsupported error instead of being dropped.

use serde::{Deserialize, Serialize};

use crate::cypher;
use crate::model::{Condition, Expression, Literal, SymbolicName};
use crate::{Error, Result};

/// A node of the foreign expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForeignExpression {
    /// A constant value.
    Constant { value: serde_json::Value },
    /// An entity variable, or one of its properties.
    Path {
        root: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        property: Option<String>,
    },
    Operation { operator: ForeignOperator, args: Vec<ForeignExpression> },
    /// A constructor-style projection of several values.
    Projection { args: Vec<ForeignExpression> },
    /// Runtime parameter placeholder.
    Param { name: String },
    SubQuery { description: String },
    Template { template: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForeignOperator {
    Eq,
    EqIgnoreCase,
    Ne,
    Lt,
    Loe,
    Gt,
    Goe,
    StringContains,
    StringContainsIc,
    StartsWith,
    EndsWith,
    Matches,
    IsNull,
    IsNotNull,
    And,
    Or,
    Xor,
    In,
    NotIn,
    Not,
    Add,
    Sub,
    Mult,
    Div,
    Mod,
    Like,
    Between,
    Exists,
    Coalesce,
    StringLength,
}

/// Translate a foreign expression.
pub fn translate(expression: &ForeignExpression) -> Result<Expression> {
    match expression {
        ForeignExpression::Constant { value } => Ok(Expression::Literal(Literal::from_json(value)?)),
        ForeignExpression::Path { root, property: None } => Ok(SymbolicName::new(root.as_str()).into()),
        ForeignExpression::Path { root, property: Some(property) } => {
            Ok(cypher::property(root.as_str(), property.as_str()))
        }
        ForeignExpression::Operation { operator, args } => operation(*operator, args),
        ForeignExpression::Projection { args } => {
            Ok(cypher::list_of(args.iter().map(translate).collect::<Result<Vec<_>>>()?))
        }
        ForeignExpression::Param { name } => unsupported(format!("parameter placeholder {name}")),
        ForeignExpression::SubQuery { description } => unsupported(format!("sub-query {description}")),
        ForeignExpression::Template { template } => unsupported(format!("template {template}")),
    }
}

/// Translate a foreign expression used as a predicate.
pub fn translate_condition(expression: &ForeignExpression) -> Result<Condition> {
    Ok(Condition::from(translate(expression)?))
}

fn unsupported<T>(what: String) -> Result<T> {
    tracing::warn!(kind = %what, "unsupported foreign expression");
    Err(Error::UnsupportedExpression(what))
}

fn operation(operator: ForeignOperator, args: &[ForeignExpression]) -> Result<Expression> {
    use ForeignOperator as Op;

    let condition = match operator {
        Op::Not => {
            let [operand] = operands::<1>(operator, args)?;
            Condition::from(operand).not()
        }
        Op::IsNull => {
            let [operand] = operands::<1>(operator, args)?;
            operand.is_null()
        }
        Op::IsNotNull => {
            let [operand] = operands::<1>(operator, args)?;
            operand.is_not_null()
        }
        Op::Eq
        | Op::EqIgnoreCase
        | Op::Ne
        | Op::Lt
        | Op::Loe
        | Op::Gt
        | Op::Goe
        | Op::StringContains
        | Op::StringContainsIc
        | Op::StartsWith
        | Op::EndsWith
        | Op::Matches
        | Op::In
        | Op::NotIn => {
            let [left, right] = operands::<2>(operator, args)?;
            match operator {
                Op::Eq => left.is_equal_to(right),
                Op::EqIgnoreCase => left.is_equal_to_ignore_case(right),
                Op::Ne => left.is_not_equal_to(right),
                Op::Lt => left.lt(right),
                Op::Loe => left.lte(right),
                Op::Gt => left.gt(right),
                Op::Goe => left.gte(right),
                Op::StringContains => left.contains(right),
                Op::StringContainsIc => left.contains_ignore_case(right),
                Op::StartsWith => left.starts_with(right),
                Op::EndsWith => left.ends_with(right),
                Op::Matches => left.matches(right),
                Op::In => left.in_(right),
                _ => left.in_(right).not(),
            }
        }
        Op::And | Op::Or | Op::Xor => {
            let [left, right] = operands::<2>(operator, args)?;
            let left = Condition::from(left);
            match operator {
                Op::And => left.and(right),
                Op::Or => left.or(right),
                _ => left.xor(right),
            }
        }
        Op::Add | Op::Sub | Op::Mult | Op::Div | Op::Mod => {
            let [left, right] = operands::<2>(operator, args)?;
            return Ok(match operator {
                Op::Add => left.add(right),
                Op::Sub => left.subtract(right),
                Op::Mult => left.multiply(right),
                Op::Div => left.divide(right),
                _ => left.remainder(right),
            });
        }
        Op::Like | Op::Between | Op::Exists | Op::Coalesce | Op::StringLength => {
            tracing::warn!(?operator, "unsupported foreign operator");
            return Err(Error::UnsupportedOperator(format!("{operator:?}")));
        }
    };
    Ok(condition.into())
}

fn operands<const N: usize>(operator: ForeignOperator, args: &[ForeignExpression]) -> Result<[Expression; N]> {
    if args.len() != N {
        return Err(Error::ArgumentCount {
            operator: format!("{operator:?}"),
            expected: N,
            got: args.len(),
        });
    }
    let translated = args.iter().map(translate).collect::<Result<Vec<_>>>()?;
    translated.try_into().map_err(|rest: Vec<Expression>| Error::ArgumentCount {
        operator: format!("{operator:?}"),
        expected: N,
        got: rest.len(),
    })
}
