//! Built-in function invocations.
//!
//! Functions whose argument is normally a bound entity (`id`, `labels`,
//! `type`, `nodes`, ...) accept anything implementing [`IntoExpression`]
//! and fail when handed an unnamed pattern element. The rest take plain
//! expressions.

use crate::model::{Expression, FunctionInvocation, IntoExpression, Literal, PatternElement};
use crate::Result;

fn call(name: &str, arguments: Vec<Expression>) -> Expression {
    Expression::Function(FunctionInvocation::new(name, arguments))
}

fn call_one(name: &str, argument: impl Into<Expression>) -> Expression {
    call(name, vec![argument.into()])
}

fn call_entity(name: &str, entity: impl IntoExpression) -> Result<Expression> {
    Ok(call(name, vec![entity.into_expression()?]))
}

// ============================================================================
// Entities and paths
// ============================================================================

/// `id(n)`
pub fn id(entity: impl IntoExpression) -> Result<Expression> {
    call_entity("id", entity)
}

/// `labels(n)`
pub fn labels(node: impl IntoExpression) -> Result<Expression> {
    call_entity("labels", node)
}

/// `type(r)`
pub fn type_(relationship: impl IntoExpression) -> Result<Expression> {
    call_entity("type", relationship)
}

pub fn properties(entity: impl IntoExpression) -> Result<Expression> {
    call_entity("properties", entity)
}

pub fn keys(entity: impl IntoExpression) -> Result<Expression> {
    call_entity("keys", entity)
}

pub fn start_node(relationship: impl IntoExpression) -> Result<Expression> {
    call_entity("startNode", relationship)
}

pub fn end_node(relationship: impl IntoExpression) -> Result<Expression> {
    call_entity("endNode", relationship)
}

/// `nodes(p)`
pub fn nodes(path: impl IntoExpression) -> Result<Expression> {
    call_entity("nodes", path)
}

pub fn relationships(path: impl IntoExpression) -> Result<Expression> {
    call_entity("relationships", path)
}

pub fn length(path: impl IntoExpression) -> Result<Expression> {
    call_entity("length", path)
}

// ============================================================================
// Aggregations
// ============================================================================

pub fn count(expression: impl Into<Expression>) -> Expression {
    call_one("count", expression)
}

/// `count(DISTINCT x)`
pub fn count_distinct(expression: impl Into<Expression>) -> Expression {
    Expression::Function(FunctionInvocation::distinct("count", expression.into()))
}

pub fn collect(expression: impl Into<Expression>) -> Expression {
    call_one("collect", expression)
}

pub fn collect_distinct(expression: impl Into<Expression>) -> Expression {
    Expression::Function(FunctionInvocation::distinct("collect", expression.into()))
}

pub fn avg(expression: impl Into<Expression>) -> Expression {
    call_one("avg", expression)
}

pub fn max(expression: impl Into<Expression>) -> Expression {
    call_one("max", expression)
}

pub fn min(expression: impl Into<Expression>) -> Expression {
    call_one("min", expression)
}

pub fn sum(expression: impl Into<Expression>) -> Expression {
    call_one("sum", expression)
}

pub fn percentile_cont(expression: impl Into<Expression>, percentile: f64) -> Expression {
    call("percentileCont", vec![expression.into(), Literal::Float(percentile).into()])
}

pub fn percentile_disc(expression: impl Into<Expression>, percentile: f64) -> Expression {
    call("percentileDisc", vec![expression.into(), Literal::Float(percentile).into()])
}

pub fn st_dev(expression: impl Into<Expression>) -> Expression {
    call_one("stDev", expression)
}

pub fn st_dev_p(expression: impl Into<Expression>) -> Expression {
    call_one("stDevP", expression)
}

// ============================================================================
// Scalars, lists, strings
// ============================================================================

pub fn coalesce<I>(expressions: I) -> Expression
where
    I: IntoIterator,
    I::Item: Into<Expression>,
{
    call("coalesce", expressions.into_iter().map(Into::into).collect())
}

pub fn to_lower(expression: impl Into<Expression>) -> Expression {
    call_one("toLower", expression)
}

pub fn to_upper(expression: impl Into<Expression>) -> Expression {
    call_one("toUpper", expression)
}

pub fn trim(expression: impl Into<Expression>) -> Expression {
    call_one("trim", expression)
}

pub fn size(expression: impl Into<Expression>) -> Expression {
    call_one("size", expression)
}

/// `size((a)-->())`
pub fn size_of(pattern: impl Into<PatternElement>) -> Expression {
    call_one("size", Expression::Pattern(pattern.into()))
}

pub fn head(expression: impl Into<Expression>) -> Expression {
    call_one("head", expression)
}

pub fn last(expression: impl Into<Expression>) -> Expression {
    call_one("last", expression)
}

pub fn range(start: impl Into<Expression>, end: impl Into<Expression>) -> Expression {
    call("range", vec![start.into(), end.into()])
}

pub fn range_with_step(
    start: impl Into<Expression>,
    end: impl Into<Expression>,
    step: impl Into<Expression>,
) -> Expression {
    call("range", vec![start.into(), end.into(), step.into()])
}

// ============================================================================
// Spatial
// ============================================================================

/// `point({latitude: .., longitude: ..})`
pub fn point(parameters: impl Into<Expression>) -> Expression {
    call_one("point", parameters)
}

pub fn distance(from: impl Into<Expression>, to: impl Into<Expression>) -> Expression {
    call("distance", vec![from.into(), to.into()])
}
