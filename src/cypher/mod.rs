//! # Cypher DSL entry points
//!
//! Factories for nodes, names, literals and the other leaves of a
//! statement, plus the clauses a statement may start with. Everything
//! returned here is an immutable value or a builder stage; nothing talks to
//! a database.

pub mod builder;
pub mod render;

use crate::model::{
    Case, Expression, IntoExpression, ListComprehensionBuilder, Literal, MapExpression, Node,
    OngoingNamedPath, PatternComprehensionBuilder, PatternElement, SortItem, Statement,
    SymbolicName,
};
use crate::Result;

use builder::{
    Builder, OngoingReadingWithoutWhere, OngoingUnwind, OngoingUpdate, OngoingWith,
};

// ============================================================================
// Pattern elements
// ============================================================================

/// `(:`Label`)`, unnamed.
pub fn node(primary_label: &str) -> Node {
    Node::new([primary_label])
}

/// `(:`Primary`:`Additional`...)`, unnamed.
pub fn node_with_labels(primary_label: &str, additional_labels: &[&str]) -> Node {
    Node::new(std::iter::once(primary_label).chain(additional_labels.iter().copied()))
}

/// `()`
pub fn any_node() -> Node {
    Node::any()
}

/// `p = ...`
pub fn path(name: impl Into<SymbolicName>) -> OngoingNamedPath {
    OngoingNamedPath::new(name, false)
}

/// `p = shortestPath(...)`
pub fn shortest_path(name: impl Into<SymbolicName>) -> OngoingNamedPath {
    OngoingNamedPath::new(name, true)
}

// ============================================================================
// Expressions
// ============================================================================

pub fn name(value: impl Into<SymbolicName>) -> SymbolicName {
    value.into()
}

/// `container.key`
pub fn property(container: impl Into<SymbolicName>, key: impl Into<String>) -> Expression {
    container.into().property(key)
}

/// `$name`
pub fn parameter(name: impl Into<String>) -> Expression {
    Expression::Parameter(name.into())
}

pub fn literal_of(value: impl Into<Literal>) -> Expression {
    Expression::Literal(value.into())
}

pub fn null_literal() -> Expression {
    Expression::Literal(Literal::Null)
}

pub fn literal_true() -> Expression {
    Expression::Literal(Literal::Boolean(true))
}

pub fn literal_false() -> Expression {
    Expression::Literal(Literal::Boolean(false))
}

/// `[a, b, ...]`
pub fn list_of<I>(items: I) -> Expression
where
    I: IntoIterator,
    I::Item: Into<Expression>,
{
    Expression::List(items.into_iter().map(Into::into).collect())
}

/// `{key: value, ...}` in the given order.
pub fn map_of<K, I>(entries: I) -> Expression
where
    K: Into<String>,
    I: IntoIterator<Item = (K, Expression)>,
{
    Expression::Map(MapExpression::new(entries))
}

/// `*`
pub fn asterisk() -> Expression {
    Expression::Asterisk
}

pub fn sort(expression: impl Into<Expression>) -> SortItem {
    SortItem::new(expression.into())
}

/// `[variable IN ...]`
pub fn list_with(variable: impl Into<SymbolicName>) -> ListComprehensionBuilder {
    ListComprehensionBuilder::new(variable)
}

/// `[pattern ... | ...]`
pub fn list_based_on(pattern: impl Into<PatternElement>) -> PatternComprehensionBuilder {
    PatternComprehensionBuilder::new(pattern)
}

/// `CASE WHEN ...`
pub fn case() -> Case {
    Case::generic()
}

/// `CASE subject WHEN ...`
pub fn case_of(subject: impl Into<Expression>) -> Case {
    Case::simple(subject)
}

// ============================================================================
// Statement starts
// ============================================================================

pub fn match_<I>(patterns: I) -> OngoingReadingWithoutWhere
where
    I: IntoIterator,
    I::Item: Into<PatternElement>,
{
    builder::start_match(&Builder::default(), false, patterns)
}

pub fn optional_match<I>(patterns: I) -> OngoingReadingWithoutWhere
where
    I: IntoIterator,
    I::Item: Into<PatternElement>,
{
    builder::start_match(&Builder::default(), true, patterns)
}

pub fn create<I>(patterns: I) -> OngoingUpdate
where
    I: IntoIterator,
    I::Item: Into<PatternElement>,
{
    builder::start_create(&Builder::default(), patterns)
}

pub fn merge<I>(patterns: I) -> OngoingUpdate
where
    I: IntoIterator,
    I::Item: Into<PatternElement>,
{
    builder::start_merge(&Builder::default(), patterns)
}

pub fn unwind(expression: impl IntoExpression) -> OngoingUnwind {
    builder::start_unwind(&Builder::default(), expression)
}

pub fn with<I>(items: I) -> OngoingWith
where
    I: IntoIterator,
    I::Item: IntoExpression,
{
    builder::start_with(&Builder::default(), false, items)
}

pub fn with_distinct<I>(items: I) -> OngoingWith
where
    I: IntoIterator,
    I::Item: IntoExpression,
{
    builder::start_with(&Builder::default(), true, items)
}

/// `a UNION b UNION ...`
pub fn union<I>(statements: I) -> Result<Statement>
where
    I: IntoIterator<Item = Statement>,
{
    Statement::union(false, statements)
}

/// `a UNION ALL b UNION ALL ...`
pub fn union_all<I>(statements: I) -> Result<Statement>
where
    I: IntoIterator<Item = Statement>,
{
    Statement::union(true, statements)
}
