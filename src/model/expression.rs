//! Value-producing expressions.
//!
//! Every operation here consumes its receiver and returns a new tree node;
//! nothing is modified in place. Comparisons produce [`Condition`]s, which
//! can be lifted back into an expression with `Expression::from`.

use crate::functions;
use crate::Result;

use super::comprehension::{Case, ListComprehension, PatternComprehension};
use super::condition::{ComparisonOperator, Condition};
use super::literal::Literal;
use super::name::SymbolicName;
use super::pattern::{NamedPath, Node, PatternElement, Relationship, RelationshipChain};
use super::projection::MapProjection;

/// Any value-producing tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),
    /// A bound variable.
    Variable(SymbolicName),
    /// `container.key`
    Property { container: Box<Expression>, key: String },
    /// `$name`
    Parameter(String),
    /// `*`
    Asterisk,
    Function(FunctionInvocation),
    /// Binary arithmetic.
    Operation { operator: Operator, left: Box<Expression>, right: Box<Expression> },
    List(Vec<Expression>),
    Map(MapExpression),
    MapProjection(MapProjection),
    ListComprehension(ListComprehension),
    PatternComprehension(PatternComprehension),
    Case(Case),
    /// `expression AS alias`
    Aliased { expression: Box<Expression>, alias: SymbolicName },
    /// A pattern in expression position, e.g. the argument of `size()`.
    Pattern(PatternElement),
    Condition(Box<Condition>),
}

/// `name(arg, ...)` or `name(DISTINCT arg)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionInvocation {
    pub name: String,
    pub distinct: bool,
    pub arguments: Vec<Expression>,
}

impl FunctionInvocation {
    pub fn new(name: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Self { name: name.into(), distinct: false, arguments }
    }

    pub fn distinct(name: impl Into<String>, argument: Expression) -> Self {
        Self { name: name.into(), distinct: true, arguments: vec![argument] }
    }
}

/// Ordered `{key: value}` pairs. Insertion order is preserved when rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapExpression {
    pub entries: Vec<(String, Expression)>,
}

impl MapExpression {
    pub fn new<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Expression)>,
    {
        Self { entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulo,
    Exponentiation,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Addition => "+",
            Operator::Subtraction => "-",
            Operator::Multiplication => "*",
            Operator::Division => "/",
            Operator::Modulo => "%",
            Operator::Exponentiation => "^",
        }
    }
}

// ============================================================================
// Sorting
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// No keyword rendered; the database default (ascending) applies.
    #[default]
    Undefined,
    Ascending,
    Descending,
}

/// One term of an ORDER BY.
#[derive(Debug, Clone, PartialEq)]
pub struct SortItem {
    pub expression: Expression,
    pub direction: SortDirection,
}

impl SortItem {
    pub fn new(expression: Expression) -> Self {
        Self { expression, direction: SortDirection::Undefined }
    }

    pub fn ascending(mut self) -> Self {
        self.direction = SortDirection::Ascending;
        self
    }

    pub fn descending(mut self) -> Self {
        self.direction = SortDirection::Descending;
        self
    }
}

impl From<Expression> for SortItem {
    fn from(v: Expression) -> Self { SortItem::new(v) }
}

// ============================================================================
// Operations
// ============================================================================

impl Expression {
    fn compare(self, operator: ComparisonOperator, other: Expression) -> Condition {
        Condition::comparison(self, operator, other)
    }

    pub fn is_equal_to(self, other: impl Into<Expression>) -> Condition {
        self.compare(ComparisonOperator::Equal, other.into())
    }

    pub fn is_not_equal_to(self, other: impl Into<Expression>) -> Condition {
        self.compare(ComparisonOperator::NotEqual, other.into())
    }

    pub fn lt(self, other: impl Into<Expression>) -> Condition {
        self.compare(ComparisonOperator::LessThan, other.into())
    }

    pub fn lte(self, other: impl Into<Expression>) -> Condition {
        self.compare(ComparisonOperator::LessThanOrEqual, other.into())
    }

    pub fn gt(self, other: impl Into<Expression>) -> Condition {
        self.compare(ComparisonOperator::GreaterThan, other.into())
    }

    pub fn gte(self, other: impl Into<Expression>) -> Condition {
        self.compare(ComparisonOperator::GreaterThanOrEqual, other.into())
    }

    /// `= true`
    pub fn is_true(self) -> Condition {
        self.is_equal_to(Literal::Boolean(true))
    }

    /// `= false`
    pub fn is_false(self) -> Condition {
        self.is_equal_to(Literal::Boolean(false))
    }

    /// Regular expression match, `=~`.
    pub fn matches(self, pattern: impl Into<Expression>) -> Condition {
        self.compare(ComparisonOperator::Matches, pattern.into())
    }

    pub fn starts_with(self, other: impl Into<Expression>) -> Condition {
        self.compare(ComparisonOperator::StartsWith, other.into())
    }

    pub fn ends_with(self, other: impl Into<Expression>) -> Condition {
        self.compare(ComparisonOperator::EndsWith, other.into())
    }

    pub fn contains(self, other: impl Into<Expression>) -> Condition {
        self.compare(ComparisonOperator::Contains, other.into())
    }

    pub fn in_(self, list: impl Into<Expression>) -> Condition {
        self.compare(ComparisonOperator::In, list.into())
    }

    pub fn is_null(self) -> Condition {
        Condition::IsNull { expression: self, negated: false }
    }

    pub fn is_not_null(self) -> Condition {
        Condition::IsNull { expression: self, negated: true }
    }

    /// `size(self) = 0`
    pub fn is_empty(self) -> Condition {
        functions::size(self).is_equal_to(Literal::Integer(0))
    }

    /// Both operands are lower-cased before comparison.
    pub fn contains_ignore_case(self, other: impl Into<Expression>) -> Condition {
        functions::to_lower(self).contains(functions::to_lower(other))
    }

    /// Both operands are lower-cased before comparison.
    pub fn is_equal_to_ignore_case(self, other: impl Into<Expression>) -> Condition {
        functions::to_lower(self).is_equal_to(functions::to_lower(other))
    }

    fn operate(self, operator: Operator, other: Expression) -> Expression {
        Expression::Operation { operator, left: Box::new(self), right: Box::new(other) }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add(self, other: impl Into<Expression>) -> Expression {
        self.operate(Operator::Addition, other.into())
    }

    pub fn subtract(self, other: impl Into<Expression>) -> Expression {
        self.operate(Operator::Subtraction, other.into())
    }

    pub fn multiply(self, other: impl Into<Expression>) -> Expression {
        self.operate(Operator::Multiplication, other.into())
    }

    pub fn divide(self, other: impl Into<Expression>) -> Expression {
        self.operate(Operator::Division, other.into())
    }

    pub fn remainder(self, other: impl Into<Expression>) -> Expression {
        self.operate(Operator::Modulo, other.into())
    }

    pub fn pow(self, other: impl Into<Expression>) -> Expression {
        self.operate(Operator::Exponentiation, other.into())
    }

    /// Alias this expression. Aliasing an aliased expression replaces the
    /// alias instead of nesting.
    pub fn as_(self, alias: impl Into<SymbolicName>) -> Expression {
        let alias = alias.into();
        match self {
            Expression::Aliased { expression, .. } => Expression::Aliased { expression, alias },
            other => Expression::Aliased { expression: Box::new(other), alias },
        }
    }

    /// Property lookup on an arbitrary expression, e.g. `head(list).name`.
    pub fn property(self, key: impl Into<String>) -> Expression {
        Expression::Property { container: Box::new(self), key: key.into() }
    }

    pub fn ascending(self) -> SortItem {
        SortItem::new(self).ascending()
    }

    pub fn descending(self) -> SortItem {
        SortItem::new(self).descending()
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<Literal> for Expression {
    fn from(v: Literal) -> Self { Expression::Literal(v) }
}

impl From<SymbolicName> for Expression {
    fn from(v: SymbolicName) -> Self { Expression::Variable(v) }
}

impl From<&SymbolicName> for Expression {
    fn from(v: &SymbolicName) -> Self { Expression::Variable(v.clone()) }
}

impl From<MapExpression> for Expression {
    fn from(v: MapExpression) -> Self { Expression::Map(v) }
}

impl From<FunctionInvocation> for Expression {
    fn from(v: FunctionInvocation) -> Self { Expression::Function(v) }
}

impl From<PatternElement> for Expression {
    fn from(v: PatternElement) -> Self { Expression::Pattern(v) }
}

impl From<Condition> for Expression {
    fn from(v: Condition) -> Self {
        match v {
            Condition::Expression(inner) => inner,
            other => Expression::Condition(Box::new(other)),
        }
    }
}

// ============================================================================
// IntoExpression
// ============================================================================

/// Anything that can stand in a projection, DELETE or UNWIND position.
///
/// Pattern elements convert to their symbolic name and fail with
/// [`crate::Error::MissingName`] when they are unnamed; plain strings are
/// taken as symbolic names.
pub trait IntoExpression {
    fn into_expression(self) -> Result<Expression>;
}

impl IntoExpression for Expression {
    fn into_expression(self) -> Result<Expression> { Ok(self) }
}

impl IntoExpression for &Expression {
    fn into_expression(self) -> Result<Expression> { Ok(self.clone()) }
}

impl IntoExpression for Condition {
    fn into_expression(self) -> Result<Expression> { Ok(self.into()) }
}

impl IntoExpression for Literal {
    fn into_expression(self) -> Result<Expression> { Ok(self.into()) }
}

impl IntoExpression for Case {
    fn into_expression(self) -> Result<Expression> { Ok(self.into()) }
}

impl IntoExpression for SymbolicName {
    fn into_expression(self) -> Result<Expression> { Ok(self.into()) }
}

impl IntoExpression for &SymbolicName {
    fn into_expression(self) -> Result<Expression> { Ok(self.into()) }
}

impl IntoExpression for &str {
    fn into_expression(self) -> Result<Expression> { Ok(SymbolicName::from(self).into()) }
}

impl IntoExpression for String {
    fn into_expression(self) -> Result<Expression> { Ok(SymbolicName::from(self).into()) }
}

impl IntoExpression for Node {
    fn into_expression(self) -> Result<Expression> { (&self).into_expression() }
}

impl IntoExpression for &Node {
    fn into_expression(self) -> Result<Expression> { Ok(self.required_name()?.into()) }
}

impl IntoExpression for Relationship {
    fn into_expression(self) -> Result<Expression> { (&self).into_expression() }
}

impl IntoExpression for &Relationship {
    fn into_expression(self) -> Result<Expression> { Ok(self.required_name()?.into()) }
}

impl IntoExpression for RelationshipChain {
    fn into_expression(self) -> Result<Expression> { (&self).into_expression() }
}

impl IntoExpression for &RelationshipChain {
    fn into_expression(self) -> Result<Expression> { Ok(self.required_name()?.into()) }
}

impl IntoExpression for NamedPath {
    fn into_expression(self) -> Result<Expression> { Ok(self.name().clone().into()) }
}

impl IntoExpression for &NamedPath {
    fn into_expression(self) -> Result<Expression> { Ok(self.name().clone().into()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Expression {
        Expression::Variable(SymbolicName::new(name))
    }

    #[test]
    fn test_realiasing_replaces() {
        let aliased = var("n").as_("a").as_("b");
        match aliased {
            Expression::Aliased { expression, alias } => {
                assert_eq!(*expression, var("n"));
                assert_eq!(alias.as_str(), "b");
            }
            other => panic!("expected alias, got {other:?}"),
        }
    }

    #[test]
    fn test_condition_roundtrip_through_expression() {
        let condition = var("a").is_null();
        let expression = Expression::from(condition.clone());
        assert_eq!(Condition::from(expression), condition);
    }

    #[test]
    fn test_sort_defaults_to_undefined() {
        let item = SortItem::from(var("n"));
        assert_eq!(item.direction, SortDirection::Undefined);
        assert_eq!(var("n").descending().direction, SortDirection::Descending);
    }

    #[test]
    fn test_unnamed_node_has_no_expression() {
        let err = Node::new(["Bike"]).into_expression().unwrap_err();
        assert_eq!(err, crate::Error::MissingName);
    }
}
