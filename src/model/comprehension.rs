//! List and pattern comprehensions, and CASE expressions.

use super::condition::{Condition, LogicalOperator};
use super::expression::Expression;
use super::name::SymbolicName;
use super::pattern::PatternElement;

/// Several returned expressions are returned as one list.
fn projection_of<I>(items: I) -> Option<Box<Expression>>
where
    I: IntoIterator,
    I::Item: Into<Expression>,
{
    let mut items: Vec<Expression> = items.into_iter().map(Into::into).collect();
    match items.len() {
        0 => None,
        1 => items.pop().map(Box::new),
        _ => Some(Box::new(Expression::List(items))),
    }
}

// ============================================================================
// List comprehension
// ============================================================================

/// `[x IN list WHERE filter | projection]`
#[derive(Debug, Clone, PartialEq)]
pub struct ListComprehension {
    pub variable: SymbolicName,
    pub list: Box<Expression>,
    pub filter: Option<Box<Condition>>,
    pub projection: Option<Box<Expression>>,
}

/// `[x ...` waiting for its source list.
#[derive(Debug, Clone)]
pub struct ListComprehensionBuilder {
    variable: SymbolicName,
}

impl ListComprehensionBuilder {
    pub fn new(variable: impl Into<SymbolicName>) -> Self {
        Self { variable: variable.into() }
    }

    pub fn in_(self, list: impl Into<Expression>) -> OngoingListComprehension {
        OngoingListComprehension {
            variable: self.variable,
            list: list.into(),
            filter: Condition::NoCondition,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OngoingListComprehension {
    variable: SymbolicName,
    list: Expression,
    filter: Condition,
}

impl OngoingListComprehension {
    pub fn where_(mut self, condition: impl Into<Condition>) -> Self {
        self.filter = self.filter.and(condition);
        self
    }

    pub fn returning<I>(self, items: I) -> Expression
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        let projection = projection_of(items);
        self.finish(projection)
    }

    /// Finish without a projection: `[x IN list WHERE ...]`.
    pub fn build(self) -> Expression {
        self.finish(None)
    }

    fn finish(self, projection: Option<Box<Expression>>) -> Expression {
        Expression::ListComprehension(ListComprehension {
            variable: self.variable,
            list: Box::new(self.list),
            filter: (!self.filter.is_empty()).then(|| Box::new(self.filter)),
            projection,
        })
    }
}

// ============================================================================
// Pattern comprehension
// ============================================================================

/// `[pattern WHERE filter | projection]`
#[derive(Debug, Clone, PartialEq)]
pub struct PatternComprehension {
    pub pattern: PatternElement,
    pub filter: Option<Box<Condition>>,
    pub projection: Box<Expression>,
}

#[derive(Debug, Clone)]
pub struct PatternComprehensionBuilder {
    pattern: PatternElement,
    filter: Condition,
}

impl PatternComprehensionBuilder {
    pub fn new(pattern: impl Into<PatternElement>) -> Self {
        Self { pattern: pattern.into(), filter: Condition::NoCondition }
    }

    pub fn where_(self, condition: impl Into<Condition>) -> Self {
        self.refine(LogicalOperator::And, condition.into())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn and(self, condition: impl Into<Condition>) -> Self {
        self.refine(LogicalOperator::And, condition.into())
    }

    pub fn or(self, condition: impl Into<Condition>) -> Self {
        self.refine(LogicalOperator::Or, condition.into())
    }

    fn refine(mut self, operator: LogicalOperator, condition: Condition) -> Self {
        self.filter = self.filter.chain(operator, condition);
        self
    }

    /// At least one expression is expected; an empty projection returns the
    /// pattern's matches as a list of the pattern itself.
    pub fn returning<I>(self, items: I) -> Expression
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        let projection = projection_of(items)
            .unwrap_or_else(|| Box::new(Expression::Pattern(self.pattern.clone())));
        Expression::PatternComprehension(PatternComprehension {
            pattern: self.pattern,
            filter: (!self.filter.is_empty()).then(|| Box::new(self.filter)),
            projection,
        })
    }
}

// ============================================================================
// CASE
// ============================================================================

/// `CASE [subject] WHEN .. THEN .. [ELSE ..] END`
#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub subject: Option<Box<Expression>>,
    pub alternatives: Vec<(Expression, Expression)>,
    pub default: Option<Box<Expression>>,
}

impl Case {
    /// `CASE WHEN condition THEN ...`
    pub fn generic() -> Self {
        Self { subject: None, alternatives: Vec::new(), default: None }
    }

    /// `CASE subject WHEN value THEN ...`
    pub fn simple(subject: impl Into<Expression>) -> Self {
        Self { subject: Some(Box::new(subject.into())), alternatives: Vec::new(), default: None }
    }

    pub fn when(self, when: impl Into<Expression>) -> CaseWhen {
        CaseWhen { case: self, when: when.into() }
    }

    pub fn else_(mut self, default: impl Into<Expression>) -> Self {
        self.default = Some(Box::new(default.into()));
        self
    }

    pub fn as_(self, alias: impl Into<SymbolicName>) -> Expression {
        Expression::from(self).as_(alias)
    }
}

/// A `WHEN` waiting for its `THEN`.
#[derive(Debug, Clone)]
pub struct CaseWhen {
    case: Case,
    when: Expression,
}

impl CaseWhen {
    pub fn then(mut self, then: impl Into<Expression>) -> Case {
        self.case.alternatives.push((self.when, then.into()));
        self.case
    }
}

impl From<Case> for Expression {
    fn from(v: Case) -> Self { Expression::Case(v) }
}

impl From<Case> for Condition {
    fn from(v: Case) -> Self { Condition::Expression(Expression::Case(v)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::literal::Literal;

    fn var(name: &str) -> Expression {
        Expression::Variable(SymbolicName::new(name))
    }

    #[test]
    fn test_multiple_projections_become_list() {
        let comprehension = ListComprehensionBuilder::new("a")
            .in_(var("list"))
            .returning([var("a"), var("b")]);
        let Expression::ListComprehension(lc) = comprehension else { panic!("expected comprehension") };
        assert_eq!(lc.projection.as_deref(), Some(&Expression::List(vec![var("a"), var("b")])));
        assert!(lc.filter.is_none());
    }

    #[test]
    fn test_case_collects_alternatives() {
        let case = Case::simple(var("n"))
            .when(Expression::from(Literal::from("blue")))
            .then(Expression::from(Literal::from(1)))
            .else_(Expression::from(Literal::from(3)));
        assert_eq!(case.alternatives.len(), 1);
        assert!(case.default.is_some());
    }
}
