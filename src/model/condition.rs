//! Boolean-valued expressions and their composition algebra.
//!
//! `and`/`or`/`xor` flatten chains of the same operator into one n-ary
//! [`CompoundCondition`]; a change of operator starts a new group, which
//! the renderer parenthesizes. [`Condition::NoCondition`] is the identity
//! of every combinator and never renders.

use smallvec::SmallVec;

use super::expression::Expression;
use super::literal::Literal;
use super::name::SymbolicName;
use super::pattern::{NamedPath, PatternElement, Relationship, RelationshipChain};

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Absorbing no-op.
    NoCondition,
    /// The constants `true` / `false`.
    Boolean(bool),
    Comparison { left: Expression, operator: ComparisonOperator, right: Expression },
    /// `x IS NULL`, or `x IS NOT NULL` when negated.
    IsNull { expression: Expression, negated: bool },
    /// `NOT (inner)`
    Not(Box<Condition>),
    Compound(CompoundCondition),
    /// `n:`A`:`B``
    HasLabels { name: SymbolicName, labels: SmallVec<[String; 2]> },
    /// A pattern used as an existence test.
    Pattern(PatternElement),
    /// `NOT pattern`
    ExcludedPattern(PatternElement),
    /// `all(x IN list WHERE predicate)` and friends.
    Quantified {
        quantifier: Quantifier,
        variable: SymbolicName,
        list: Expression,
        predicate: Box<Condition>,
    },
    /// A boolean expression in condition position (CASE, exists(), ...).
    Expression(Expression),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Contains,
    StartsWith,
    EndsWith,
    In,
    Matches,
}

impl ComparisonOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOperator::Equal => "=",
            ComparisonOperator::NotEqual => "<>",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::LessThanOrEqual => "<=",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::GreaterThanOrEqual => ">=",
            ComparisonOperator::Contains => "CONTAINS",
            ComparisonOperator::StartsWith => "STARTS WITH",
            ComparisonOperator::EndsWith => "ENDS WITH",
            ComparisonOperator::In => "IN",
            ComparisonOperator::Matches => "=~",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
    Xor,
}

impl LogicalOperator {
    pub fn keyword(self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
            LogicalOperator::Xor => "XOR",
        }
    }

    /// Binding strength in Cypher: AND over XOR over OR.
    pub fn precedence(self) -> u8 {
        match self {
            LogicalOperator::And => 3,
            LogicalOperator::Xor => 2,
            LogicalOperator::Or => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    All,
    Any,
    None,
    Single,
}

impl Quantifier {
    pub fn function_name(self) -> &'static str {
        match self {
            Quantifier::All => "all",
            Quantifier::Any => "any",
            Quantifier::None => "none",
            Quantifier::Single => "single",
        }
    }
}

// ============================================================================
// Composition
// ============================================================================

impl Condition {
    pub(crate) fn comparison(left: Expression, operator: ComparisonOperator, right: Expression) -> Self {
        Condition::Comparison { left, operator, right }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Condition::NoCondition => true,
            Condition::Compound(compound) => compound.conditions.iter().all(Condition::is_empty),
            _ => false,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn and(self, other: impl Into<Condition>) -> Condition {
        self.chain(LogicalOperator::And, other.into())
    }

    pub fn or(self, other: impl Into<Condition>) -> Condition {
        self.chain(LogicalOperator::Or, other.into())
    }

    pub fn xor(self, other: impl Into<Condition>) -> Condition {
        self.chain(LogicalOperator::Xor, other.into())
    }

    /// Double negation is kept: `NOT (NOT (x))`.
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Condition {
        match self {
            Condition::NoCondition => Condition::NoCondition,
            other => Condition::Not(Box::new(other)),
        }
    }

    pub(crate) fn chain(self, operator: LogicalOperator, other: Condition) -> Condition {
        match (self, other) {
            (Condition::NoCondition, other) => other,
            (this, Condition::NoCondition) => this,
            (Condition::Compound(compound), other) => Condition::Compound(compound.add(operator, other)),
            (this, other) => Condition::Compound(CompoundCondition::create(this, operator, other)),
        }
    }

    // Comparisons on the condition's boolean value.

    pub fn is_equal_to(self, other: impl Into<Expression>) -> Condition {
        Expression::from(self).is_equal_to(other)
    }

    pub fn is_not_equal_to(self, other: impl Into<Expression>) -> Condition {
        Expression::from(self).is_not_equal_to(other)
    }

    pub fn is_true(self) -> Condition {
        self.is_equal_to(Literal::Boolean(true))
    }

    pub fn is_false(self) -> Condition {
        self.is_equal_to(Literal::Boolean(false))
    }

    pub fn as_(self, alias: impl Into<SymbolicName>) -> Expression {
        Expression::from(self).as_(alias)
    }
}

/// An n-ary group of conditions.
///
/// The first child renders without an operator. Every later child is
/// joined with the group's operator, except nested groups, which bring
/// their own: mixing operators inside one group is how `a AND b OR (c)`
/// is represented without losing the caller's grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundCondition {
    pub operator: LogicalOperator,
    pub conditions: Vec<Condition>,
}

impl CompoundCondition {
    fn single(operator: LogicalOperator, condition: Condition) -> Self {
        Self { operator, conditions: vec![condition] }
    }

    fn create(left: Condition, operator: LogicalOperator, right: Condition) -> Self {
        Self::single(operator, left).add(operator, right)
    }

    fn add(mut self, operator: LogicalOperator, condition: Condition) -> Self {
        // A tighter operator must not capture our last child.
        if self.conditions.len() > 1 && operator.precedence() > self.loosest_operator().precedence() {
            return Self::create(Condition::Compound(self), operator, condition);
        }
        match condition {
            Condition::Compound(other) => {
                if self.operator == operator && other.operator == operator {
                    if other.can_be_flattened_with(operator) {
                        self.conditions.extend(other.conditions);
                    } else {
                        self.conditions.push(Condition::Compound(other));
                    }
                } else {
                    self.conditions
                        .push(Condition::Compound(Self::single(operator, Condition::Compound(other))));
                }
                self
            }
            other if self.operator == operator => {
                self.conditions.push(other);
                self
            }
            other => Self::create(Condition::Compound(self), operator, other),
        }
    }

    /// The loosest keyword joining our children.
    fn loosest_operator(&self) -> LogicalOperator {
        self.conditions
            .iter()
            .skip(1)
            .map(|c| match c {
                Condition::Compound(inner) => inner.operator,
                _ => self.operator,
            })
            .min_by_key(|operator| operator.precedence())
            .unwrap_or(self.operator)
    }

    fn can_be_flattened_with(&self, operator: LogicalOperator) -> bool {
        self.conditions.iter().all(|c| match c {
            Condition::Compound(inner) => inner.operator == operator,
            _ => true,
        })
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Condition {
    fn from(v: bool) -> Self { Condition::Boolean(v) }
}

impl From<Expression> for Condition {
    fn from(v: Expression) -> Self {
        match v {
            Expression::Condition(inner) => *inner,
            other => Condition::Expression(other),
        }
    }
}

impl From<PatternElement> for Condition {
    fn from(v: PatternElement) -> Self { Condition::Pattern(v) }
}

impl From<Relationship> for Condition {
    fn from(v: Relationship) -> Self { Condition::Pattern(v.into()) }
}

impl From<&Relationship> for Condition {
    fn from(v: &Relationship) -> Self { Condition::Pattern(v.into()) }
}

impl From<RelationshipChain> for Condition {
    fn from(v: RelationshipChain) -> Self { Condition::Pattern(v.into()) }
}

impl From<&RelationshipChain> for Condition {
    fn from(v: &RelationshipChain) -> Self { Condition::Pattern(v.into()) }
}

impl From<NamedPath> for Condition {
    fn from(v: NamedPath) -> Self { Condition::Pattern(v.into()) }
}
