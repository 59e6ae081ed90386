//! Predicate functions: list quantifiers and `exists()`.

use crate::model::{Condition, Expression, FunctionInvocation, PatternElement, Quantifier, SymbolicName};

/// `all(variable IN list WHERE predicate)`
pub fn all(variable: impl Into<SymbolicName>) -> OngoingQuantifier {
    OngoingQuantifier { quantifier: Quantifier::All, variable: variable.into() }
}

/// `any(variable IN list WHERE predicate)`
pub fn any(variable: impl Into<SymbolicName>) -> OngoingQuantifier {
    OngoingQuantifier { quantifier: Quantifier::Any, variable: variable.into() }
}

/// `none(variable IN list WHERE predicate)`
pub fn none(variable: impl Into<SymbolicName>) -> OngoingQuantifier {
    OngoingQuantifier { quantifier: Quantifier::None, variable: variable.into() }
}

/// `single(variable IN list WHERE predicate)`
pub fn single(variable: impl Into<SymbolicName>) -> OngoingQuantifier {
    OngoingQuantifier { quantifier: Quantifier::Single, variable: variable.into() }
}

/// `exists((a)-->(b))`
pub fn exists(pattern: impl Into<PatternElement>) -> Condition {
    exists_expression(Expression::Pattern(pattern.into()))
}

/// `exists(n.property)`
pub fn exists_property(property: impl Into<Expression>) -> Condition {
    exists_expression(property.into())
}

fn exists_expression(argument: Expression) -> Condition {
    Condition::Expression(Expression::Function(FunctionInvocation::new("exists", vec![argument])))
}

#[derive(Debug, Clone)]
pub struct OngoingQuantifier {
    quantifier: Quantifier,
    variable: SymbolicName,
}

impl OngoingQuantifier {
    pub fn in_(self, list: impl Into<Expression>) -> OngoingQuantifierWithList {
        OngoingQuantifierWithList { quantifier: self.quantifier, variable: self.variable, list: list.into() }
    }
}

#[derive(Debug, Clone)]
pub struct OngoingQuantifierWithList {
    quantifier: Quantifier,
    variable: SymbolicName,
    list: Expression,
}

impl OngoingQuantifierWithList {
    pub fn where_(self, predicate: impl Into<Condition>) -> Condition {
        Condition::Quantified {
            quantifier: self.quantifier,
            variable: self.variable,
            list: self.list,
            predicate: Box::new(predicate.into()),
        }
    }
}
