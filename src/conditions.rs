//! Condition factories.

use crate::model::{Condition, PatternElement};

/// The absorbing no-op: vanishes when combined and never renders.
pub fn no_condition() -> Condition {
    Condition::NoCondition
}

/// `NOT (condition)`
pub fn not(condition: impl Into<Condition>) -> Condition {
    condition.into().not()
}

/// `NOT (a)-->(b)`: negated pattern without extra parentheses.
pub fn not_pattern(pattern: impl Into<PatternElement>) -> Condition {
    Condition::ExcludedPattern(pattern.into())
}

/// The constant `true`.
pub fn is_true() -> Condition {
    Condition::Boolean(true)
}

/// The constant `false`.
pub fn is_false() -> Condition {
    Condition::Boolean(false)
}
