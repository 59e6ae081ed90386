//! # Statement Model
//!
//! The immutable tree a statement is made of: expressions, conditions,
//! patterns and clauses. Every "modification" returns a new value; shared
//! pieces such as a node used in MATCH and again in RETURN are plain clones.
//!
//! Design rule: this module is pure data plus the algebra that builds it.
//! Turning a tree into text is the renderer's job (`crate::cypher::render`).

pub mod name;
pub mod literal;
pub mod expression;
pub mod condition;
pub mod projection;
pub mod comprehension;
pub mod pattern;
pub mod statement;

pub use name::SymbolicName;
pub use literal::Literal;
pub use expression::{
    Expression, FunctionInvocation, IntoExpression, MapExpression, Operator,
    SortDirection, SortItem,
};
pub use condition::{
    ComparisonOperator, CompoundCondition, Condition, LogicalOperator, Quantifier,
};
pub use projection::{MapProjection, ProjectionEntry};
pub use comprehension::{
    Case, CaseWhen, ListComprehension, ListComprehensionBuilder, OngoingListComprehension,
    PatternComprehension, PatternComprehensionBuilder,
};
pub use pattern::{
    Direction, Length, NamedPath, Node, OngoingNamedPath, PatternElement, Relationship,
    RelationshipChain, RelationshipDetails,
};
pub use statement::{
    Clause, ProjectionBody, RemoveItem, SetItem, SingleQuery, Statement, UnionQuery,
};
