//! Staged statement builder.
//!
//! Every stage is a thin handle on one shared, growing clause list. Stage
//! methods take `&self` and append to that list, so keeping an earlier
//! stage and calling it again extends the same statement in call order
//! instead of branching off a copy:
//!
//! ```rust
//! use cypher_dsl::cypher;
//! use cypher_dsl::prelude::*;
//!
//! # fn main() -> cypher_dsl::Result<()> {
//! let bike = cypher::node("Bike").named("b");
//! let user = cypher::node("User").named("u");
//!
//! let with_bike = cypher::match_([&bike]).with([&bike]);
//! with_bike.optional_match([&user]);
//! let statement = with_bike.returning([cypher::asterisk()]).build()?;
//!
//! assert_eq!(
//!     statement.cypher(),
//!     "MATCH (b:`Bike`) WITH b OPTIONAL MATCH (u:`User`) RETURN *"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Which clause may follow which is encoded in the stage types: each one
//! implements only the `Exposes*` traits for the clauses legal at that
//! point. Conversion failures along the way (an unnamed node in RETURN, an
//! odd SET list, ...) are recorded and reported by `build()`.

use std::sync::Arc;

use parking_lot::Mutex;
use smallvec::SmallVec;

use crate::model::{
    Clause, Condition, Expression, IntoExpression, LogicalOperator, Node, PatternElement,
    ProjectionBody, RemoveItem, SetItem, SingleQuery, SortDirection, SortItem, Statement,
    SymbolicName,
};
use crate::{Error, Result};

// ============================================================================
// Shared state
// ============================================================================

#[derive(Debug, Default)]
struct BuilderState {
    clauses: Vec<Clause>,
    error: Option<Error>,
}

/// Handle on the clause list shared by all stages of one statement.
#[doc(hidden)]
#[derive(Debug, Clone, Default)]
pub struct Builder {
    state: Arc<Mutex<BuilderState>>,
}

impl Builder {
    fn push(&self, clause: Clause) -> usize {
        let mut state = self.state.lock();
        state.clauses.push(clause);
        state.clauses.len() - 1
    }

    fn update(&self, index: usize, f: impl FnOnce(&mut Clause)) {
        if let Some(clause) = self.state.lock().clauses.get_mut(index) {
            f(clause);
        }
    }

    /// Keep the first failure; later ones are usually consequences.
    fn fail(&self, error: Error) {
        let mut state = self.state.lock();
        if state.error.is_none() {
            tracing::debug!(%error, "statement builder recorded a construction failure");
            state.error = Some(error);
        }
    }

    /// Records `EmptyClause` for a clause without items.
    fn require<T>(&self, keyword: &'static str, items: &[T]) {
        if items.is_empty() {
            self.fail(Error::EmptyClause(keyword));
        }
    }

    fn accept<T>(&self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.fail(error);
                None
            }
        }
    }

    fn expressions<I>(&self, items: I) -> Vec<Expression>
    where
        I: IntoIterator,
        I::Item: IntoExpression,
    {
        items
            .into_iter()
            .filter_map(|item| self.accept(item.into_expression()))
            .collect()
    }

    fn refine(&self, index: usize, operator: LogicalOperator, condition: Condition) {
        self.update(index, |clause| {
            if let Some(current) = clause.condition_mut() {
                let previous = std::mem::replace(current, Condition::NoCondition);
                *current = previous.chain(operator, condition);
            }
        });
    }

    fn body(&self, index: usize, f: impl FnOnce(&mut ProjectionBody)) {
        self.update(index, |clause| {
            if let Some(body) = clause.body_mut() {
                f(body);
            }
        });
    }

    fn build(&self) -> Result<Statement> {
        let state = self.state.lock();
        if let Some(error) = &state.error {
            return Err(error.clone());
        }
        tracing::debug!(clauses = state.clauses.len(), "built statement");
        Ok(Statement::Single(SingleQuery { clauses: state.clauses.clone() }))
    }
}

fn patterns<I>(patterns: I) -> Vec<PatternElement>
where
    I: IntoIterator,
    I::Item: Into<PatternElement>,
{
    patterns.into_iter().map(Into::into).collect()
}

fn label_list(labels: &[&str]) -> SmallVec<[String; 2]> {
    labels.iter().map(|l| (*l).to_owned()).collect()
}

// ============================================================================
// Stage capabilities
// ============================================================================

/// A point in the clause sequence.
pub trait Stage {
    #[doc(hidden)]
    fn builder(&self) -> &Builder;
}

/// `MATCH` / `OPTIONAL MATCH`
pub trait ExposesMatch: Stage {
    fn match_<I>(&self, patterns: I) -> OngoingReadingWithoutWhere
    where
        I: IntoIterator,
        I::Item: Into<PatternElement>,
    {
        start_match(self.builder(), false, patterns)
    }

    fn optional_match<I>(&self, patterns: I) -> OngoingReadingWithoutWhere
    where
        I: IntoIterator,
        I::Item: Into<PatternElement>,
    {
        start_match(self.builder(), true, patterns)
    }
}

/// `CREATE`
pub trait ExposesCreate: Stage {
    fn create<I>(&self, patterns: I) -> OngoingUpdate
    where
        I: IntoIterator,
        I::Item: Into<PatternElement>,
    {
        start_create(self.builder(), patterns)
    }
}

/// `MERGE`
pub trait ExposesMerge: Stage {
    fn merge<I>(&self, patterns: I) -> OngoingUpdate
    where
        I: IntoIterator,
        I::Item: Into<PatternElement>,
    {
        start_merge(self.builder(), patterns)
    }
}

/// `UNWIND`
pub trait ExposesUnwind: Stage {
    fn unwind(&self, expression: impl IntoExpression) -> OngoingUnwind {
        start_unwind(self.builder(), expression)
    }
}

/// `RETURN`
pub trait ExposesReturning: Stage {
    fn returning<I>(&self, items: I) -> OngoingReadingAndReturn
    where
        I: IntoIterator,
        I::Item: IntoExpression,
    {
        start_return(self.builder(), false, items)
    }

    fn returning_distinct<I>(&self, items: I) -> OngoingReadingAndReturn
    where
        I: IntoIterator,
        I::Item: IntoExpression,
    {
        start_return(self.builder(), true, items)
    }
}

/// `WITH`
pub trait ExposesWith: Stage {
    fn with<I>(&self, items: I) -> OngoingWith
    where
        I: IntoIterator,
        I::Item: IntoExpression,
    {
        start_with(self.builder(), false, items)
    }

    fn with_distinct<I>(&self, items: I) -> OngoingWith
    where
        I: IntoIterator,
        I::Item: IntoExpression,
    {
        start_with(self.builder(), true, items)
    }
}

/// `DELETE`, `DETACH DELETE`, `SET`, `REMOVE`
pub trait ExposesUpdatingClause: Stage {
    fn delete<I>(&self, items: I) -> OngoingUpdate
    where
        I: IntoIterator,
        I::Item: IntoExpression,
    {
        push_delete(self.builder(), false, items)
    }

    fn detach_delete<I>(&self, items: I) -> OngoingUpdate
    where
        I: IntoIterator,
        I::Item: IntoExpression,
    {
        push_delete(self.builder(), true, items)
    }

    /// `SET a = x, b = y` from the flat list `[a, x, b, y]`.
    fn set<I>(&self, items: I) -> OngoingUpdate
    where
        I: IntoIterator,
        I::Item: IntoExpression,
    {
        push_set(self.builder(), items)
    }

    /// `SET n:`A`:`B``
    fn set_labels(&self, node: &Node, labels: &[&str]) -> OngoingUpdate {
        let builder = self.builder();
        builder.require("SET", labels);
        if let Some(name) = builder.accept(node.required_name()) {
            builder.push(Clause::Set(vec![SetItem::Labels { name, labels: label_list(labels) }]));
        }
        OngoingUpdate { builder: builder.clone() }
    }

    /// `REMOVE n.a, n.b`
    fn remove<I>(&self, properties: I) -> OngoingUpdate
    where
        I: IntoIterator,
        I::Item: IntoExpression,
    {
        let builder = self.builder();
        let items: Vec<_> = builder.expressions(properties).into_iter().map(RemoveItem::Property).collect();
        builder.require("REMOVE", &items);
        builder.push(Clause::Remove(items));
        OngoingUpdate { builder: builder.clone() }
    }

    /// `REMOVE n:`A`:`B``
    fn remove_labels(&self, node: &Node, labels: &[&str]) -> OngoingUpdate {
        let builder = self.builder();
        builder.require("REMOVE", labels);
        if let Some(name) = builder.accept(node.required_name()) {
            builder.push(Clause::Remove(vec![RemoveItem::Labels { name, labels: label_list(labels) }]));
        }
        OngoingUpdate { builder: builder.clone() }
    }
}

// ============================================================================
// Transitions
// ============================================================================

pub(crate) fn start_match<I>(builder: &Builder, optional: bool, items: I) -> OngoingReadingWithoutWhere
where
    I: IntoIterator,
    I::Item: Into<PatternElement>,
{
    let patterns = patterns(items);
    builder.require(if optional { "OPTIONAL MATCH" } else { "MATCH" }, &patterns);
    let index = builder.push(Clause::Match {
        optional,
        patterns,
        condition: Condition::NoCondition,
    });
    OngoingReadingWithoutWhere { builder: builder.clone(), index }
}

pub(crate) fn start_create<I>(builder: &Builder, items: I) -> OngoingUpdate
where
    I: IntoIterator,
    I::Item: Into<PatternElement>,
{
    let patterns = patterns(items);
    builder.require("CREATE", &patterns);
    builder.push(Clause::Create { patterns });
    OngoingUpdate { builder: builder.clone() }
}

pub(crate) fn start_merge<I>(builder: &Builder, items: I) -> OngoingUpdate
where
    I: IntoIterator,
    I::Item: Into<PatternElement>,
{
    let patterns = patterns(items);
    builder.require("MERGE", &patterns);
    builder.push(Clause::Merge { patterns });
    OngoingUpdate { builder: builder.clone() }
}

pub(crate) fn start_unwind(builder: &Builder, expression: impl IntoExpression) -> OngoingUnwind {
    OngoingUnwind { builder: builder.clone(), expression: builder.accept(expression.into_expression()) }
}

pub(crate) fn start_with<I>(builder: &Builder, distinct: bool, items: I) -> OngoingWith
where
    I: IntoIterator,
    I::Item: IntoExpression,
{
    let items = builder.expressions(items);
    builder.require("WITH", &items);
    let body = ProjectionBody { distinct, items, ..Default::default() };
    let index = builder.push(Clause::With { body, condition: Condition::NoCondition });
    OngoingWith { builder: builder.clone(), index }
}

fn start_return<I>(builder: &Builder, distinct: bool, items: I) -> OngoingReadingAndReturn
where
    I: IntoIterator,
    I::Item: IntoExpression,
{
    let items = builder.expressions(items);
    builder.require("RETURN", &items);
    let body = ProjectionBody { distinct, items, ..Default::default() };
    let index = builder.push(Clause::Return(body));
    OngoingReadingAndReturn { builder: builder.clone(), index }
}

fn push_delete<I>(builder: &Builder, detach: bool, items: I) -> OngoingUpdate
where
    I: IntoIterator,
    I::Item: IntoExpression,
{
    let expressions = builder.expressions(items);
    builder.require(if detach { "DETACH DELETE" } else { "DELETE" }, &expressions);
    builder.push(Clause::Delete { detach, expressions });
    OngoingUpdate { builder: builder.clone() }
}

fn push_set<I>(builder: &Builder, items: I) -> OngoingUpdate
where
    I: IntoIterator,
    I::Item: IntoExpression,
{
    let expressions = builder.expressions(items);
    builder.require("SET", &expressions);
    if expressions.len() % 2 != 0 {
        builder.fail(Error::OddSetArguments(expressions.len()));
    } else {
        let mut pairs = expressions.into_iter();
        let mut items = Vec::new();
        while let (Some(target), Some(value)) = (pairs.next(), pairs.next()) {
            items.push(SetItem::Property { target, value });
        }
        builder.push(Clause::Set(items));
    }
    OngoingUpdate { builder: builder.clone() }
}

// ============================================================================
// Stages
// ============================================================================

macro_rules! stage {
    ($name:ident) => {
        impl Stage for $name {
            fn builder(&self) -> &Builder {
                &self.builder
            }
        }
    };
    ($name:ident: $($capability:ident),+) => {
        stage!($name);
        $(impl $capability for $name {})+
    };
}

/// After `MATCH`: a WHERE may still attach to it.
#[derive(Debug, Clone)]
pub struct OngoingReadingWithoutWhere {
    builder: Builder,
    index: usize,
}

impl OngoingReadingWithoutWhere {
    pub fn where_(&self, condition: impl Into<Condition>) -> OngoingReadingWithWhere {
        self.builder.refine(self.index, LogicalOperator::And, condition.into());
        OngoingReadingWithWhere { builder: self.builder.clone(), index: self.index }
    }
}

/// After `MATCH ... WHERE`: the condition can be extended.
#[derive(Debug, Clone)]
pub struct OngoingReadingWithWhere {
    builder: Builder,
    index: usize,
}

impl OngoingReadingWithWhere {
    #[allow(clippy::should_implement_trait)]
    pub fn and(&self, condition: impl Into<Condition>) -> Self {
        self.builder.refine(self.index, LogicalOperator::And, condition.into());
        self.clone()
    }

    pub fn or(&self, condition: impl Into<Condition>) -> Self {
        self.builder.refine(self.index, LogicalOperator::Or, condition.into());
        self.clone()
    }

    pub fn xor(&self, condition: impl Into<Condition>) -> Self {
        self.builder.refine(self.index, LogicalOperator::Xor, condition.into());
        self.clone()
    }
}

/// `UNWIND expression` waiting for its variable.
#[derive(Debug, Clone)]
pub struct OngoingUnwind {
    builder: Builder,
    expression: Option<Expression>,
}

impl OngoingUnwind {
    pub fn as_(&self, variable: impl Into<SymbolicName>) -> OngoingReading {
        if let Some(expression) = self.expression.clone() {
            self.builder.push(Clause::Unwind { expression, variable: variable.into() });
        }
        OngoingReading { builder: self.builder.clone() }
    }
}

/// After `UNWIND ... AS x`.
#[derive(Debug, Clone)]
pub struct OngoingReading {
    builder: Builder,
}

/// After `WITH`: ordering, paging and a WHERE may attach to it.
#[derive(Debug, Clone)]
pub struct OngoingWith {
    builder: Builder,
    index: usize,
}

impl OngoingWith {
    pub fn where_(&self, condition: impl Into<Condition>) -> OngoingWithWhere {
        self.builder.refine(self.index, LogicalOperator::And, condition.into());
        OngoingWithWhere { builder: self.builder.clone(), index: self.index }
    }

    pub fn order_by<I>(&self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<SortItem>,
    {
        order_by(&self.builder, self.index, items);
        self.clone()
    }

    /// Sort the last ORDER BY term ascending.
    pub fn ascending(&self) -> Self {
        direct_last(&self.builder, self.index, SortDirection::Ascending);
        self.clone()
    }

    /// Sort the last ORDER BY term descending.
    pub fn descending(&self) -> Self {
        direct_last(&self.builder, self.index, SortDirection::Descending);
        self.clone()
    }

    pub fn skip(&self, skip: impl Into<Option<u64>>) -> Self {
        if let Some(skip) = skip.into() {
            self.builder.body(self.index, |body| body.skip = Some(skip));
        }
        self.clone()
    }

    pub fn limit(&self, limit: impl Into<Option<u64>>) -> Self {
        if let Some(limit) = limit.into() {
            self.builder.body(self.index, |body| body.limit = Some(limit));
        }
        self.clone()
    }
}

/// After `WITH ... WHERE`.
#[derive(Debug, Clone)]
pub struct OngoingWithWhere {
    builder: Builder,
    index: usize,
}

impl OngoingWithWhere {
    #[allow(clippy::should_implement_trait)]
    pub fn and(&self, condition: impl Into<Condition>) -> Self {
        self.builder.refine(self.index, LogicalOperator::And, condition.into());
        self.clone()
    }

    pub fn or(&self, condition: impl Into<Condition>) -> Self {
        self.builder.refine(self.index, LogicalOperator::Or, condition.into());
        self.clone()
    }

    pub fn xor(&self, condition: impl Into<Condition>) -> Self {
        self.builder.refine(self.index, LogicalOperator::Xor, condition.into());
        self.clone()
    }
}

/// After CREATE, MERGE, SET, REMOVE or DELETE. Buildable as is.
#[derive(Debug, Clone)]
pub struct OngoingUpdate {
    builder: Builder,
}

impl OngoingUpdate {
    pub fn build(&self) -> Result<Statement> {
        self.builder.build()
    }
}

/// After `RETURN`.
#[derive(Debug, Clone)]
pub struct OngoingReadingAndReturn {
    builder: Builder,
    index: usize,
}

impl OngoingReadingAndReturn {
    pub fn order_by<I>(&self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<SortItem>,
    {
        order_by(&self.builder, self.index, items);
        self.clone()
    }

    /// Sort the last ORDER BY term ascending.
    pub fn ascending(&self) -> Self {
        direct_last(&self.builder, self.index, SortDirection::Ascending);
        self.clone()
    }

    /// Sort the last ORDER BY term descending.
    pub fn descending(&self) -> Self {
        direct_last(&self.builder, self.index, SortDirection::Descending);
        self.clone()
    }

    /// `None` leaves the clause without SKIP.
    pub fn skip(&self, skip: impl Into<Option<u64>>) -> Self {
        if let Some(skip) = skip.into() {
            self.builder.body(self.index, |body| body.skip = Some(skip));
        }
        self.clone()
    }

    /// `None` leaves the clause without LIMIT.
    pub fn limit(&self, limit: impl Into<Option<u64>>) -> Self {
        if let Some(limit) = limit.into() {
            self.builder.body(self.index, |body| body.limit = Some(limit));
        }
        self.clone()
    }

    pub fn build(&self) -> Result<Statement> {
        self.builder.build()
    }
}

fn order_by<I>(builder: &Builder, index: usize, items: I)
where
    I: IntoIterator,
    I::Item: Into<SortItem>,
{
    let items: Vec<SortItem> = items.into_iter().map(Into::into).collect();
    builder.body(index, |body| body.order.extend(items));
}

fn direct_last(builder: &Builder, index: usize, direction: SortDirection) {
    builder.body(index, |body| {
        if let Some(last) = body.order.last_mut() {
            last.direction = direction;
        }
    });
}

stage!(OngoingReadingWithoutWhere: ExposesMatch, ExposesCreate, ExposesMerge, ExposesUnwind,
    ExposesReturning, ExposesWith, ExposesUpdatingClause);
stage!(OngoingReadingWithWhere: ExposesMatch, ExposesCreate, ExposesMerge, ExposesUnwind,
    ExposesReturning, ExposesWith, ExposesUpdatingClause);
stage!(OngoingReading: ExposesMatch, ExposesCreate, ExposesMerge, ExposesUnwind,
    ExposesReturning, ExposesWith, ExposesUpdatingClause);
stage!(OngoingWith: ExposesMatch, ExposesCreate, ExposesMerge, ExposesUnwind,
    ExposesReturning, ExposesWith, ExposesUpdatingClause);
stage!(OngoingWithWhere: ExposesMatch, ExposesCreate, ExposesMerge, ExposesUnwind,
    ExposesReturning, ExposesWith, ExposesUpdatingClause);
stage!(OngoingUpdate: ExposesCreate, ExposesMerge, ExposesReturning, ExposesWith,
    ExposesUpdatingClause);
stage!(OngoingUnwind);
stage!(OngoingReadingAndReturn);
