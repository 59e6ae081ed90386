//! Clauses and statements.

use std::fmt;

use smallvec::SmallVec;

use crate::cypher::render::{DefaultRenderer, Renderer};
use crate::{Error, Result};

use super::condition::Condition;
use super::expression::{Expression, SortItem};
use super::name::SymbolicName;
use super::pattern::PatternElement;

/// A complete, renderable statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Single(SingleQuery),
    Union(UnionQuery),
}

/// An ordered sequence of clauses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SingleQuery {
    pub clauses: Vec<Clause>,
}

/// Two or more single queries joined by `UNION` or `UNION ALL`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionQuery {
    pub all: bool,
    pub queries: Vec<SingleQuery>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Match { optional: bool, patterns: Vec<PatternElement>, condition: Condition },
    Create { patterns: Vec<PatternElement> },
    Merge { patterns: Vec<PatternElement> },
    Unwind { expression: Expression, variable: SymbolicName },
    /// Renders items, ORDER BY, SKIP, LIMIT, then WHERE.
    With { body: ProjectionBody, condition: Condition },
    Return(ProjectionBody),
    Set(Vec<SetItem>),
    Remove(Vec<RemoveItem>),
    Delete { detach: bool, expressions: Vec<Expression> },
}

/// Shared shape of WITH and RETURN.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectionBody {
    pub distinct: bool,
    pub items: Vec<Expression>,
    pub order: Vec<SortItem>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SetItem {
    /// `target = value`
    Property { target: Expression, value: Expression },
    /// `name:`A`:`B``
    Labels { name: SymbolicName, labels: SmallVec<[String; 2]> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RemoveItem {
    Property(Expression),
    Labels { name: SymbolicName, labels: SmallVec<[String; 2]> },
}

impl Clause {
    pub(crate) fn condition_mut(&mut self) -> Option<&mut Condition> {
        match self {
            Clause::Match { condition, .. } | Clause::With { condition, .. } => Some(condition),
            _ => None,
        }
    }

    pub(crate) fn body_mut(&mut self) -> Option<&mut ProjectionBody> {
        match self {
            Clause::With { body, .. } | Clause::Return(body) => Some(body),
            _ => None,
        }
    }
}

// ============================================================================
// Union
// ============================================================================

impl Statement {
    /// Combine statements with `UNION` (or `UNION ALL`).
    ///
    /// A union passed first is extended with the remaining queries when its
    /// ALL flag matches; every other statement must be a single query.
    pub fn union<I>(all: bool, statements: I) -> Result<Statement>
    where
        I: IntoIterator<Item = Statement>,
    {
        let statements: Vec<Statement> = statements.into_iter().collect();
        if statements.len() < 2 {
            return Err(Error::TooFewUnionParts);
        }

        let mut statements = statements.into_iter();
        let mut queries = Vec::new();
        match statements.next() {
            Some(Statement::Union(existing)) => {
                if existing.all != all {
                    return Err(Error::MixedUnion);
                }
                queries.extend(existing.queries);
            }
            Some(Statement::Single(query)) => queries.push(query),
            None => return Err(Error::TooFewUnionParts),
        }
        for statement in statements {
            match statement {
                Statement::Single(query) => queries.push(query),
                Statement::Union(_) => return Err(Error::NestedUnion),
            }
        }

        tracing::debug!(all, parts = queries.len(), "assembled union");
        Ok(Statement::Union(UnionQuery { all, queries }))
    }

    /// Render with the default configuration.
    pub fn cypher(&self) -> String {
        DefaultRenderer::default().render(self)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cypher())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single() -> Statement {
        Statement::Single(SingleQuery::default())
    }

    #[test]
    fn test_union_requires_two() {
        assert_eq!(Statement::union(false, [single()]), Err(Error::TooFewUnionParts));
    }

    #[test]
    fn test_union_extends_existing() {
        let first = Statement::union(true, [single(), single()]).unwrap();
        let Statement::Union(extended) = Statement::union(true, [first, single()]).unwrap() else {
            panic!("expected union");
        };
        assert_eq!(extended.queries.len(), 3);
        assert!(extended.all);
    }

    #[test]
    fn test_union_rejects_mixing() {
        let first = Statement::union(true, [single(), single()]).unwrap();
        assert_eq!(Statement::union(false, [first, single()]), Err(Error::MixedUnion));
    }

    #[test]
    fn test_union_rejects_nested_union_in_tail() {
        let nested = Statement::union(false, [single(), single()]).unwrap();
        assert_eq!(Statement::union(false, [single(), nested]), Err(Error::NestedUnion));
    }
}
