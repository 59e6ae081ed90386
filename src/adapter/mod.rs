//! Bridge from foreign query descriptions to statements.
//!
//! A foreign layer describes *which entity* it queries, an optional filter
//! tree and paging. This module resolves labels, translates the filter and
//! assembles the single statement shape the bridge needs:
//!
//! ```text
//! MATCH (root) [WHERE condition] RETURN projection-or-root [SKIP n] [LIMIT n]
//! ```

pub mod labels;
pub mod translate;

pub use labels::{to_node, DefaultLabelProvider, EntityDescriptor, LabelProvider, MappedLabelProvider};
pub use translate::{translate, translate_condition, ForeignExpression, ForeignOperator};

use serde::{Deserialize, Serialize};

use crate::cypher::{self, builder::ExposesReturning};
use crate::model::{Condition, Expression, Node, Statement};
use crate::Result;

/// `MATCH (root) [WHERE ..] RETURN .. [SKIP ..] [LIMIT ..]`.
///
/// Without a projection the root node itself is returned.
pub fn build_statement(
    root: &Node,
    condition: Option<Condition>,
    projection: Option<Vec<Expression>>,
    skip: Option<u64>,
    limit: Option<u64>,
) -> Result<Statement> {
    let reading = cypher::match_([root]).where_(condition.unwrap_or(Condition::NoCondition));
    let returning = match projection {
        Some(items) if !items.is_empty() => reading.returning(items),
        _ => reading.returning([root]),
    };
    returning.skip(skip).limit(limit).build()
}

/// Fluent wrapper around [`build_statement`].
#[derive(Debug, Clone)]
pub struct EntityQuery {
    root: Node,
    condition: Condition,
    projection: Vec<Expression>,
    skip: Option<u64>,
    limit: Option<u64>,
}

impl EntityQuery {
    pub fn new(root: Node) -> Self {
        Self { root, condition: Condition::NoCondition, projection: Vec::new(), skip: None, limit: None }
    }

    pub fn for_entity(entity: &EntityDescriptor, provider: &dyn LabelProvider) -> Result<Self> {
        Ok(Self::new(to_node(entity, provider)?))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Add a condition; repeated filters are AND-ed.
    pub fn filter(mut self, condition: impl Into<Condition>) -> Self {
        self.condition = self.condition.and(condition);
        self
    }

    pub fn project<I>(mut self, items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        self.projection.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn build(&self) -> Result<Statement> {
        build_statement(
            &self.root,
            Some(self.condition.clone()),
            Some(self.projection.clone()),
            self.skip,
            self.limit,
        )
    }
}

/// A complete, serializable query description from the foreign layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignQuery {
    pub entity: EntityDescriptor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<ForeignExpression>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projection: Vec<ForeignExpression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl ForeignQuery {
    pub fn to_statement(&self, provider: &dyn LabelProvider) -> Result<Statement> {
        let root = to_node(&self.entity, provider)?;
        let condition = self.filter.as_ref().map(translate_condition).transpose()?;
        let projection = self.projection.iter().map(translate).collect::<Result<Vec<_>>>()?;
        tracing::debug!(entity = %self.entity.type_name, "translating foreign query");
        build_statement(&root, condition, Some(projection), self.offset, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn movie() -> Node {
        cypher::node("Movie").named("r")
    }

    #[test]
    fn test_build_statement_without_condition() {
        let statement = build_statement(&movie(), None, None, None, None).unwrap();
        assert_eq!(statement.cypher(), "MATCH (r:`Movie`) RETURN r");
    }

    #[test]
    fn test_entity_query_paging_order() {
        let query = EntityQuery::new(movie()).limit(42).skip(23);
        assert_eq!(query.build().unwrap().cypher(), "MATCH (r:`Movie`) RETURN r SKIP 23 LIMIT 42");
    }

    #[test]
    fn test_entity_query_projection() {
        let r = movie();
        let title = r.property("title").unwrap();
        let query = EntityQuery::new(r).project([title]);
        assert_eq!(query.build().unwrap().cypher(), "MATCH (r:`Movie`) RETURN r.title");
    }

    #[test]
    fn test_foreign_query_from_json() {
        let query: ForeignQuery = serde_json::from_value(json!({
            "entity": {"type_name": "Movie", "variable": "r"},
            "filter": {
                "kind": "operation",
                "operator": "EQ",
                "args": [
                    {"kind": "path", "root": "r", "property": "title"},
                    {"kind": "constant", "value": "The Matrix"}
                ]
            },
            "limit": 1
        }))
        .unwrap();
        let statement = query.to_statement(&DefaultLabelProvider).unwrap();
        assert_eq!(statement.cypher(), "MATCH (r:`Movie`) WHERE r.title = 'The Matrix' RETURN r LIMIT 1");
    }
}
