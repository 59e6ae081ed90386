//! Statement → Cypher text.
//!
//! Rendering is a pure, single pass over the tree. The only state carried
//! along is what was already emitted: a named node that was rendered in
//! full earlier in the statement is written as `(name)` afterwards, and an
//! aliased expression becomes just its alias after its first `AS`.
//!
//! "Already rendered" compares nodes by value (name, labels, properties),
//! not by identity: building `node("User").named("u")` twice yields one
//! full declaration followed by `(u)`.

use serde::{Deserialize, Serialize};

use crate::model::name::{escape_if_necessary, quote};
use crate::model::{
    Case, Clause, CompoundCondition, Condition, Direction, Expression, Length, ListComprehension,
    Literal, MapExpression, MapProjection, NamedPath, Node, Operator, PatternComprehension,
    PatternElement, ProjectionBody, ProjectionEntry, Relationship, RelationshipDetails, RemoveItem,
    SetItem, SingleQuery, SortDirection, SortItem, Statement,
};

/// Turns a finished statement into query text.
pub trait Renderer {
    fn render(&self, statement: &Statement) -> String;
}

/// Renderer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Quote every label and relationship type. When off, only names that
    /// are not plain identifiers are quoted.
    pub always_escape_names: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self { always_escape_names: true }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DefaultRenderer {
    config: RendererConfig,
}

impl DefaultRenderer {
    pub fn new(config: RendererConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }
}

impl Renderer for DefaultRenderer {
    fn render(&self, statement: &Statement) -> String {
        let mut visitor = RenderingVisitor::new(&self.config);
        visitor.statement(statement);
        tracing::trace!(length = visitor.out.len(), "rendered statement");
        visitor.out
    }
}

/// Render with the default configuration.
pub fn render(statement: &Statement) -> String {
    DefaultRenderer::default().render(statement)
}

// ============================================================================
// Visitor
// ============================================================================

struct RenderingVisitor<'a> {
    config: &'a RendererConfig,
    out: String,
    visited_nodes: Vec<&'a Node>,
    visited_aliases: Vec<&'a Expression>,
}

impl<'a> RenderingVisitor<'a> {
    fn new(config: &'a RendererConfig) -> Self {
        Self { config, out: String::new(), visited_nodes: Vec::new(), visited_aliases: Vec::new() }
    }

    fn push(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn label(&mut self, label: &str) {
        let escaped = if self.config.always_escape_names { quote(label) } else { escape_if_necessary(label) };
        self.out.push_str(&escaped);
    }

    fn separated<T>(&mut self, items: &'a [T], separator: &str, mut f: impl FnMut(&mut Self, &'a T)) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.push(separator);
            }
            f(self, item);
        }
    }

    // ------------------------------------------------------------------------
    // Statements and clauses
    // ------------------------------------------------------------------------

    fn statement(&mut self, statement: &'a Statement) {
        match statement {
            Statement::Single(query) => self.single_query(query),
            Statement::Union(union) => {
                let separator = if union.all { " UNION ALL " } else { " UNION " };
                self.separated(&union.queries, separator, |v, query| {
                    v.visited_aliases.clear();
                    v.single_query(query);
                });
            }
        }
    }

    fn single_query(&mut self, query: &'a SingleQuery) {
        self.separated(&query.clauses, " ", Self::clause);
    }

    fn clause(&mut self, clause: &'a Clause) {
        match clause {
            Clause::Match { optional, patterns, condition } => {
                if *optional {
                    self.push("OPTIONAL ");
                }
                self.push("MATCH ");
                self.patterns(patterns);
                self.where_(condition);
            }
            Clause::Create { patterns } => {
                self.push("CREATE ");
                self.patterns(patterns);
            }
            Clause::Merge { patterns } => {
                self.push("MERGE ");
                self.patterns(patterns);
            }
            Clause::Unwind { expression, variable } => {
                self.push("UNWIND ");
                self.expression(expression);
                self.push(" AS ");
                self.push(variable.as_str());
            }
            Clause::With { body, condition } => {
                self.push("WITH ");
                self.projection_body(body);
                self.where_(condition);
            }
            Clause::Return(body) => {
                self.push("RETURN ");
                self.projection_body(body);
            }
            Clause::Set(items) => {
                self.push("SET ");
                self.separated(items, ", ", Self::set_item);
            }
            Clause::Remove(items) => {
                self.push("REMOVE ");
                self.separated(items, ", ", Self::remove_item);
            }
            Clause::Delete { detach, expressions } => {
                if *detach {
                    self.push("DETACH ");
                }
                self.push("DELETE ");
                self.expressions(expressions);
            }
        }
    }

    fn where_(&mut self, condition: &'a Condition) {
        if !condition.is_empty() {
            self.push(" WHERE ");
            self.condition(condition);
        }
    }

    fn projection_body(&mut self, body: &'a ProjectionBody) {
        if body.distinct {
            self.push("DISTINCT ");
        }
        self.expressions(&body.items);
        if !body.order.is_empty() {
            self.push(" ORDER BY ");
            self.separated(&body.order, ", ", Self::sort_item);
        }
        if let Some(skip) = body.skip {
            self.push(&format!(" SKIP {skip}"));
        }
        if let Some(limit) = body.limit {
            self.push(&format!(" LIMIT {limit}"));
        }
    }

    fn sort_item(&mut self, item: &'a SortItem) {
        self.expression(&item.expression);
        match item.direction {
            SortDirection::Undefined => {}
            SortDirection::Ascending => self.push(" ASC"),
            SortDirection::Descending => self.push(" DESC"),
        }
    }

    fn set_item(&mut self, item: &'a SetItem) {
        match item {
            SetItem::Property { target, value } => {
                self.expression(target);
                self.push(" = ");
                self.expression(value);
            }
            SetItem::Labels { name, labels } => self.labels_of(name.as_str(), labels),
        }
    }

    fn remove_item(&mut self, item: &'a RemoveItem) {
        match item {
            RemoveItem::Property(property) => self.expression(property),
            RemoveItem::Labels { name, labels } => self.labels_of(name.as_str(), labels),
        }
    }

    fn labels_of(&mut self, name: &str, labels: &[String]) {
        self.push(name);
        for label in labels {
            self.push(":");
            self.label(label);
        }
    }

    // ------------------------------------------------------------------------
    // Patterns
    // ------------------------------------------------------------------------

    fn patterns(&mut self, patterns: &'a [PatternElement]) {
        self.separated(patterns, ", ", Self::pattern);
    }

    fn pattern(&mut self, pattern: &'a PatternElement) {
        match pattern {
            PatternElement::Node(node) => self.node(node),
            PatternElement::Relationship(relationship) => self.relationship(relationship),
            PatternElement::Chain(chain) => {
                for (i, relationship) in chain.relationships.iter().enumerate() {
                    if i == 0 {
                        self.node(&relationship.left);
                    }
                    self.relationship_details(&relationship.details);
                    self.node(&relationship.right);
                }
            }
            PatternElement::Path(path) => self.named_path(path),
        }
    }

    fn node(&mut self, node: &'a Node) {
        if let Some(name) = &node.name {
            if self.visited_nodes.contains(&node) {
                self.push("(");
                self.push(name.as_str());
                self.push(")");
                return;
            }
        }

        self.push("(");
        if let Some(name) = &node.name {
            self.push(name.as_str());
        }
        for label in &node.labels {
            self.push(":");
            self.label(label);
        }
        if let Some(properties) = &node.properties {
            self.push(" ");
            self.map(properties);
        }
        self.push(")");

        if node.name.is_some() {
            self.visited_nodes.push(node);
        }
    }

    fn relationship(&mut self, relationship: &'a Relationship) {
        self.node(&relationship.left);
        self.relationship_details(&relationship.details);
        self.node(&relationship.right);
    }

    fn relationship_details(&mut self, details: &'a RelationshipDetails) {
        let (start, end) = match details.direction {
            Direction::Outgoing => ("-", "->"),
            Direction::Incoming => ("<-", "-"),
            Direction::Both => ("-", "-"),
        };
        self.push(start);
        if !details.is_empty() {
            self.push("[");
            if let Some(name) = &details.name {
                self.push(name.as_str());
            }
            for (i, rel_type) in details.types.iter().enumerate() {
                self.push(if i == 0 { ":" } else { "|" });
                self.label(rel_type);
            }
            if let Some(length) = &details.length {
                self.length(length);
            }
            if let Some(properties) = &details.properties {
                self.push(" ");
                self.map(properties);
            }
            self.push("]");
        }
        self.push(end);
    }

    fn length(&mut self, length: &Length) {
        self.push("*");
        match (length.min, length.max) {
            (None, None) => {}
            (Some(min), Some(max)) if min == max => self.push(&min.to_string()),
            (Some(min), Some(max)) => self.push(&format!("{min}..{max}")),
            (Some(min), None) => self.push(&format!("{min}..")),
            (None, Some(max)) => self.push(&format!("..{max}")),
        }
    }

    fn named_path(&mut self, path: &'a NamedPath) {
        self.push(path.name.as_str());
        self.push(" = ");
        if path.shortest {
            self.push("shortestPath(");
            self.pattern(&path.pattern);
            self.push(")");
        } else {
            self.pattern(&path.pattern);
        }
    }

    // ------------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------------

    fn expressions(&mut self, expressions: &'a [Expression]) {
        self.separated(expressions, ", ", Self::expression);
    }

    fn expression(&mut self, expression: &'a Expression) {
        match expression {
            Expression::Literal(literal) => self.literal(literal),
            Expression::Variable(name) => self.push(name.as_str()),
            Expression::Property { container, key } => {
                self.expression(container);
                self.push(".");
                self.push(&escape_if_necessary(key));
            }
            Expression::Parameter(name) => {
                self.push("$");
                self.push(name);
            }
            Expression::Asterisk => self.push("*"),
            Expression::Function(function) => {
                self.push(&function.name);
                self.push("(");
                if function.distinct {
                    self.push("DISTINCT ");
                }
                self.expressions(&function.arguments);
                self.push(")");
            }
            Expression::Operation { operator: Operator::Exponentiation, left, right } => {
                self.expression(left);
                self.push("^");
                self.expression(right);
            }
            Expression::Operation { operator, left, right } => {
                self.push("(");
                self.expression(left);
                self.push(" ");
                self.push(operator.symbol());
                self.push(" ");
                self.expression(right);
                self.push(")");
            }
            Expression::List(items) => {
                self.push("[");
                self.expressions(items);
                self.push("]");
            }
            Expression::Map(map) => self.map(map),
            Expression::MapProjection(projection) => self.map_projection(projection),
            Expression::ListComprehension(comprehension) => self.list_comprehension(comprehension),
            Expression::PatternComprehension(comprehension) => self.pattern_comprehension(comprehension),
            Expression::Case(case) => self.case(case),
            Expression::Aliased { expression: inner, alias } => {
                if self.visited_aliases.contains(&expression) {
                    self.push(alias.as_str());
                } else {
                    self.expression(inner);
                    self.push(" AS ");
                    self.push(alias.as_str());
                    self.visited_aliases.push(expression);
                }
            }
            Expression::Pattern(pattern) => self.pattern(pattern),
            Expression::Condition(condition) => self.condition(condition),
        }
    }

    /// Conditions used as operands are parenthesized.
    fn operand(&mut self, expression: &'a Expression) {
        if let Expression::Condition(condition) = expression {
            self.push("(");
            self.condition(condition);
            self.push(")");
        } else {
            self.expression(expression);
        }
    }

    fn literal(&mut self, literal: &Literal) {
        match literal {
            Literal::Null => self.push("NULL"),
            Literal::Boolean(b) => self.push(if *b { "true" } else { "false" }),
            Literal::Integer(i) => self.push(&i.to_string()),
            Literal::Float(f) => self.push(&format_float(*f)),
            Literal::String(s) => {
                self.push("'");
                self.push(&s.replace('\\', "\\\\").replace('\'', "\\'"));
                self.push("'");
            }
            Literal::List(items) => {
                self.push("[");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.literal(item);
                }
                self.push("]");
            }
        }
    }

    fn map(&mut self, map: &'a MapExpression) {
        self.push("{");
        self.separated(&map.entries, ", ", |v, (key, value)| {
            v.push(&escape_if_necessary(key));
            v.push(": ");
            v.expression(value);
        });
        self.push("}");
    }

    fn map_projection(&mut self, projection: &'a MapProjection) {
        self.push(projection.name.as_str());
        self.push("{");
        self.separated(&projection.entries, ", ", |v, entry| match entry {
            ProjectionEntry::Property(key) => {
                v.push(".");
                v.push(&escape_if_necessary(key));
            }
            ProjectionEntry::Entry { key, value } => {
                v.push(&escape_if_necessary(key));
                v.push(": ");
                v.expression(value);
            }
            ProjectionEntry::Variable(name) => v.push(name.as_str()),
            ProjectionEntry::AllProperties => v.push(".*"),
        });
        self.push("}");
    }

    fn list_comprehension(&mut self, comprehension: &'a ListComprehension) {
        self.push("[");
        self.push(comprehension.variable.as_str());
        self.push(" IN ");
        self.expression(&comprehension.list);
        if let Some(filter) = &comprehension.filter {
            self.where_(filter);
        }
        if let Some(projection) = &comprehension.projection {
            self.push(" | ");
            self.expression(projection);
        }
        self.push("]");
    }

    fn pattern_comprehension(&mut self, comprehension: &'a PatternComprehension) {
        self.push("[");
        self.pattern(&comprehension.pattern);
        if let Some(filter) = &comprehension.filter {
            self.where_(filter);
        }
        self.push(" | ");
        self.expression(&comprehension.projection);
        self.push("]");
    }

    fn case(&mut self, case: &'a Case) {
        self.push("CASE");
        if let Some(subject) = &case.subject {
            self.push(" ");
            self.expression(subject);
        }
        for (when, then) in &case.alternatives {
            self.push(" WHEN ");
            self.expression(when);
            self.push(" THEN ");
            self.expression(then);
        }
        if let Some(default) = &case.default {
            self.push(" ELSE ");
            self.expression(default);
        }
        self.push(" END");
    }

    // ------------------------------------------------------------------------
    // Conditions
    // ------------------------------------------------------------------------

    fn condition(&mut self, condition: &'a Condition) {
        match condition {
            Condition::NoCondition => {}
            Condition::Boolean(b) => self.push(if *b { "true" } else { "false" }),
            Condition::Comparison { left, operator, right } => {
                self.operand(left);
                self.push(" ");
                self.push(operator.symbol());
                self.push(" ");
                self.operand(right);
            }
            Condition::IsNull { expression, negated } => {
                self.operand(expression);
                self.push(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
            Condition::Not(inner) => {
                self.push("NOT (");
                self.condition(inner);
                self.push(")");
            }
            Condition::Compound(compound) => self.compound(compound),
            Condition::HasLabels { name, labels } => self.labels_of(name.as_str(), labels),
            Condition::Pattern(pattern) => self.pattern(pattern),
            Condition::ExcludedPattern(pattern) => {
                self.push("NOT ");
                self.pattern(pattern);
            }
            Condition::Quantified { quantifier, variable, list, predicate } => {
                self.push(quantifier.function_name());
                self.push("(");
                self.push(variable.as_str());
                self.push(" IN ");
                self.expression(list);
                self.push(" WHERE ");
                self.condition(predicate);
                self.push(")");
            }
            Condition::Expression(expression) => self.expression(expression),
        }
    }

    fn compound(&mut self, compound: &'a CompoundCondition) {
        let children: Vec<&'a Condition> = compound.conditions.iter().filter(|c| !c.is_empty()).collect();
        match children.as_slice() {
            [] => {}
            [only] => self.condition(*only),
            _ => {
                self.push("(");
                for (i, child) in children.iter().copied().enumerate() {
                    if i > 0 {
                        let operator = match child {
                            Condition::Compound(inner) => inner.operator,
                            _ => compound.operator,
                        };
                        self.push(" ");
                        self.push(operator.keyword());
                        self.push(" ");
                    }
                    self.condition(child);
                }
                self.push(")");
            }
        }
    }
}

/// Whole floats keep one decimal place so they stay floats: `1.0`, `0.5`.
/// Cypher has no literal for NaN or the infinities; they become divisions.
fn format_float(value: f64) -> String {
    if value.is_nan() {
        "(0.0 / 0.0)".to_owned()
    } else if value.is_infinite() {
        if value > 0.0 { "(1.0 / 0.0)" } else { "(-1.0 / 0.0)" }.to_owned()
    } else if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, Literal, Node, SingleQuery, SymbolicName};

    fn render_condition(condition: &Condition) -> String {
        let config = RendererConfig::default();
        let mut visitor = RenderingVisitor::new(&config);
        visitor.condition(condition);
        visitor.out
    }

    fn render_pattern(pattern: &PatternElement) -> String {
        let config = RendererConfig::default();
        let mut visitor = RenderingVisitor::new(&config);
        visitor.pattern(pattern);
        visitor.out
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(0.4), "0.4");
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(-2.5), "-2.5");
    }

    #[test]
    fn test_format_non_finite_float() {
        assert_eq!(format_float(f64::NAN), "(0.0 / 0.0)");
        assert_eq!(format_float(f64::INFINITY), "(1.0 / 0.0)");
        assert_eq!(format_float(f64::NEG_INFINITY), "(-1.0 / 0.0)");
    }

    #[test]
    fn test_string_escaping() {
        let condition = Condition::Expression(Literal::from("it's a \\ test").into());
        assert_eq!(render_condition(&condition), "'it\\'s a \\\\ test'");
    }

    #[test]
    fn test_length_formatting() {
        let a = Node::any().named("a");
        let b = Node::any();
        let cases = [
            (None, None, "(a)-[*]->()"),
            (Some(0), Some(3), "(a)-[*0..3]->()"),
            (Some(2), Some(2), "(a)-[*2]->()"),
            (None, Some(5), "(a)-[*..5]->()"),
            (Some(3), None, "(a)-[*3..]->()"),
        ];
        for (min, max, expected) in cases {
            let pattern = PatternElement::from(a.relationship_to(&b, &[]).length(min, max));
            assert_eq!(render_pattern(&pattern), expected);
        }
    }

    #[test]
    fn test_unescaped_labels_when_configured() {
        let config = RendererConfig { always_escape_names: false };
        let node = Node::new(["Movie", "Sci Fi"]).named("m");
        let statement = Statement::Single(SingleQuery {
            clauses: vec![Clause::Create { patterns: vec![node.into()] }],
        });
        assert_eq!(DefaultRenderer::new(config).render(&statement), "CREATE (m:Movie:`Sci Fi`)");
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: RendererConfig = serde_json::from_str("{}").unwrap();
        assert!(config.always_escape_names);
        let config: RendererConfig = serde_json::from_str(r#"{"always_escape_names": false}"#).unwrap();
        assert!(!config.always_escape_names);
    }

    #[test]
    fn test_visited_node_renders_name_only() {
        let u = Node::new(["User"]).named("u");
        let statement = Statement::Single(SingleQuery {
            clauses: vec![
                Clause::Create { patterns: vec![(&u).into()] },
                Clause::Merge { patterns: vec![(&u).into()] },
                Clause::Delete { detach: false, expressions: vec![SymbolicName::new("u").into()] },
            ],
        });
        assert_eq!(render(&statement), "CREATE (u:`User`) MERGE (u) DELETE u");
    }
}
