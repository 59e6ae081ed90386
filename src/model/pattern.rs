//! Pattern elements: nodes, relationships, relationship chains, named paths.
//!
//! Composition never consumes its inputs: `a.relationship_to(&b, ..)`
//! copies `a` and `b` into the new relationship, so the same nodes can
//! appear again in later clauses.

use smallvec::SmallVec;

use crate::functions;
use crate::{Error, Result};

use super::condition::Condition;
use super::expression::{Expression, MapExpression};
use super::name::SymbolicName;
use super::projection::ProjectionEntry;

/// Relationship direction relative to the left node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `(a)-->(b)`
    Outgoing,
    /// `(a)<--(b)`
    Incoming,
    /// `(a)--(b)`
    Both,
}

// ============================================================================
// Node
// ============================================================================

/// `(name:Label1:Label2 {props})`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub name: Option<SymbolicName>,
    pub labels: SmallVec<[String; 2]>,
    pub properties: Option<MapExpression>,
}

impl Node {
    pub fn new<I>(labels: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            name: None,
            labels: labels.into_iter().map(Into::into).collect(),
            properties: None,
        }
    }

    /// A node without labels, `()`.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn named(mut self, name: impl Into<SymbolicName>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_properties<K, I>(mut self, properties: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Expression)>,
    {
        self.properties = Some(MapExpression::new(properties));
        self
    }

    pub fn with_property_map(mut self, properties: MapExpression) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn required_name(&self) -> Result<SymbolicName> {
        self.name.clone().ok_or(Error::MissingName)
    }

    pub fn property(&self, key: impl Into<String>) -> Result<Expression> {
        Ok(self.required_name()?.property(key))
    }

    pub fn as_(&self, alias: impl Into<SymbolicName>) -> Result<Expression> {
        Ok(Expression::from(self.required_name()?).as_(alias))
    }

    pub fn project<I>(&self, entries: I) -> Result<Expression>
    where
        I: IntoIterator,
        I::Item: Into<ProjectionEntry>,
    {
        Ok(self.required_name()?.project(entries))
    }

    /// `id(name)`
    pub fn internal_id(&self) -> Result<Expression> {
        functions::id(self)
    }

    /// `name:`A`:`B``
    pub fn has_labels<I>(&self, labels: I) -> Result<Condition>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Ok(Condition::HasLabels {
            name: self.required_name()?,
            labels: labels.into_iter().map(Into::into).collect(),
        })
    }

    pub fn relationship_to(&self, other: &Node, types: &[&str]) -> Relationship {
        Relationship::create(self.clone(), Direction::Outgoing, other.clone(), types)
    }

    pub fn relationship_from(&self, other: &Node, types: &[&str]) -> Relationship {
        Relationship::create(self.clone(), Direction::Incoming, other.clone(), types)
    }

    pub fn relationship_between(&self, other: &Node, types: &[&str]) -> Relationship {
        Relationship::create(self.clone(), Direction::Both, other.clone(), types)
    }
}

// ============================================================================
// Relationship
// ============================================================================

/// Variable length bounds. Both `None` renders the unbounded `*`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Length {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

/// Everything between the two nodes: `-[name:TYPE*min..max {props}]->`.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipDetails {
    pub direction: Direction,
    pub name: Option<SymbolicName>,
    pub types: SmallVec<[String; 2]>,
    pub length: Option<Length>,
    pub properties: Option<MapExpression>,
}

impl RelationshipDetails {
    /// Nothing to render inside brackets.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.types.is_empty() && self.length.is_none() && self.properties.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    pub left: Node,
    pub details: RelationshipDetails,
    pub right: Node,
}

impl Relationship {
    fn create(left: Node, direction: Direction, right: Node, types: &[&str]) -> Self {
        Self {
            left,
            details: RelationshipDetails {
                direction,
                name: None,
                types: types.iter().map(|t| (*t).to_owned()).collect(),
                length: None,
                properties: None,
            },
            right,
        }
    }

    pub fn named(mut self, name: impl Into<SymbolicName>) -> Self {
        self.details.name = Some(name.into());
        self
    }

    pub fn with_properties<K, I>(mut self, properties: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Expression)>,
    {
        self.details.properties = Some(MapExpression::new(properties));
        self
    }

    /// `*`
    pub fn unbounded(mut self) -> Self {
        self.details.length = Some(Length::default());
        self
    }

    pub fn min(mut self, min: u32) -> Self {
        let length = self.details.length.get_or_insert_with(Length::default);
        length.min = Some(min);
        self
    }

    pub fn max(mut self, max: u32) -> Self {
        let length = self.details.length.get_or_insert_with(Length::default);
        length.max = Some(max);
        self
    }

    pub fn length(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.details.length = Some(Length { min, max });
        self
    }

    pub fn required_name(&self) -> Result<SymbolicName> {
        self.details.name.clone().ok_or(Error::MissingName)
    }

    pub fn property(&self, key: impl Into<String>) -> Result<Expression> {
        Ok(self.required_name()?.property(key))
    }

    pub fn as_(&self, alias: impl Into<SymbolicName>) -> Result<Expression> {
        Ok(Expression::from(self.required_name()?).as_(alias))
    }

    pub fn project<I>(&self, entries: I) -> Result<Expression>
    where
        I: IntoIterator,
        I::Item: Into<ProjectionEntry>,
    {
        Ok(self.required_name()?.project(entries))
    }

    pub fn relationship_to(&self, other: &Node, types: &[&str]) -> RelationshipChain {
        RelationshipChain::start(self.clone()).relationship_to(other, types)
    }

    pub fn relationship_from(&self, other: &Node, types: &[&str]) -> RelationshipChain {
        RelationshipChain::start(self.clone()).relationship_from(other, types)
    }

    pub fn relationship_between(&self, other: &Node, types: &[&str]) -> RelationshipChain {
        RelationshipChain::start(self.clone()).relationship_between(other, types)
    }
}

// ============================================================================
// Relationship chain
// ============================================================================

/// A path of relationships where each link starts at the previous link's
/// right node. Modifiers apply to the last link.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipChain {
    pub relationships: Vec<Relationship>,
}

impl RelationshipChain {
    fn start(first: Relationship) -> Self {
        Self { relationships: vec![first] }
    }

    fn extend(mut self, direction: Direction, other: &Node, types: &[&str]) -> Self {
        let left = match self.relationships.last() {
            Some(last) => last.right.clone(),
            None => Node::any(),
        };
        self.relationships.push(Relationship::create(left, direction, other.clone(), types));
        self
    }

    fn map_last(mut self, f: impl FnOnce(Relationship) -> Relationship) -> Self {
        if let Some(last) = self.relationships.pop() {
            self.relationships.push(f(last));
        }
        self
    }

    pub fn relationship_to(self, other: &Node, types: &[&str]) -> Self {
        self.extend(Direction::Outgoing, other, types)
    }

    pub fn relationship_from(self, other: &Node, types: &[&str]) -> Self {
        self.extend(Direction::Incoming, other, types)
    }

    pub fn relationship_between(self, other: &Node, types: &[&str]) -> Self {
        self.extend(Direction::Both, other, types)
    }

    pub fn named(self, name: impl Into<SymbolicName>) -> Self {
        let name = name.into();
        self.map_last(|r| r.named(name))
    }

    pub fn with_properties<K, I>(self, properties: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Expression)>,
    {
        let properties = MapExpression::new(properties);
        self.map_last(|mut r| {
            r.details.properties = Some(properties);
            r
        })
    }

    pub fn unbounded(self) -> Self {
        self.map_last(Relationship::unbounded)
    }

    pub fn min(self, min: u32) -> Self {
        self.map_last(|r| r.min(min))
    }

    pub fn max(self, max: u32) -> Self {
        self.map_last(|r| r.max(max))
    }

    pub fn length(self, min: Option<u32>, max: Option<u32>) -> Self {
        self.map_last(|r| r.length(min, max))
    }

    /// Name of the last relationship.
    pub fn required_name(&self) -> Result<SymbolicName> {
        self.relationships.last().ok_or(Error::MissingName)?.required_name()
    }
}

// ============================================================================
// Named path
// ============================================================================

/// `p = pattern` or `p = shortestPath(pattern)`.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedPath {
    pub name: SymbolicName,
    pub shortest: bool,
    pub pattern: Box<PatternElement>,
}

impl NamedPath {
    pub fn name(&self) -> &SymbolicName {
        &self.name
    }
}

/// A path name waiting for its pattern.
#[derive(Debug, Clone)]
pub struct OngoingNamedPath {
    name: SymbolicName,
    shortest: bool,
}

impl OngoingNamedPath {
    pub fn new(name: impl Into<SymbolicName>, shortest: bool) -> Self {
        Self { name: name.into(), shortest }
    }

    pub fn defined_by(self, pattern: impl Into<PatternElement>) -> NamedPath {
        NamedPath { name: self.name, shortest: self.shortest, pattern: Box::new(pattern.into()) }
    }
}

// ============================================================================
// PatternElement
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum PatternElement {
    Node(Node),
    Relationship(Relationship),
    Chain(RelationshipChain),
    Path(NamedPath),
}

impl From<Node> for PatternElement {
    fn from(v: Node) -> Self { PatternElement::Node(v) }
}

impl From<&Node> for PatternElement {
    fn from(v: &Node) -> Self { PatternElement::Node(v.clone()) }
}

impl From<Relationship> for PatternElement {
    fn from(v: Relationship) -> Self { PatternElement::Relationship(v) }
}

impl From<&Relationship> for PatternElement {
    fn from(v: &Relationship) -> Self { PatternElement::Relationship(v.clone()) }
}

impl From<RelationshipChain> for PatternElement {
    fn from(v: RelationshipChain) -> Self { PatternElement::Chain(v) }
}

impl From<&RelationshipChain> for PatternElement {
    fn from(v: &RelationshipChain) -> Self { PatternElement::Chain(v.clone()) }
}

impl From<NamedPath> for PatternElement {
    fn from(v: NamedPath) -> Self { PatternElement::Path(v) }
}

impl From<&NamedPath> for PatternElement {
    fn from(v: &NamedPath) -> Self { PatternElement::Path(v.clone()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_copies() {
        let node = Node::new(["Bike"]);
        let named = node.clone().named("b");
        assert!(node.name.is_none());
        assert_eq!(named.required_name().unwrap().as_str(), "b");
        assert_eq!(node.required_name(), Err(Error::MissingName));
    }

    #[test]
    fn test_chain_links_share_nodes() {
        let a = Node::new(["A"]).named("a");
        let b = Node::new(["B"]).named("b");
        let c = Node::new(["C"]).named("c");
        let chain = a.relationship_to(&b, &[]).relationship_to(&c, &["KNOWS"]).max(2);
        assert_eq!(chain.relationships.len(), 2);
        assert_eq!(chain.relationships[1].left, b);
        assert_eq!(chain.relationships[0].details.length, None);
        assert_eq!(chain.relationships[1].details.length, Some(Length { min: None, max: Some(2) }));
    }

    #[test]
    fn test_length_modifiers_combine() {
        let a = Node::any().named("a");
        let r = a.relationship_to(&Node::any(), &[]).min(3).max(5);
        assert_eq!(r.details.length, Some(Length { min: Some(3), max: Some(5) }));
        assert!(!r.details.is_empty());
        assert!(a.relationship_between(&Node::any(), &[]).details.is_empty());
    }
}
