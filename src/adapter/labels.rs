//! Label resolution for foreign entities.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::model::Node;
use crate::{Error, Result};

/// What the adapter knows about a queried entity: its type name and the
/// variable it is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    pub type_name: String,
    pub variable: String,
}

impl EntityDescriptor {
    pub fn new(type_name: impl Into<String>, variable: impl Into<String>) -> Self {
        Self { type_name: type_name.into(), variable: variable.into() }
    }
}

/// Strategy turning an entity into node labels. The first label is the
/// primary one; an empty result is an error.
pub trait LabelProvider {
    fn labels(&self, entity: &EntityDescriptor) -> Vec<String>;
}

/// Uses the entity's type name as its only label.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLabelProvider;

impl LabelProvider for DefaultLabelProvider {
    fn labels(&self, entity: &EntityDescriptor) -> Vec<String> {
        vec![entity.type_name.clone()]
    }
}

/// Static type name → labels table. Unknown types resolve to no labels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappedLabelProvider {
    labels: HashMap<String, Vec<String>>,
}

impl MappedLabelProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_labels<I>(mut self, type_name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.labels.insert(type_name.into(), labels.into_iter().map(Into::into).collect());
        self
    }
}

impl LabelProvider for MappedLabelProvider {
    fn labels(&self, entity: &EntityDescriptor) -> Vec<String> {
        self.labels.get(&entity.type_name).cloned().unwrap_or_default()
    }
}

/// Node for `entity`, named by its variable and labelled by `provider`.
pub fn to_node(entity: &EntityDescriptor, provider: &dyn LabelProvider) -> Result<Node> {
    let labels = provider.labels(entity);
    if labels.is_empty() {
        return Err(Error::MissingLabels(entity.type_name.clone()));
    }
    Ok(Node::new(labels).named(entity.variable.as_str()))
}
