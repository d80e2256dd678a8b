use crate::model::{Node, NodeId, Property, PropertyId};
use serde::{Deserialize, Serialize};

/// A property as it appears inside a subtree (owner is implied by nesting)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtreeProperty {
    pub id: PropertyId,
    pub key: String,
    pub value: f64,
}

impl From<Property> for SubtreeProperty {
    fn from(property: Property) -> Self {
        Self {
            id: property.id,
            key: property.key,
            value: property.value,
        }
    }
}

/// A node with its properties and fully materialized descendants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtree {
    pub id: NodeId,
    pub name: String,
    pub parent_id: Option<NodeId>,
    pub properties: Vec<SubtreeProperty>,
    pub children: Vec<Subtree>,
}

impl Subtree {
    pub fn new(node: Node, properties: Vec<Property>, children: Vec<Subtree>) -> Self {
        Self {
            id: node.id,
            name: node.name,
            parent_id: node.parent_id,
            properties: properties.into_iter().map(SubtreeProperty::from).collect(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, name: &str) -> Option<&Subtree> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn property(&self, key: &str) -> Option<f64> {
        self.properties
            .iter()
            .find(|property| property.key == key)
            .map(|property| property.value)
    }

    /// Number of nodes in this subtree, including itself
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Subtree::node_count)
            .sum::<usize>()
    }
}
