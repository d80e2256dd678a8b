use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

use crate::model::{Node, NodeId, Property, PropertyId};
use crate::store::error::{StoreError, StoreResult};
use crate::store::traits::{NodeStore, PropertyStore, Store};

#[derive(Debug, Default)]
struct Tables {
    nodes: BTreeMap<NodeId, Node>,
    properties: BTreeMap<PropertyId, Property>,
    // Unique lookups, mirroring the SQL unique indexes
    nodes_by_sibling: HashMap<(Option<NodeId>, String), NodeId>,
    properties_by_key: HashMap<(NodeId, String), PropertyId>,
    next_node_id: NodeId,
    next_property_id: PropertyId,
}

impl Tables {
    fn sibling(&self, name: &str, parent_id: Option<NodeId>) -> Option<&Node> {
        self.nodes_by_sibling
            .get(&(parent_id, name.to_string()))
            .and_then(|id| self.nodes.get(id))
    }

    fn property(&self, node_id: NodeId, key: &str) -> Option<&Property> {
        self.properties_by_key
            .get(&(node_id, key.to_string()))
            .and_then(|id| self.properties.get(id))
    }
}

/// In-process store with the same uniqueness rules as the SQL schema.
///
/// Ids are handed out from 1 upwards and never reused, so iteration over the
/// maps follows creation order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.tables.read().nodes.len()
    }

    pub fn property_count(&self) -> usize {
        self.tables.read().properties.len()
    }
}

#[async_trait::async_trait]
impl NodeStore for MemoryStore {
    async fn find_node_by_name_and_parent(
        &self,
        name: &str,
        parent_id: Option<NodeId>,
    ) -> StoreResult<Option<Node>> {
        Ok(self.tables.read().sibling(name, parent_id).cloned())
    }

    async fn find_node_by_id(&self, id: NodeId) -> StoreResult<Option<Node>> {
        Ok(self.tables.read().nodes.get(&id).cloned())
    }

    async fn find_children(&self, id: NodeId) -> StoreResult<Vec<Node>> {
        let tables = self.tables.read();
        Ok(tables
            .nodes
            .values()
            .filter(|node| node.parent_id == Some(id))
            .cloned()
            .collect())
    }

    async fn create_node(&self, name: &str, parent_id: Option<NodeId>) -> StoreResult<Node> {
        let mut tables = self.tables.write();

        if let Some(parent_id) = parent_id {
            if !tables.nodes.contains_key(&parent_id) {
                return Err(StoreError::Backend(anyhow::anyhow!(
                    "parent node {} does not exist",
                    parent_id
                )));
            }
        }
        if tables.sibling(name, parent_id).is_some() {
            return Err(StoreError::Conflict(format!(
                "node '{}' already exists under {:?}",
                name, parent_id
            )));
        }

        tables.next_node_id += 1;
        let node = Node {
            id: tables.next_node_id,
            name: name.to_string(),
            parent_id,
        };
        tables
            .nodes_by_sibling
            .insert((parent_id, node.name.clone()), node.id);
        tables.nodes.insert(node.id, node.clone());

        Ok(node)
    }
}

#[async_trait::async_trait]
impl PropertyStore for MemoryStore {
    async fn find_properties(&self, node_id: NodeId) -> StoreResult<Vec<Property>> {
        let tables = self.tables.read();
        Ok(tables
            .properties
            .values()
            .filter(|property| property.node_id == node_id)
            .cloned()
            .collect())
    }

    async fn find_property_by_node_and_key(
        &self,
        node_id: NodeId,
        key: &str,
    ) -> StoreResult<Option<Property>> {
        Ok(self.tables.read().property(node_id, key).cloned())
    }

    async fn create_property(
        &self,
        node_id: NodeId,
        key: &str,
        value: f64,
    ) -> StoreResult<Property> {
        let mut tables = self.tables.write();

        if !tables.nodes.contains_key(&node_id) {
            return Err(StoreError::Backend(anyhow::anyhow!(
                "node {} does not exist",
                node_id
            )));
        }
        if tables.property(node_id, key).is_some() {
            return Err(StoreError::Conflict(format!(
                "property '{}' already exists on node {}",
                key, node_id
            )));
        }

        tables.next_property_id += 1;
        let property = Property {
            id: tables.next_property_id,
            key: key.to_string(),
            value,
            node_id,
        };
        tables
            .properties_by_key
            .insert((node_id, property.key.clone()), property.id);
        tables.properties.insert(property.id, property.clone());

        Ok(property)
    }

    async fn update_property(&self, id: PropertyId, value: f64) -> StoreResult<Property> {
        let mut tables = self.tables.write();
        let property = tables
            .properties
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("property {}", id)))?;
        property.value = value;

        Ok(property.clone())
    }
}

impl Store for MemoryStore {}
