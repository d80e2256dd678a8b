use crate::model::{Node, NodeId, Property, PropertyId};
use crate::store::error::StoreResult;

/// Node lookups and creation over the parent-pointer forest
#[async_trait::async_trait]
pub trait NodeStore: Send + Sync {
    /// Find the node called `name` directly under `parent_id` (`None` = among roots)
    async fn find_node_by_name_and_parent(
        &self,
        name: &str,
        parent_id: Option<NodeId>,
    ) -> StoreResult<Option<Node>>;
    async fn find_node_by_id(&self, id: NodeId) -> StoreResult<Option<Node>>;
    /// Direct children of a node, in creation order
    async fn find_children(&self, id: NodeId) -> StoreResult<Vec<Node>>;
    /// Insert a node. Fails with `StoreError::Conflict` if the sibling name is taken
    async fn create_node(&self, name: &str, parent_id: Option<NodeId>) -> StoreResult<Node>;
}

#[async_trait::async_trait]
pub trait PropertyStore: Send + Sync {
    /// Properties owned by a node, in creation order
    async fn find_properties(&self, node_id: NodeId) -> StoreResult<Vec<Property>>;
    async fn find_property_by_node_and_key(
        &self,
        node_id: NodeId,
        key: &str,
    ) -> StoreResult<Option<Property>>;
    /// Insert a property. Fails with `StoreError::Conflict` if the key is taken on that node
    async fn create_property(&self, node_id: NodeId, key: &str, value: f64)
        -> StoreResult<Property>;
    async fn update_property(&self, id: PropertyId, value: f64) -> StoreResult<Property>;
}

pub trait Store: NodeStore + PropertyStore + Send + Sync {}
