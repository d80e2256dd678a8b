use crate::model::{NodeId, Property};
use crate::store::error::StoreResult;
use crate::store::traits::Store;

/// Set `key` on a node, updating the existing property in place if there is one.
///
/// If a concurrent writer creates the same key between the lookup and the
/// insert, the insert trips the uniqueness rule and the winner's row is
/// updated instead.
pub async fn upsert_property<S: Store>(
    store: &S,
    node_id: NodeId,
    key: &str,
    value: f64,
) -> StoreResult<Property> {
    if let Some(existing) = store.find_property_by_node_and_key(node_id, key).await? {
        return store.update_property(existing.id, value).await;
    }

    match store.create_property(node_id, key, value).await {
        Ok(property) => Ok(property),
        Err(e) if e.is_conflict() => {
            log::debug!("Property '{}' on node {} created concurrently, updating", key, node_id);
            match store.find_property_by_node_and_key(node_id, key).await? {
                Some(existing) => store.update_property(existing.id, value).await,
                None => Err(e),
            }
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, PropertyId};
    use crate::store::{MemoryStore, NodeStore, PropertyStore};
    use std::sync::atomic::{AtomicBool, Ordering};

    #[tokio::test]
    async fn test_upsert_creates_then_updates() {
        let store = MemoryStore::new();
        let node = store.create_node("AlphaPC", None).await.unwrap();

        let first = upsert_property(&store, node.id, "UpdateTest", 100.0).await.unwrap();
        let second = upsert_property(&store, node.id, "UpdateTest", 200.0).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.value, 200.0);
        assert_eq!(second.node_id, node.id);

        let all = store.find_properties(node.id).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].value, 200.0);
    }

    #[tokio::test]
    async fn test_same_key_on_different_nodes() {
        let store = MemoryStore::new();
        let ssd = store.create_node("SSD", None).await.unwrap();
        let hdd = store.create_node("HDD", None).await.unwrap();

        let a = upsert_property(&store, ssd.id, "Capacity", 1024.0).await.unwrap();
        let b = upsert_property(&store, hdd.id, "Capacity", 5120.0).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.property_count(), 2);
    }

    /// Hides existing properties from the first key lookup, the way a
    /// concurrent writer landing after the lookup would
    struct LateWriterStore {
        inner: MemoryStore,
        hide_next_lookup: AtomicBool,
    }

    #[async_trait::async_trait]
    impl NodeStore for LateWriterStore {
        async fn find_node_by_name_and_parent(
            &self,
            name: &str,
            parent_id: Option<NodeId>,
        ) -> StoreResult<Option<Node>> {
            self.inner.find_node_by_name_and_parent(name, parent_id).await
        }

        async fn find_node_by_id(&self, id: NodeId) -> StoreResult<Option<Node>> {
            self.inner.find_node_by_id(id).await
        }

        async fn find_children(&self, id: NodeId) -> StoreResult<Vec<Node>> {
            self.inner.find_children(id).await
        }

        async fn create_node(&self, name: &str, parent_id: Option<NodeId>) -> StoreResult<Node> {
            self.inner.create_node(name, parent_id).await
        }
    }

    #[async_trait::async_trait]
    impl PropertyStore for LateWriterStore {
        async fn find_properties(&self, node_id: NodeId) -> StoreResult<Vec<Property>> {
            self.inner.find_properties(node_id).await
        }

        async fn find_property_by_node_and_key(
            &self,
            node_id: NodeId,
            key: &str,
        ) -> StoreResult<Option<Property>> {
            if self.hide_next_lookup.swap(false, Ordering::SeqCst) {
                return Ok(None);
            }
            self.inner.find_property_by_node_and_key(node_id, key).await
        }

        async fn create_property(
            &self,
            node_id: NodeId,
            key: &str,
            value: f64,
        ) -> StoreResult<Property> {
            self.inner.create_property(node_id, key, value).await
        }

        async fn update_property(&self, id: PropertyId, value: f64) -> StoreResult<Property> {
            self.inner.update_property(id, value).await
        }
    }

    impl Store for LateWriterStore {}

    #[tokio::test]
    async fn test_upsert_updates_row_created_concurrently() {
        let inner = MemoryStore::new();
        let node = inner.create_node("AlphaPC", None).await.unwrap();
        let winner = inner.create_property(node.id, "Height", 1.0).await.unwrap();

        let store = LateWriterStore {
            inner,
            hide_next_lookup: AtomicBool::new(true),
        };
        let property = upsert_property(&store, node.id, "Height", 2.5).await.unwrap();

        assert_eq!(property.id, winner.id);
        assert_eq!(property.value, 2.5);
        assert_eq!(store.inner.property_count(), 1);

        let stored = store.inner.find_properties(node.id).await.unwrap();
        assert_eq!(stored, vec![property]);
    }
}
