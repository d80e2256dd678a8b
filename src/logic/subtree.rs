use std::future::Future;
use std::pin::Pin;

use crate::logic::error::{TreeError, TreeResult};
use crate::model::{NodeId, Subtree};
use crate::store::traits::Store;

/// Levels below the requested node before assembly gives up
pub const MAX_SUBTREE_DEPTH: usize = 256;

type SubtreeFuture<'a> = Pin<Box<dyn Future<Output = TreeResult<Option<Subtree>>> + Send + 'a>>;

/// Materializes a node, its properties and all of its descendants
#[derive(Debug, Clone)]
pub struct SubtreeBuilder {
    max_depth: usize,
}

impl Default for SubtreeBuilder {
    fn default() -> Self {
        Self {
            max_depth: MAX_SUBTREE_DEPTH,
        }
    }
}

impl SubtreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Build the subtree rooted at `node_id`, or `None` if no such node exists
    pub async fn build<S: Store>(&self, store: &S, node_id: NodeId) -> TreeResult<Option<Subtree>> {
        self.build_level(store, node_id, 0).await
    }

    fn build_level<'a, S: Store>(
        &'a self,
        store: &'a S,
        node_id: NodeId,
        depth: usize,
    ) -> SubtreeFuture<'a> {
        Box::pin(async move {
            if depth > self.max_depth {
                return Err(TreeError::DepthLimitExceeded {
                    limit: self.max_depth,
                });
            }

            let Some(node) = store.find_node_by_id(node_id).await? else {
                return Ok(None);
            };
            let properties = store.find_properties(node.id).await?;

            let mut children = Vec::new();
            for child in store.find_children(node.id).await? {
                // A child removed mid-walk is skipped
                if let Some(subtree) = self.build_level(store, child.id, depth + 1).await? {
                    children.push(subtree);
                }
            }

            Ok(Some(Subtree::new(node, properties, children)))
        })
    }
}
