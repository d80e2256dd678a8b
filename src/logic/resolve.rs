use crate::model::Node;
use crate::store::error::StoreResult;
use crate::store::traits::Store;

pub struct PathResolver;

impl PathResolver {
    /// Split a slash-delimited path into node names, dropping empty segments
    pub fn segments(path: &str) -> Vec<&str> {
        path.split('/').filter(|segment| !segment.is_empty()).collect()
    }

    /// Walk `path` from the roots, one sibling lookup per segment.
    ///
    /// Returns `None` as soon as a segment has no match, and for paths with
    /// no segments at all (there is no implicit root node).
    pub async fn resolve<S: Store>(store: &S, path: &str) -> StoreResult<Option<Node>> {
        let mut current: Option<Node> = None;

        for segment in Self::segments(path) {
            let parent_id = current.as_ref().map(|node| node.id);
            match store.find_node_by_name_and_parent(segment, parent_id).await? {
                Some(node) => current = Some(node),
                None => {
                    log::debug!("Path '{}' stops resolving at segment '{}'", path, segment);
                    return Ok(None);
                }
            }
        }

        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::load_seed_data;
    use crate::store::{MemoryStore, NodeStore};

    #[test]
    fn test_segments_ignore_empty_parts() {
        assert_eq!(
            PathResolver::segments("/AlphaPC/Processing/CPU"),
            vec!["AlphaPC", "Processing", "CPU"]
        );
        assert_eq!(
            PathResolver::segments("//AlphaPC//Processing/"),
            vec!["AlphaPC", "Processing"]
        );
        assert!(PathResolver::segments("/").is_empty());
        assert!(PathResolver::segments("").is_empty());
    }

    #[tokio::test]
    async fn test_resolve_nested_path() {
        let store = MemoryStore::new();
        load_seed_data(&store).await.unwrap();

        let cpu = PathResolver::resolve(&store, "/AlphaPC/Processing/CPU")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cpu.name, "CPU");

        let processing = store.find_node_by_id(cpu.parent_id.unwrap()).await.unwrap().unwrap();
        assert_eq!(processing.name, "Processing");

        let relative = PathResolver::resolve(&store, "AlphaPC/Processing/CPU/")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(relative.id, cpu.id);
    }

    #[tokio::test]
    async fn test_resolve_misses() {
        let store = MemoryStore::new();
        load_seed_data(&store).await.unwrap();

        for path in [
            "/NonExistentNode",
            "/AlphaPC/CPU",
            "/Processing",
            "/AlphaPC/Processing/CPU/Core0",
            "/",
            "",
        ] {
            assert!(
                PathResolver::resolve(&store, path).await.unwrap().is_none(),
                "expected '{}' not to resolve",
                path
            );
        }
    }
}
