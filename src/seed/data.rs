use crate::logic::{upsert_property, PathResolver};
use crate::model::{Node, NodeId};
use crate::store::traits::Store;
use anyhow::{Context, Result};

/// A seed node: name, parent path (`None` for a root) and properties
struct SeedNode {
    name: &'static str,
    parent: Option<&'static str>,
    properties: &'static [(&'static str, f64)],
}

// Parents are listed before their children
const SAMPLE_TREE: &[SeedNode] = &[
    SeedNode {
        name: "AlphaPC",
        parent: None,
        properties: &[("Height", 450.0), ("Width", 180.0)],
    },
    SeedNode {
        name: "Processing",
        parent: Some("/AlphaPC"),
        properties: &[],
    },
    SeedNode {
        name: "CPU",
        parent: Some("/AlphaPC/Processing"),
        properties: &[("Cores", 4.0), ("Power", 2.41)],
    },
    SeedNode {
        name: "Graphics",
        parent: Some("/AlphaPC/Processing"),
        properties: &[("RAM", 4000.0), ("Ports", 8.0)],
    },
    SeedNode {
        name: "RAM",
        parent: Some("/AlphaPC/Processing"),
        properties: &[("RAM", 32000.0)],
    },
    SeedNode {
        name: "Storage",
        parent: Some("/AlphaPC"),
        properties: &[],
    },
    SeedNode {
        name: "SSD",
        parent: Some("/AlphaPC/Storage"),
        properties: &[("Capacity", 1024.0), ("WriteSpeed", 250.0)],
    },
    SeedNode {
        name: "HDD",
        parent: Some("/AlphaPC/Storage"),
        properties: &[("Capacity", 5120.0), ("WriteSpeed", 1.724752)],
    },
];

/// Load the AlphaPC sample tree. Safe to run repeatedly: existing nodes are
/// reused and their properties reset to the sample values.
pub async fn load_seed_data<S: Store>(store: &S) -> Result<()> {
    for seed in SAMPLE_TREE {
        let parent_id = match seed.parent {
            Some(path) => {
                let parent = PathResolver::resolve(store, path)
                    .await?
                    .with_context(|| format!("Seed parent '{}' missing", path))?;
                Some(parent.id)
            }
            None => None,
        };

        let node = ensure_node(store, seed.name, parent_id).await?;
        for (key, value) in seed.properties {
            upsert_property(store, node.id, key, *value)
                .await
                .with_context(|| format!("Failed to seed property '{}' on '{}'", key, seed.name))?;
        }
        log::debug!("Seeded node '{}' (id {})", node.name, node.id);
    }

    log::info!("Seeded {} sample nodes", SAMPLE_TREE.len());
    Ok(())
}

async fn ensure_node<S: Store>(store: &S, name: &str, parent_id: Option<NodeId>) -> Result<Node> {
    if let Some(existing) = store.find_node_by_name_and_parent(name, parent_id).await? {
        return Ok(existing);
    }
    let node = store
        .create_node(name, parent_id)
        .await
        .with_context(|| format!("Failed to seed node '{}'", name))?;
    Ok(node)
}
