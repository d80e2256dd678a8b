use crate::model::NodeId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub parent_id: Option<NodeId>, // None for roots
}

impl Node {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Body of `POST /node`
#[derive(Debug, Clone, PartialEq)]
pub struct NewNode {
    pub name: String,
    pub parent_path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewNodeRejection {
    MissingName,
    /// The name contains the path separator and could never be addressed
    InvalidName,
    InvalidParentPath,
}

impl NewNode {
    /// Validate a raw JSON body.
    ///
    /// `name` must be a non-empty string without `/`. `parentPath` may be
    /// absent, `null` or empty (all meaning "create a root"), otherwise it must
    /// be a string.
    pub fn from_json(body: &Value) -> Result<Self, NewNodeRejection> {
        let name = match body.get("name") {
            Some(Value::String(name)) if !name.is_empty() => name.clone(),
            _ => return Err(NewNodeRejection::MissingName),
        };
        if name.contains('/') {
            return Err(NewNodeRejection::InvalidName);
        }

        let parent_path = match body.get("parentPath") {
            None | Some(Value::Null) => None,
            Some(Value::String(path)) if path.is_empty() => None,
            Some(Value::String(path)) => Some(path.clone()),
            Some(_) => return Err(NewNodeRejection::InvalidParentPath),
        };

        Ok(Self { name, parent_path })
    }
}
