use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;
use std::sync::Arc;

use crate::logic::{PathResolver, SubtreeBuilder};
use crate::model::{NewNode, NewNodeRejection, Node, Property, PropertyUpsert, Subtree};
use crate::store::traits::Store;

pub type AppState<S> = Arc<S>;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubtreeQuery {
    pub path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubtreeResponse {
    pub path: String,
    pub subtree: Subtree,
}

#[derive(Debug, Serialize)]
pub struct NodeResponse {
    pub node: Node,
}

#[derive(Debug, Serialize)]
pub struct PropertyResponse {
    pub property: Property,
}

fn client_error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(ErrorResponse::new(message)))
}

// Details stay in the log, the client only sees a generic message
fn server_error(route: &str, err: impl Display) -> ApiError {
    log::error!("Error in {}: {}", route, err);
    client_error(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
}

pub async fn root() -> &'static str {
    "Backend Challenge API"
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /subtree?path=/AlphaPC/Processing
pub async fn get_subtree<S: Store>(
    State(store): State<AppState<S>>,
    query: Option<Query<SubtreeQuery>>,
) -> Result<Json<SubtreeResponse>, ApiError> {
    // An unparseable query string counts as a missing path
    let path = match query.and_then(|Query(query)| query.path) {
        Some(path) if !path.is_empty() => path,
        _ => return Err(client_error(StatusCode::BAD_REQUEST, "Path required")),
    };

    let node = match PathResolver::resolve(&*store, &path).await {
        Ok(Some(node)) => node,
        Ok(None) => return Err(client_error(StatusCode::NOT_FOUND, "Node not found")),
        Err(e) => return Err(server_error("GET /subtree", e)),
    };

    match SubtreeBuilder::new().build(&*store, node.id).await {
        Ok(Some(subtree)) => Ok(Json(SubtreeResponse { path, subtree })),
        Ok(None) => Err(client_error(StatusCode::NOT_FOUND, "Node not found")),
        Err(e) => Err(server_error("GET /subtree", e)),
    }
}

/// POST /node `{ name, parentPath? }`
pub async fn create_node<S: Store>(
    State(store): State<AppState<S>>,
    body: Option<RequestJson<Value>>,
) -> Result<(StatusCode, Json<NodeResponse>), ApiError> {
    let body = body.map(|RequestJson(value)| value).unwrap_or(Value::Null);
    let new_node = NewNode::from_json(&body).map_err(|rejection| match rejection {
        NewNodeRejection::MissingName => {
            client_error(StatusCode::BAD_REQUEST, "Node name required")
        }
        NewNodeRejection::InvalidName => {
            client_error(StatusCode::BAD_REQUEST, "Node name must not contain '/'")
        }
        NewNodeRejection::InvalidParentPath => {
            client_error(StatusCode::BAD_REQUEST, "parentPath must be a string")
        }
    })?;

    let parent_id = match &new_node.parent_path {
        Some(parent_path) => match PathResolver::resolve(&*store, parent_path).await {
            Ok(Some(parent)) => Some(parent.id),
            Ok(None) => return Err(client_error(StatusCode::NOT_FOUND, "Parent not found")),
            Err(e) => return Err(server_error("POST /node", e)),
        },
        None => None,
    };

    match store
        .find_node_by_name_and_parent(&new_node.name, parent_id)
        .await
    {
        Ok(Some(_)) => {
            return Err(client_error(StatusCode::CONFLICT, "Node already exists"))
        }
        Ok(None) => {}
        Err(e) => return Err(server_error("POST /node", e)),
    }

    match store.create_node(&new_node.name, parent_id).await {
        Ok(node) => {
            log::info!(
                "Created node '{}' (id {}, parent {:?})",
                node.name,
                node.id,
                node.parent_id
            );
            Ok((StatusCode::CREATED, Json(NodeResponse { node })))
        }
        // Lost a race against a concurrent create of the same sibling
        Err(e) if e.is_conflict() => {
            Err(client_error(StatusCode::CONFLICT, "Node already exists"))
        }
        Err(e) => Err(server_error("POST /node", e)),
    }
}

/// POST /property `{ nodePath, key, value }`
///
/// Creates or updates; both outcomes answer 200.
pub async fn upsert_property<S: Store>(
    State(store): State<AppState<S>>,
    body: Option<RequestJson<Value>>,
) -> Result<Json<PropertyResponse>, ApiError> {
    let body = body.map(|RequestJson(value)| value).unwrap_or(Value::Null);
    let Some(upsert) = PropertyUpsert::from_json(&body) else {
        return Err(client_error(
            StatusCode::BAD_REQUEST,
            "nodePath, key, and numeric value required",
        ));
    };

    let node = match PathResolver::resolve(&*store, &upsert.node_path).await {
        Ok(Some(node)) => node,
        Ok(None) => return Err(client_error(StatusCode::NOT_FOUND, "Node not found")),
        Err(e) => return Err(server_error("POST /property", e)),
    };

    match crate::logic::upsert_property(&*store, node.id, &upsert.key, upsert.value).await {
        Ok(property) => {
            log::debug!(
                "Set property '{}' = {} on node {}",
                property.key,
                property.value,
                property.node_id
            );
            Ok(Json(PropertyResponse { property }))
        }
        Err(e) => Err(server_error("POST /property", e)),
    }
}
