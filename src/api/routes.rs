use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::handlers;
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        .route("/", get(handlers::root))
        // Health check
        .route("/health", get(handlers::health_check))
        // Tree reads
        .route("/subtree", get(handlers::get_subtree::<S>))
        // Tree writes
        .route("/node", post(handlers::create_node::<S>))
        .route("/property", post(handlers::upsert_property::<S>))
}
