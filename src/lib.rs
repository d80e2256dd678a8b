pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

// Export logic types
pub use logic::{PathResolver, SubtreeBuilder, TreeError, MAX_SUBTREE_DEPTH};

// Export all model types
pub use model::*;

// Export seed module
pub use seed::load_seed_data;

// Export store types
pub use store::{MemoryStore, PostgresStore, Store, StoreError};

use crate::config::{AppConfig, StorageBackend};
use std::sync::Arc;

/// Build the configured store, then serve the API until the listener fails
pub async fn run_server(config: &AppConfig) -> anyhow::Result<()> {
    match config.storage.backend {
        StorageBackend::Postgres => {
            let database_url = config.database_url()?;
            log::info!("Connecting to PostgreSQL...");
            let store = PostgresStore::new(&database_url, config.max_connections()).await?;

            log::info!("Running database migrations...");
            store.migrate().await?;

            serve(Arc::new(store), config).await
        }
        StorageBackend::Memory => {
            log::warn!("Using in-memory storage; data is lost on shutdown");
            serve(Arc::new(MemoryStore::new()), config).await
        }
    }
}

async fn serve<S: Store + 'static>(store: Arc<S>, config: &AppConfig) -> anyhow::Result<()> {
    use axum::serve;
    use tokio::net::TcpListener;

    if config.load_seed_data() {
        log::info!("Loading seed data...");
        seed::load_seed_data(&*store).await?;
    }

    let app = routes::create_router::<S>().with_state(store);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("Node tree server running on http://{}", bind_address);

    serve(listener, app).await?;

    Ok(())
}
