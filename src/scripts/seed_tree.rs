use anyhow::Context;
use nodetree::config::AppConfig;
use nodetree::seed::load_seed_data;
use nodetree::store::PostgresStore;

/// Populate the configured PostgreSQL database with the AlphaPC sample tree
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let config = AppConfig::load()?;
    let database_url = config.database_url()?;

    let store = PostgresStore::new(&database_url, config.max_connections()).await?;
    store.migrate().await?;

    load_seed_data(&store).await.context("Seeding failed")?;
    log::info!("Seeding complete!");

    store.pool().close().await;
    Ok(())
}
