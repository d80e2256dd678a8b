use anyhow::Context;
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::model::{Node, NodeId, Property, PropertyId};
use crate::store::error::{StoreError, StoreResult};
use crate::store::traits::{NodeStore, PropertyStore, Store};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> anyhow::Result<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn node_from_row(row: &PgRow) -> Node {
    Node {
        id: row.get("id"),
        name: row.get("name"),
        parent_id: row.get("parent_id"),
    }
}

fn property_from_row(row: &PgRow) -> Property {
    Property {
        id: row.get("id"),
        key: row.get("key"),
        value: row.get("value"),
        node_id: row.get("node_id"),
    }
}

// Unique violations become conflicts; everything else is a backend failure
fn write_error(err: sqlx::Error, context: &'static str) -> StoreError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return StoreError::Conflict(db_err.message().to_string());
        }
    }
    StoreError::Backend(anyhow::Error::new(err).context(context))
}

#[async_trait::async_trait]
impl NodeStore for PostgresStore {
    async fn find_node_by_name_and_parent(
        &self,
        name: &str,
        parent_id: Option<NodeId>,
    ) -> StoreResult<Option<Node>> {
        let row = sqlx::query(
            "SELECT id, name, parent_id FROM nodes WHERE name = $1 AND parent_id IS NOT DISTINCT FROM $2",
        )
        .bind(name)
        .bind(parent_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch node by name")?;

        Ok(row.as_ref().map(node_from_row))
    }

    async fn find_node_by_id(&self, id: NodeId) -> StoreResult<Option<Node>> {
        let row = sqlx::query("SELECT id, name, parent_id FROM nodes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch node")?;

        Ok(row.as_ref().map(node_from_row))
    }

    async fn find_children(&self, id: NodeId) -> StoreResult<Vec<Node>> {
        let rows =
            sqlx::query("SELECT id, name, parent_id FROM nodes WHERE parent_id = $1 ORDER BY id")
                .bind(id)
                .fetch_all(&self.pool)
                .await
                .context("Failed to list child nodes")?;

        Ok(rows.iter().map(node_from_row).collect())
    }

    async fn create_node(&self, name: &str, parent_id: Option<NodeId>) -> StoreResult<Node> {
        let row = sqlx::query(
            r#"
            INSERT INTO nodes (name, parent_id)
            VALUES ($1, $2)
            RETURNING id, name, parent_id
            "#,
        )
        .bind(name)
        .bind(parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to create node"))?;

        Ok(node_from_row(&row))
    }
}

#[async_trait::async_trait]
impl PropertyStore for PostgresStore {
    async fn find_properties(&self, node_id: NodeId) -> StoreResult<Vec<Property>> {
        let rows = sqlx::query(
            "SELECT id, key, value, node_id FROM properties WHERE node_id = $1 ORDER BY id",
        )
        .bind(node_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list properties")?;

        Ok(rows.iter().map(property_from_row).collect())
    }

    async fn find_property_by_node_and_key(
        &self,
        node_id: NodeId,
        key: &str,
    ) -> StoreResult<Option<Property>> {
        let row = sqlx::query(
            "SELECT id, key, value, node_id FROM properties WHERE node_id = $1 AND key = $2",
        )
        .bind(node_id)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch property")?;

        Ok(row.as_ref().map(property_from_row))
    }

    async fn create_property(
        &self,
        node_id: NodeId,
        key: &str,
        value: f64,
    ) -> StoreResult<Property> {
        let row = sqlx::query(
            r#"
            INSERT INTO properties (key, value, node_id)
            VALUES ($1, $2, $3)
            RETURNING id, key, value, node_id
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(node_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to create property"))?;

        Ok(property_from_row(&row))
    }

    async fn update_property(&self, id: PropertyId, value: f64) -> StoreResult<Property> {
        let row = sqlx::query(
            "UPDATE properties SET value = $2 WHERE id = $1 RETURNING id, key, value, node_id",
        )
        .bind(id)
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| write_error(e, "Failed to update property"))?;

        let Some(row) = row else {
            return Err(StoreError::NotFound(format!("property {}", id)));
        };

        Ok(property_from_row(&row))
    }
}

impl Store for PostgresStore {}
