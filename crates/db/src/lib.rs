//! Persistence layer for groups: pool setup, migrations, row models,
//! SQL repositories, and the [`store::GroupStore`] seam used by handlers.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

pub use error::DbError;
pub use memory::MemoryGroupStore;
pub use store::{GroupStore, PgGroupStore};

pub type DbPool = sqlx::PgPool;

/// Connection pool settings.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    /// Upper bound on open connections.
    pub max_connections: u32,
    /// Connections kept open while idle.
    pub min_connections: u32,
    /// Idle connections above `min_connections` are closed after this long.
    pub idle_timeout: Duration,
    /// Bound on connecting and on waiting for a free connection.
    pub acquire_timeout: Duration,
}

/// Create a connection pool and verify it can reach the database.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .idle_timeout(config.idle_timeout)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
