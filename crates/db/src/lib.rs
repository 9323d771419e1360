//! Storage layer: connection pool, entity models, SQL repositories, and the
//! [`Store`] seam the HTTP layer is written against.

pub mod config;
pub mod error;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use config::DbConfig;
pub use error::StoreError;
pub use store::{MemoryStore, PgStore, Repository, Store};

pub type DbPool = sqlx::PgPool;

/// Create the process-wide connection pool.
///
/// The pool connects lazily: no connection is opened until the first
/// checkout, so this never fails.
pub fn create_pool(config: &DbConfig) -> DbPool {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy_with(config.connect_options())
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
