//! Table bootstrap for development databases and tests.
//!
//! This is not a migration system: every statement is
//! `CREATE TABLE IF NOT EXISTS`, so running it against an existing schema
//! changes nothing.

use crate::DbPool;

const SCHEMA: &str = include_str!("../schema.sql");

/// Create any of the five tables that do not exist yet.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    tracing::info!("Database schema ensured");
    Ok(())
}
