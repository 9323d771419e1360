//! Repository for the `clients` table.

use bizdesk_core::types::DbId;
use sqlx::PgConnection;

use crate::models::client::{Client, ClientFields};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone, address";

/// Provides CRUD operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// List all clients in insertion order.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients ORDER BY id");
        sqlx::query_as::<_, Client>(&query).fetch_all(conn).await
    }

    /// Insert a new client, returning its identity.
    pub async fn create(
        conn: &mut PgConnection,
        input: &ClientFields,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO clients (name, email, phone, address)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .fetch_one(conn)
        .await
    }

    /// Overwrite every writable column of a client.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &ClientFields,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE clients SET name = $2, email = $3, phone = $4, address = $5
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
