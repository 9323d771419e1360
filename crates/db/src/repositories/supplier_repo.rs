//! Repository for the `suppliers` table.

use bizdesk_core::types::DbId;
use sqlx::PgConnection;

use crate::models::supplier::{Supplier, SupplierFields};

const COLUMNS: &str = "id, name, contact_person, email, phone, address";

/// Provides CRUD operations for suppliers.
pub struct SupplierRepo;

impl SupplierRepo {
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Supplier>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM suppliers ORDER BY id");
        sqlx::query_as::<_, Supplier>(&query).fetch_all(conn).await
    }

    pub async fn create(
        conn: &mut PgConnection,
        input: &SupplierFields,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO suppliers (name, contact_person, email, phone, address)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.contact_person)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .fetch_one(conn)
        .await
    }

    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &SupplierFields,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE suppliers SET
                name = $2, contact_person = $3, email = $4, phone = $5, address = $6
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.contact_person)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
