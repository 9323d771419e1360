//! Repository for the `sales` table.

use bizdesk_core::types::DbId;
use sqlx::PgConnection;

use crate::models::sale::{Sale, SaleFields};

/// Provides CRUD operations for sales.
pub struct SaleRepo;

impl SaleRepo {
    /// List sales with the client and product names attached.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Sale>, sqlx::Error> {
        sqlx::query_as::<_, Sale>(
            "SELECT s.id, s.client_id, s.product_id, s.quantity, s.total_price,
                    s.sale_date, c.name AS client_name, p.name AS product_name
             FROM sales s
             JOIN clients c ON s.client_id = c.id
             JOIN products p ON s.product_id = p.id
             ORDER BY s.id",
        )
        .fetch_all(conn)
        .await
    }

    pub async fn create(conn: &mut PgConnection, input: &SaleFields) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO sales (client_id, product_id, quantity, total_price, sale_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(input.client_id)
        .bind(input.product_id)
        .bind(input.quantity)
        .bind(input.total_price)
        .bind(input.sale_date)
        .fetch_one(conn)
        .await
    }

    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &SaleFields,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sales SET
                client_id = $2, product_id = $3, quantity = $4,
                total_price = $5, sale_date = $6
             WHERE id = $1",
        )
        .bind(id)
        .bind(input.client_id)
        .bind(input.product_id)
        .bind(input.quantity)
        .bind(input.total_price)
        .bind(input.sale_date)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
