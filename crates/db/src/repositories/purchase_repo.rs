//! Repository for the `purchases` table.

use bizdesk_core::types::DbId;
use sqlx::PgConnection;

use crate::models::purchase::{Purchase, PurchaseFields};

/// Provides CRUD operations for purchases.
pub struct PurchaseRepo;

impl PurchaseRepo {
    /// List purchases with the supplier and product names attached.
    ///
    /// Inner joins: a purchase whose supplier or product row is gone is not
    /// listed.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Purchase>, sqlx::Error> {
        sqlx::query_as::<_, Purchase>(
            "SELECT p.id, p.supplier_id, p.product_id, p.quantity, p.total_price,
                    p.purchase_date, s.name AS supplier_name, pr.name AS product_name
             FROM purchases p
             JOIN suppliers s ON p.supplier_id = s.id
             JOIN products pr ON p.product_id = pr.id
             ORDER BY p.id",
        )
        .fetch_all(conn)
        .await
    }

    pub async fn create(
        conn: &mut PgConnection,
        input: &PurchaseFields,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO purchases (supplier_id, product_id, quantity, total_price, purchase_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(input.supplier_id)
        .bind(input.product_id)
        .bind(input.quantity)
        .bind(input.total_price)
        .bind(input.purchase_date)
        .fetch_one(conn)
        .await
    }

    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &PurchaseFields,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE purchases SET
                supplier_id = $2, product_id = $3, quantity = $4,
                total_price = $5, purchase_date = $6
             WHERE id = $1",
        )
        .bind(id)
        .bind(input.supplier_id)
        .bind(input.product_id)
        .bind(input.quantity)
        .bind(input.total_price)
        .bind(input.purchase_date)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM purchases WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
