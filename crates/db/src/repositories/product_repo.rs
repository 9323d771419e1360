//! Repository for the `products` table.

use bizdesk_core::types::DbId;
use sqlx::PgConnection;

use crate::models::product::{Product, ProductFields};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, price, stock";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// List all products in insertion order.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products ORDER BY id");
        sqlx::query_as::<_, Product>(&query).fetch_all(conn).await
    }

    /// Insert a new product, returning its identity.
    pub async fn create(
        conn: &mut PgConnection,
        input: &ProductFields,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO products (name, description, price, stock)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.stock)
        .fetch_one(conn)
        .await
    }

    /// Overwrite every writable column of a product.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &ProductFields,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE products SET name = $2, description = $3, price = $4, stock = $5
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.stock)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete a product. Fails with a foreign key violation while purchases
    /// or sales still reference it.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
