//! Product entity model and DTOs.

use bizdesk_core::error::CoreError;
use bizdesk_core::types::{DbId, Money};
use bizdesk_core::validation::{lenient, required};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Resource;

const REQUIRED: &str = "Name, price, and stock are required";

/// A row from the `products` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub stock: i32,
}

/// Request body for creating or replacing a product.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductInput {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    /// Falsy descriptions are stored as `NULL`.
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub price: Option<Money>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub stock: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub stock: i32,
}

impl Resource for Product {
    const LABEL: &'static str = "Product";
    const NOUN: &'static str = "product";
    const COLLECTION: &'static str = "products";

    type Input = ProductInput;
    type Fields = ProductFields;

    fn id(&self) -> DbId {
        self.id
    }

    fn validate(input: ProductInput) -> Result<ProductFields, CoreError> {
        Ok(ProductFields {
            name: required(input.name, REQUIRED)?,
            description: input.description,
            price: required(input.price, REQUIRED)?,
            stock: required(input.stock, REQUIRED)?,
        })
    }
}
