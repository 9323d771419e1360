//! Sale entity model and DTOs.

use bizdesk_core::error::CoreError;
use bizdesk_core::types::{Date, DbId, Money};
use bizdesk_core::validation::{lenient, required};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Resource;

const REQUIRED: &str = "All fields are required";

/// A row from `sales` joined with `clients` and `products`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Sale {
    pub id: DbId,
    pub client_id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
    pub total_price: Money,
    pub sale_date: Date,
    pub client_name: String,
    pub product_name: String,
}

/// Request body for creating or replacing a sale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaleInput {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub client_id: Option<DbId>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub product_id: Option<DbId>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub quantity: Option<i32>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub total_price: Option<Money>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub sale_date: Option<Date>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaleFields {
    pub client_id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
    pub total_price: Money,
    pub sale_date: Date,
}

impl Resource for Sale {
    const LABEL: &'static str = "Sale";
    const NOUN: &'static str = "sale";
    const COLLECTION: &'static str = "sales";

    type Input = SaleInput;
    type Fields = SaleFields;

    fn id(&self) -> DbId {
        self.id
    }

    fn validate(input: SaleInput) -> Result<SaleFields, CoreError> {
        Ok(SaleFields {
            client_id: required(input.client_id, REQUIRED)?,
            product_id: required(input.product_id, REQUIRED)?,
            quantity: required(input.quantity, REQUIRED)?,
            total_price: required(input.total_price, REQUIRED)?,
            sale_date: required(input.sale_date, REQUIRED)?,
        })
    }
}
