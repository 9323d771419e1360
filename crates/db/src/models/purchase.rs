//! Purchase entity model and DTOs.
//!
//! A purchase records stock bought from a supplier. Rows returned by the
//! list query carry the supplier's and product's names.

use bizdesk_core::error::CoreError;
use bizdesk_core::types::{Date, DbId, Money};
use bizdesk_core::validation::{lenient, required};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Resource;

const REQUIRED: &str = "All fields are required";

/// A row from `purchases` joined with `suppliers` and `products`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Purchase {
    pub id: DbId,
    pub supplier_id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
    pub total_price: Money,
    pub purchase_date: Date,
    pub supplier_name: String,
    pub product_name: String,
}

/// Request body for creating or replacing a purchase.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PurchaseInput {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub supplier_id: Option<DbId>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub product_id: Option<DbId>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub quantity: Option<i32>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub total_price: Option<Money>,
    #[serde(default, deserialize_with = "lenient::date")]
    pub purchase_date: Option<Date>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseFields {
    pub supplier_id: DbId,
    pub product_id: DbId,
    pub quantity: i32,
    pub total_price: Money,
    pub purchase_date: Date,
}

impl Resource for Purchase {
    const LABEL: &'static str = "Purchase";
    const NOUN: &'static str = "purchase";
    const COLLECTION: &'static str = "purchases";

    type Input = PurchaseInput;
    type Fields = PurchaseFields;

    fn id(&self) -> DbId {
        self.id
    }

    fn validate(input: PurchaseInput) -> Result<PurchaseFields, CoreError> {
        Ok(PurchaseFields {
            supplier_id: required(input.supplier_id, REQUIRED)?,
            product_id: required(input.product_id, REQUIRED)?,
            quantity: required(input.quantity, REQUIRED)?,
            total_price: required(input.total_price, REQUIRED)?,
            purchase_date: required(input.purchase_date, REQUIRED)?,
        })
    }
}
