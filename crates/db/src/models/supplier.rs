//! Supplier entity model and DTOs.

use bizdesk_core::error::CoreError;
use bizdesk_core::types::DbId;
use bizdesk_core::validation::{lenient, required};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Resource;

/// A row from the `suppliers` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Supplier {
    pub id: DbId,
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Request body for creating or replacing a supplier.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplierInput {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub contact_person: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupplierFields {
    pub name: String,
    pub contact_person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Resource for Supplier {
    const LABEL: &'static str = "Supplier";
    const NOUN: &'static str = "supplier";
    const COLLECTION: &'static str = "suppliers";

    type Input = SupplierInput;
    type Fields = SupplierFields;

    fn id(&self) -> DbId {
        self.id
    }

    fn validate(input: SupplierInput) -> Result<SupplierFields, CoreError> {
        Ok(SupplierFields {
            name: required(input.name, "Name is required")?,
            contact_person: input.contact_person,
            email: input.email,
            phone: input.phone,
            address: input.address,
        })
    }
}
