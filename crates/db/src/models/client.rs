//! Client entity model and DTOs.

use bizdesk_core::error::CoreError;
use bizdesk_core::types::DbId;
use bizdesk_core::validation::{lenient, required};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Resource;

const REQUIRED: &str = "Name and email are required";

/// A row from the `clients` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Client {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Request body for creating or replacing a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientInput {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientFields {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl Resource for Client {
    const LABEL: &'static str = "Client";
    const NOUN: &'static str = "client";
    const COLLECTION: &'static str = "clients";

    type Input = ClientInput;
    type Fields = ClientFields;

    fn id(&self) -> DbId {
        self.id
    }

    fn validate(input: ClientInput) -> Result<ClientFields, CoreError> {
        Ok(ClientFields {
            name: required(input.name, REQUIRED)?,
            email: required(input.email, REQUIRED)?,
            phone: input.phone,
            address: input.address,
        })
    }
}
