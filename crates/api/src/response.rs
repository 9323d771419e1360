//! Response bodies shared by the resource handlers.

use bizdesk_core::types::DbId;
use serde::Serialize;

/// `{ "message": ... }` confirmation for updates and deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Confirmation for a create, carrying the new row's identity.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: DbId,
}
