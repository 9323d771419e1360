//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the rows `GET` returns
//! - A `Deserialize` input DTO holding the raw request body
//! - A validated field record used for both inserts and full-replacement
//!   updates
//!
//! The entity struct implements [`Resource`], which is what the generic
//! HTTP handlers and the storage seam are written against.

pub mod client;
pub mod product;
pub mod purchase;
pub mod sale;
pub mod supplier;

use bizdesk_core::error::CoreError;
use bizdesk_core::types::DbId;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use client::Client;
pub use product::Product;
pub use purchase::Purchase;
pub use sale::Sale;
pub use supplier::Supplier;

/// One CRUD entity exposed at `/api/{COLLECTION}`.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    /// Capitalized singular name used in confirmation messages (`"Product"`).
    const LABEL: &'static str;
    /// Lowercase singular name used in failure messages (`"product"`).
    const NOUN: &'static str;
    /// Table name and URL segment (`"products"`).
    const COLLECTION: &'static str;

    /// Raw request body as submitted by a form.
    type Input: DeserializeOwned + Send + 'static;
    /// Writable fields after required-field validation.
    type Fields: Clone + Send + Sync + 'static;

    fn id(&self) -> DbId;

    /// Check that every required field is present and truthy.
    fn validate(input: Self::Input) -> Result<Self::Fields, CoreError>;
}
