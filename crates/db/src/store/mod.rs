//! The storage seam.
//!
//! HTTP handlers hold an `Arc<dyn Store>` and call [`Repository<R>`] for
//! whichever [`Resource`] they serve. Production uses [`PgStore`]; tests and
//! database-less demos use [`MemoryStore`].
//!
//! Every operation checks out exactly one pooled connection (or, for the
//! in-memory store, one pool permit) and returns it before the call
//! completes, on success and on error alike.

mod memory;
mod postgres;

use async_trait::async_trait;
use bizdesk_core::types::DbId;

use crate::error::StoreError;
use crate::models::{Client, Product, Purchase, Resource, Sale, Supplier};

pub use memory::{MemoryStore, PoolStats};
pub use postgres::PgStore;

/// CRUD access to one entity's table.
#[async_trait]
pub trait Repository<R: Resource>: Send + Sync {
    /// All rows, ordered by identity.
    async fn list(&self) -> Result<Vec<R>, StoreError>;

    /// Insert one row and return its new identity.
    async fn create(&self, fields: &R::Fields) -> Result<DbId, StoreError>;

    /// Replace every writable field of the row with this identity.
    /// Returns the number of rows affected (0 when it does not exist).
    async fn update(&self, id: DbId, fields: &R::Fields) -> Result<u64, StoreError>;

    /// Remove the row with this identity. Returns the number of rows affected.
    async fn delete(&self, id: DbId) -> Result<u64, StoreError>;
}

/// A backend serving all five entities.
#[async_trait]
pub trait Store:
    Repository<Client>
    + Repository<Supplier>
    + Repository<Product>
    + Repository<Purchase>
    + Repository<Sale>
{
    /// Confirm the backend can serve a trivial request.
    async fn health_check(&self) -> Result<(), StoreError>;
}
