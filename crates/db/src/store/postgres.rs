//! PostgreSQL-backed [`Store`].

use async_trait::async_trait;
use bizdesk_core::types::DbId;

use super::{Repository, Store};
use crate::error::StoreError;
use crate::models::{Client, Product, Purchase, Resource, Sale, Supplier};
use crate::repositories::{ClientRepo, ProductRepo, PurchaseRepo, SaleRepo, SupplierRepo};
use crate::DbPool;

/// Store backed by the shared PostgreSQL pool.
///
/// Each call acquires one connection and hands it to the entity's
/// repository. The `PoolConnection` guard goes back to the pool when it is
/// dropped at the end of the call, whether the statement succeeded or not.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Implement [`Repository`] for one entity by delegating to its repo struct.
macro_rules! pg_repository {
    ($resource:ty, $repo:ty) => {
        #[async_trait]
        impl Repository<$resource> for PgStore {
            async fn list(&self) -> Result<Vec<$resource>, StoreError> {
                let mut conn = self.pool.acquire().await?;
                Ok(<$repo>::list(&mut conn).await?)
            }

            async fn create(
                &self,
                fields: &<$resource as Resource>::Fields,
            ) -> Result<DbId, StoreError> {
                let mut conn = self.pool.acquire().await?;
                Ok(<$repo>::create(&mut conn, fields).await?)
            }

            async fn update(
                &self,
                id: DbId,
                fields: &<$resource as Resource>::Fields,
            ) -> Result<u64, StoreError> {
                let mut conn = self.pool.acquire().await?;
                Ok(<$repo>::update(&mut conn, id, fields).await?)
            }

            async fn delete(&self, id: DbId) -> Result<u64, StoreError> {
                let mut conn = self.pool.acquire().await?;
                Ok(<$repo>::delete(&mut conn, id).await?)
            }
        }
    };
}

pg_repository!(Client, ClientRepo);
pg_repository!(Supplier, SupplierRepo);
pg_repository!(Product, ProductRepo);
pg_repository!(Purchase, PurchaseRepo);
pg_repository!(Sale, SaleRepo);

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}
