//! In-memory [`Store`] for tests and database-less runs.
//!
//! Mirrors the behaviour of the PostgreSQL schema closely enough for the
//! HTTP layer not to notice: identities are assigned sequentially, lists
//! are ordered by identity, purchases and sales are inner-joined with their
//! referenced rows, and foreign keys are checked on insert, update and
//! delete. Money columns behave like `NUMERIC(10,2)`: values are rounded
//! to cents and anything of 10^8 or more in magnitude is rejected.
//!
//! A semaphore with the same capacity as the real pool gates every
//! operation, and [`PoolStats`] exposes checkout/release accounting so tests
//! can verify that every request returns its connection.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use bizdesk_core::types::{DbId, Money};
use rust_decimal::RoundingStrategy;
use tokio::sync::{Semaphore, SemaphorePermit};

use super::{Repository, Store};
use crate::config::DEFAULT_MAX_CONNECTIONS;
use crate::error::StoreError;
use crate::models::client::ClientFields;
use crate::models::product::ProductFields;
use crate::models::purchase::PurchaseFields;
use crate::models::sale::SaleFields;
use crate::models::supplier::SupplierFields;
use crate::models::{Client, Product, Purchase, Resource, Sale, Supplier};

struct Table<T> {
    rows: BTreeMap<DbId, T>,
    last_id: DbId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn insert(&mut self, row: T) -> DbId {
        self.last_id += 1;
        self.rows.insert(self.last_id, row);
        self.last_id
    }

    fn replace(&mut self, id: DbId, row: T) -> u64 {
        match self.rows.get_mut(&id) {
            Some(slot) => {
                *slot = row;
                1
            }
            None => 0,
        }
    }

    fn remove(&mut self, id: DbId) -> u64 {
        u64::from(self.rows.remove(&id).is_some())
    }

    fn get(&self, id: DbId) -> Option<&T> {
        self.rows.get(&id)
    }

    fn contains(&self, id: DbId) -> bool {
        self.rows.contains_key(&id)
    }
}

#[derive(Default)]
struct Tables {
    clients: Table<ClientFields>,
    suppliers: Table<SupplierFields>,
    products: Table<ProductFields>,
    purchases: Table<PurchaseFields>,
    sales: Table<SaleFields>,
}

impl Tables {
    fn require_supplier(&self, id: DbId) -> Result<&SupplierFields, StoreError> {
        self.suppliers.get(id).ok_or(StoreError::MissingReference {
            entity: Supplier::LABEL,
            id,
        })
    }

    fn require_client(&self, id: DbId) -> Result<&ClientFields, StoreError> {
        self.clients.get(id).ok_or(StoreError::MissingReference {
            entity: Client::LABEL,
            id,
        })
    }

    fn require_product(&self, id: DbId) -> Result<&ProductFields, StoreError> {
        self.products.get(id).ok_or(StoreError::MissingReference {
            entity: Product::LABEL,
            id,
        })
    }
}

/// How one entity maps onto [`Tables`].
trait MemoryResource: Resource {
    fn table(tables: &Tables) -> &Table<Self::Fields>;

    fn table_mut(tables: &mut Tables) -> &mut Table<Self::Fields>;

    /// Build the listed row, or `None` when an inner join drops it.
    fn row(tables: &Tables, id: DbId, fields: &Self::Fields) -> Option<Self>;

    /// Foreign keys held by `fields` must point at existing rows.
    fn check_references(_tables: &Tables, _fields: &Self::Fields) -> Result<(), StoreError> {
        Ok(())
    }

    /// No other row may still point at the row being deleted.
    fn check_unreferenced(_tables: &Tables, _id: DbId) -> Result<(), StoreError> {
        Ok(())
    }

    /// Apply column types to `fields` the way the database would on write.
    fn store_value(fields: &Self::Fields) -> Result<Self::Fields, StoreError> {
        Ok(fields.clone())
    }
}

/// Scale and precision of the `NUMERIC(10,2)` money columns.
const MONEY_SCALE: u32 = 2;
const MONEY_PRECISION: u32 = 10;

/// Coerce a value into a `NUMERIC(10,2)` column: round half away from zero
/// to two places, then fail on overflow like PostgreSQL does.
fn numeric_10_2(column: &'static str, value: Money) -> Result<Money, StoreError> {
    let rounded =
        value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    let limit = Money::from(10_i64.pow(MONEY_PRECISION - MONEY_SCALE));
    if rounded.abs() >= limit {
        return Err(StoreError::NumericOverflow { column, value });
    }
    Ok(rounded)
}

impl MemoryResource for Client {
    fn table(tables: &Tables) -> &Table<ClientFields> {
        &tables.clients
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<ClientFields> {
        &mut tables.clients
    }

    fn row(_tables: &Tables, id: DbId, f: &ClientFields) -> Option<Self> {
        Some(Client {
            id,
            name: f.name.clone(),
            email: f.email.clone(),
            phone: f.phone.clone(),
            address: f.address.clone(),
        })
    }

    fn check_unreferenced(tables: &Tables, id: DbId) -> Result<(), StoreError> {
        if tables.sales.rows.values().any(|s| s.client_id == id) {
            return Err(StoreError::StillReferenced {
                entity: Client::LABEL,
                id,
                referenced_by: Sale::COLLECTION,
            });
        }
        Ok(())
    }
}

impl MemoryResource for Supplier {
    fn table(tables: &Tables) -> &Table<SupplierFields> {
        &tables.suppliers
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<SupplierFields> {
        &mut tables.suppliers
    }

    fn row(_tables: &Tables, id: DbId, f: &SupplierFields) -> Option<Self> {
        Some(Supplier {
            id,
            name: f.name.clone(),
            contact_person: f.contact_person.clone(),
            email: f.email.clone(),
            phone: f.phone.clone(),
            address: f.address.clone(),
        })
    }

    fn check_unreferenced(tables: &Tables, id: DbId) -> Result<(), StoreError> {
        if tables.purchases.rows.values().any(|p| p.supplier_id == id) {
            return Err(StoreError::StillReferenced {
                entity: Supplier::LABEL,
                id,
                referenced_by: Purchase::COLLECTION,
            });
        }
        Ok(())
    }
}

impl MemoryResource for Product {
    fn table(tables: &Tables) -> &Table<ProductFields> {
        &tables.products
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<ProductFields> {
        &mut tables.products
    }

    fn row(_tables: &Tables, id: DbId, f: &ProductFields) -> Option<Self> {
        Some(Product {
            id,
            name: f.name.clone(),
            description: f.description.clone(),
            price: f.price,
            stock: f.stock,
        })
    }

    fn check_unreferenced(tables: &Tables, id: DbId) -> Result<(), StoreError> {
        let referenced_by = if tables.purchases.rows.values().any(|p| p.product_id == id) {
            Purchase::COLLECTION
        } else if tables.sales.rows.values().any(|s| s.product_id == id) {
            Sale::COLLECTION
        } else {
            return Ok(());
        };
        Err(StoreError::StillReferenced {
            entity: Product::LABEL,
            id,
            referenced_by,
        })
    }

    fn store_value(f: &ProductFields) -> Result<ProductFields, StoreError> {
        Ok(ProductFields {
            price: numeric_10_2("price", f.price)?,
            ..f.clone()
        })
    }
}

impl MemoryResource for Purchase {
    fn table(tables: &Tables) -> &Table<PurchaseFields> {
        &tables.purchases
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<PurchaseFields> {
        &mut tables.purchases
    }

    fn row(tables: &Tables, id: DbId, f: &PurchaseFields) -> Option<Self> {
        let supplier = tables.suppliers.get(f.supplier_id)?;
        let product = tables.products.get(f.product_id)?;
        Some(Purchase {
            id,
            supplier_id: f.supplier_id,
            product_id: f.product_id,
            quantity: f.quantity,
            total_price: f.total_price,
            purchase_date: f.purchase_date,
            supplier_name: supplier.name.clone(),
            product_name: product.name.clone(),
        })
    }

    fn check_references(tables: &Tables, f: &PurchaseFields) -> Result<(), StoreError> {
        tables.require_supplier(f.supplier_id)?;
        tables.require_product(f.product_id)?;
        Ok(())
    }

    fn store_value(f: &PurchaseFields) -> Result<PurchaseFields, StoreError> {
        Ok(PurchaseFields {
            total_price: numeric_10_2("total_price", f.total_price)?,
            ..f.clone()
        })
    }
}

impl MemoryResource for Sale {
    fn table(tables: &Tables) -> &Table<SaleFields> {
        &tables.sales
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<SaleFields> {
        &mut tables.sales
    }

    fn row(tables: &Tables, id: DbId, f: &SaleFields) -> Option<Self> {
        let client = tables.clients.get(f.client_id)?;
        let product = tables.products.get(f.product_id)?;
        Some(Sale {
            id,
            client_id: f.client_id,
            product_id: f.product_id,
            quantity: f.quantity,
            total_price: f.total_price,
            sale_date: f.sale_date,
            client_name: client.name.clone(),
            product_name: product.name.clone(),
        })
    }

    fn check_references(tables: &Tables, f: &SaleFields) -> Result<(), StoreError> {
        tables.require_client(f.client_id)?;
        tables.require_product(f.product_id)?;
        Ok(())
    }

    fn store_value(f: &SaleFields) -> Result<SaleFields, StoreError> {
        Ok(SaleFields {
            total_price: numeric_10_2("total_price", f.total_price)?,
            ..f.clone()
        })
    }
}

fn list_rows<R: MemoryResource>(tables: &Tables) -> Vec<R> {
    R::table(tables)
        .rows
        .iter()
        .filter_map(|(id, fields)| R::row(tables, *id, fields))
        .collect()
}

fn create_row<R: MemoryResource>(
    tables: &mut Tables,
    fields: &R::Fields,
) -> Result<DbId, StoreError> {
    let row = R::store_value(fields)?;
    R::check_references(tables, &row)?;
    Ok(R::table_mut(tables).insert(row))
}

fn update_row<R: MemoryResource>(
    tables: &mut Tables,
    id: DbId,
    fields: &R::Fields,
) -> Result<u64, StoreError> {
    // An UPDATE matching no row never evaluates its foreign keys.
    if !R::table(tables).contains(id) {
        return Ok(0);
    }
    let row = R::store_value(fields)?;
    R::check_references(tables, &row)?;
    Ok(R::table_mut(tables).replace(id, row))
}

fn delete_row<R: MemoryResource>(tables: &mut Tables, id: DbId) -> Result<u64, StoreError> {
    if !R::table(tables).contains(id) {
        return Ok(0);
    }
    R::check_unreferenced(tables, id)?;
    Ok(R::table_mut(tables).remove(id))
}

/// Point-in-time view of the in-memory pool's accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub capacity: usize,
    /// Permits handed out since the store was created.
    pub checkouts: u64,
    /// Permits returned since the store was created.
    pub releases: u64,
    /// Permits currently held.
    pub in_use: usize,
    /// Highest number of permits ever held at once.
    pub peak_in_use: usize,
}

#[derive(Default)]
struct Counters {
    checkouts: AtomicU64,
    releases: AtomicU64,
    in_use: AtomicUsize,
    peak_in_use: AtomicUsize,
}

/// A held pool permit. Dropping it is the release.
struct Checkout<'a> {
    _permit: SemaphorePermit<'a>,
    counters: &'a Counters,
}

impl Drop for Checkout<'_> {
    fn drop(&mut self) {
        self.counters.in_use.fetch_sub(1, Ordering::SeqCst);
        self.counters.releases.fetch_add(1, Ordering::SeqCst);
    }
}

/// Store keeping all five tables in process memory.
pub struct MemoryStore {
    tables: RwLock<Tables>,
    permits: Semaphore,
    capacity: usize,
    counters: Counters,
    outage: AtomicBool,
    latency: Duration,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// An empty store with the default pool capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CONNECTIONS as usize)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            permits: Semaphore::new(capacity),
            capacity,
            counters: Counters::default(),
            outage: AtomicBool::new(false),
            latency: Duration::ZERO,
        }
    }

    /// Hold each permit for `latency` before running the operation, so
    /// concurrent requests overlap the way real statements do.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// While set, every operation fails after checking out its permit.
    pub fn set_outage(&self, down: bool) {
        self.outage.store(down, Ordering::SeqCst);
    }

    pub fn pool_stats(&self) -> PoolStats {
        PoolStats {
            capacity: self.capacity,
            checkouts: self.counters.checkouts.load(Ordering::SeqCst),
            releases: self.counters.releases.load(Ordering::SeqCst),
            in_use: self.counters.in_use.load(Ordering::SeqCst),
            peak_in_use: self.counters.peak_in_use.load(Ordering::SeqCst),
        }
    }

    /// Wait for a free permit, then simulate statement latency and outages.
    async fn checkout(&self) -> Result<Checkout<'_>, StoreError> {
        let permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| StoreError::Unavailable("connection pool closed".into()))?;
        self.counters.checkouts.fetch_add(1, Ordering::SeqCst);
        let now = self.counters.in_use.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.peak_in_use.fetch_max(now, Ordering::SeqCst);
        let checkout = Checkout {
            _permit: permit,
            counters: &self.counters,
        };

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.outage.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated outage".into()));
        }
        Ok(checkout)
    }

    async fn read<T>(&self, op: impl FnOnce(&Tables) -> T) -> Result<T, StoreError> {
        let _conn = self.checkout().await?;
        let tables = self.tables.read().map_err(|_| poisoned())?;
        Ok(op(&tables))
    }

    async fn write<T>(
        &self,
        op: impl FnOnce(&mut Tables) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let _conn = self.checkout().await?;
        let mut tables = self.tables.write().map_err(|_| poisoned())?;
        op(&mut tables)
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("memory store lock poisoned".into())
}

macro_rules! memory_repository {
    ($resource:ty) => {
        #[async_trait]
        impl Repository<$resource> for MemoryStore {
            async fn list(&self) -> Result<Vec<$resource>, StoreError> {
                self.read(list_rows::<$resource>).await
            }

            async fn create(
                &self,
                fields: &<$resource as Resource>::Fields,
            ) -> Result<DbId, StoreError> {
                self.write(|tables| create_row::<$resource>(tables, fields))
                    .await
            }

            async fn update(
                &self,
                id: DbId,
                fields: &<$resource as Resource>::Fields,
            ) -> Result<u64, StoreError> {
                self.write(|tables| update_row::<$resource>(tables, id, fields))
                    .await
            }

            async fn delete(&self, id: DbId) -> Result<u64, StoreError> {
                self.write(|tables| delete_row::<$resource>(tables, id))
                    .await
            }
        }
    };
}

memory_repository!(Client);
memory_repository!(Supplier);
memory_repository!(Product);
memory_repository!(Purchase);
memory_repository!(Sale);

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        self.checkout().await.map(drop)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    fn product(name: &str) -> ProductFields {
        ProductFields {
            name: name.to_string(),
            description: None,
            price: Decimal::new(999, 2),
            stock: 100,
        }
    }

    fn supplier(name: &str) -> SupplierFields {
        SupplierFields {
            name: name.to_string(),
            contact_person: None,
            email: None,
            phone: None,
            address: None,
        }
    }

    fn purchase(supplier_id: DbId, product_id: DbId) -> PurchaseFields {
        PurchaseFields {
            supplier_id,
            product_id,
            quantity: 5,
            total_price: Decimal::new(4995, 2),
            purchase_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn identities_are_sequential_and_listed_in_order() {
        let store = MemoryStore::new();
        let a = Repository::<Product>::create(&store, &product("A")).await.unwrap();
        let b = Repository::<Product>::create(&store, &product("B")).await.unwrap();
        assert_eq!((a, b), (1, 2));

        let rows = Repository::<Product>::list(&store).await.unwrap();
        let names: Vec<_> = rows.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[tokio::test]
    async fn deleted_identities_are_not_reused() {
        let store = MemoryStore::new();
        let a = Repository::<Product>::create(&store, &product("A")).await.unwrap();
        Repository::<Product>::delete(&store, a).await.unwrap();
        let b = Repository::<Product>::create(&store, &product("B")).await.unwrap();
        assert_eq!(b, a + 1);
    }

    #[tokio::test]
    async fn purchase_list_joins_names() {
        let store = MemoryStore::new();
        // Offset supplier ids from product ids so a swapped join would show.
        for filler in ["Filler 1", "Filler 2"] {
            Repository::<Supplier>::create(&store, &supplier(filler)).await.unwrap();
        }
        let s = Repository::<Supplier>::create(&store, &supplier("Acme")).await.unwrap();
        let p = Repository::<Product>::create(&store, &product("Widget")).await.unwrap();
        assert_ne!(s, p);
        Repository::<Purchase>::create(&store, &purchase(s, p)).await.unwrap();

        let rows = Repository::<Purchase>::list(&store).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].supplier_id, s);
        assert_eq!(rows[0].supplier_name, "Acme");
        assert_eq!(rows[0].product_id, p);
        assert_eq!(rows[0].product_name, "Widget");
    }

    #[tokio::test]
    async fn money_is_rounded_to_cents() {
        let store = MemoryStore::new();
        let mut fields = product("Widget");
        fields.price = Decimal::new(9999, 3); // 9.999
        let id = Repository::<Product>::create(&store, &fields).await.unwrap();

        let rows = Repository::<Product>::list(&store).await.unwrap();
        assert_eq!(rows[0].price, Decimal::new(1000, 2));

        fields.price = Decimal::new(12345, 3); // 12.345, half away from zero
        Repository::<Product>::update(&store, id, &fields).await.unwrap();
        let rows = Repository::<Product>::list(&store).await.unwrap();
        assert_eq!(rows[0].price, Decimal::new(1235, 2));
    }

    #[tokio::test]
    async fn money_beyond_column_precision_is_rejected() {
        let store = MemoryStore::new();
        let mut fields = product("Yacht");
        fields.price = Decimal::new(1_000_000_000, 0);
        assert_matches!(
            Repository::<Product>::create(&store, &fields).await,
            Err(StoreError::NumericOverflow { column: "price", .. })
        );

        // 99999999.994 rounds down and still fits; .995 rounds up and does not.
        fields.price = Decimal::new(99_999_999_994, 3);
        let p = Repository::<Product>::create(&store, &fields).await.unwrap();
        fields.price = Decimal::new(99_999_999_995, 3);
        assert!(Repository::<Product>::create(&store, &fields).await.is_err());

        let s = Repository::<Supplier>::create(&store, &supplier("Acme")).await.unwrap();
        let mut order = purchase(s, p);
        order.total_price = Decimal::new(-100_000_000, 0);
        assert_matches!(
            Repository::<Purchase>::create(&store, &order).await,
            Err(StoreError::NumericOverflow { column: "total_price", .. })
        );
        assert!(Repository::<Purchase>::list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn purchase_with_unknown_supplier_is_rejected() {
        let store = MemoryStore::new();
        let p = Repository::<Product>::create(&store, &product("Widget")).await.unwrap();
        let err = Repository::<Purchase>::create(&store, &purchase(42, p))
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::MissingReference { entity: "Supplier", id: 42 });
    }

    #[tokio::test]
    async fn referenced_product_cannot_be_deleted() {
        let store = MemoryStore::new();
        let s = Repository::<Supplier>::create(&store, &supplier("Acme")).await.unwrap();
        let p = Repository::<Product>::create(&store, &product("Widget")).await.unwrap();
        Repository::<Purchase>::create(&store, &purchase(s, p)).await.unwrap();

        let err = Repository::<Product>::delete(&store, p).await.unwrap_err();
        assert_matches!(err, StoreError::StillReferenced { referenced_by: "purchases", .. });
    }

    #[tokio::test]
    async fn missing_identity_is_a_silent_no_op() {
        let store = MemoryStore::new();
        assert_eq!(
            Repository::<Product>::update(&store, 99, &product("X")).await.unwrap(),
            0
        );
        assert_eq!(Repository::<Product>::delete(&store, 99).await.unwrap(), 0);
        assert!(Repository::<Product>::list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn outage_still_releases_the_permit() {
        let store = MemoryStore::new();
        store.set_outage(true);
        assert_matches!(
            Repository::<Client>::list(&store).await,
            Err(StoreError::Unavailable(_))
        );
        let stats = store.pool_stats();
        assert_eq!(stats.checkouts, 1);
        assert_eq!(stats.releases, 1);
        assert_eq!(stats.in_use, 0);
    }

    #[tokio::test]
    async fn concurrency_is_bounded_by_capacity() {
        let store = Arc::new(MemoryStore::with_capacity(2).with_latency(Duration::from_millis(20)));
        let tasks = (0..6).map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { Repository::<Product>::list(store.as_ref()).await })
        });
        for result in futures::future::join_all(tasks).await {
            assert!(result.unwrap().is_ok());
        }

        let stats = store.pool_stats();
        assert_eq!(stats.checkouts, 6);
        assert_eq!(stats.releases, 6);
        assert_eq!(stats.peak_in_use, 2);
    }
}
