//! Integration tests for the repository layer against a real database.
//!
//! Each test gets a fresh database from `#[sqlx::test]` and bootstraps the
//! schema itself. They need `DATABASE_URL` to point at a PostgreSQL server:
//!
//! ```text
//! DATABASE_URL=postgres://postgres@localhost/postgres cargo test -p bizdesk-db
//! ```

use assert_matches::assert_matches;
use bizdesk_db::models::client::ClientFields;
use bizdesk_db::models::product::ProductFields;
use bizdesk_db::models::purchase::PurchaseFields;
use bizdesk_db::models::sale::SaleFields;
use bizdesk_db::models::supplier::SupplierFields;
use bizdesk_db::models::{Client, Product, Purchase, Sale, Supplier};
use bizdesk_db::repositories::{ProductRepo, PurchaseRepo};
use bizdesk_db::schema::ensure_schema;
use bizdesk_db::{PgStore, Repository, Store, StoreError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn store(pool: PgPool) -> PgStore {
    ensure_schema(&pool).await.expect("schema bootstrap");
    PgStore::new(pool)
}

fn widget() -> ProductFields {
    ProductFields {
        name: "Widget".to_string(),
        description: Some("A widget".to_string()),
        price: Decimal::new(999, 2),
        stock: 100,
    }
}

fn acme() -> SupplierFields {
    SupplierFields {
        name: "Acme".to_string(),
        contact_person: Some("Wile".to_string()),
        email: None,
        phone: None,
        address: None,
    }
}

fn jane() -> ClientFields {
    ClientFields {
        name: "Jane".to_string(),
        email: "jane@example.com".to_string(),
        phone: None,
        address: None,
    }
}

fn jan_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn schema_bootstrap_is_idempotent(pool: PgPool) {
    ensure_schema(&pool).await.unwrap();
    ensure_schema(&pool).await.unwrap();
}

#[sqlx::test(migrations = false)]
async fn product_roundtrip(pool: PgPool) {
    let store = store(pool).await;

    let id = Repository::<Product>::create(&store, &widget()).await.unwrap();
    let rows = Repository::<Product>::list(&store).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, id);
    assert_eq!(rows[0].price, Decimal::new(999, 2));

    let mut changed = widget();
    changed.stock = 7;
    assert_eq!(Repository::<Product>::update(&store, id, &changed).await.unwrap(), 1);
    let rows = Repository::<Product>::list(&store).await.unwrap();
    assert_eq!(rows[0].stock, 7);

    assert_eq!(Repository::<Product>::delete(&store, id).await.unwrap(), 1);
    assert!(Repository::<Product>::list(&store).await.unwrap().is_empty());
}

#[sqlx::test(migrations = false)]
async fn missing_identity_affects_no_rows(pool: PgPool) {
    let store = store(pool).await;
    assert_eq!(Repository::<Client>::update(&store, 999, &jane()).await.unwrap(), 0);
    assert_eq!(Repository::<Client>::delete(&store, 999).await.unwrap(), 0);
}

#[sqlx::test(migrations = false)]
async fn purchase_list_joins_supplier_and_product(pool: PgPool) {
    let store = store(pool).await;
    // Offset supplier ids from product ids so a swapped join would show.
    for name in ["Filler 1", "Filler 2"] {
        let filler = SupplierFields { name: name.to_string(), ..acme() };
        Repository::<Supplier>::create(&store, &filler).await.unwrap();
    }
    let supplier_id = Repository::<Supplier>::create(&store, &acme()).await.unwrap();
    let product_id = Repository::<Product>::create(&store, &widget()).await.unwrap();
    assert_ne!(supplier_id, product_id);

    Repository::<Purchase>::create(
        &store,
        &PurchaseFields {
            supplier_id,
            product_id,
            quantity: 5,
            total_price: Decimal::new(4995, 2),
            purchase_date: jan_first(),
        },
    )
    .await
    .unwrap();

    let rows = Repository::<Purchase>::list(&store).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].supplier_id, supplier_id);
    assert_eq!(rows[0].supplier_name, "Acme");
    assert_eq!(rows[0].product_id, product_id);
    assert_eq!(rows[0].product_name, "Widget");
    assert_eq!(rows[0].purchase_date, jan_first());
}

#[sqlx::test(migrations = false)]
async fn sale_list_joins_client_and_product(pool: PgPool) {
    let store = store(pool).await;
    let client_id = Repository::<Client>::create(&store, &jane()).await.unwrap();
    let product_id = Repository::<Product>::create(&store, &widget()).await.unwrap();

    Repository::<Sale>::create(
        &store,
        &SaleFields {
            client_id,
            product_id,
            quantity: 2,
            total_price: Decimal::new(1998, 2),
            sale_date: jan_first(),
        },
    )
    .await
    .unwrap();

    let rows = Repository::<Sale>::list(&store).await.unwrap();
    assert_eq!(rows[0].client_name, "Jane");
    assert_eq!(rows[0].product_name, "Widget");
}

#[sqlx::test(migrations = false)]
async fn foreign_key_violation_is_a_database_error(pool: PgPool) {
    let store = store(pool).await;
    let product_id = Repository::<Product>::create(&store, &widget()).await.unwrap();

    let err = Repository::<Purchase>::create(
        &store,
        &PurchaseFields {
            supplier_id: 424242,
            product_id,
            quantity: 1,
            total_price: Decimal::ONE,
            purchase_date: jan_first(),
        },
    )
    .await
    .unwrap_err();

    assert_matches!(err, StoreError::Database(sqlx::Error::Database(db_err))
        if db_err.code().as_deref() == Some("23503"));
}

#[sqlx::test(migrations = false)]
async fn money_columns_round_to_cents_and_reject_overflow(pool: PgPool) {
    let store = store(pool).await;
    let cents = ProductFields { price: Decimal::new(9999, 3), ..widget() };
    Repository::<Product>::create(&store, &cents).await.unwrap();
    assert_eq!(Repository::<Product>::list(&store).await.unwrap()[0].price, Decimal::new(1000, 2));

    let yacht = ProductFields { price: Decimal::new(1_000_000_000, 0), ..widget() };
    assert_matches!(
        Repository::<Product>::create(&store, &yacht).await,
        Err(StoreError::Database(sqlx::Error::Database(e))) if e.code().as_deref() == Some("22003")
    );
}

#[sqlx::test(migrations = false)]
async fn repositories_work_on_a_single_connection(pool: PgPool) {
    ensure_schema(&pool).await.unwrap();
    let mut conn = pool.acquire().await.unwrap();

    let id = ProductRepo::create(&mut conn, &widget()).await.unwrap();
    assert_eq!(ProductRepo::list(&mut conn).await.unwrap()[0].id, id);
    assert!(PurchaseRepo::list(&mut conn).await.unwrap().is_empty());
}

#[sqlx::test(migrations = false)]
async fn health_check_passes(pool: PgPool) {
    let store = PgStore::new(pool);
    store.health_check().await.unwrap();
}
