pub mod health;
pub mod resource;

use axum::Router;
use bizdesk_db::models::{Client, Product, Purchase, Sale, Supplier};

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /clients              list, create
/// /clients/{id}         update, delete
///
/// /suppliers            list, create
/// /suppliers/{id}       update, delete
///
/// /products             list, create
/// /products/{id}        update, delete
///
/// /purchases            list (with supplier_name, product_name), create
/// /purchases/{id}       update, delete
///
/// /sales                list (with client_name, product_name), create
/// /sales/{id}           update, delete
/// ```
///
/// Every route requires a bearer token; the auth layer is applied in
/// [`crate::router::build_app_router`].
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/clients", resource::router::<Client>())
        .nest("/suppliers", resource::router::<Supplier>())
        .nest("/products", resource::router::<Product>())
        .nest("/purchases", resource::router::<Purchase>())
        .nest("/sales", resource::router::<Sale>())
}
