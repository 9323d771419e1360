//! Route definitions shared by the five entity collections.

use axum::routing::{get, put};
use axum::Router;
use bizdesk_db::models::Resource;
use bizdesk_db::{Repository, Store};

use crate::handlers::resource;
use crate::state::AppState;

/// Routes mounted at `/{R::COLLECTION}`.
///
/// ```text
/// GET    /         -> list
/// POST   /         -> create
/// PUT    /{id}     -> update
/// DELETE /{id}     -> delete
/// ```
pub fn router<R: Resource>() -> Router<AppState>
where
    dyn Store: Repository<R>,
{
    Router::new()
        .route("/", get(resource::list::<R>).post(resource::create::<R>))
        .route(
            "/{id}",
            put(resource::update::<R>).delete(resource::delete::<R>),
        )
}
