//! Handlers shared by every `/api/{collection}` resource.
//!
//! Each handler is generic over the [`Resource`] it serves; the router
//! instantiates them once per entity. Validation runs before the store is
//! touched, so a 400 never checks out a connection.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bizdesk_core::types::DbId;
use bizdesk_db::models::Resource;
use bizdesk_db::{Repository, Store};

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathParam};
use crate::response::{CreatedResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/{collection}
pub async fn list<R: Resource>(State(state): State<AppState>) -> AppResult<Json<Vec<R>>>
where
    dyn Store: Repository<R>,
{
    let rows = Repository::<R>::list(state.store.as_ref())
        .await
        .map_err(|e| AppError::storage(format!("Failed to fetch {}", R::COLLECTION), e))?;
    Ok(Json(rows))
}

/// POST /api/{collection}
pub async fn create<R: Resource>(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<R::Input>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)>
where
    dyn Store: Repository<R>,
{
    let fields = R::validate(input)?;
    let id = Repository::<R>::create(state.store.as_ref(), &fields)
        .await
        .map_err(|e| AppError::storage(format!("Failed to add {}", R::NOUN), e))?;

    tracing::info!(entity = R::NOUN, id, "Row created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: format!("{} added successfully", R::LABEL),
            id,
        }),
    ))
}

/// PUT /api/{collection}/{id}
///
/// A full replacement: every required field must be present. An id with no
/// row is not an error; nothing changes and the reply is still 200.
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
    JsonBody(input): JsonBody<R::Input>,
) -> AppResult<Json<MessageResponse>>
where
    dyn Store: Repository<R>,
{
    let fields = R::validate(input)?;
    let affected = Repository::<R>::update(state.store.as_ref(), id, &fields)
        .await
        .map_err(|e| AppError::storage(format!("Failed to update {}", R::NOUN), e))?;

    tracing::info!(entity = R::NOUN, id, affected, "Row updated");

    Ok(Json(MessageResponse {
        message: format!("{} updated successfully", R::LABEL),
    }))
}

/// DELETE /api/{collection}/{id}
pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<MessageResponse>>
where
    dyn Store: Repository<R>,
{
    let affected = Repository::<R>::delete(state.store.as_ref(), id)
        .await
        .map_err(|e| AppError::storage(format!("Failed to delete {}", R::NOUN), e))?;

    tracing::info!(entity = R::NOUN, id, affected, "Row deleted");

    Ok(Json(MessageResponse {
        message: format!("{} deleted successfully", R::LABEL),
    }))
}
