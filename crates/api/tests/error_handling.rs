//! Status codes and JSON shapes produced by [`AppError`].

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use bizdesk_api::error::AppError;
use bizdesk_core::error::CoreError;
use bizdesk_db::StoreError;
use http_body_util::BodyExt;

async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn validation_error_is_400() {
    let (status, json) = render(AppError::Core(CoreError::Validation(
        "Name is required".into(),
    )))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Name is required");
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unauthorized_is_401() {
    let (status, json) =
        render(CoreError::Unauthorized("Invalid or expired token".into()).into()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn storage_error_hides_its_source() {
    let err = AppError::storage(
        "Failed to add purchase",
        StoreError::MissingReference {
            entity: "Supplier",
            id: 42,
        },
    );
    assert_matches!(
        &err,
        AppError::Storage {
            source: StoreError::MissingReference { id: 42, .. },
            ..
        }
    );

    let (status, json) = render(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Failed to add purchase");
    assert_eq!(json["code"], "STORAGE_ERROR");
    assert_eq!(json.as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn bad_request_is_400() {
    let (status, json) = render(AppError::BadRequest("Invalid path: nope".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
}
