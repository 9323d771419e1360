//! Bearer-token enforcement on the `/api` routes.

mod common;

use axum::http::StatusCode;
use bizdesk_api::auth::jwt::{generate_access_token, JwtConfig};
use common::{body_json, get_with_auth};

#[tokio::test]
async fn missing_header_is_rejected_before_the_store() {
    let (app, store) = common::fresh_app();
    let response = get_with_auth(app, "/api/clients", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Missing Authorization header");
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(store.pool_stats().checkouts, 0);
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() {
    let (app, store) = common::fresh_app();
    let response = get_with_auth(app, "/api/products", Some("Basic dXNlcjpwYXNz")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["error"],
        "Invalid Authorization format. Expected: Bearer <token>"
    );
    assert_eq!(store.pool_stats().checkouts, 0);
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let (app, store) = common::fresh_app();
    let foreign = JwtConfig {
        secret: "some-other-secret".to_string(),
        access_token_expiry_mins: 15,
    };
    let token = generate_access_token(1, &foreign).unwrap();

    let response = get_with_auth(app, "/api/sales", Some(&format!("Bearer {token}"))).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid or expired token");
    assert_eq!(store.pool_stats().checkouts, 0);
}

#[tokio::test]
async fn valid_token_reaches_the_handler() {
    let (app, store) = common::fresh_app();
    let bearer = format!("Bearer {}", common::token());

    let response = get_with_auth(app, "/api/suppliers", Some(&bearer)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!([]));
    assert_eq!(store.pool_stats().checkouts, 1);
}

#[tokio::test]
async fn public_probes_need_no_token() {
    let (app, _store) = common::fresh_app();
    let response = get_with_auth(app.clone(), "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_with_auth(app, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
