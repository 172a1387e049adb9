//! Authentication and authorization checks that resolve before any query.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get, get_auth, json_request, multipart_request, post_json, Part};
use folio_core::roles::Role;
use serde_json::json;

// ---------------------------------------------------------------------------
// Bearer token extraction
// ---------------------------------------------------------------------------

#[tokio::test]
async fn me_without_token_is_401() {
    let test = common::build_test_app(common::unreachable_pool());
    let response = get(test.app(), "/api/auth/me").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "UNAUTHORIZED");
    assert_eq!(json["message"], "Not authorized to access this route");
}

#[tokio::test]
async fn me_with_garbage_token_is_401() {
    let test = common::build_test_app(common::unreachable_pool());
    let response = get_auth(test.app(), "/api/auth/me", "not.a.jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid or expired token");
}

#[tokio::test]
async fn token_signed_with_other_secret_is_401() {
    let test = common::build_test_app(common::unreachable_pool());
    let mut other = common::test_config().jwt;
    other.secret = "a-completely-different-signing-secret".into();
    let forged = folio_api::auth::jwt::generate_access_token(1, Role::Admin, &other).unwrap();

    let response = get_auth(test.app(), "/api/auth/users", &forged).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Protected writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn settings_update_requires_token() {
    let test = common::build_test_app(common::unreachable_pool());
    let response = json_request(
        test.app(),
        Method::PUT,
        "/api/settings",
        json!({ "siteTitle": "Folio" }),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn content_write_requires_token() {
    let test = common::build_test_app(common::unreachable_pool());
    let response = multipart_request(
        test.app(),
        Method::POST,
        "/api/content/hero",
        &[Part::Text("title", "Hello")],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_without_password_is_400() {
    let test = common::build_test_app(common::unreachable_pool());
    let response = post_json(
        test.app(),
        "/api/auth/login",
        json!({ "email": "someone@akdesign.space" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Please provide an email and password");
}

#[tokio::test]
async fn register_with_short_password_is_400() {
    let test = common::build_test_app(common::unreachable_pool());
    let response = post_json(
        test.app(),
        "/api/auth/register",
        json!({ "name": "Ada", "email": "ada@akdesign.space", "password": "123" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn register_with_invalid_email_is_400() {
    let test = common::build_test_app(common::unreachable_pool());
    let response = post_json(
        test.app(),
        "/api/auth/register",
        json!({ "name": "Ada", "email": "not-an-email", "password": "secret123" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Please add a valid email");
}

#[tokio::test]
async fn contact_with_missing_fields_is_400() {
    let test = common::build_test_app(common::unreachable_pool());
    let response = post_json(
        test.app(),
        "/api/contact",
        json!({ "name": "Ada", "email": "ada@akdesign.space" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(test.mailer.sent.lock().unwrap().is_empty());
}
