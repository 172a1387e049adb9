//! Tests for `AppError` -> HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no server needed.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use folio_api::error::AppError;
use folio_core::error::CoreError;
use folio_core::media::Slot;
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let (status, json) = error_to_response(CoreError::not_found("Testimonial", 42).into()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "NOT_FOUND");
    assert_eq!(json["message"], "Testimonial not found");
}

#[tokio::test]
async fn missing_media_returns_400() {
    let (status, json) =
        error_to_response(CoreError::MissingRequiredMedia(Slot::Primary).into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "MISSING_REQUIRED_MEDIA");
}

#[tokio::test]
async fn invalid_media_type_returns_400() {
    let (status, json) =
        error_to_response(CoreError::InvalidMediaType("not an image".into()).into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "INVALID_MEDIA_TYPE");
    assert_eq!(json["message"], "not an image");
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let (status, json) = error_to_response(AppError::BadRequest("invalid field".into())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "BAD_REQUEST");
    assert_eq!(json["message"], "invalid field");
}

#[tokio::test]
async fn conflict_error_returns_409() {
    let (status, json) = error_to_response(CoreError::Conflict("duplicate slug".into()).into()).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "CONFLICT");
}

#[tokio::test]
async fn auth_errors_map_to_401_and_403() {
    let (status, json) = error_to_response(CoreError::Unauthorized("no token".into()).into()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "UNAUTHORIZED");

    let (status, json) = error_to_response(CoreError::Forbidden("admins only".into()).into()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"], "FORBIDDEN");
}

#[tokio::test]
async fn upload_and_persist_failures_hide_details() {
    let (status, json) = error_to_response(
        CoreError::MediaUploadFailed("image: cloudinary said 401 bad key abc".into()).into(),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "MEDIA_UPLOAD_FAILED");
    assert!(!json["message"].as_str().unwrap().contains("abc"));

    let (status, json) =
        error_to_response(CoreError::RecordPersistFailed("connection reset".into()).into()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "RECORD_PERSIST_FAILED");
    assert!(!json["message"].as_str().unwrap().contains("connection"));
}

#[tokio::test]
async fn internal_errors_are_sanitized() {
    let (status, json) =
        error_to_response(AppError::InternalError("secret stack trace".into())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "INTERNAL_ERROR");
    assert_eq!(json["message"], "An internal error occurred");
}

#[tokio::test]
async fn delivery_errors_keep_their_message() {
    let (status, json) =
        error_to_response(AppError::Delivery("Email could not be sent".into())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["message"], "Email could not be sent");
}

#[tokio::test]
async fn row_not_found_maps_to_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "NOT_FOUND");
}

#[tokio::test]
async fn validator_errors_become_validation_errors() {
    use validator::Validate;

    #[derive(Validate)]
    struct Input {
        #[validate(email(message = "Please add a valid email"))]
        email: String,
    }

    let errors = Input {
        email: "nope".into(),
    }
    .validate()
    .unwrap_err();

    let (status, json) = error_to_response(errors.into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "Please add a valid email");
}
