//! Integration tests for error response shape and status mapping.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{body_json, get, post_json, post_raw};
use dressup_api::error::AppError;
use dressup_core::error::CoreError;
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: every core error maps to its status and code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn core_errors_map_to_status_and_code() {
    let cases = [
        (
            CoreError::InvalidCategory("hats".into()),
            StatusCode::BAD_REQUEST,
            "INVALID_CATEGORY",
        ),
        (
            CoreError::MalformedPayload("bad".into()),
            StatusCode::BAD_REQUEST,
            "MALFORMED_PAYLOAD",
        ),
        (
            CoreError::UnknownItem("nope".into()),
            StatusCode::NOT_FOUND,
            "UNKNOWN_ITEM",
        ),
        (
            CoreError::NotFound {
                entity: "Session",
                id: "x".into(),
            },
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
        ),
        (
            CoreError::VariantMismatch {
                item_id: "ken-top1".into(),
                item_variant: "ken".into(),
                avatar_variant: "barbie".into(),
            },
            StatusCode::CONFLICT,
            "VARIANT_MISMATCH",
        ),
        (
            CoreError::Conflict("full".into()),
            StatusCode::CONFLICT,
            "CONFLICT",
        ),
        (
            CoreError::Validation("bad state".into()),
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
        ),
    ];

    for (err, status, code) in cases {
        let response = AppError::Core(err).into_response();
        assert_eq!(response.status(), status);
        let json = body_json(response).await;
        assert_eq!(json["code"], code);
        assert!(json["error"].is_string());
    }
}

// ---------------------------------------------------------------------------
// Test: internal errors are sanitized
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_hides_details() {
    let response = AppError::Core(CoreError::Internal("disk on fire".into())).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Test: CoreError converts into AppError via From
// ---------------------------------------------------------------------------

#[test]
fn core_error_converts_into_app_error() {
    let err: AppError = CoreError::UnknownItem("x".into()).into();
    assert_matches!(err, AppError::Core(CoreError::UnknownItem(id)) if id == "x");
}

// ---------------------------------------------------------------------------
// Test: malformed session id in path is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_session_id_returns_400() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/sessions/not-a-uuid").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: unknown session id returns NOT_FOUND envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_session_returns_not_found_envelope() {
    let app = common::build_test_app();
    let uri = format!("/api/v1/sessions/{}", uuid::Uuid::new_v4());
    let response = get(app, &uri).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: mutating an unknown session returns NOT_FOUND
// ---------------------------------------------------------------------------

#[tokio::test]
async fn apply_to_unknown_session_returns_not_found() {
    let app = common::build_test_app();
    let uri = format!("/api/v1/sessions/{}/items", uuid::Uuid::new_v4());
    let response = post_json(app.clone(), &uri, json!({ "item_id": "hair1" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let uri = format!("/api/v1/sessions/{}/drop", uuid::Uuid::new_v4());
    let response = post_raw(app, &uri, r#"{"id":"hair1"}"#).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: apply body missing item_id is a client error
// ---------------------------------------------------------------------------

#[tokio::test]
async fn apply_without_item_id_is_client_error() {
    let app = common::build_test_app();
    let id = common::create_session(app.clone(), None).await;

    let response = post_json(
        app,
        &format!("/api/v1/sessions/{id}/items"),
        json!({ "name": "hair1" }),
    )
    .await;

    assert!(response.status().is_client_error());
}
