use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{test_email, test_password, TestContext};

async fn request_reset(ctx: &TestContext, username: &str) -> String {
    ctx.server
        .post("/api/auth/forgot-password")
        .json(&json!({ "email": test_email(username) }))
        .await
        .assert_status_ok();

    ctx.mailer.last_reset_token().await.expect("reset token mailed")
}

#[tokio::test]
async fn reset_password_with_valid_token_changes_password() {
    let ctx = TestContext::new();
    ctx.register_as("ana", "user").await;
    let token = request_reset(&ctx, "ana").await;

    let response = ctx
        .server
        .post("/api/auth/reset-password")
        .json(&json!({ "resetToken": token, "newPassword": "brand-new-pass" }))
        .await;

    response.assert_status_ok();

    ctx.login(&test_email("ana"), "brand-new-pass").await;

    ctx.server
        .post("/api/auth/login")
        .json(&json!({ "email": test_email("ana"), "password": test_password() }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn reset_token_works_only_once() {
    let ctx = TestContext::new();
    ctx.register_as("ana", "user").await;
    let token = request_reset(&ctx, "ana").await;

    ctx.server
        .post("/api/auth/reset-password")
        .json(&json!({ "resetToken": token, "newPassword": "first-reset" }))
        .await
        .assert_status_ok();

    let reuse = ctx
        .server
        .post("/api/auth/reset-password")
        .json(&json!({ "resetToken": token, "newPassword": "second-reset" }))
        .await;

    reuse.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = reuse.json();
    assert_eq!(body["message"], "Invalid or expired reset token");

    let user = ctx.store.user_by_email(&test_email("ana")).await.unwrap();
    assert!(user.reset_password_token_hash.is_none());
    assert!(user.reset_password_expires_at.is_none());
}

#[tokio::test]
async fn expired_reset_token_is_rejected() {
    let ctx = TestContext::new();
    ctx.register_as("ana", "user").await;
    let token = request_reset(&ctx, "ana").await;

    ctx.store.expire_reset_tokens().await;

    let response = ctx
        .server
        .post("/api/auth/reset-password")
        .json(&json!({ "resetToken": token, "newPassword": "too-late-pass" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Invalid or expired reset token");
}

#[tokio::test]
async fn new_request_replaces_previous_token() {
    let ctx = TestContext::new();
    ctx.register_as("ana", "user").await;
    let first = request_reset(&ctx, "ana").await;
    let second = request_reset(&ctx, "ana").await;
    assert_ne!(first, second);

    ctx.server
        .post("/api/auth/reset-password")
        .json(&json!({ "resetToken": first, "newPassword": "whatever1" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .post("/api/auth/reset-password")
        .json(&json!({ "resetToken": second, "newPassword": "whatever1" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn reset_password_enforces_minimum_length() {
    let ctx = TestContext::new();
    ctx.register_as("ana", "user").await;
    let token = request_reset(&ctx, "ana").await;

    let response = ctx
        .server
        .post("/api/auth/reset-password")
        .json(&json!({ "resetToken": token, "newPassword": "123" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Password must be at least 6 characters long");
}

#[tokio::test]
async fn reset_password_requires_both_fields() {
    let ctx = TestContext::new();

    ctx.server
        .post("/api/auth/reset-password")
        .json(&json!({ "resetToken": "abc" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reset_password_counts_characters_not_bytes() {
    let ctx = TestContext::new();
    ctx.register_as("ana", "user").await;
    let token = request_reset(&ctx, "ana").await;

    let response = ctx
        .server
        .post("/api/auth/reset-password")
        .json(&json!({ "resetToken": token, "newPassword": "ééé" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "Password must be at least 6 characters long");
}
