use axum::http::StatusCode;
use serde_json::{json, Value};

use tripnest::testing::{test_config, FailingMailer};

use crate::common::{test_email, TestContext};

#[tokio::test]
async fn forgot_password_emails_token_and_link() {
    let ctx = TestContext::new();
    ctx.register_as("ana", "user").await;

    let response = ctx
        .server
        .post("/api/auth/forgot-password")
        .json(&json!({ "email": test_email("ana") }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Password reset email sent");

    let sent = ctx.mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, test_email("ana"));

    let token = ctx.mailer.last_reset_token().await.unwrap();
    assert_eq!(token.len(), 64);
    assert!(sent[0]
        .text
        .contains(&format!("http://tripnest.test/reset-password?token={token}")));
}

#[tokio::test]
async fn forgot_password_stores_only_the_digest() {
    let ctx = TestContext::new();
    ctx.register_as("ana", "user").await;

    ctx.server
        .post("/api/auth/forgot-password")
        .json(&json!({ "email": test_email("ana") }))
        .await
        .assert_status_ok();

    let token = ctx.mailer.last_reset_token().await.unwrap();
    let user = ctx.store.user_by_email(&test_email("ana")).await.unwrap();

    let stored = user.reset_password_token_hash.unwrap();
    assert_ne!(stored, token);
    assert_eq!(stored, tripnest::services::reset_token::hash_reset_token(&token));
    assert!(user.reset_password_expires_at.is_some());
}

#[tokio::test]
async fn forgot_password_for_unknown_email_returns_not_found() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/auth/forgot-password")
        .json(&json!({ "email": "ghost@example.com" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "User not found");
    assert!(ctx.mailer.sent().await.is_empty());
}

#[tokio::test]
async fn forgot_password_without_email_returns_bad_request() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/auth/forgot-password")
        .json(&json!({}))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn mail_failure_hides_detail_outside_development() {
    let ctx = TestContext::with(test_config(), Box::new(FailingMailer));
    ctx.register_as("ana", "user").await;

    let response = ctx
        .server
        .post("/api/auth/forgot-password")
        .json(&json!({ "email": test_email("ana") }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Error sending password reset email");
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn mail_failure_exposes_detail_in_development() {
    let mut config = test_config();
    config.app_env = tripnest::config::environment::AppEnv::Development;
    let ctx = TestContext::with(config, Box::new(FailingMailer));
    ctx.register_as("ana", "user").await;

    let response = ctx
        .server
        .post("/api/auth/forgot-password")
        .json(&json!({ "email": test_email("ana") }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["message"], "Error sending password reset email");
    assert!(body["error"].as_str().unwrap().contains("503"));
}
