use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{test_email, test_password, TestContext};

#[tokio::test]
async fn change_password_with_correct_current_password() {
    let ctx = TestContext::new();
    let ana = ctx.user("ana", "user").await;

    let response = ctx
        .server
        .put("/api/user/change-password")
        .authorization_bearer(&ana.token)
        .json(&json!({ "currentPassword": test_password(), "newPassword": "changed-pass" }))
        .await;

    response.assert_status_ok();
    ctx.login(&test_email("ana"), "changed-pass").await;
}

#[tokio::test]
async fn change_password_with_wrong_current_password_is_unauthorized() {
    let ctx = TestContext::new();
    let ana = ctx.user("ana", "user").await;

    let response = ctx
        .server
        .put("/api/user/change-password")
        .authorization_bearer(&ana.token)
        .json(&json!({ "currentPassword": "guess-again", "newPassword": "changed-pass" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Current password is incorrect");

    ctx.login(&test_email("ana"), test_password()).await;
}

#[tokio::test]
async fn change_password_rejects_short_new_password() {
    let ctx = TestContext::new();
    let ana = ctx.user("ana", "user").await;

    ctx.server
        .put("/api/user/change-password")
        .authorization_bearer(&ana.token)
        .json(&json!({ "currentPassword": test_password(), "newPassword": "abc" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn change_password_counts_characters_not_bytes() {
    let ctx = TestContext::new();
    let ana = ctx.user("ana", "user").await;

    ctx.server
        .put("/api/user/change-password")
        .authorization_bearer(&ana.token)
        .json(&json!({ "currentPassword": test_password(), "newPassword": "ééé" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .put("/api/user/change-password")
        .authorization_bearer(&ana.token)
        .json(&json!({ "currentPassword": test_password(), "newPassword": "éééééé" }))
        .await
        .assert_status_ok();
}
