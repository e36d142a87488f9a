use axum::http::StatusCode;
use serde_json::Value;

use crate::common::TestContext;

#[tokio::test]
async fn admin_lists_all_users() {
    let ctx = TestContext::new();
    ctx.register_as("ana", "user").await;
    ctx.register_as("cara", "creator").await;
    let root = ctx.user("root", "admin").await;

    let response = ctx.server.get("/api/user").authorization_bearer(&root.token).await;

    response.assert_status_ok();
    let body: Value = response.json();
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 3);
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
}

#[tokio::test]
async fn non_admin_cannot_list_users() {
    let ctx = TestContext::new();
    let cara = ctx.user("cara", "creator").await;

    let response = ctx.server.get("/api/user").authorization_bearer(&cara.token).await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["message"], "Access denied. Insufficient permissions.");
}

#[tokio::test]
async fn admin_deletes_user_and_their_token_stops_working() {
    let ctx = TestContext::new();
    let ana = ctx.user("ana", "user").await;
    let root = ctx.user("root", "admin").await;

    ctx.server
        .delete(&format!("/api/user/{}", ana.id))
        .authorization_bearer(&root.token)
        .await
        .assert_status_ok();

    ctx.server
        .get("/api/user/profile")
        .authorization_bearer(&ana.token)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_delete_of_missing_user_is_not_found() {
    let ctx = TestContext::new();
    let root = ctx.user("root", "admin").await;

    ctx.server
        .delete("/api/user/no-such-id")
        .authorization_bearer(&root.token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_admin_cannot_delete_users() {
    let ctx = TestContext::new();
    let ana = ctx.user("ana", "user").await;
    let bo = ctx.user("bo", "user").await;

    ctx.server
        .delete(&format!("/api/user/{}", ana.id))
        .authorization_bearer(&bo.token)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn user_list_answers_with_trailing_slash() {
    let ctx = TestContext::new();
    let ana = ctx.user("ana", "user").await;
    let root = ctx.user("root", "admin").await;

    let response = ctx.server.get("/api/user/").authorization_bearer(&root.token).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["users"].as_array().unwrap().len(), 2);

    ctx.server
        .get("/api/user/")
        .authorization_bearer(&ana.token)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    ctx.server
        .get("/api/user/")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
