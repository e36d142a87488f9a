use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::{event_body, TestContext};

#[tokio::test]
async fn creator_creates_event_owned_by_them() {
    let ctx = TestContext::new();
    let cara = ctx.user("cara", "creator").await;

    let response = ctx
        .server
        .post("/api/event/events")
        .authorization_bearer(&cara.token)
        .json(&event_body("Jazz Night"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["event"]["creator"], cara.id.as_str());
    assert_eq!(body["event"]["date"], "2030-06-01T19:00:00Z");
}

#[tokio::test]
async fn plain_user_cannot_create_event() {
    let ctx = TestContext::new();
    let ana = ctx.user("ana", "user").await;

    let response = ctx
        .server
        .post("/api/event/events")
        .authorization_bearer(&ana.token)
        .json(&event_body("Sneaky"))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(ctx.store.event_count().await, 0);
}

#[tokio::test]
async fn admin_cannot_create_event() {
    let ctx = TestContext::new();
    let root = ctx.user("root", "admin").await;

    ctx.server
        .post("/api/event/events")
        .authorization_bearer(&root.token)
        .json(&event_body("Admin Party"))
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn create_event_without_token_is_unauthorized() {
    let ctx = TestContext::new();

    ctx.server
        .post("/api/event/events")
        .json(&event_body("Anonymous"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_event_validates_fields() {
    let ctx = TestContext::new();
    let cara = ctx.user("cara", "creator").await;

    let mut body = event_body("Broken");
    body["availableSeats"] = json!(-5);
    body.as_object_mut().unwrap().remove("location");

    let response = ctx
        .server
        .post("/api/event/events")
        .authorization_bearer(&cara.token)
        .json(&body)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["errors"],
        json!(["Available seats cannot be negative", "Location is required"])
    );
}

#[tokio::test]
async fn my_events_lists_only_own_events() {
    let ctx = TestContext::new();
    let cara = ctx.user("cara", "creator").await;
    let dan = ctx.user("dan", "creator").await;
    ctx.create_event(&cara, "Cara's").await;
    ctx.create_event(&dan, "Dan's").await;

    let response = ctx
        .server
        .get("/api/event/my-events")
        .authorization_bearer(&cara.token)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let events = body["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Cara's");
}

#[tokio::test]
async fn update_with_only_title_keeps_other_fields() {
    let ctx = TestContext::new();
    let cara = ctx.user("cara", "creator").await;
    let event_id = ctx.create_event(&cara, "Jazz Night").await;

    let before: Value = ctx
        .server
        .get(&format!("/api/event/events/{event_id}"))
        .await
        .json();

    let response = ctx
        .server
        .put(&format!("/api/event/events/{event_id}"))
        .authorization_bearer(&cara.token)
        .json(&json!({ "title": "Late Jazz" }))
        .await;

    response.assert_status_ok();
    let after: Value = response.json();

    assert_eq!(after["event"]["title"], "Late Jazz");
    for field in ["description", "category", "date", "location", "availableSeats", "creator"] {
        assert_eq!(after["event"][field], before["event"][field], "{field} changed");
    }
}

#[tokio::test]
async fn creator_cannot_update_someone_elses_event() {
    let ctx = TestContext::new();
    let cara = ctx.user("cara", "creator").await;
    let dan = ctx.user("dan", "creator").await;
    let event_id = ctx.create_event(&cara, "Jazz Night").await;

    let response = ctx
        .server
        .put(&format!("/api/event/events/{event_id}"))
        .authorization_bearer(&dan.token)
        .json(&json!({ "title": "Hijacked" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn update_of_missing_event_is_not_found() {
    let ctx = TestContext::new();
    let cara = ctx.user("cara", "creator").await;

    ctx.server
        .put("/api/event/events/nope")
        .authorization_bearer(&cara.token)
        .json(&json!({ "title": "Ghost" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn owner_deletes_event() {
    let ctx = TestContext::new();
    let cara = ctx.user("cara", "creator").await;
    let event_id = ctx.create_event(&cara, "Jazz Night").await;

    let response = ctx
        .server
        .delete(&format!("/api/event/events/{event_id}"))
        .authorization_bearer(&cara.token)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "Event deleted successfully");

    ctx.server
        .get(&format!("/api/event/events/{event_id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_deletes_any_event() {
    let ctx = TestContext::new();
    let cara = ctx.user("cara", "creator").await;
    let root = ctx.user("root", "admin").await;
    let event_id = ctx.create_event(&cara, "Jazz Night").await;

    ctx.server
        .delete(&format!("/api/event/events/{event_id}"))
        .authorization_bearer(&root.token)
        .await
        .assert_status_ok();

    assert_eq!(ctx.store.event_count().await, 0);
}

#[tokio::test]
async fn other_creator_cannot_delete_event() {
    let ctx = TestContext::new();
    let cara = ctx.user("cara", "creator").await;
    let dan = ctx.user("dan", "creator").await;
    let event_id = ctx.create_event(&cara, "Jazz Night").await;

    ctx.server
        .delete(&format!("/api/event/events/{event_id}"))
        .authorization_bearer(&dan.token)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    assert_eq!(ctx.store.event_count().await, 1);
}

#[tokio::test]
async fn plain_user_cannot_delete_event() {
    let ctx = TestContext::new();
    let cara = ctx.user("cara", "creator").await;
    let ana = ctx.user("ana", "user").await;
    let event_id = ctx.create_event(&cara, "Jazz Night").await;

    ctx.server
        .delete(&format!("/api/event/events/{event_id}"))
        .authorization_bearer(&ana.token)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn create_event_accepts_date_without_time() {
    let ctx = TestContext::new();
    let cara = ctx.user("cara", "creator").await;

    let mut body = event_body("Picnic");
    body["date"] = json!("2030-06-01");

    let response = ctx
        .server
        .post("/api/event/events")
        .authorization_bearer(&cara.token)
        .json(&body)
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["event"]["date"], "2030-06-01T00:00:00Z");
}

#[tokio::test]
async fn create_event_with_mistyped_seats_is_bad_request() {
    let ctx = TestContext::new();
    let cara = ctx.user("cara", "creator").await;

    let mut body = event_body("Typo");
    body["availableSeats"] = json!("ten");

    let response = ctx
        .server
        .post("/api/event/events")
        .authorization_bearer(&cara.token)
        .json(&body)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("availableSeats"));
    assert_eq!(ctx.store.event_count().await, 0);
}
