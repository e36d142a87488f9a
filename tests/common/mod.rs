use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;

use tripnest::config::Config;
use tripnest::services::mailer::Mailer;
use tripnest::testing::{test_config, test_state, MemoryStore, RecordingMailer};

// Allow dead_code for utilities used by other test files
#[allow(dead_code)]
pub struct TestContext {
    pub server: TestServer,
    pub store: Arc<MemoryStore>,
    pub mailer: RecordingMailer,
}

/// A registered account and its session token.
#[allow(dead_code)]
pub struct TestUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub token: String,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let mailer = RecordingMailer::default();
        Self::build(test_config(), Box::new(mailer.clone()), mailer)
    }

    /// Caller-supplied config and mailer; `self.mailer` then records nothing.
    pub fn with(config: Config, mailer: Box<dyn Mailer>) -> Self {
        Self::build(config, mailer, RecordingMailer::default())
    }

    fn build(config: Config, mailer: Box<dyn Mailer>, recorder: RecordingMailer) -> Self {
        let store = MemoryStore::new();
        let state = test_state(store.clone(), mailer, config);
        let app = tripnest::create_app(state);
        let server = TestServer::new(app).expect("Failed to create test server");

        Self {
            server,
            store,
            mailer: recorder,
        }
    }

    pub async fn register_as(&self, username: &str, role: &str) -> Value {
        let response = self
            .server
            .post("/api/auth/register")
            .json(&registration(username, role))
            .await;

        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .server
            .post("/api/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        body["token"].as_str().expect("token in login response").to_string()
    }

    /// Registers `username` with `role` and logs in.
    pub async fn user(&self, username: &str, role: &str) -> TestUser {
        let body = self.register_as(username, role).await;
        let email = test_email(username);
        let token = self.login(&email, test_password()).await;

        TestUser {
            id: body["user"]["id"].as_str().expect("user id").to_string(),
            username: username.to_string(),
            email,
            token,
        }
    }

    pub async fn create_event(&self, creator: &TestUser, title: &str) -> String {
        let response = self
            .server
            .post("/api/event/events")
            .authorization_bearer(&creator.token)
            .json(&event_body(title))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        body["event"]["id"].as_str().expect("event id").to_string()
    }

    pub async fn book(&self, user: &TestUser, event_id: &str, seats: i32) -> String {
        let response = self
            .server
            .post("/api/booking")
            .authorization_bearer(&user.token)
            .json(&json!({ "eventId": event_id, "seatsBooked": seats }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        body["booking"]["id"].as_str().expect("booking id").to_string()
    }
}

#[allow(dead_code)]
pub fn test_email(username: &str) -> String {
    format!("{username}@example.com")
}

#[allow(dead_code)]
pub fn test_password() -> &'static str {
    "secret123"
}

#[allow(dead_code)]
pub fn test_phone(username: &str) -> String {
    format!("+1-555-{username}")
}

#[allow(dead_code)]
pub fn registration(username: &str, role: &str) -> Value {
    json!({
        "username": username,
        "password": test_password(),
        "email": test_email(username),
        "phone_number": test_phone(username),
        "role": role
    })
}

#[allow(dead_code)]
pub fn event_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "An evening out",
        "category": "music",
        "date": "2030-06-01T19:00:00Z",
        "location": "Blue Room",
        "availableSeats": 40
    })
}
