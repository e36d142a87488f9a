//! In-memory collaborators for driving the full router without MySQL or a
//! mail API.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::environment::{AppEnv, Config, MailConfig};
use crate::error::StoreError;
use crate::modules::booking::{
    interface::BookingRepository,
    model::{Booking, BookingDetail, BookingUser},
};
use crate::modules::event::{interface::EventRepository, model::Event};
use crate::modules::user::{interface::UserRepository, model::User};
use crate::services::jwt::JwtService;
use crate::services::mailer::{Email, MailError, Mailer};
use crate::AppState;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only";
pub const TEST_BASE_URL: &str = "http://tripnest.test";

type Result<T> = std::result::Result<T, StoreError>;

// =============================================================================
// STORE
// =============================================================================

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    events: Vec<Event>,
    bookings: Vec<Booking>,
}

impl Tables {
    /// Mirrors the unique indexes on users. `skip_id` excludes the row being
    /// updated.
    fn check_unique(&self, candidate: &User, skip_id: Option<&str>) -> Result<()> {
        for other in self.users.iter().filter(|u| Some(u.id.as_str()) != skip_id) {
            if other.email == candidate.email {
                return Err(StoreError::Duplicate("Email"));
            }
            if other.username == candidate.username {
                return Err(StoreError::Duplicate("Username"));
            }
            if other.phone_number == candidate.phone_number {
                return Err(StoreError::Duplicate("Phone number"));
            }
        }
        Ok(())
    }

    fn detail(&self, booking: &Booking) -> BookingDetail {
        BookingDetail {
            booking: booking.clone(),
            event: self.events.iter().find(|e| e.id == booking.event_id).cloned(),
            user: self
                .users
                .iter()
                .find(|u| u.id == booking.user_id)
                .map(|u| BookingUser {
                    id: u.id.clone(),
                    username: u.username.clone(),
                    email: u.email.clone(),
                    phone_number: u.phone_number.clone(),
                    role: u.role.clone(),
                }),
        }
    }

    fn details<F>(&self, keep: F) -> Vec<BookingDetail>
    where
        F: Fn(&Booking) -> bool,
    {
        self.bookings
            .iter()
            .filter(|b| keep(b))
            .map(|b| self.detail(b))
            .collect()
    }
}

/// Implements all three repositories over one set of tables so joins see
/// each other's writes.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Moves every outstanding reset token past its expiry.
    pub async fn expire_reset_tokens(&self) {
        let past = Utc::now() - Duration::minutes(1);
        let mut tables = self.tables.lock().await;
        for user in tables
            .users
            .iter_mut()
            .filter(|u| u.reset_password_token_hash.is_some())
        {
            user.reset_password_expires_at = Some(past);
        }
    }

    pub async fn user_by_email(&self, email: &str) -> Option<User> {
        let tables = self.tables.lock().await;
        tables.users.iter().find(|u| u.email == email).cloned()
    }

    pub async fn event_count(&self) -> usize {
        self.tables.lock().await.events.len()
    }

    pub async fn booking_count(&self) -> usize {
        self.tables.lock().await.bookings.len()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: &User) -> Result<()> {
        let mut tables = self.tables.lock().await;
        tables.check_unique(user, None)?;
        tables.users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_identity_conflict(
        &self,
        email: &str,
        username: &str,
        phone_number: &str,
    ) -> Result<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.email == email || u.username == username || u.phone_number == phone_number)
            .cloned())
    }

    async fn find_by_reset_token_hash(&self, token_hash: &str, now: DateTime<Utc>) -> Result<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .iter()
            .find(|u| {
                u.reset_password_token_hash.as_deref() == Some(token_hash)
                    && u.reset_password_expires_at.is_some_and(|exp| exp > now)
            })
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>> {
        Ok(self.tables.lock().await.users.clone())
    }

    async fn update(&self, user: &User) -> Result<()> {
        let mut tables = self.tables.lock().await;
        tables.check_unique(user, Some(user.id.as_str()))?;
        if let Some(slot) = tables.users.iter_mut().find(|u| u.id == user.id) {
            *slot = user.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        Ok(tables.users.len() != before)
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn create(&self, event: &Event) -> Result<()> {
        self.tables.lock().await.events.push(event.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>> {
        let tables = self.tables.lock().await;
        Ok(tables.events.iter().find(|e| e.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Event>> {
        let mut events = self.tables.lock().await.events.clone();
        events.sort_by_key(|e| e.date);
        Ok(events)
    }

    async fn list_by_creator(&self, creator_id: &str) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self
            .tables
            .lock()
            .await
            .events
            .iter()
            .filter(|e| e.creator_id == creator_id)
            .cloned()
            .collect();
        events.sort_by_key(|e| e.date);
        Ok(events)
    }

    async fn update(&self, event: &Event) -> Result<()> {
        let mut tables = self.tables.lock().await;
        if let Some(slot) = tables.events.iter_mut().find(|e| e.id == event.id) {
            *slot = event.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.events.len();
        tables.events.retain(|e| e.id != id);
        Ok(tables.events.len() != before)
    }
}

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn create(&self, booking: &Booking) -> Result<()> {
        self.tables.lock().await.bookings.push(booking.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>> {
        let tables = self.tables.lock().await;
        Ok(tables.bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn find_detail(&self, id: &str) -> Result<Option<BookingDetail>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .bookings
            .iter()
            .find(|b| b.id == id)
            .map(|b| tables.detail(b)))
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<BookingDetail>> {
        let tables = self.tables.lock().await;
        Ok(tables.details(|b| b.user_id == user_id))
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<BookingDetail>> {
        let tables = self.tables.lock().await;
        Ok(tables.details(|b| b.event_id == event_id))
    }

    async fn list_for_creator(&self, creator_id: &str) -> Result<Vec<BookingDetail>> {
        let tables = self.tables.lock().await;
        let owned: Vec<&str> = tables
            .events
            .iter()
            .filter(|e| e.creator_id == creator_id)
            .map(|e| e.id.as_str())
            .collect();
        Ok(tables.details(|b| owned.contains(&b.event_id.as_str())))
    }

    async fn update(&self, booking: &Booking) -> Result<()> {
        let mut tables = self.tables.lock().await;
        if let Some(slot) = tables.bookings.iter_mut().find(|b| b.id == booking.id) {
            *slot = booking.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut tables = self.tables.lock().await;
        let before = tables.bookings.len();
        tables.bookings.retain(|b| b.id != id);
        Ok(tables.bookings.len() != before)
    }
}

// =============================================================================
// MAIL
// =============================================================================

/// Keeps every message instead of delivering it. Clones share the outbox.
#[derive(Clone, Default)]
pub struct RecordingMailer {
    outbox: Arc<Mutex<Vec<Email>>>,
}

impl RecordingMailer {
    pub async fn sent(&self) -> Vec<Email> {
        self.outbox.lock().await.clone()
    }

    /// Raw reset token from the most recent message's link.
    pub async fn last_reset_token(&self) -> Option<String> {
        let outbox = self.outbox.lock().await;
        let text = &outbox.last()?.text;
        text.rsplit("token=").next().map(|t| t.trim().to_string())
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: Email) -> std::result::Result<(), MailError> {
        self.outbox.lock().await.push(email);
        Ok(())
    }
}

/// Rejects every message, for exercising the 500 path.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: Email) -> std::result::Result<(), MailError> {
        Err(MailError::Api("API returned status: 503 Service Unavailable".to_string()))
    }
}

// =============================================================================
// STATE
// =============================================================================

pub fn test_config() -> Config {
    Config {
        port: 0,
        database_url: String::new(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_expires_in: Duration::days(1),
        cors_origins: Vec::new(),
        mail: MailConfig {
            from: "no-reply@tripnest.test".to_string(),
            ..MailConfig::default()
        },
        app_base_url: TEST_BASE_URL.to_string(),
        app_env: AppEnv::Production,
    }
}

pub fn test_state(store: Arc<MemoryStore>, mailer: Box<dyn Mailer>, config: Config) -> Arc<AppState> {
    let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expires_in);

    Arc::new(AppState {
        users: store.clone(),
        events: store.clone(),
        bookings: store,
        jwt_service,
        mailer,
        config,
    })
}
