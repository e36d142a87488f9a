use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::User;
use crate::error::StoreError;

pub type Result<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<()>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;
    /// Expects an already lower-cased email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    /// Any user holding one of the three identity fields.
    async fn find_identity_conflict(
        &self,
        email: &str,
        username: &str,
        phone_number: &str,
    ) -> Result<Option<User>>;
    /// Matches the stored reset digest and requires `expires_at > now`.
    async fn find_by_reset_token_hash(&self, token_hash: &str, now: DateTime<Utc>) -> Result<Option<User>>;
    async fn list(&self) -> Result<Vec<User>>;
    /// Writes every mutable column of `user`.
    async fn update(&self, user: &User) -> Result<()>;
    /// Returns false when no such user existed.
    async fn delete(&self, id: &str) -> Result<bool>;
}
