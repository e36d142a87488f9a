use async_trait::async_trait;

use super::model::Event;
use crate::error::StoreError;

pub type Result<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<()>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>>;
    async fn list(&self) -> Result<Vec<Event>>;
    async fn list_by_creator(&self, creator_id: &str) -> Result<Vec<Event>>;
    async fn update(&self, event: &Event) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<bool>;
}
