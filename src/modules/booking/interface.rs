use async_trait::async_trait;

use super::model::{Booking, BookingDetail};
use crate::error::StoreError;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Listing methods return bookings joined with their event and booking user.
/// The joined side is `None` when the referenced record no longer exists.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<()>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>>;
    async fn find_detail(&self, id: &str) -> Result<Option<BookingDetail>>;
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<BookingDetail>>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<BookingDetail>>;
    /// Bookings on any event whose creator is `creator_id`.
    async fn list_for_creator(&self, creator_id: &str) -> Result<Vec<BookingDetail>>;
    async fn update(&self, booking: &Booking) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<bool>;
}
