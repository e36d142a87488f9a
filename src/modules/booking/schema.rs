use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::model::{Booking, BookingDetail, BookingUser};
use crate::modules::event::schema::EventResponse;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Event ID is required"))]
    pub event_id: String,
    #[validate(
        required(message = "Seats booked is required"),
        range(min = 1, message = "Seats booked must be at least 1")
    )]
    pub seats_booked: Option<i32>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingRequest {
    #[validate(range(min = 1, message = "Seats booked must be at least 1"))]
    pub seats_booked: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct BookingUserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
}

impl From<BookingUser> for BookingUserResponse {
    fn from(user: BookingUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            phone_number: user.phone_number,
            role: user.role,
        }
    }
}

/// A booking with its event and booking user resolved when they still exist.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub seats_booked: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<BookingUserResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            event_id: booking.event_id,
            user_id: booking.user_id,
            seats_booked: booking.seats_booked,
            event: None,
            user: None,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

impl From<BookingDetail> for BookingResponse {
    fn from(detail: BookingDetail) -> Self {
        Self {
            event: detail.event.map(EventResponse::from),
            user: detail.user.map(BookingUserResponse::from),
            ..BookingResponse::from(detail.booking)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookingEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub booking: BookingResponse,
}

#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    pub success: bool,
    pub bookings: Vec<BookingResponse>,
}

impl BookingListResponse {
    pub fn new(details: Vec<BookingDetail>) -> Self {
        Self {
            success: true,
            bookings: details.into_iter().map(BookingResponse::from).collect(),
        }
    }
}
