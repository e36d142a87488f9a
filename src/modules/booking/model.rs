use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::modules::event::model::Event;

#[derive(Debug, Clone, FromRow)]
pub struct Booking {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub seats_booked: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public columns of the user who made a booking.
#[derive(Debug, Clone)]
pub struct BookingUser {
    pub id: String,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    pub role: String,
}

#[derive(Debug, Clone)]
pub struct BookingDetail {
    pub booking: Booking,
    pub event: Option<Event>,
    pub user: Option<BookingUser>,
}

/// Flat shape of the booking/event/user LEFT JOIN.
#[derive(Debug, FromRow)]
pub struct BookingDetailRow {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub seats_booked: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub ev_id: Option<String>,
    pub ev_title: Option<String>,
    pub ev_description: Option<String>,
    pub ev_category: Option<String>,
    pub ev_date: Option<DateTime<Utc>>,
    pub ev_location: Option<String>,
    pub ev_available_seats: Option<i32>,
    pub ev_creator_id: Option<String>,
    pub ev_created_at: Option<DateTime<Utc>>,
    pub ev_updated_at: Option<DateTime<Utc>>,

    pub us_id: Option<String>,
    pub us_username: Option<String>,
    pub us_email: Option<String>,
    pub us_phone_number: Option<String>,
    pub us_role: Option<String>,
}

impl From<BookingDetailRow> for BookingDetail {
    fn from(row: BookingDetailRow) -> Self {
        let event = match (
            row.ev_id,
            row.ev_title,
            row.ev_description,
            row.ev_category,
            row.ev_date,
            row.ev_location,
            row.ev_available_seats,
            row.ev_creator_id,
            row.ev_created_at,
            row.ev_updated_at,
        ) {
            (
                Some(id),
                Some(title),
                Some(description),
                Some(category),
                Some(date),
                Some(location),
                Some(available_seats),
                Some(creator_id),
                Some(created_at),
                Some(updated_at),
            ) => Some(Event {
                id,
                title,
                description,
                category,
                date,
                location,
                available_seats,
                creator_id,
                created_at,
                updated_at,
            }),
            _ => None,
        };

        let user = match (row.us_id, row.us_username, row.us_email, row.us_phone_number, row.us_role) {
            (Some(id), Some(username), Some(email), Some(phone_number), Some(role)) => Some(BookingUser {
                id,
                username,
                email,
                phone_number,
                role,
            }),
            _ => None,
        };

        BookingDetail {
            booking: Booking {
                id: row.id,
                event_id: row.event_id,
                user_id: row.user_id,
                seats_booked: row.seats_booked,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            event,
            user,
        }
    }
}
