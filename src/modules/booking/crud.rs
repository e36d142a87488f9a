use async_trait::async_trait;
use sqlx::{MySql, Pool};

use super::interface::{BookingRepository, Result};
use super::model::{Booking, BookingDetail, BookingDetailRow};

const DETAIL_SELECT: &str = r#"
    SELECT b.id, b.event_id, b.user_id, b.seats_booked, b.created_at, b.updated_at,
           e.id AS ev_id, e.title AS ev_title, e.description AS ev_description,
           e.category AS ev_category, e.date AS ev_date, e.location AS ev_location,
           e.available_seats AS ev_available_seats, e.creator_id AS ev_creator_id,
           e.created_at AS ev_created_at, e.updated_at AS ev_updated_at,
           u.id AS us_id, u.username AS us_username, u.email AS us_email,
           u.phone_number AS us_phone_number, u.role AS us_role
    FROM bookings b
    LEFT JOIN events e ON e.id = b.event_id
    LEFT JOIN users u ON u.id = b.user_id
"#;

pub struct BookingCrud {
    pool: Pool<MySql>,
}

impl BookingCrud {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }

    async fn fetch_details(&self, filter: &str, value: &str) -> Result<Vec<BookingDetail>> {
        let sql = format!("{DETAIL_SELECT} WHERE {filter} = ? ORDER BY b.created_at ASC");
        let rows = sqlx::query_as::<_, BookingDetailRow>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(BookingDetail::from).collect())
    }
}

#[async_trait]
impl BookingRepository for BookingCrud {
    async fn create(&self, booking: &Booking) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings (id, event_id, user_id, seats_booked, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&booking.id)
        .bind(&booking.event_id)
        .bind(&booking.user_id)
        .bind(booking.seats_booked)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>> {
        Ok(sqlx::query_as::<_, Booking>(
            "SELECT id, event_id, user_id, seats_booked, created_at, updated_at FROM bookings WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn find_detail(&self, id: &str) -> Result<Option<BookingDetail>> {
        Ok(self.fetch_details("b.id", id).await?.into_iter().next())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<BookingDetail>> {
        self.fetch_details("b.user_id", user_id).await
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<BookingDetail>> {
        self.fetch_details("b.event_id", event_id).await
    }

    async fn list_for_creator(&self, creator_id: &str) -> Result<Vec<BookingDetail>> {
        self.fetch_details("e.creator_id", creator_id).await
    }

    async fn update(&self, booking: &Booking) -> Result<()> {
        sqlx::query("UPDATE bookings SET seats_booked = ?, updated_at = ? WHERE id = ?")
            .bind(booking.seats_booked)
            .bind(booking.updated_at)
            .bind(&booking.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
