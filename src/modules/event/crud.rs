use async_trait::async_trait;
use sqlx::{MySql, Pool};

use super::interface::{EventRepository, Result};
use super::model::Event;

const EVENT_COLUMNS: &str =
    "id, title, description, category, date, location, available_seats, creator_id, created_at, updated_at";

pub struct EventCrud {
    pool: Pool<MySql>,
}

impl EventCrud {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for EventCrud {
    async fn create(&self, event: &Event) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO events (id, title, description, category, date, location, available_seats,
                                creator_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.category)
        .bind(event.date)
        .bind(&event.location)
        .bind(event.available_seats)
        .bind(&event.creator_id)
        .bind(event.created_at)
        .bind(event.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?");
        Ok(sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list(&self) -> Result<Vec<Event>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY date ASC");
        Ok(sqlx::query_as::<_, Event>(&sql).fetch_all(&self.pool).await?)
    }

    async fn list_by_creator(&self, creator_id: &str) -> Result<Vec<Event>> {
        let sql = format!("SELECT {EVENT_COLUMNS} FROM events WHERE creator_id = ? ORDER BY date ASC");
        Ok(sqlx::query_as::<_, Event>(&sql)
            .bind(creator_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn update(&self, event: &Event) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE events
            SET title = ?, description = ?, category = ?, date = ?, location = ?,
                available_seats = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.category)
        .bind(event.date)
        .bind(&event.location)
        .bind(event.available_seats)
        .bind(event.updated_at)
        .bind(&event.id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
