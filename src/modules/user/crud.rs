use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, Pool};

use super::interface::{Result, UserRepository};
use super::model::User;
use crate::error::StoreError;

const USER_COLUMNS: &str = "id, username, email, phone_number, password_hash, gender, date_of_birth, \
     profile_picture, role, reset_password_token_hash, reset_password_expires_at, created_at, updated_at";

pub struct UserCrud {
    pool: Pool<MySql>,
}

impl UserCrud {
    pub fn new(pool: Pool<MySql>) -> Self {
        Self { pool }
    }
}

/// Turns a unique-index violation into the field label the client sees.
fn map_write_error(err: sqlx::Error) -> StoreError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return StoreError::Duplicate(duplicate_field(db_err.message()));
        }
    }
    StoreError::Database(err)
}

// MySQL: "Duplicate entry 'x' for key 'users.uq_users_email'"
fn duplicate_field(message: &str) -> &'static str {
    let key = message.rsplit("for key").next().unwrap_or_default();
    if key.contains("email") {
        "Email"
    } else if key.contains("phone") {
        "Phone number"
    } else {
        "Username"
    }
}

#[async_trait]
impl UserRepository for UserCrud {
    async fn create(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, phone_number, password_hash, gender, date_of_birth,
                               profile_picture, role, reset_password_token_hash, reset_password_expires_at,
                               created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.phone_number)
        .bind(&user.password_hash)
        .bind(&user.gender)
        .bind(user.date_of_birth)
        .bind(&user.profile_picture)
        .bind(&user.role)
        .bind(&user.reset_password_token_hash)
        .bind(user.reset_password_expires_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?");
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_identity_conflict(
        &self,
        email: &str,
        username: &str,
        phone_number: &str,
    ) -> Result<Option<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ? OR username = ? OR phone_number = ? LIMIT 1"
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .bind(username)
            .bind(phone_number)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_reset_token_hash(&self, token_hash: &str, now: DateTime<Utc>) -> Result<Option<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE reset_password_token_hash = ? AND reset_password_expires_at > ?"
        );
        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(token_hash)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn list(&self) -> Result<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC");
        Ok(sqlx::query_as::<_, User>(&sql).fetch_all(&self.pool).await?)
    }

    async fn update(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET username = ?, email = ?, phone_number = ?, password_hash = ?, gender = ?,
                date_of_birth = ?, profile_picture = ?, role = ?, reset_password_token_hash = ?,
                reset_password_expires_at = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.phone_number)
        .bind(&user.password_hash)
        .bind(&user.gender)
        .bind(user.date_of_birth)
        .bind(&user.profile_picture)
        .bind(&user.role)
        .bind(&user.reset_password_token_hash)
        .bind(user.reset_password_expires_at)
        .bind(user.updated_at)
        .bind(&user.id)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
