//! Database operations for `users`.

use chrono::{DateTime, Utc};
use shopseed_core::NewUser;

use crate::store::{PgStore, UserStore};
use crate::DbError;

/// A row from the `users` table. `password` is the stored hash.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    /// Whether the account has a non-blank avatar URL.
    #[must_use]
    pub fn has_profile_pic(&self) -> bool {
        self.profile_pic
            .as_deref()
            .is_some_and(|pic| !pic.trim().is_empty())
    }
}

impl UserStore for PgStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRow>, DbError> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, name, email, password, role, profile_pic, created_at, updated_at \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await?;
        Ok(row)
    }

    async fn insert_user(&self, user: &NewUser) -> Result<i64, DbError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO users (name, email, password, role, profile_pic) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.role)
        .bind(&user.profile_pic)
        .fetch_one(self.pool())
        .await?;
        Ok(id)
    }

    async fn set_user_profile_pic(&self, email: &str, profile_pic: &str) -> Result<usize, DbError> {
        let result = sqlx::query(
            "UPDATE users SET profile_pic = $1, updated_at = NOW() WHERE email = $2",
        )
        .bind(profile_pic)
        .bind(email)
        .execute(self.pool())
        .await?;
        Ok(usize::try_from(result.rows_affected()).unwrap_or(usize::MAX))
    }
}
