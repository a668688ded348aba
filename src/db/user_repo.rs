use sqlx::MySqlPool;

use crate::db::inserted_id;
use crate::error::AppResult;
use crate::models::user::User;

pub struct UserRepo;

impl UserRepo {
    pub async fn find_by_id(pool: &MySqlPool, user_id: i32) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT user_id, user_name, user_email, password_hash, is_staff FROM Users_ WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn find_by_name(pool: &MySqlPool, user_name: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT user_id, user_name, user_email, password_hash, is_staff FROM Users_ WHERE user_name = ?",
        )
        .bind(user_name)
        .fetch_optional(pool)
        .await
    }

    pub async fn exists(pool: &MySqlPool, user_id: i32) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Users_ WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(count > 0)
    }

    /// Whether the username or the email is already registered.
    pub async fn name_or_email_taken(
        pool: &MySqlPool,
        user_name: &str,
        user_email: &str,
    ) -> Result<bool, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM Users_ WHERE user_name = ? OR user_email = ?",
        )
        .bind(user_name)
        .bind(user_email)
        .fetch_one(pool)
        .await?;
        Ok(count > 0)
    }

    pub async fn create(
        pool: &MySqlPool,
        user_name: &str,
        user_email: &str,
        password_hash: &str,
    ) -> AppResult<i32> {
        let result = sqlx::query(
            "INSERT INTO Users_ (user_name, user_email, password_hash) VALUES (?, ?, ?)",
        )
        .bind(user_name)
        .bind(user_email)
        .bind(password_hash)
        .execute(pool)
        .await?;
        inserted_id(result.last_insert_id())
    }
}
