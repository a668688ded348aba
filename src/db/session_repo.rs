use sqlx::MySqlPool;
use time::OffsetDateTime;

use crate::models::session::Session;

pub struct SessionRepo;

impl SessionRepo {
    pub async fn find(pool: &MySqlPool, session_id: &str) -> Result<Option<Session>, sqlx::Error> {
        sqlx::query_as::<_, Session>("SELECT user_id, expires_at FROM Sessions_ WHERE session_id = ?")
        .bind(session_id)
        .fetch_optional(pool)
        .await
    }

    /// Replaces any session the user already holds with a fresh one.
    pub async fn replace_for_user(
        pool: &MySqlPool,
        session_id: &str,
        user_id: i32,
        expires_at: OffsetDateTime,
        is_persistent: bool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM Sessions_ WHERE user_id = ?")
            .bind(user_id)
            .execute(pool)
            .await?;

        sqlx::query(
            "INSERT INTO Sessions_ (session_id, user_id, expires_at, is_persistent) VALUES (?, ?, ?, ?)",
        )
        .bind(session_id)
        .bind(user_id)
        .bind(expires_at)
        .bind(is_persistent)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn delete(pool: &MySqlPool, session_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM Sessions_ WHERE session_id = ?")
            .bind(session_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
