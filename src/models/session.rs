use sqlx::FromRow;
use time::OffsetDateTime;

/// The part of a stored session needed to authenticate a request.
#[derive(Debug, FromRow)]
pub struct Session {
    pub user_id: i32,
    pub expires_at: OffsetDateTime,
}

impl Session {
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at <= now
    }
}
