use sqlx::FromRow;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i32,
    pub user_name: String,
    pub user_email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_staff: bool,
}
