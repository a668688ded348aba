use log::info;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

use crate::config::Config;
use crate::error::{AppError, AppResult};

pub mod project_repo;
pub mod session_repo;
pub mod task_repo;
pub mod user_repo;

const SCHEMA: &str = include_str!("../../schema.sql");

pub async fn create_pool(config: &Config) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
}

/// Creates any missing tables. Statements are idempotent.
pub async fn init_schema(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    for statement in schema_statements(SCHEMA) {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Database schema ready");
    Ok(())
}

/// Narrows the AUTO_INCREMENT id MySQL reports to the `INT` key columns use.
pub fn inserted_id(raw: u64) -> AppResult<i32> {
    i32::try_from(raw)
        .map_err(|_| AppError::Internal(format!("Inserted id {} does not fit an INT key", raw)))
}

fn schema_statements(schema: &str) -> Vec<&str> {
    schema
        .split(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
        .collect()
}
