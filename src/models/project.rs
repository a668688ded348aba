use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

use super::task::{Task, TaskStatus};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Project {
    pub project_id: i32,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The user-editable fields of a project, as submitted on create or edit.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Project {
    /// Percentage of this project's tasks that are completed, 0 when it has none.
    pub fn completion_rate(&self, tasks: &[Task]) -> f64 {
        let own: Vec<&Task> = tasks
            .iter()
            .filter(|task| task.project_id == self.project_id)
            .collect();
        if own.is_empty() {
            return 0.0;
        }
        let completed = own
            .iter()
            .filter(|task| task.status == TaskStatus::Completed)
            .count();
        (completed as f64 / own.len() as f64) * 100.0
    }
}
