use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::task::{Task, TaskDraft, TaskPriority, TaskStatus};
use crate::validation::{FieldErrors, ValidationError};

// Body of both the create and the edit form
#[derive(Deserialize)]
pub struct TaskFormRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub assigned_to: i32,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub start_date: NaiveDate,
    pub due_date: NaiveDate,
    pub project: i32,
}

impl TaskFormRequest {
    /// Parses the choice fields. Unknown choices are reported and replaced by
    /// the defaults so the remaining rules can still run.
    pub fn into_draft(self) -> (TaskDraft, FieldErrors) {
        let mut errors = FieldErrors::new();
        let status = parse_choice::<TaskStatus>(self.status.as_deref(), "status", &mut errors);
        let priority = parse_choice::<TaskPriority>(self.priority.as_deref(), "priority", &mut errors);

        let draft = TaskDraft {
            title: self.title.trim().to_string(),
            description: self.description,
            assigned_to: self.assigned_to,
            status,
            priority,
            start_date: self.start_date,
            due_date: self.due_date,
            project_id: self.project,
        };
        (draft, errors)
    }
}

fn parse_choice<T>(raw: Option<&str>, field: &'static str, errors: &mut FieldErrors) -> T
where
    T: std::str::FromStr + Default,
{
    match raw {
        None | Some("") => T::default(),
        Some(value) => value.parse().unwrap_or_else(|_| {
            errors.push(ValidationError::InvalidChoice { field });
            T::default()
        }),
    }
}

#[derive(Serialize)]
pub struct GetTaskListResponse {
    pub tasks: Vec<Task>,
}

#[derive(Serialize)]
pub struct GetTaskDetailResponse {
    pub task: Task,
}

#[derive(Serialize)]
pub struct SaveTaskResponse {
    pub success: bool,
    pub message: String,
    pub task: Task,
}
