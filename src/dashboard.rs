use chrono::{Local, NaiveDate};

use crate::auth::CurrentUser;
use crate::models::project::Project;
use crate::models::task::Task;

/// The server's current local date. Read on every request, never cached.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A task is overdue when it is still open and its due date has passed.
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    task.status.is_open() && task.due_date < today
}

#[derive(Debug)]
pub struct Dashboard {
    pub projects: Vec<Project>,
    pub overdue_tasks: Vec<Task>,
}

impl Dashboard {
    /// The user's own projects and their overdue assigned tasks.
    ///
    /// Staff status does not widen either list.
    pub fn build(
        user: &CurrentUser,
        projects: Vec<Project>,
        tasks: Vec<Task>,
        today: NaiveDate,
    ) -> Self {
        let projects = projects
            .into_iter()
            .filter(|project| project.created_by == user.id)
            .collect();
        let overdue_tasks = tasks
            .into_iter()
            .filter(|task| task.assigned_to == user.id && is_overdue(task, today))
            .collect();

        Dashboard {
            projects,
            overdue_tasks,
        }
    }
}
