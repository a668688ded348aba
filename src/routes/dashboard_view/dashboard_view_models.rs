use serde::Serialize;

use crate::models::project::Project;
use crate::models::task::Task;

#[derive(Serialize)]
pub struct DashboardResponse {
    pub projects: Vec<Project>,
    pub overdue_tasks: Vec<Task>,
}
