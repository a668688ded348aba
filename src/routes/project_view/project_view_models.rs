use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::project::{Project, ProjectDraft};
use crate::models::task::Task;

// Body of both the create and the edit form
#[derive(Deserialize)]
pub struct ProjectFormRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl From<ProjectFormRequest> for ProjectDraft {
    fn from(form: ProjectFormRequest) -> Self {
        ProjectDraft {
            name: form.name.trim().to_string(),
            description: form.description,
            start_date: form.start_date,
            end_date: form.end_date,
        }
    }
}

#[derive(Serialize)]
pub struct GetProjectListResponse {
    pub projects: Vec<Project>,
}

#[derive(Serialize)]
pub struct GetProjectDetailResponse {
    pub project: Project,
    pub tasks: Vec<Task>,
    pub completion_rate: f64,
}

#[derive(Serialize)]
pub struct SaveProjectResponse {
    pub success: bool,
    pub message: String,
    pub project: Project,
}
