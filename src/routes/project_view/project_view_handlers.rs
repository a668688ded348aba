use actix_web::{web, HttpResponse};
use log::info;
use sqlx::MySqlPool;

use super::project_view_models::{
    GetProjectDetailResponse, GetProjectListResponse,
    ProjectFormRequest, SaveProjectResponse,
};
use crate::auth::CurrentUser;
use crate::db::project_repo::ProjectRepo;
use crate::db::task_repo::TaskRepo;
use crate::error::AppResult;
use crate::models::project::ProjectDraft;
use crate::validation::project_errors;
use crate::visibility::Scope;

// Staff see every project, everyone else only the ones they created
pub async fn project_list(
    pool: web::Data<MySqlPool>,
    user: CurrentUser,
) -> AppResult<HttpResponse> {
    let projects = ProjectRepo::list(pool.get_ref(), Scope::for_user(&user)).await?;
    info!("Listing {} projects for user {}", projects.len(), user.id);
    Ok(HttpResponse::Ok().json(GetProjectListResponse { projects }))
}

pub async fn project_detail(
    pool: web::Data<MySqlPool>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let project_id = path.into_inner();
    let project = ProjectRepo::get_visible(pool.get_ref(), Scope::for_user(&user), project_id).await?;
    let tasks = TaskRepo::list_for_project(pool.get_ref(), project.project_id).await?;
    let completion_rate = project.completion_rate(&tasks);

    Ok(HttpResponse::Ok().json(GetProjectDetailResponse {
        project,
        tasks,
        completion_rate,
    }))
}

// The creator is always the logged-in user
pub async fn project_create(
    pool: web::Data<MySqlPool>,
    user: CurrentUser,
    form: web::Json<ProjectFormRequest>,
) -> AppResult<HttpResponse> {
    let draft = ProjectDraft::from(form.into_inner());
    info!("Received request to create project {:?} for user {}", draft.name, user.id);

    if let Err(errors) = project_errors(&draft).into_result() {
        info!("Rejected project {:?}: {}", draft.name, errors);
        return Err(errors.into());
    }

    let project = ProjectRepo::create(pool.get_ref(), user.id, &draft).await?;
    Ok(HttpResponse::Created().json(SaveProjectResponse {
        success: true,
        message: "Project created successfully".into(),
        project,
    }))
}

pub async fn project_update(
    pool: web::Data<MySqlPool>,
    user: CurrentUser,
    path: web::Path<i32>,
    form: web::Json<ProjectFormRequest>,
) -> AppResult<HttpResponse> {
    let project_id = path.into_inner();
    let existing = ProjectRepo::get_visible(pool.get_ref(), Scope::for_user(&user), project_id).await?;

    let draft = ProjectDraft::from(form.into_inner());
    if let Err(errors) = project_errors(&draft).into_result() {
        info!("Rejected update of project {}: {}", project_id, errors);
        return Err(errors.into());
    }

    let project = ProjectRepo::update(pool.get_ref(), existing.project_id, &draft).await?;
    Ok(HttpResponse::Ok().json(SaveProjectResponse {
        success: true,
        message: "Project updated successfully".into(),
        project,
    }))
}
