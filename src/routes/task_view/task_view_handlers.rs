use actix_web::{web, HttpResponse};
use log::info;
use sqlx::MySqlPool;

use super::task_view_models::{
    GetTaskDetailResponse, GetTaskListResponse,
    SaveTaskResponse, TaskFormRequest,
};
use crate::auth::CurrentUser;
use crate::db::project_repo::ProjectRepo;
use crate::db::task_repo::TaskRepo;
use crate::db::user_repo::UserRepo;
use crate::error::AppResult;
use crate::models::project::Project;
use crate::models::task::TaskDraft;
use crate::task_filter::{TaskFilter, TaskListQuery};
use crate::validation::{task_errors, ValidationError};
use crate::visibility::Scope;

// Resolves the parent project and assignee, then runs every task rule at once
async fn check_task_form(
    pool: &MySqlPool,
    form: TaskFormRequest,
) -> AppResult<(TaskDraft, Project)> {
    let (draft, mut errors) = form.into_draft();

    let project = ProjectRepo::find_by_id(pool, draft.project_id).await?;
    errors.merge(task_errors(&draft, project.as_ref()));

    if !UserRepo::exists(pool, draft.assigned_to).await? {
        errors.push(ValidationError::UnknownAssignee);
    }

    if let Err(errors) = errors.into_result() {
        info!("Rejected task {:?}: {}", draft.title, errors);
        return Err(errors.into());
    }

    let project = project.ok_or(ValidationError::UnknownProject)?;
    Ok((draft, project))
}

pub async fn task_list(
    pool: web::Data<MySqlPool>,
    user: CurrentUser,
    query: web::Query<TaskListQuery>,
) -> AppResult<HttpResponse> {
    let visible = TaskRepo::list(pool.get_ref(), Scope::for_user(&user)).await?;
    let tasks = TaskFilter::from_query(&query).apply(visible);
    info!("Listing {} tasks for user {}", tasks.len(), user.id);
    Ok(HttpResponse::Ok().json(GetTaskListResponse { tasks }))
}

pub async fn task_detail(
    pool: web::Data<MySqlPool>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let task = TaskRepo::get_visible(pool.get_ref(), Scope::for_user(&user), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(GetTaskDetailResponse { task }))
}

// Any logged-in user may create a task in any project
pub async fn task_create(
    pool: web::Data<MySqlPool>,
    user: CurrentUser,
    form: web::Json<TaskFormRequest>,
) -> AppResult<HttpResponse> {
    info!("Received request to create task from user {}", user.id);
    let (draft, project) = check_task_form(pool.get_ref(), form.into_inner()).await?;

    let task = TaskRepo::create(pool.get_ref(), &draft, &project).await?;
    Ok(HttpResponse::Created().json(SaveTaskResponse {
        success: true,
        message: "Task created successfully".into(),
        task,
    }))
}

pub async fn task_update(
    pool: web::Data<MySqlPool>,
    user: CurrentUser,
    path: web::Path<i32>,
    form: web::Json<TaskFormRequest>,
) -> AppResult<HttpResponse> {
    let task_id = path.into_inner();
    let existing = TaskRepo::get_visible(pool.get_ref(), Scope::for_user(&user), task_id).await?;
    let (draft, project) = check_task_form(pool.get_ref(), form.into_inner()).await?;

    let task = TaskRepo::update(pool.get_ref(), existing.task_id, &draft, &project).await?;
    Ok(HttpResponse::Ok().json(SaveTaskResponse {
        success: true,
        message: "Task updated successfully".into(),
        task,
    }))
}
