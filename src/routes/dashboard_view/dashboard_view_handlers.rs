use actix_web::{web, HttpResponse};
use log::info;
use sqlx::MySqlPool;

use super::dashboard_view_models::DashboardResponse;
use crate::auth::CurrentUser;
use crate::dashboard::{self, Dashboard};
use crate::db::project_repo::ProjectRepo;
use crate::db::task_repo::TaskRepo;
use crate::error::AppResult;
use crate::visibility::Scope;

// The user's own projects and overdue tasks, evaluated against today's date
pub async fn dashboard_get(
    pool: web::Data<MySqlPool>,
    user: CurrentUser,
) -> AppResult<HttpResponse> {
    info!("Received dashboard request for user {}", user.id);

    let scope = Scope::own(&user);
    let projects = ProjectRepo::list(pool.get_ref(), scope).await?;
    let tasks = TaskRepo::list(pool.get_ref(), scope).await?;

    let Dashboard { projects, overdue_tasks } =
        Dashboard::build(&user, projects, tasks, dashboard::today());

    Ok(HttpResponse::Ok().json(DashboardResponse {
        projects,
        overdue_tasks,
    }))
}
