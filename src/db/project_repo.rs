use log::info;
use sqlx::MySqlPool;

use crate::db::inserted_id;
use crate::error::{AppError, AppResult};
use crate::models::project::{Project, ProjectDraft};
use crate::validation::validate_project;
use crate::visibility::Scope;

const COLUMNS: &str =
    "project_id, name, description, start_date, end_date, created_by, created_at, updated_at";

pub struct ProjectRepo;

impl ProjectRepo {
    /// Projects inside `scope`, newest first.
    pub async fn list(pool: &MySqlPool, scope: Scope) -> AppResult<Vec<Project>> {
        let owner_id = scope.owner_id();
        let sql = format!(
            "SELECT {COLUMNS} FROM Projects_ WHERE (? IS NULL OR created_by = ?) \
             ORDER BY created_at DESC, project_id DESC"
        );
        let projects = sqlx::query_as::<_, Project>(&sql)
            .bind(owner_id)
            .bind(owner_id)
            .fetch_all(pool)
            .await?;
        Ok(scope.visible_projects(projects))
    }

    pub async fn find_by_id(pool: &MySqlPool, project_id: i32) -> AppResult<Option<Project>> {
        let sql = format!("SELECT {COLUMNS} FROM Projects_ WHERE project_id = ?");
        let project = sqlx::query_as::<_, Project>(&sql)
            .bind(project_id)
            .fetch_optional(pool)
            .await?;
        Ok(project)
    }

    /// Looks a project up within `scope`; anything outside it is `NotFound`.
    pub async fn get_visible(pool: &MySqlPool, scope: Scope, project_id: i32) -> AppResult<Project> {
        Self::find_by_id(pool, project_id)
            .await?
            .filter(|project| scope.admits_project(project))
            .ok_or(AppError::NotFound {
                entity: "Project",
                id: project_id,
            })
    }

    pub async fn create(pool: &MySqlPool, created_by: i32, draft: &ProjectDraft) -> AppResult<Project> {
        validate_project(draft)?;

        let result = sqlx::query(
            "INSERT INTO Projects_ (name, description, start_date, end_date, created_by) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.start_date)
        .bind(draft.end_date)
        .bind(created_by)
        .execute(pool)
        .await?;

        let project_id = inserted_id(result.last_insert_id())?;
        info!("Project {} created by user {}", project_id, created_by);
        Self::fetch_written(pool, project_id).await
    }

    /// Overwrites the editable fields. `created_by` is never changed.
    pub async fn update(pool: &MySqlPool, project_id: i32, draft: &ProjectDraft) -> AppResult<Project> {
        validate_project(draft)?;

        sqlx::query(
            "UPDATE Projects_ SET name = ?, description = ?, start_date = ?, end_date = ? \
             WHERE project_id = ?",
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.start_date)
        .bind(draft.end_date)
        .bind(project_id)
        .execute(pool)
        .await?;

        info!("Project {} updated", project_id);
        Self::fetch_written(pool, project_id).await
    }

    async fn fetch_written(pool: &MySqlPool, project_id: i32) -> AppResult<Project> {
        Self::find_by_id(pool, project_id)
            .await?
            .ok_or(AppError::NotFound {
                entity: "Project",
                id: project_id,
            })
    }
}
