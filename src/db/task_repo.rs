use log::info;
use sqlx::MySqlPool;

use crate::db::inserted_id;
use crate::error::{AppError, AppResult};
use crate::models::project::Project;
use crate::models::task::{Task, TaskDraft};
use crate::validation::validate_task;
use crate::visibility::Scope;

const COLUMNS: &str = "task_id, title, description, assigned_to, status, priority, \
                       start_date, due_date, project_id, created_at, updated_at";

pub struct TaskRepo;

impl TaskRepo {
    /// Tasks inside `scope`, ordered by due date.
    pub async fn list(pool: &MySqlPool, scope: Scope) -> AppResult<Vec<Task>> {
        let owner_id = scope.owner_id();
        let sql = format!(
            "SELECT {COLUMNS} FROM Tasks_ WHERE (? IS NULL OR assigned_to = ?) \
             ORDER BY due_date, task_id"
        );
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(owner_id)
            .bind(owner_id)
            .fetch_all(pool)
            .await?;
        Ok(scope.visible_tasks(tasks))
    }

    pub async fn list_for_project(pool: &MySqlPool, project_id: i32) -> AppResult<Vec<Task>> {
        let sql = format!("SELECT {COLUMNS} FROM Tasks_ WHERE project_id = ? ORDER BY due_date, task_id");
        let tasks = sqlx::query_as::<_, Task>(&sql)
            .bind(project_id)
            .fetch_all(pool)
            .await?;
        Ok(tasks)
    }

    pub async fn find_by_id(pool: &MySqlPool, task_id: i32) -> AppResult<Option<Task>> {
        let sql = format!("SELECT {COLUMNS} FROM Tasks_ WHERE task_id = ?");
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(task_id)
            .fetch_optional(pool)
            .await?;
        Ok(task)
    }

    /// Looks a task up within `scope`; anything outside it is `NotFound`.
    pub async fn get_visible(pool: &MySqlPool, scope: Scope, task_id: i32) -> AppResult<Task> {
        Self::find_by_id(pool, task_id)
            .await?
            .filter(|task| scope.admits_task(task))
            .ok_or(AppError::NotFound {
                entity: "Task",
                id: task_id,
            })
    }

    pub async fn create(pool: &MySqlPool, draft: &TaskDraft, project: &Project) -> AppResult<Task> {
        validate_task(draft, project)?;

        let result = sqlx::query(
            "INSERT INTO Tasks_ (title, description, assigned_to, status, priority, \
             start_date, due_date, project_id) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.assigned_to)
        .bind(draft.status.as_str())
        .bind(draft.priority.as_str())
        .bind(draft.start_date)
        .bind(draft.due_date)
        .bind(project.project_id)
        .execute(pool)
        .await?;

        let task_id = inserted_id(result.last_insert_id())?;
        info!("Task {} created in project {}", task_id, project.project_id);
        Self::fetch_written(pool, task_id).await
    }

    pub async fn update(
        pool: &MySqlPool,
        task_id: i32,
        draft: &TaskDraft,
        project: &Project,
    ) -> AppResult<Task> {
        validate_task(draft, project)?;

        sqlx::query(
            "UPDATE Tasks_ SET title = ?, description = ?, assigned_to = ?, status = ?, \
             priority = ?, start_date = ?, due_date = ?, project_id = ? WHERE task_id = ?",
        )
        .bind(&draft.title)
        .bind(&draft.description)
        .bind(draft.assigned_to)
        .bind(draft.status.as_str())
        .bind(draft.priority.as_str())
        .bind(draft.start_date)
        .bind(draft.due_date)
        .bind(project.project_id)
        .bind(task_id)
        .execute(pool)
        .await?;

        info!("Task {} updated", task_id);
        Self::fetch_written(pool, task_id).await
    }

    async fn fetch_written(pool: &MySqlPool, task_id: i32) -> AppResult<Task> {
        Self::find_by_id(pool, task_id)
            .await?
            .ok_or(AppError::NotFound {
                entity: "Task",
                id: task_id,
            })
    }
}
