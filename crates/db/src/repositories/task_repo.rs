//! Repository for the `tasks` table.

use bizdesk_core::status::TaskStatus;
use bizdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, TaskWithProject, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, title, description, due_date, status, cost, attachment, \
                       video_url, created_at, updated_at";

/// Task columns qualified with `t.` plus the owning project's name.
const JOINED_COLUMNS: &str = "t.id, t.project_id, t.title, t.description, t.due_date, t.status, \
                              t.cost, t.attachment, t.video_url, t.created_at, t.updated_at, \
                              p.name AS project_name";

/// Provides CRUD operations for tasks. Deletes go through
/// [`EntityRepo`](crate::repositories::EntityRepo).
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row. Missing `status`
    /// falls back to PENDING.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks
                (project_id, title, description, due_date, status, cost, attachment, video_url)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'PENDING'), $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(input.description.is_some())
            .bind(input.description.as_deref())
            .bind(input.due_date.is_some())
            .bind(input.due_date)
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.cost.is_some())
            .bind(input.cost)
            .bind(input.attachment.is_some())
            .bind(input.attachment.as_deref())
            .bind(input.video_url.is_some())
            .bind(input.video_url.as_deref())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_with_project(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TaskWithProject>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM tasks t JOIN projects p ON p.id = t.project_id
             WHERE t.id = $1"
        );
        sqlx::query_as::<_, TaskWithProject>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tasks by due date (undated last), then creation time.
    pub async fn list_with_project(
        pool: &PgPool,
        project_id: Option<DbId>,
        status: Option<TaskStatus>,
    ) -> Result<Vec<TaskWithProject>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM tasks t JOIN projects p ON p.id = t.project_id
             WHERE ($1::BIGINT IS NULL OR t.project_id = $1)
               AND ($2::TEXT IS NULL OR t.status = $2)
             ORDER BY t.due_date ASC NULLS LAST, t.created_at ASC, t.id ASC"
        );
        sqlx::query_as::<_, TaskWithProject>(&query)
            .bind(project_id)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(pool)
            .await
    }

    /// Tasks of one project in creation order.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<TaskWithProject>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM tasks t JOIN projects p ON p.id = t.project_id
             WHERE t.project_id = $1
             ORDER BY t.created_at ASC, t.id ASC"
        );
        sqlx::query_as::<_, TaskWithProject>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a task. Only non-`None` fields in `input` are applied;
    /// `Some(None)` clears a nullable column.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET
                project_id = COALESCE($2, project_id),
                title = COALESCE($3, title),
                description = CASE WHEN $4 THEN $5 ELSE description END,
                due_date = CASE WHEN $6 THEN $7 ELSE due_date END,
                status = COALESCE($8, status),
                cost = CASE WHEN $9 THEN $10 ELSE cost END,
                attachment = CASE WHEN $11 THEN $12 ELSE attachment END,
                video_url = CASE WHEN $13 THEN $14 ELSE video_url END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(input.project_id)
            .bind(&input.title)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(Option::as_deref))
            .bind(input.due_date.is_some())
            .bind(input.due_date.flatten())
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.cost.is_some())
            .bind(input.cost.flatten())
            .bind(input.attachment.is_some())
            .bind(input.attachment.as_ref().and_then(Option::as_deref))
            .bind(input.video_url.is_some())
            .bind(input.video_url.as_ref().and_then(Option::as_deref))
            .fetch_optional(pool)
            .await
    }
}
