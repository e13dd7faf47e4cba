//! Repository for the `projects` table.

use bizdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectWithClient, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, name, description, start_date, initial_cost, currency, \
                       status, attachment, video_url, created_at, updated_at";

/// Project columns qualified with `p.` plus the owning client's name.
const JOINED_COLUMNS: &str = "p.id, p.client_id, p.name, p.description, p.start_date, \
                              p.initial_cost, p.currency, p.status, p.attachment, p.video_url, \
                              p.created_at, p.updated_at, c.business_name AS client_business_name";

/// Provides CRUD operations for projects. Deletes go through
/// [`EntityRepo`](crate::repositories::EntityRepo).
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// Missing `currency` and `status` fall back to USD and NEW.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                (client_id, name, description, start_date, initial_cost, currency, status,
                 attachment, video_url)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'USD'), COALESCE($7, 'NEW'), $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(input.client_id)
            .bind(&input.name)
            .bind(input.description.is_some())
            .bind(input.description.as_deref())
            .bind(input.start_date.is_some())
            .bind(input.start_date)
            .bind(input.initial_cost.is_some())
            .bind(input.initial_cost)
            .bind(input.currency.map(|c| c.as_str()))
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.attachment.is_some())
            .bind(input.attachment.as_deref())
            .bind(input.video_url.is_some())
            .bind(input.video_url.as_deref())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project together with its client's business name.
    pub async fn find_with_client(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectWithClient>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM projects p JOIN clients c ON c.id = p.client_id
             WHERE p.id = $1"
        );
        sqlx::query_as::<_, ProjectWithClient>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List projects newest first, optionally restricted to one client.
    pub async fn list_with_client(
        pool: &PgPool,
        client_id: Option<DbId>,
    ) -> Result<Vec<ProjectWithClient>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM projects p JOIN clients c ON c.id = p.client_id
             WHERE ($1::BIGINT IS NULL OR p.client_id = $1)
             ORDER BY p.created_at DESC, p.id DESC"
        );
        sqlx::query_as::<_, ProjectWithClient>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// Update a project. Only non-`None` fields in `input` are applied;
    /// `Some(None)` clears a nullable column.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                client_id = COALESCE($2, client_id),
                name = COALESCE($3, name),
                description = CASE WHEN $4 THEN $5 ELSE description END,
                start_date = CASE WHEN $6 THEN $7 ELSE start_date END,
                initial_cost = CASE WHEN $8 THEN $9 ELSE initial_cost END,
                currency = COALESCE($10, currency),
                status = COALESCE($11, status),
                attachment = CASE WHEN $12 THEN $13 ELSE attachment END,
                video_url = CASE WHEN $14 THEN $15 ELSE video_url END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(input.client_id)
            .bind(&input.name)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(Option::as_deref))
            .bind(input.start_date.is_some())
            .bind(input.start_date.flatten())
            .bind(input.initial_cost.is_some())
            .bind(input.initial_cost.flatten())
            .bind(input.currency.map(|c| c.as_str()))
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.attachment.is_some())
            .bind(input.attachment.as_ref().and_then(Option::as_deref))
            .bind(input.video_url.is_some())
            .bind(input.video_url.as_ref().and_then(Option::as_deref))
            .fetch_optional(pool)
            .await
    }
}
