//! Window loads for the admin metrics report.

use bizdesk_core::metrics::{ProjectFact, ReportPeriod, TaskFact};
use bizdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::metrics::{ProjectFactRow, TaskFactRow};

pub struct MetricsRepo;

impl MetricsRepo {
    /// Projects created inside `period`, optionally for one client, by id.
    ///
    /// Archived clients' projects are included.
    pub async fn projects_in_period(
        pool: &PgPool,
        period: &ReportPeriod,
        client_id: Option<DbId>,
    ) -> Result<Vec<ProjectFact>, sqlx::Error> {
        let (from, to) = period.bounds();
        let rows = sqlx::query_as::<_, ProjectFactRow>(
            "SELECT p.id, p.client_id, c.business_name AS client_name, p.name, p.status,
                    p.initial_cost, p.created_at
             FROM projects p JOIN clients c ON c.id = p.client_id
             WHERE p.created_at >= $1 AND p.created_at < $2
               AND ($3::BIGINT IS NULL OR p.client_id = $3)
             ORDER BY p.id ASC",
        )
        .bind(from)
        .bind(to)
        .bind(client_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(ProjectFact::from).collect())
    }

    /// Tasks created inside `period`, optionally for one client, by id.
    ///
    /// The parent project's own creation date plays no part.
    pub async fn tasks_in_period(
        pool: &PgPool,
        period: &ReportPeriod,
        client_id: Option<DbId>,
    ) -> Result<Vec<TaskFact>, sqlx::Error> {
        let (from, to) = period.bounds();
        let rows = sqlx::query_as::<_, TaskFactRow>(
            "SELECT t.id, t.project_id, p.client_id, t.status, t.cost, t.created_at
             FROM tasks t JOIN projects p ON p.id = t.project_id
             WHERE t.created_at >= $1 AND t.created_at < $2
               AND ($3::BIGINT IS NULL OR p.client_id = $3)
             ORDER BY t.id ASC",
        )
        .bind(from)
        .bind(to)
        .bind(client_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(TaskFact::from).collect())
    }
}
