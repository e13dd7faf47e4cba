//! Loads the raw amounts behind derived client and project costs.
//!
//! The SQL only gathers nullable amounts per owner; summing happens in
//! `bizdesk_core::costs` so null handling and decimal precision live in
//! one place.

use std::collections::HashMap;

use bizdesk_core::costs::{ClientSummary, ProjectSummary};
use bizdesk_core::types::{DbId, Money};
use sqlx::PgPool;

use crate::models::cost::CostRow;

pub struct CostRepo;

impl CostRepo {
    /// `initial_cost` of every project, keyed by owning client.
    pub async fn project_initial_costs_by_client(
        pool: &PgPool,
        client_ids: &[DbId],
    ) -> Result<Vec<CostRow>, sqlx::Error> {
        sqlx::query_as::<_, CostRow>(
            "SELECT client_id AS owner_id, initial_cost AS amount
             FROM projects
             WHERE client_id = ANY($1)",
        )
        .bind(client_ids)
        .fetch_all(pool)
        .await
    }

    /// `cost` of every task, keyed by the client owning its project.
    pub async fn task_costs_by_client(
        pool: &PgPool,
        client_ids: &[DbId],
    ) -> Result<Vec<CostRow>, sqlx::Error> {
        sqlx::query_as::<_, CostRow>(
            "SELECT p.client_id AS owner_id, t.cost AS amount
             FROM tasks t JOIN projects p ON p.id = t.project_id
             WHERE p.client_id = ANY($1)",
        )
        .bind(client_ids)
        .fetch_all(pool)
        .await
    }

    /// `cost` of every task, keyed by project.
    pub async fn task_costs_by_project(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<Vec<CostRow>, sqlx::Error> {
        sqlx::query_as::<_, CostRow>(
            "SELECT project_id AS owner_id, cost AS amount
             FROM tasks
             WHERE project_id = ANY($1)",
        )
        .bind(project_ids)
        .fetch_all(pool)
        .await
    }

    /// Derived costs and counts for each requested client. Clients without
    /// projects map to an all-zero summary.
    pub async fn client_summaries(
        pool: &PgPool,
        client_ids: &[DbId],
    ) -> Result<HashMap<DbId, ClientSummary>, sqlx::Error> {
        let initial_rows = Self::project_initial_costs_by_client(pool, client_ids).await?;
        let task_rows = Self::task_costs_by_client(pool, client_ids).await?;
        let mut initial = group_by_owner(initial_rows);
        let mut tasks = group_by_owner(task_rows);

        Ok(client_ids
            .iter()
            .map(|id| {
                let summary = ClientSummary::compute(
                    initial.remove(id).unwrap_or_default(),
                    tasks.remove(id).unwrap_or_default(),
                );
                (*id, summary)
            })
            .collect())
    }

    /// Derived costs and task counts for each `(project_id, initial_cost)`.
    pub async fn project_summaries(
        pool: &PgPool,
        projects: &[(DbId, Option<Money>)],
    ) -> Result<HashMap<DbId, ProjectSummary>, sqlx::Error> {
        let ids: Vec<DbId> = projects.iter().map(|(id, _)| *id).collect();
        let mut tasks = group_by_owner(Self::task_costs_by_project(pool, &ids).await?);

        Ok(projects
            .iter()
            .map(|(id, initial_cost)| {
                let summary =
                    ProjectSummary::compute(*initial_cost, tasks.remove(id).unwrap_or_default());
                (*id, summary)
            })
            .collect())
    }
}

fn group_by_owner(rows: Vec<CostRow>) -> HashMap<DbId, Vec<Option<Money>>> {
    let mut grouped: HashMap<DbId, Vec<Option<Money>>> = HashMap::new();
    for row in rows {
        grouped.entry(row.owner_id).or_default().push(row.amount);
    }
    grouped
}
