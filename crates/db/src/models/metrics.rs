//! Rows feeding the admin metrics report.

use bizdesk_core::metrics::{ProjectFact, TaskFact};
use bizdesk_core::status::{ProjectStatus, TaskStatus};
use bizdesk_core::types::{DbId, Money, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ProjectFactRow {
    pub id: DbId,
    pub client_id: DbId,
    pub client_name: String,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub initial_cost: Option<Money>,
    pub created_at: Timestamp,
}

impl From<ProjectFactRow> for ProjectFact {
    fn from(row: ProjectFactRow) -> Self {
        ProjectFact {
            id: row.id,
            client_id: row.client_id,
            client_name: row.client_name,
            name: row.name,
            status: row.status,
            initial_cost: row.initial_cost,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct TaskFactRow {
    pub id: DbId,
    pub project_id: DbId,
    pub client_id: DbId,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    pub cost: Option<Money>,
    pub created_at: Timestamp,
}

impl From<TaskFactRow> for TaskFact {
    fn from(row: TaskFactRow) -> Self {
        TaskFact {
            id: row.id,
            project_id: row.project_id,
            client_id: row.client_id,
            status: row.status,
            cost: row.cost,
            created_at: row.created_at,
        }
    }
}
