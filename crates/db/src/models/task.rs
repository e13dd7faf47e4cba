//! Task entity model and DTOs.

use bizdesk_core::deletion::{DeletionPolicy, Entity};
use bizdesk_core::status::TaskStatus;
use bizdesk_core::types::{DbId, Money, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub cost: Option<Money>,
    pub attachment: Option<String>,
    pub video_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entity for Task {
    const NAME: &'static str = "Task";
    const TABLE: &'static str = "tasks";
    const DELETION: DeletionPolicy = DeletionPolicy::Cascade;
}

/// A task row joined with its project's name.
#[derive(Debug, Clone, FromRow)]
pub struct TaskWithProject {
    #[sqlx(flatten)]
    pub task: Task,
    pub project_name: String,
}

/// DTO for creating a task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    /// Defaults to PENDING if omitted.
    pub status: Option<TaskStatus>,
    pub cost: Option<Money>,
    pub attachment: Option<String>,
    pub video_url: Option<String>,
}

/// DTO for updating a task. Absent fields are left unchanged;
/// `null` clears a nullable column.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub project_id: Option<DbId>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub due_date: Option<Option<NaiveDate>>,
    pub status: Option<TaskStatus>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub cost: Option<Option<Money>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub attachment: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub video_url: Option<Option<String>>,
}

/// Nested reference to the owning project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRef {
    pub id: DbId,
    pub name: String,
}

/// Task as rendered by the API.
#[derive(Debug, Clone, Serialize)]
pub struct TaskResponse {
    pub id: DbId,
    pub project: ProjectRef,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: TaskStatus,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub cost: Option<Money>,
    pub attachment: Option<String>,
    pub video_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<TaskWithProject> for TaskResponse {
    fn from(row: TaskWithProject) -> Self {
        let TaskWithProject { task, project_name } = row;
        Self {
            id: task.id,
            project: ProjectRef {
                id: task.project_id,
                name: project_name,
            },
            title: task.title,
            description: task.description,
            due_date: task.due_date,
            status: task.status,
            cost: task.cost,
            attachment: task.attachment,
            video_url: task.video_url,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}
