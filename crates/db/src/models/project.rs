//! Project entity model and DTOs.

use bizdesk_core::costs::ProjectSummary;
use bizdesk_core::deletion::{DeletionPolicy, Entity};
use bizdesk_core::status::{Currency, ProjectStatus};
use bizdesk_core::types::{DbId, Money, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub client_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub initial_cost: Option<Money>,
    #[sqlx(try_from = "String")]
    pub currency: Currency,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub attachment: Option<String>,
    pub video_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entity for Project {
    const NAME: &'static str = "Project";
    const TABLE: &'static str = "projects";
    const DELETION: DeletionPolicy = DeletionPolicy::Cascade;
}

/// A project row joined with its client's name.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectWithClient {
    #[sqlx(flatten)]
    pub project: Project,
    pub client_business_name: String,
}

/// DTO for creating a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub client_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub initial_cost: Option<Money>,
    /// Defaults to USD if omitted.
    pub currency: Option<Currency>,
    /// Defaults to NEW if omitted.
    pub status: Option<ProjectStatus>,
    pub attachment: Option<String>,
    pub video_url: Option<String>,
}

/// DTO for updating a project. Absent fields are left unchanged;
/// `null` clears a nullable column.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub client_id: Option<DbId>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub start_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub initial_cost: Option<Option<Money>>,
    pub currency: Option<Currency>,
    pub status: Option<ProjectStatus>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub attachment: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub video_url: Option<Option<String>>,
}

/// Nested reference to the owning client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientRef {
    pub id: DbId,
    pub business_name: String,
}

/// Project as rendered by the API.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectResponse {
    pub id: DbId,
    pub client: ClientRef,
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub currency: Currency,
    pub status: ProjectStatus,
    pub attachment: Option<String>,
    pub video_url: Option<String>,
    /// `initial_cost` (null read as zero), `extra_cost`, `total_cost`
    /// and `task_count`.
    #[serde(flatten)]
    pub summary: ProjectSummary,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProjectResponse {
    pub fn new(row: ProjectWithClient, summary: ProjectSummary) -> Self {
        let ProjectWithClient {
            project,
            client_business_name,
        } = row;
        Self {
            id: project.id,
            client: ClientRef {
                id: project.client_id,
                business_name: client_business_name,
            },
            name: project.name,
            description: project.description,
            start_date: project.start_date,
            currency: project.currency,
            status: project.status,
            attachment: project.attachment,
            video_url: project.video_url,
            summary,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}
