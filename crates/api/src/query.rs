//! Query-string parameter types shared by list handlers.

use bizdesk_core::status::TaskStatus;
use bizdesk_core::types::DbId;
use serde::Deserialize;

use crate::error::AppResult;

/// `?include_archived=true` on client listings.
#[derive(Debug, Default, Deserialize)]
pub struct IncludeArchivedParams {
    #[serde(default)]
    pub include_archived: bool,
}

/// Filters for `GET /projects`.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectListParams {
    pub client_id: Option<DbId>,
}

/// Filters for `GET /tasks`.
///
/// `status` is kept as text so an unknown value yields a
/// `VALIDATION_ERROR` body listing the accepted values.
#[derive(Debug, Default, Deserialize)]
pub struct TaskListParams {
    pub project_id: Option<DbId>,
    pub status: Option<String>,
}

impl TaskListParams {
    pub fn status(&self) -> AppResult<Option<TaskStatus>> {
        match self.status.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Ok(Some(raw.parse()?)),
            _ => Ok(None),
        }
    }
}
