//! Handler for the administrator metrics report.
//!
//! Parameters are validated before any data is read; the report itself is
//! computed by [`build_report`] over rows loaded for the requested window.

use axum::extract::{Query, State};
use axum::Json;
use bizdesk_core::error::CoreError;
use bizdesk_core::metrics::{build_report, MetricsReport, ReportRequest};
use bizdesk_db::models::client::Client;
use bizdesk_db::repositories::{EntityRepo, MetricsRepo};
use chrono::Utc;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Raw query parameters for `GET /admin/metrics`.
///
/// Kept as strings so malformed values surface as `INVALID_ARGUMENT`
/// rather than a generic extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct MetricsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub client_id: Option<String>,
    pub time_grouping: Option<String>,
}

/// GET /api/v1/admin/metrics
pub async fn report(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<MetricsQuery>,
) -> AppResult<Json<MetricsReport>> {
    let request = ReportRequest::parse(
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        query.client_id.as_deref(),
        query.time_grouping.as_deref(),
        Utc::now().date_naive(),
    )?;

    if let Some(client_id) = request.client_id {
        if !EntityRepo::exists::<Client>(&state.pool, client_id).await? {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Client",
                id: client_id,
            }));
        }
    }

    let projects =
        MetricsRepo::projects_in_period(&state.pool, &request.period, request.client_id).await?;
    let tasks =
        MetricsRepo::tasks_in_period(&state.pool, &request.period, request.client_id).await?;

    let report = build_report(&request, &projects, &tasks);
    tracing::debug!(
        admin_id = admin.user_id,
        start_date = %request.period.start_date,
        end_date = %request.period.end_date,
        client_id = ?request.client_id,
        grouping = request.time_grouping.as_str(),
        projects = projects.len(),
        tasks = tasks.len(),
        "Metrics report built"
    );
    Ok(Json(report))
}
