//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bizdesk_core::error::CoreError;
use bizdesk_core::types::DbId;
use bizdesk_core::validation::{validate_cost, validate_required, validate_video_url};
use bizdesk_db::models::client::Client;
use bizdesk_db::models::project::{
    CreateProject, Project, ProjectResponse, ProjectWithClient, UpdateProject,
};
use bizdesk_db::models::task::TaskResponse;
use bizdesk_db::repositories::{CostRepo, EntityRepo, ProjectRepo, TaskRepo};
use bizdesk_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::query::ProjectListParams;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

/// GET /api/v1/projects
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<Vec<ProjectResponse>>> {
    let rows = ProjectRepo::list_with_client(&state.pool, params.client_id).await?;
    Ok(Json(project_responses(&state.pool, rows).await?))
}

/// POST /api/v1/projects
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<ProjectResponse>)> {
    validate_required("name", &input.name)?;
    validate_cost("initial_cost", input.initial_cost)?;
    if let Some(url) = &input.video_url {
        validate_video_url("video_url", url)?;
    }
    ensure_client_exists(&state.pool, input.client_id).await?;

    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(
        project_id = project.id,
        client_id = project.client_id,
        created_by = user.user_id,
        "Project created"
    );

    let response = load_response(&state.pool, project.id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ProjectResponse>> {
    Ok(Json(load_response(&state.pool, id).await?))
}

/// PATCH /api/v1/projects/{id}
pub async fn update(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<ProjectResponse>> {
    if let Some(name) = &input.name {
        validate_required("name", name)?;
    }
    validate_cost("initial_cost", input.initial_cost.flatten())?;
    if let Some(Some(url)) = &input.video_url {
        validate_video_url("video_url", url)?;
    }
    if let Some(client_id) = input.client_id {
        ensure_client_exists(&state.pool, client_id).await?;
    }

    ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(load_response(&state.pool, id).await?))
}

/// DELETE /api/v1/projects/{id}
///
/// Removes the project together with its tasks.
pub async fn delete(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let outcome = EntityRepo::delete::<Project>(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(project_id = id, ?outcome, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/projects/{id}/tasks
///
/// Tasks of one project in creation order.
pub async fn list_tasks(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<TaskResponse>>> {
    if !EntityRepo::exists::<Project>(&state.pool, id).await? {
        return Err(not_found(id));
    }
    let rows = TaskRepo::list_for_project(&state.pool, id).await?;
    Ok(Json(rows.into_iter().map(TaskResponse::from).collect()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_client_exists(pool: &DbPool, client_id: DbId) -> AppResult<()> {
    if EntityRepo::exists::<Client>(pool, client_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id: client_id,
        }))
    }
}

async fn load_response(pool: &DbPool, id: DbId) -> AppResult<ProjectResponse> {
    let row = ProjectRepo::find_with_client(pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let mut responses = project_responses(pool, vec![row]).await?;
    responses.pop().ok_or_else(|| not_found(id))
}

/// Attach derived costs to each row, preserving order.
pub(crate) async fn project_responses(
    pool: &DbPool,
    rows: Vec<ProjectWithClient>,
) -> AppResult<Vec<ProjectResponse>> {
    let keys: Vec<(DbId, _)> = rows
        .iter()
        .map(|r| (r.project.id, r.project.initial_cost))
        .collect();
    let mut summaries = CostRepo::project_summaries(pool, &keys).await?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let summary = summaries.remove(&row.project.id).unwrap_or_default();
            ProjectResponse::new(row, summary)
        })
        .collect())
}
