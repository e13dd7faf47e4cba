//! Handlers for the `/tasks` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bizdesk_core::error::CoreError;
use bizdesk_core::types::DbId;
use bizdesk_core::validation::{validate_cost, validate_required, validate_video_url};
use bizdesk_db::models::project::Project;
use bizdesk_db::models::task::{CreateTask, Task, TaskResponse, UpdateTask};
use bizdesk_db::repositories::{EntityRepo, TaskRepo};
use bizdesk_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::query::TaskListParams;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Task", id })
}

/// GET /api/v1/tasks
///
/// Ordered by due date (undated last), then creation time.
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<TaskListParams>,
) -> AppResult<Json<Vec<TaskResponse>>> {
    let status = params.status()?;
    let rows = TaskRepo::list_with_project(&state.pool, params.project_id, status).await?;
    Ok(Json(rows.into_iter().map(TaskResponse::from).collect()))
}

/// POST /api/v1/tasks
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<TaskResponse>)> {
    validate_required("title", &input.title)?;
    validate_cost("cost", input.cost)?;
    if let Some(url) = &input.video_url {
        validate_video_url("video_url", url)?;
    }
    ensure_project_exists(&state.pool, input.project_id).await?;

    let task = TaskRepo::create(&state.pool, &input).await?;
    tracing::info!(
        task_id = task.id,
        project_id = task.project_id,
        created_by = user.user_id,
        "Task created"
    );

    let response = load_response(&state.pool, task.id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/tasks/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<TaskResponse>> {
    Ok(Json(load_response(&state.pool, id).await?))
}

/// PATCH /api/v1/tasks/{id}
pub async fn update(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<TaskResponse>> {
    if let Some(title) = &input.title {
        validate_required("title", title)?;
    }
    validate_cost("cost", input.cost.flatten())?;
    if let Some(Some(url)) = &input.video_url {
        validate_video_url("video_url", url)?;
    }
    if let Some(project_id) = input.project_id {
        ensure_project_exists(&state.pool, project_id).await?;
    }

    TaskRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(load_response(&state.pool, id).await?))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    EntityRepo::delete::<Task>(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(task_id = id, "Task deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_project_exists(pool: &DbPool, project_id: DbId) -> AppResult<()> {
    if EntityRepo::exists::<Project>(pool, project_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id: project_id,
        }))
    }
}

async fn load_response(pool: &DbPool, id: DbId) -> AppResult<TaskResponse> {
    TaskRepo::find_with_project(pool, id)
        .await?
        .map(TaskResponse::from)
        .ok_or_else(|| not_found(id))
}
