//! Handlers for the `/clients` resource.
//!
//! Clients are archived rather than deleted; archived rows stay reachable
//! by id and through `?include_archived=true`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bizdesk_core::error::CoreError;
use bizdesk_core::roles::ROLE_CLIENT;
use bizdesk_core::types::DbId;
use bizdesk_core::validation::{
    validate_email, validate_password, validate_phone, validate_required, validate_username,
};
use bizdesk_db::models::client::{
    Client, ClientResponse, ClientWithUser, CreateClient, UpdateClient,
};
use bizdesk_db::models::project::ProjectResponse;
use bizdesk_db::models::user::CreateUser;
use bizdesk_db::repositories::{ClientRepo, CostRepo, EntityRepo, ProjectRepo};
use bizdesk_db::DbPool;
use serde::Deserialize;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::handlers::project::project_responses;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::IncludeArchivedParams;
use crate::state::AppState;

/// Request body for `POST /clients`: the client plus its login account.
#[derive(Debug, Deserialize)]
pub struct CreateClientRequest {
    pub username: String,
    pub email: String,
    /// Write-only; stored as an Argon2id hash.
    pub password: String,
    pub business_name: String,
    pub contact_name: String,
    pub phone: Option<String>,
    pub internal_notes: Option<String>,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Client",
        id,
    })
}

/// GET /api/v1/clients
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<IncludeArchivedParams>,
) -> AppResult<Json<Vec<ClientResponse>>> {
    let rows = ClientRepo::list_with_user(&state.pool, params.include_archived).await?;
    Ok(Json(client_responses(&state.pool, rows).await?))
}

/// POST /api/v1/clients
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateClientRequest>,
) -> AppResult<(StatusCode, Json<ClientResponse>)> {
    validate_username(&input.username)?;
    validate_email(&input.email)?;
    validate_password(&input.password)?;
    validate_required("business_name", &input.business_name)?;
    validate_required("contact_name", &input.contact_name)?;
    if let Some(phone) = &input.phone {
        validate_phone(phone)?;
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = CreateUser {
        username: input.username,
        email: input.email,
        password_hash,
        role: ROLE_CLIENT.to_string(),
    };
    let client = CreateClient {
        business_name: input.business_name.trim().to_string(),
        contact_name: input.contact_name.trim().to_string(),
        phone: input.phone,
        internal_notes: input.internal_notes,
    };

    let created = ClientRepo::create_with_user(&state.pool, &user, &client).await?;
    tracing::info!(client_id = created.id, created_by = admin.user_id, "Client created");

    let response = load_response(&state.pool, created.id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/clients/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ClientResponse>> {
    Ok(Json(load_response(&state.pool, id).await?))
}

/// PATCH /api/v1/clients/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateClient>,
) -> AppResult<Json<ClientResponse>> {
    if let Some(name) = &input.business_name {
        validate_required("business_name", name)?;
    }
    if let Some(name) = &input.contact_name {
        validate_required("contact_name", name)?;
    }
    if let Some(Some(phone)) = &input.phone {
        validate_phone(phone)?;
    }
    if let Some(email) = &input.email {
        validate_email(email)?;
    }

    ClientRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(load_response(&state.pool, id).await?))
}

/// DELETE /api/v1/clients/{id}
///
/// Archives the client. Its projects and tasks are kept.
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let outcome = EntityRepo::delete::<Client>(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(client_id = id, ?outcome, "Client deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/clients/{id}/restore
pub async fn restore(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ClientResponse>> {
    if ClientRepo::restore(&state.pool, id).await? {
        tracing::info!(client_id = id, "Client restored");
    }
    // Restoring an active client is a no-op; load_response reports unknown ids.
    Ok(Json(load_response(&state.pool, id).await?))
}

/// GET /api/v1/clients/{id}/projects
pub async fn list_projects(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<ProjectResponse>>> {
    if !EntityRepo::exists::<Client>(&state.pool, id).await? {
        return Err(not_found(id));
    }
    let rows = ProjectRepo::list_with_client(&state.pool, Some(id)).await?;
    Ok(Json(project_responses(&state.pool, rows).await?))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn load_response(pool: &DbPool, id: DbId) -> AppResult<ClientResponse> {
    let row = ClientRepo::find_with_user(pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let mut responses = client_responses(pool, vec![row]).await?;
    responses.pop().ok_or_else(|| not_found(id))
}

/// Attach derived costs to each row, preserving order.
async fn client_responses(
    pool: &DbPool,
    rows: Vec<ClientWithUser>,
) -> AppResult<Vec<ClientResponse>> {
    let ids: Vec<DbId> = rows.iter().map(|r| r.client.id).collect();
    let mut summaries = CostRepo::client_summaries(pool, &ids).await?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let summary = summaries.remove(&row.client.id).unwrap_or_default();
            ClientResponse::new(row, summary)
        })
        .collect())
}
