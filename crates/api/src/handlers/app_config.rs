//! Handlers for the site-wide `/app-config` singleton.

use axum::extract::State;
use axum::Json;
use bizdesk_core::app_config::{validate_app_name, validate_favicon_url};
use bizdesk_db::models::app_config::{AppConfig, UpdateAppConfig};
use bizdesk_db::repositories::AppConfigRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/app-config
///
/// Creates the row with defaults on first access.
pub async fn get(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<AppConfig>> {
    Ok(Json(AppConfigRepo::get(&state.pool).await?))
}

/// PATCH /api/v1/app-config
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(mut input): Json<UpdateAppConfig>,
) -> AppResult<Json<AppConfig>> {
    if let Some(name) = &input.app_name {
        validate_app_name(name)?;
    }
    if let Some(url) = &input.favicon_url {
        validate_favicon_url(url)?;
    }
    input.app_name = input.app_name.map(|n| n.trim().to_string());

    let config = AppConfigRepo::update(&state.pool, &input).await?;
    tracing::info!(
        updated_by = admin.user_id,
        app_name = %config.app_name,
        "App configuration updated"
    );
    Ok(Json(config))
}
