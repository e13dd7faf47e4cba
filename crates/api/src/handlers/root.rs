//! Handler for the API root document.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use bizdesk_db::repositories::AppConfigRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

/// Resource index advertised by the root document.
const ENDPOINTS: &[(&str, &str)] = &[
    ("auth", "/api/v1/auth/login"),
    ("clients", "/api/v1/clients"),
    ("projects", "/api/v1/projects"),
    ("tasks", "/api/v1/tasks"),
    ("app_config", "/api/v1/app-config"),
    ("metrics", "/api/v1/admin/metrics"),
];

#[derive(Debug, Serialize)]
pub struct ApiRoot {
    pub app_name: String,
    pub version: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

/// GET /api/v1
pub async fn index(State(state): State<AppState>) -> AppResult<Json<ApiRoot>> {
    let config = AppConfigRepo::get(&state.pool).await?;
    Ok(Json(ApiRoot {
        app_name: config.app_name,
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS.iter().copied().collect(),
    }))
}
