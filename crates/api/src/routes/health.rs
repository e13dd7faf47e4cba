use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// `GET /health` payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers and carries every bundled migration,
    /// `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Newest migration applied to the database.
    pub schema_version: Option<i64>,
    /// Newest migration bundled with this build.
    pub expected_schema_version: Option<i64>,
}

impl HealthResponse {
    fn new(applied: Result<Option<i64>, sqlx::Error>) -> Self {
        let expected = bizdesk_db::latest_migration();
        let db_healthy = applied.is_ok();
        let schema_version = applied.ok().flatten();
        let schema_current = db_healthy && schema_version.is_some() && schema_version >= expected;

        Self {
            status: if schema_current { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
            schema_version,
            expected_schema_version: expected,
        }
    }
}

/// Unauthenticated; answers 503 when the database is unreachable.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let applied = bizdesk_db::schema_version(&state.pool).await;
    if let Err(e) = &applied {
        tracing::warn!(error = %e, "Health check could not read the schema version");
    }

    let body = HealthResponse::new(applied);
    let code = if body.db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(body))
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
