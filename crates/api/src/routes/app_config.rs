use axum::routing::get;
use axum::Router;

use crate::handlers::app_config;
use crate::state::AppState;

/// Routes mounted at `/app-config`.
///
/// ```text
/// GET    /    -> get (admin only)
/// PATCH  /    -> update (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(app_config::get).patch(app_config::update))
}
