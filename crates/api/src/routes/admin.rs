//! Administrator-only reporting routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::metrics;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /metrics    -> report (?start_date=&end_date=&client_id=&time_grouping=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/metrics", get(metrics::report))
}
