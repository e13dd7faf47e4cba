//! Route definitions for the `/clients` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::client;
use crate::state::AppState;

/// Routes mounted at `/clients`.
///
/// ```text
/// GET    /                 -> list (?include_archived=true)
/// POST   /                 -> create
/// GET    /{id}             -> get_by_id
/// PATCH  /{id}             -> update
/// DELETE /{id}             -> delete (archive)
/// POST   /{id}/restore     -> restore
/// GET    /{id}/projects    -> list_projects
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(client::list).post(client::create))
        .route(
            "/{id}",
            get(client::get_by_id)
                .patch(client::update)
                .delete(client::delete),
        )
        .route("/{id}/restore", post(client::restore))
        .route("/{id}/projects", get(client::list_projects))
}
