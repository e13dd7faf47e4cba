pub mod admin;
pub mod app_config;
pub mod auth;
pub mod clients;
pub mod health;
pub mod projects;
pub mod tasks;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                  API root document (public)
///
/// /auth/login                        login (public)
///
/// /clients                           list, create (create: admin only)
/// /clients/{id}                      get, update, archive (writes: admin only)
/// /clients/{id}/restore              un-archive (admin only)
/// /clients/{id}/projects             projects of one client
///
/// /projects                          list, create
/// /projects/{id}                     get, update, delete
/// /projects/{id}/tasks               tasks of one project
///
/// /tasks                             list, create
/// /tasks/{id}                        get, update, delete
///
/// /app-config                        get, update (admin only)
///
/// /admin/metrics                     metrics report (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root::index))
        .nest("/auth", auth::router())
        .nest("/clients", clients::router())
        .nest("/projects", projects::router())
        .nest("/tasks", tasks::router())
        .nest("/app-config", app_config::router())
        .nest("/admin", admin::router())
}
