//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod app_config_repo;
pub mod client_repo;
pub mod cost_repo;
pub mod entity_repo;
pub mod metrics_repo;
pub mod project_repo;
pub mod task_repo;
pub mod user_repo;

pub use app_config_repo::AppConfigRepo;
pub use client_repo::ClientRepo;
pub use cost_repo::CostRepo;
pub use entity_repo::EntityRepo;
pub use metrics_repo::MetricsRepo;
pub use project_repo::ProjectRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
