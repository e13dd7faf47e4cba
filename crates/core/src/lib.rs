pub mod app_config;
pub mod costs;
pub mod deletion;
pub mod error;
pub mod metrics;
pub mod roles;
pub mod status;
pub mod types;
pub mod validation;
