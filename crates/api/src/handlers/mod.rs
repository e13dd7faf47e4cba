pub mod app_config;
pub mod auth;
pub mod client;
pub mod metrics;
pub mod project;
pub mod root;
pub mod task;
