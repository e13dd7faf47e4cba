use bizdesk_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The single `app_configuration` row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AppConfig {
    #[serde(skip)]
    pub id: i16,
    pub app_name: String,
    pub favicon_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating the configuration. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAppConfig {
    pub app_name: Option<String>,
    pub favicon_url: Option<String>,
}
