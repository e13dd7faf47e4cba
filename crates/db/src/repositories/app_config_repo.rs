//! Accessor for the single `app_configuration` row.

use bizdesk_core::app_config::{APP_CONFIG_ID, DEFAULT_APP_NAME};
use sqlx::PgPool;

use crate::models::app_config::{AppConfig, UpdateAppConfig};

const COLUMNS: &str = "id, app_name, favicon_url, created_at, updated_at";

pub struct AppConfigRepo;

impl AppConfigRepo {
    /// Return the configuration, inserting the defaults on first access.
    ///
    /// Concurrent first reads race on the insert; `ON CONFLICT DO NOTHING`
    /// makes every one of them see the same row.
    pub async fn get(pool: &PgPool) -> Result<AppConfig, sqlx::Error> {
        sqlx::query(
            "INSERT INTO app_configuration (id, app_name) VALUES ($1, $2)
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(APP_CONFIG_ID)
        .bind(DEFAULT_APP_NAME)
        .execute(pool)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM app_configuration WHERE id = $1");
        sqlx::query_as::<_, AppConfig>(&query)
            .bind(APP_CONFIG_ID)
            .fetch_one(pool)
            .await
    }

    /// Apply the non-`None` fields, creating the row if needed. The last
    /// writer wins.
    pub async fn update(pool: &PgPool, input: &UpdateAppConfig) -> Result<AppConfig, sqlx::Error> {
        let query = format!(
            "INSERT INTO app_configuration (id, app_name, favicon_url)
             VALUES ($1, COALESCE($2, $4), $3)
             ON CONFLICT (id) DO UPDATE SET
                app_name = COALESCE($2, app_configuration.app_name),
                favicon_url = COALESCE($3, app_configuration.favicon_url)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AppConfig>(&query)
            .bind(APP_CONFIG_ID)
            .bind(&input.app_name)
            .bind(&input.favicon_url)
            .bind(DEFAULT_APP_NAME)
            .fetch_one(pool)
            .await
    }
}
