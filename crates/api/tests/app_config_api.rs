//! HTTP-level tests for the application configuration singleton.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, patch_json_auth};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn first_read_creates_defaults(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool.clone());

    let response = get_auth(app, "/api/v1/app-config", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["app_name"], "Portal Sandoval");
    assert!(json["favicon_url"].is_null());
    assert!(json.get("id").is_none());

    let (rows,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM app_configuration")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_is_partial_and_visible_on_root(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "app_name": "  Bizdesk  " });
    let response = patch_json_auth(app.clone(), "/api/v1/app-config", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["app_name"], "Bizdesk");

    let body = serde_json::json!({ "favicon_url": "favicons/bizdesk.ico" });
    let response = patch_json_auth(app.clone(), "/api/v1/app-config", body, &token).await;
    let json = body_json(response).await;
    assert_eq!(json["app_name"], "Bizdesk");
    assert_eq!(json["favicon_url"], "favicons/bizdesk.ico");

    let root = body_json(get(app, "/api/v1").await).await;
    assert_eq!(root["app_name"], "Bizdesk");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn blank_app_name_is_rejected(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "app_name": "   " });
    let response = patch_json_auth(app, "/api/v1/app-config", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}
