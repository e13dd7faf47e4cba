//! HTTP-level tests for login and role enforcement.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, TEST_PASSWORD};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn login_returns_token_and_user(pool: PgPool) {
    let user = common::create_user(&pool, "loginuser", "admin").await;
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({ "username": "loginuser", "password": TEST_PASSWORD });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["role"], "admin");
    assert!(json["user"].get("password_hash").is_none());

    // The issued token opens authenticated routes.
    let token = json["access_token"].as_str().unwrap();
    let response = get_auth(app, "/api/v1/clients", token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let last_login: (Option<chrono::DateTime<chrono::Utc>>,) =
        sqlx::query_as("SELECT last_login_at FROM users WHERE id = $1")
            .bind(user.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(last_login.0.is_some());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn wrong_password_is_unauthorized(pool: PgPool) {
    common::create_user(&pool, "wrongpw", "client").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "wrongpw", "password": "nope-nope-nope" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_user_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "username": "ghost", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deactivated_account_is_forbidden(pool: PgPool) {
    let user = common::create_user(&pool, "inactive", "client").await;
    sqlx::query("UPDATE users SET is_active = false WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "inactive", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_or_garbage_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/projects").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/v1/projects", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn client_role_cannot_read_app_config(pool: PgPool) {
    let token = common::client_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/app-config", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn bootstrap_admin_is_idempotent(pool: PgPool) {
    let admin = bizdesk_api::config::BootstrapAdmin {
        username: "root".to_string(),
        email: "root@example.com".to_string(),
        password: "root-password-1".to_string(),
    };
    assert!(bizdesk_api::bootstrap::ensure_admin(&pool, &admin).await.unwrap());
    assert!(!bizdesk_api::bootstrap::ensure_admin(&pool, &admin).await.unwrap());

    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "username": "root", "password": "root-password-1" });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["role"], "admin");
}
