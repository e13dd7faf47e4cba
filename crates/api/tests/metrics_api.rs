//! HTTP-level tests for the administrator metrics report.

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::{body_json, get, get_auth};
use sqlx::PgPool;

/// Move a row's `created_at` to a fixed instant.
async fn backdate(pool: &PgPool, table: &str, id: i64, at: &str) {
    let at: DateTime<Utc> = at.parse().expect("valid RFC 3339 timestamp");
    sqlx::query(&format!("UPDATE {table} SET created_at = $2 WHERE id = $1"))
        .bind(id)
        .bind(at)
        .execute(pool)
        .await
        .expect("backdate should succeed");
}

/// C owns P1 (initial 100.00; tasks 10.00 and unset) and P2 (initial
/// unset; task 5.00). Returns `(client_id, p1_id, p2_id)`.
async fn seed_rollup(app: axum::Router, token: &str) -> (i64, i64, i64) {
    let client = common::create_client(app.clone(), token, "metrics").await;
    let client_id = client["id"].as_i64().unwrap();

    let p1 = common::create_project(app.clone(), token, client_id, "P1", Some(100.0)).await;
    let p1_id = p1["id"].as_i64().unwrap();
    common::create_task(app.clone(), token, p1_id, "T1", Some(10.0)).await;
    common::create_task(app.clone(), token, p1_id, "T2", None).await;

    let p2 = common::create_project(app.clone(), token, client_id, "P2", None).await;
    let p2_id = p2["id"].as_i64().unwrap();
    common::create_task(app, token, p2_id, "T3", Some(5.0)).await;

    (client_id, p1_id, p2_id)
}

#[sqlx::test(migrations = "../db/migrations")]
async fn report_covers_every_section(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let (client_id, p1_id, p2_id) = seed_rollup(app.clone(), &token).await;

    let response = get_auth(app, "/api/v1/admin/metrics", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    let global = &json["global_metrics"];
    assert_eq!(global["total_projects"], 2);
    assert_eq!(global["total_tasks"], 3);
    assert_eq!(global["total_initial_cost"], 100.0);
    assert_eq!(global["total_task_cost"], 15.0);
    assert_eq!(global["total_cost"], 115.0);
    assert_eq!(global["tasks_with_cost"], 2);
    assert_eq!(global["tasks_without_cost"], 1);
    assert!(global["filter_period"]["start_date"].is_string());

    assert_eq!(json["task_status"], serde_json::json!({ "PENDING": 3 }));
    assert_eq!(json["project_status"], serde_json::json!({ "NEW": 2 }));

    let clients = json["client_metrics"].as_array().unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0]["id"], client_id);
    assert_eq!(clients[0]["name"], "metrics S.A.");
    assert_eq!(clients[0]["project_count"], 2);
    assert_eq!(clients[0]["task_count"], 3);
    assert_eq!(clients[0]["completed_tasks"], 0);
    assert_eq!(clients[0]["extra_cost"], 15.0);
    assert_eq!(clients[0]["total_cost"], 115.0);

    let top = json["top_projects"].as_array().unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0]["id"], p1_id);
    assert_eq!(top[0]["extra_cost"], 10.0);
    assert_eq!(top[0]["total_cost"], 110.0);
    assert_eq!(top[0]["client"], "metrics S.A.");
    assert_eq!(top[1]["id"], p2_id);
    assert_eq!(top[1]["total_cost"], 5.0);

    assert!(json["trends"]["task_cost"].is_array());
    assert!(json["trends"]["projects"].is_array());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn window_and_grouping_shape_trends(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool.clone());
    let (_client_id, p1_id, p2_id) = seed_rollup(app.clone(), &token).await;

    backdate(&pool, "projects", p1_id, "2024-03-04T10:00:00Z").await;
    backdate(&pool, "projects", p2_id, "2024-03-06T10:00:00Z").await;
    sqlx::query("UPDATE tasks SET created_at = '2024-03-05T12:00:00Z'")
        .execute(&pool)
        .await
        .unwrap();

    let uri = "/api/v1/admin/metrics?start_date=2024-03-01&end_date=2024-03-31&time_grouping=week";
    let json = body_json(get_auth(app.clone(), uri, &token).await).await;

    // 2024-03-04 is a Monday: both projects share one weekly bucket.
    assert_eq!(
        json["trends"]["projects"],
        serde_json::json!([{ "period": "2024-03-04", "count": 2, "total_cost": 100.0 }])
    );
    assert_eq!(
        json["trends"]["task_cost"],
        serde_json::json!([{ "period": "2024-03-04", "total_cost": 15.0 }])
    );

    let uri = "/api/v1/admin/metrics?start_date=2024-03-01&end_date=2024-03-31&time_grouping=day";
    let json = body_json(get_auth(app, uri, &token).await).await;
    let periods: Vec<&str> = json["trends"]["projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["period"].as_str().unwrap())
        .collect();
    assert_eq!(periods, ["2024-03-04", "2024-03-06"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn task_outside_window_leaves_trend_empty(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool.clone());
    let client = common::create_client(app.clone(), &token, "edge").await;
    let project =
        common::create_project(app.clone(), &token, client["id"].as_i64().unwrap(), "P", None)
            .await;
    let project_id = project["id"].as_i64().unwrap();
    let task = common::create_task(app.clone(), &token, project_id, "Late", Some(7.0)).await;

    backdate(&pool, "projects", project_id, "2024-01-01T08:00:00Z").await;
    backdate(&pool, "tasks", task["id"].as_i64().unwrap(), "2024-01-02T08:00:00Z").await;

    let uri = "/api/v1/admin/metrics?start_date=2024-01-01&end_date=2024-01-01&time_grouping=day";
    let response = get_auth(app, uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    assert_eq!(json["trends"]["task_cost"], serde_json::json!([]));
    assert_eq!(json["global_metrics"]["total_tasks"], 0);
    assert_eq!(json["global_metrics"]["total_projects"], 1);
    assert_eq!(json["task_status"], serde_json::json!({}));
    assert_eq!(json["top_projects"][0]["total_cost"], 0.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn client_filter_drops_breakdown(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);
    let (client_id, _, _) = seed_rollup(app.clone(), &token).await;
    let other = common::create_client(app.clone(), &token, "other").await;
    common::create_project(app.clone(), &token, other["id"].as_i64().unwrap(), "O", Some(1.0))
        .await;

    let uri = format!("/api/v1/admin/metrics?client_id={client_id}");
    let json = body_json(get_auth(app, &uri, &token).await).await;
    assert_eq!(json["client_metrics"], serde_json::json!([]));
    assert_eq!(json["global_metrics"]["total_projects"], 2);
    assert_eq!(json["global_metrics"]["total_cost"], 115.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_parameters_are_invalid_arguments(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    for query in [
        "start_date=not-a-date",
        "start_date=-5000-01-01",
        "end_date=12024-01-01",
        "end_date=2024-13-01",
        "time_grouping=year",
        "client_id=abc",
    ] {
        let response = get_auth(
            app.clone(),
            &format!("/api/v1/admin/metrics?{query}"),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "query: {query}");
        assert_eq!(body_json(response).await["code"], "INVALID_ARGUMENT");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_client_is_not_found(pool: PgPool) {
    let token = common::admin_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/admin/metrics?client_id=9999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn report_requires_admin(pool: PgPool) {
    let client_token = common::client_token(&pool).await;
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/admin/metrics").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/v1/admin/metrics", &client_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
