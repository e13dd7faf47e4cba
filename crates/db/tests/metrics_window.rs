//! Window loading for the metrics report, and the report built from it.

use bizdesk_core::metrics::{build_report, ReportPeriod, ReportRequest, TimeGrouping};
use bizdesk_db::models::client::CreateClient;
use bizdesk_db::models::project::CreateProject;
use bizdesk_db::models::task::CreateTask;
use bizdesk_db::models::user::CreateUser;
use bizdesk_db::repositories::{ClientRepo, MetricsRepo, ProjectRepo, TaskRepo};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::dec;
use rust_decimal::Decimal;
use sqlx::PgPool;

async fn seed_client(pool: &PgPool, name: &str) -> i64 {
    let user = CreateUser {
        username: name.to_string(),
        email: format!("{name}@example.com"),
        password_hash: "hash".to_string(),
        role: "client".to_string(),
    };
    let client = CreateClient {
        business_name: name.to_string(),
        contact_name: "Contact".to_string(),
        phone: None,
        internal_notes: None,
    };
    ClientRepo::create_with_user(pool, &user, &client)
        .await
        .unwrap()
        .id
}

async fn seed_project(pool: &PgPool, client_id: i64, initial: Option<Decimal>, created_at: &str) -> i64 {
    let input = CreateProject {
        client_id,
        name: format!("Project created {created_at}"),
        description: None,
        start_date: None,
        initial_cost: initial,
        currency: None,
        status: None,
        attachment: None,
        video_url: None,
    };
    let id = ProjectRepo::create(pool, &input).await.unwrap().id;
    backdate(pool, "projects", id, created_at).await;
    id
}

async fn seed_task(pool: &PgPool, project_id: i64, cost: Option<Decimal>, created_at: &str) -> i64 {
    let input = CreateTask {
        project_id,
        title: format!("Task created {created_at}"),
        description: None,
        due_date: None,
        status: None,
        cost,
        attachment: None,
        video_url: None,
    };
    let id = TaskRepo::create(pool, &input).await.unwrap().id;
    backdate(pool, "tasks", id, created_at).await;
    id
}

async fn backdate(pool: &PgPool, table: &str, id: i64, created_at: &str) {
    let created_at: DateTime<Utc> = created_at.parse().unwrap();
    sqlx::query(&format!("UPDATE {table} SET created_at = $2 WHERE id = $1"))
        .bind(id)
        .bind(created_at)
        .execute(pool)
        .await
        .unwrap();
}

fn period(start: &str, end: &str) -> ReportPeriod {
    ReportPeriod {
        start_date: NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap(),
        end_date: NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap(),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_window_is_inclusive_calendar_days(pool: PgPool) {
    let client = seed_client(&pool, "window").await;
    seed_project(&pool, client, None, "2023-12-31T23:59:59Z").await;
    let first = seed_project(&pool, client, None, "2024-01-01T00:00:00Z").await;
    let last = seed_project(&pool, client, None, "2024-01-31T23:59:59Z").await;
    seed_project(&pool, client, None, "2024-02-01T00:00:00Z").await;

    let projects = MetricsRepo::projects_in_period(&pool, &period("2024-01-01", "2024-01-31"), None)
        .await
        .unwrap();
    let ids: Vec<_> = projects.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![first, last]);
    assert_eq!(projects[0].client_name, "window");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_tasks_filtered_on_own_created_at(pool: PgPool) {
    let client = seed_client(&pool, "own").await;
    let old_project = seed_project(&pool, client, Some(dec!(40)), "2023-06-01T12:00:00Z").await;
    let task = seed_task(&pool, old_project, Some(dec!(9.99)), "2024-03-15T12:00:00Z").await;
    seed_task(&pool, old_project, Some(dec!(1)), "2024-04-01T00:00:00Z").await;

    let window = period("2024-03-01", "2024-03-31");
    let tasks = MetricsRepo::tasks_in_period(&pool, &window, None).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, task);
    assert_eq!(tasks[0].client_id, client);
    assert!(MetricsRepo::projects_in_period(&pool, &window, None)
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_client_filter_applies_to_both_sets(pool: PgPool) {
    let a = seed_client(&pool, "a").await;
    let b = seed_client(&pool, "b").await;
    let pa = seed_project(&pool, a, None, "2024-05-01T10:00:00Z").await;
    let pb = seed_project(&pool, b, None, "2024-05-01T10:00:00Z").await;
    seed_task(&pool, pa, None, "2024-05-02T10:00:00Z").await;
    seed_task(&pool, pb, None, "2024-05-02T10:00:00Z").await;

    let window = period("2024-05-01", "2024-05-31");
    let projects = MetricsRepo::projects_in_period(&pool, &window, Some(b)).await.unwrap();
    let tasks = MetricsRepo::tasks_in_period(&pool, &window, Some(b)).await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, pb);
    assert!(tasks.iter().all(|t| t.client_id == b));
    assert_eq!(tasks.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_report_from_loaded_window(pool: PgPool) {
    let client = seed_client(&pool, "report").await;
    let p1 = seed_project(&pool, client, Some(dec!(100.00)), "2024-01-05T09:00:00Z").await;
    let p2 = seed_project(&pool, client, None, "2024-01-06T09:00:00Z").await;
    seed_task(&pool, p1, Some(dec!(10.00)), "2024-01-07T09:00:00Z").await;
    seed_task(&pool, p1, None, "2024-01-08T09:00:00Z").await;
    seed_task(&pool, p2, Some(dec!(5.00)), "2024-01-09T09:00:00Z").await;

    let request = ReportRequest {
        period: period("2024-01-01", "2024-01-31"),
        client_id: None,
        time_grouping: TimeGrouping::Week,
    };
    let projects = MetricsRepo::projects_in_period(&pool, &request.period, None)
        .await
        .unwrap();
    let tasks = MetricsRepo::tasks_in_period(&pool, &request.period, None)
        .await
        .unwrap();
    let report = build_report(&request, &projects, &tasks);

    assert_eq!(report.global_metrics.total_cost, dec!(115.00));
    assert_eq!(report.global_metrics.tasks_without_cost, 1);
    assert_eq!(report.client_metrics.len(), 1);
    assert_eq!(report.client_metrics[0].costs.total_cost, dec!(115.00));
    assert_eq!(report.top_projects[0].id, p1);
    assert_eq!(report.top_projects[0].costs.total_cost, dec!(110.00));
    assert_eq!(report.top_projects[1].costs.total_cost, dec!(5.00));
}
