//! Admin metrics report: global totals, status breakdowns, per-client
//! cost roll-ups, sparse time-series trends, and the most costly projects.
//!
//! The repository layer loads the projects and tasks created inside the
//! report window; [`build_report`] turns those rows into a [`MetricsReport`].
//! Everything here is pure and deterministic: the same inputs always
//! produce the same report, field order and collection order included.
//!
//! Window membership is decided per row against its own `created_at`
//! (UTC calendar date). A task therefore counts toward the window even
//! when its parent project was created before `start_date`.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::costs::{or_zero, CostBreakdown};
use crate::error::CoreError;
use crate::status::{ProjectStatus, TaskStatus};
use crate::types::{DbId, Money, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Wire format for every date in requests and reports.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Window length used when `start_date` is omitted.
pub const DEFAULT_LOOKBACK_DAYS: u64 = 365;

/// Maximum number of entries in the most-costly-projects ranking.
pub const TOP_PROJECTS_LIMIT: usize = 10;

// ---------------------------------------------------------------------------
// Time grouping
// ---------------------------------------------------------------------------

/// Calendar granularity used to bucket trend series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeGrouping {
    Day,
    /// ISO week, starting on Monday.
    Week,
    #[default]
    Month,
}

impl TimeGrouping {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeGrouping::Day => "day",
            TimeGrouping::Week => "week",
            TimeGrouping::Month => "month",
        }
    }

    /// First calendar day of the bucket containing `date`.
    pub fn bucket_start(self, date: NaiveDate) -> NaiveDate {
        match self {
            TimeGrouping::Day => date,
            TimeGrouping::Week => {
                date - Days::new(u64::from(date.weekday().num_days_from_monday()))
            }
            TimeGrouping::Month => date - Days::new(u64::from(date.day0())),
        }
    }

    /// Bucket start for a UTC timestamp.
    pub fn bucket_of(self, ts: Timestamp) -> NaiveDate {
        self.bucket_start(ts.date_naive())
    }
}

impl fmt::Display for TimeGrouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeGrouping {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(TimeGrouping::Day),
            "week" => Ok(TimeGrouping::Week),
            "month" => Ok(TimeGrouping::Month),
            other => Err(CoreError::InvalidArgument(format!(
                "Invalid time_grouping '{other}'. Must be one of: day, week, month"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Inclusive calendar-date window a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ReportPeriod {
    /// Whether a UTC timestamp's calendar date falls inside the window.
    pub fn contains(&self, ts: Timestamp) -> bool {
        let date = ts.date_naive();
        date >= self.start_date && date <= self.end_date
    }

    /// Half-open timestamp range `[start 00:00, day after end 00:00)` for
    /// range scans against `created_at`.
    pub fn bounds(&self) -> (Timestamp, Timestamp) {
        let from = self.start_date.and_time(NaiveTime::MIN).and_utc();
        let to = self
            .end_date
            .succ_opt()
            .map(|d| d.and_time(NaiveTime::MIN).and_utc())
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        (from, to)
    }
}

/// A validated metrics request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRequest {
    pub period: ReportPeriod,
    pub client_id: Option<DbId>,
    pub time_grouping: TimeGrouping,
}

impl ReportRequest {
    /// Validate raw query values.
    ///
    /// Empty strings count as absent. Missing dates default to the
    /// [`DEFAULT_LOOKBACK_DAYS`] window ending `today`; a missing grouping
    /// defaults to [`TimeGrouping::Month`].
    pub fn parse(
        start_date: Option<&str>,
        end_date: Option<&str>,
        client_id: Option<&str>,
        time_grouping: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, CoreError> {
        let start_date = parse_date("start_date", start_date)?
            .unwrap_or(today - Days::new(DEFAULT_LOOKBACK_DAYS));
        let end_date = parse_date("end_date", end_date)?.unwrap_or(today);

        let client_id = match non_empty(client_id) {
            Some(raw) => Some(raw.parse::<DbId>().map_err(|_| {
                CoreError::InvalidArgument(format!("Invalid client_id '{raw}'. Must be an integer"))
            })?),
            None => None,
        };

        let time_grouping = match non_empty(time_grouping) {
            Some(raw) => raw.parse()?,
            None => TimeGrouping::default(),
        };

        Ok(Self {
            period: ReportPeriod {
                start_date,
                end_date,
            },
            client_id,
            time_grouping,
        })
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse an optional `YYYY-MM-DD` value.
///
/// The year must be exactly four digits; chrono's `%Y` alone would also
/// accept signed and five-digit years the store cannot represent.
pub fn parse_date(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, CoreError> {
    let Some(value) = non_empty(raw) else {
        return Ok(None);
    };
    let invalid = || {
        CoreError::InvalidArgument(format!(
            "Invalid {field} '{value}'. Use the YYYY-MM-DD format"
        ))
    };
    let well_formed = value.len() == 10
        && value
            .bytes()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { b == b'-' } else { b.is_ascii_digit() });
    if !well_formed {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| invalid())
}

// ---------------------------------------------------------------------------
// Input rows
// ---------------------------------------------------------------------------

/// The slice of a project row the report needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFact {
    pub id: DbId,
    pub client_id: DbId,
    pub client_name: String,
    pub name: String,
    pub status: ProjectStatus,
    pub initial_cost: Option<Money>,
    pub created_at: Timestamp,
}

/// The slice of a task row the report needs, with its owning client resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFact {
    pub id: DbId,
    pub project_id: DbId,
    pub client_id: DbId,
    pub status: TaskStatus,
    pub cost: Option<Money>,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsReport {
    pub global_metrics: GlobalMetrics,
    pub task_status: BTreeMap<TaskStatus, i64>,
    pub project_status: BTreeMap<ProjectStatus, i64>,
    pub client_metrics: Vec<ClientMetrics>,
    pub trends: Trends,
    pub top_projects: Vec<TopProject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlobalMetrics {
    pub total_projects: i64,
    pub total_tasks: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_initial_cost: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_task_cost: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Money,
    /// Tasks whose cost is strictly positive.
    pub tasks_with_cost: i64,
    /// Tasks whose cost is zero or unset.
    pub tasks_without_cost: i64,
    pub filter_period: ReportPeriod,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientMetrics {
    pub id: DbId,
    pub name: String,
    pub project_count: i64,
    pub task_count: i64,
    pub completed_tasks: i64,
    #[serde(flatten)]
    pub costs: CostBreakdown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Trends {
    pub task_cost: Vec<TaskCostPoint>,
    pub projects: Vec<ProjectTrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskCostPoint {
    pub period: NaiveDate,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectTrendPoint {
    pub period: NaiveDate,
    pub count: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopProject {
    pub id: DbId,
    pub name: String,
    pub client_id: DbId,
    pub client: String,
    pub status: ProjectStatus,
    #[serde(flatten)]
    pub costs: CostBreakdown,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Assemble the full report from candidate project and task rows.
///
/// Rows outside the request window, or belonging to another client when a
/// client filter is set, are ignored. Projects are processed in ascending
/// id order, which is also the tie-break order of the top-projects ranking.
pub fn build_report(
    request: &ReportRequest,
    projects: &[ProjectFact],
    tasks: &[TaskFact],
) -> MetricsReport {
    let in_scope = |created_at: Timestamp, client_id: DbId| {
        request.period.contains(created_at)
            && request.client_id.map_or(true, |id| id == client_id)
    };

    let mut projects: Vec<&ProjectFact> = projects
        .iter()
        .filter(|p| in_scope(p.created_at, p.client_id))
        .collect();
    projects.sort_by_key(|p| p.id);

    let mut tasks: Vec<&TaskFact> = tasks
        .iter()
        .filter(|t| in_scope(t.created_at, t.client_id))
        .collect();
    tasks.sort_by_key(|t| t.id);

    let client_metrics = if request.client_id.is_none() {
        client_breakdown(&projects, &tasks)
    } else {
        Vec::new()
    };

    MetricsReport {
        global_metrics: global_metrics(request.period, &projects, &tasks),
        task_status: count_by(tasks.iter().map(|t| t.status)),
        project_status: count_by(projects.iter().map(|p| p.status)),
        client_metrics,
        trends: trends(request.time_grouping, &projects, &tasks),
        top_projects: top_projects(&projects, &tasks),
    }
}

fn global_metrics(
    period: ReportPeriod,
    projects: &[&ProjectFact],
    tasks: &[&TaskFact],
) -> GlobalMetrics {
    let costs = CostBreakdown::for_client(
        projects.iter().map(|p| p.initial_cost),
        tasks.iter().map(|t| t.cost),
    );
    let tasks_with_cost = tasks
        .iter()
        .filter(|t| or_zero(t.cost) > Money::ZERO)
        .count() as i64;
    let tasks_without_cost = tasks
        .iter()
        .filter(|t| or_zero(t.cost) == Money::ZERO)
        .count() as i64;

    GlobalMetrics {
        total_projects: projects.len() as i64,
        total_tasks: tasks.len() as i64,
        total_initial_cost: costs.initial_cost,
        total_task_cost: costs.extra_cost,
        total_cost: costs.total_cost,
        tasks_with_cost,
        tasks_without_cost,
        filter_period: period,
    }
}

/// Count occurrences per key. Keys with no occurrences never appear.
fn count_by<K: Ord>(keys: impl Iterator<Item = K>) -> BTreeMap<K, i64> {
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

fn client_breakdown(projects: &[&ProjectFact], tasks: &[&TaskFact]) -> Vec<ClientMetrics> {
    struct Acc<'a> {
        name: &'a str,
        initial_costs: Vec<Option<Money>>,
        task_costs: Vec<Option<Money>>,
        completed_tasks: i64,
    }

    let mut by_client: BTreeMap<DbId, Acc<'_>> = BTreeMap::new();
    for project in projects {
        by_client
            .entry(project.client_id)
            .or_insert_with(|| Acc {
                name: &project.client_name,
                initial_costs: Vec::new(),
                task_costs: Vec::new(),
                completed_tasks: 0,
            })
            .initial_costs
            .push(project.initial_cost);
    }

    // Only clients that own a project in the window are reported.
    for task in tasks {
        if let Some(acc) = by_client.get_mut(&task.client_id) {
            acc.task_costs.push(task.cost);
            if task.status == TaskStatus::Done {
                acc.completed_tasks += 1;
            }
        }
    }

    by_client
        .into_iter()
        .map(|(id, acc)| ClientMetrics {
            id,
            name: acc.name.to_string(),
            project_count: acc.initial_costs.len() as i64,
            task_count: acc.task_costs.len() as i64,
            completed_tasks: acc.completed_tasks,
            costs: CostBreakdown::for_client(acc.initial_costs, acc.task_costs),
        })
        .collect()
}

fn trends(grouping: TimeGrouping, projects: &[&ProjectFact], tasks: &[&TaskFact]) -> Trends {
    let mut task_cost: BTreeMap<NaiveDate, Money> = BTreeMap::new();
    for task in tasks {
        *task_cost.entry(grouping.bucket_of(task.created_at)).or_default() += or_zero(task.cost);
    }

    let mut project_buckets: BTreeMap<NaiveDate, (i64, Money)> = BTreeMap::new();
    for project in projects {
        let bucket = project_buckets
            .entry(grouping.bucket_of(project.created_at))
            .or_default();
        bucket.0 += 1;
        bucket.1 += or_zero(project.initial_cost);
    }

    Trends {
        task_cost: task_cost
            .into_iter()
            .map(|(period, total_cost)| TaskCostPoint { period, total_cost })
            .collect(),
        projects: project_buckets
            .into_iter()
            .map(|(period, (count, total_cost))| ProjectTrendPoint {
                period,
                count,
                total_cost,
            })
            .collect(),
    }
}

fn top_projects(projects: &[&ProjectFact], tasks: &[&TaskFact]) -> Vec<TopProject> {
    let mut task_costs: HashMap<DbId, Vec<Option<Money>>> = HashMap::new();
    for task in tasks {
        task_costs.entry(task.project_id).or_default().push(task.cost);
    }

    let mut ranked: Vec<TopProject> = projects
        .iter()
        .map(|p| TopProject {
            id: p.id,
            name: p.name.clone(),
            client_id: p.client_id,
            client: p.client_name.clone(),
            status: p.status,
            costs: CostBreakdown::for_project(
                p.initial_cost,
                task_costs.get(&p.id).into_iter().flatten().copied(),
            ),
        })
        .collect();

    // `sort_by` is stable: equal totals keep ascending-id order.
    ranked.sort_by(|a, b| b.costs.total_cost.cmp(&a.costs.total_cost));
    ranked.truncate(TOP_PROJECTS_LIMIT);
    ranked
}
