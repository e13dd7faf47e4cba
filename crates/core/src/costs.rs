//! Derived cost roll-ups for clients and projects.
//!
//! A project's cost is its own `initial_cost` plus the sum of its task
//! costs; a client's cost is the same roll-up taken across every one of its
//! projects. Nullable amounts count as zero in every sum, and all arithmetic
//! stays in fixed-point [`Money`].

use serde::Serialize;

use crate::types::Money;

/// Number of decimal places monetary values are reported with.
pub const MONEY_SCALE: u32 = 2;

/// Treat a nullable stored amount as zero.
pub fn or_zero(amount: Option<Money>) -> Money {
    amount.unwrap_or(Money::ZERO)
}

/// Sum nullable amounts, counting `None` as zero.
pub fn sum_costs<I>(amounts: I) -> Money
where
    I: IntoIterator<Item = Option<Money>>,
{
    amounts.into_iter().map(or_zero).sum()
}

/// Round to the reporting scale.
pub fn to_money_scale(amount: Money) -> Money {
    amount.round_dp(MONEY_SCALE)
}

/// `initial + extra = total` for a single client or project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CostBreakdown {
    #[serde(with = "rust_decimal::serde::float")]
    pub initial_cost: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub extra_cost: Money,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_cost: Money,
}

impl CostBreakdown {
    /// Build from already-summed components.
    pub fn new(initial_cost: Money, extra_cost: Money) -> Self {
        let initial_cost = to_money_scale(initial_cost);
        let extra_cost = to_money_scale(extra_cost);
        Self {
            initial_cost,
            extra_cost,
            total_cost: initial_cost + extra_cost,
        }
    }

    /// Costs of one project: its own initial cost plus its tasks' costs.
    pub fn for_project<I>(initial_cost: Option<Money>, task_costs: I) -> Self
    where
        I: IntoIterator<Item = Option<Money>>,
    {
        Self::new(or_zero(initial_cost), sum_costs(task_costs))
    }

    /// Costs of one client: the initial costs of all its projects plus the
    /// costs of every task under those projects.
    pub fn for_client<P, T>(project_initial_costs: P, task_costs: T) -> Self
    where
        P: IntoIterator<Item = Option<Money>>,
        T: IntoIterator<Item = Option<Money>>,
    {
        Self::new(sum_costs(project_initial_costs), sum_costs(task_costs))
    }
}

impl std::ops::Add for CostBreakdown {
    type Output = CostBreakdown;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.initial_cost + rhs.initial_cost,
            self.extra_cost + rhs.extra_cost,
        )
    }
}

/// Derived read-time summary for a project (costs plus task count).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProjectSummary {
    #[serde(flatten)]
    pub costs: CostBreakdown,
    pub task_count: i64,
}

impl ProjectSummary {
    pub fn compute<I>(initial_cost: Option<Money>, task_costs: I) -> Self
    where
        I: IntoIterator<Item = Option<Money>>,
    {
        let task_costs: Vec<Option<Money>> = task_costs.into_iter().collect();
        Self {
            task_count: task_costs.len() as i64,
            costs: CostBreakdown::for_project(initial_cost, task_costs),
        }
    }
}

/// Derived read-time summary for a client (costs plus project/task counts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClientSummary {
    #[serde(flatten)]
    pub costs: CostBreakdown,
    pub project_count: i64,
    pub task_count: i64,
}

impl ClientSummary {
    pub fn compute<P, T>(project_initial_costs: P, task_costs: T) -> Self
    where
        P: IntoIterator<Item = Option<Money>>,
        T: IntoIterator<Item = Option<Money>>,
    {
        let initial: Vec<Option<Money>> = project_initial_costs.into_iter().collect();
        let tasks: Vec<Option<Money>> = task_costs.into_iter().collect();
        Self {
            project_count: initial.len() as i64,
            task_count: tasks.len() as i64,
            costs: CostBreakdown::for_client(initial, tasks),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn null_initial_cost_without_tasks_is_zero() {
        let costs = CostBreakdown::for_project(None, std::iter::empty());
        assert_eq!(costs.initial_cost, Money::ZERO);
        assert_eq!(costs.extra_cost, Money::ZERO);
        assert_eq!(costs.total_cost, dec!(0.00));
    }

    #[test]
    fn null_task_cost_counts_as_zero() {
        let costs = CostBreakdown::for_project(Some(dec!(100.00)), [Some(dec!(10.00)), None]);
        assert_eq!(costs.extra_cost, dec!(10.00));
        assert_eq!(costs.total_cost, dec!(110.00));
    }

    #[test]
    fn client_rolls_up_every_project() {
        // P1: initial 100.00, tasks 10.00 + null. P2: initial null, task 5.00.
        let p1 = CostBreakdown::for_project(Some(dec!(100.00)), [Some(dec!(10.00)), None]);
        let p2 = CostBreakdown::for_project(None, [Some(dec!(5.00))]);
        assert_eq!(p2.extra_cost, dec!(5.00));
        assert_eq!(p2.total_cost, dec!(5.00));

        let client = CostBreakdown::for_client(
            [Some(dec!(100.00)), None],
            [Some(dec!(10.00)), None, Some(dec!(5.00))],
        );
        assert_eq!(client.initial_cost, dec!(100.00));
        assert_eq!(client.extra_cost, dec!(15.00));
        assert_eq!(client.total_cost, dec!(115.00));
        assert_eq!(p1 + p2, client);
    }

    #[test]
    fn sums_are_exact_over_many_cents() {
        // 0.10 summed 1000 times drifts in binary floating point; not here.
        let costs =
            CostBreakdown::for_project(None, std::iter::repeat(Some(dec!(0.10))).take(1000));
        assert_eq!(costs.extra_cost, dec!(100.00));
    }

    #[test]
    fn summaries_count_related_rows() {
        let project = ProjectSummary::compute(Some(dec!(1.50)), [None, Some(dec!(2.25))]);
        assert_eq!(project.task_count, 2);
        assert_eq!(project.costs.total_cost, dec!(3.75));

        let client = ClientSummary::compute([None, None, Some(dec!(4))], std::iter::empty());
        assert_eq!(client.project_count, 3);
        assert_eq!(client.task_count, 0);
        assert_eq!(client.costs.total_cost, dec!(4));
    }

    #[test]
    fn breakdown_serializes_as_numbers() {
        let costs = CostBreakdown::for_project(Some(dec!(100.00)), [Some(dec!(10.50))]);
        let json = serde_json::to_value(costs).unwrap();
        assert_eq!(json["initial_cost"], 100.0);
        assert_eq!(json["extra_cost"], 10.5);
        assert_eq!(json["total_cost"], 110.5);
    }
}
