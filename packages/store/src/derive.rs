// ABOUTME: Derived values computed from the current collections on every call
// ABOUTME: Pure functions over slices; nothing here is cached or stored

use serde::{Deserialize, Serialize};
use sitedesk_core::{ApprovalStatus, Project, Transaction};
use sitedesk_tasks::{Task, TaskPriority, TaskStatus};
use std::collections::BTreeMap;

/// `round(numerator / denominator)` with halves rounded up
fn round_half_up(numerator: u64, denominator: u64) -> u64 {
    (2 * numerator + denominator) / (2 * denominator)
}

/// Completion percentage of a project: the rounded mean of its tasks'
/// progress, or 0 when it has no tasks.
pub fn project_progress(tasks: &[Task], project_id: &str) -> u8 {
    let (sum, count) = tasks
        .iter()
        .filter(|t| t.project_id == project_id)
        .fold((0u64, 0u64), |(sum, count), t| {
            (sum + u64::from(t.progress), count + 1)
        });

    if count == 0 {
        return 0;
    }

    round_half_up(sum, count) as u8
}

/// A project together with its derived completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOverview {
    #[serde(flatten)]
    pub project: Project,
    pub progress: u8,
}

impl ProjectOverview {
    pub fn build(project: &Project, tasks: &[Task]) -> Self {
        Self {
            project: project.clone(),
            progress: project_progress(tasks, &project.id),
        }
    }
}

/// Reporting figures for one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReport {
    pub project_id: String,
    pub total_tasks: usize,
    pub done_tasks: usize,
    pub in_progress_tasks: usize,
    /// Share of tasks marked Done, as a rounded percentage
    pub completion_rate: u8,
    pub average_progress: u8,
}

impl ProjectReport {
    pub fn build(project_id: &str, tasks: &[Task]) -> Self {
        let project_tasks: Vec<&Task> = tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .collect();
        let total_tasks = project_tasks.len();
        let done_tasks = project_tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Done)
            .count();
        let in_progress_tasks = project_tasks
            .iter()
            .filter(|t| t.status == TaskStatus::InProgress)
            .count();

        let completion_rate = if total_tasks == 0 {
            0
        } else {
            round_half_up(done_tasks as u64 * 100, total_tasks as u64) as u8
        };

        Self {
            project_id: project_id.to_string(),
            total_tasks,
            done_tasks,
            in_progress_tasks,
            completion_rate,
            average_progress: project_progress(tasks, project_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumn {
    pub status: TaskStatus,
    pub tasks: Vec<Task>,
}

/// Kanban view of tasks, one column per status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBoard {
    pub columns: Vec<BoardColumn>,
    pub open_tasks: usize,
    pub open_high_priority: usize,
}

impl TaskBoard {
    /// Board over all tasks, or only those of `project_id`
    pub fn build(tasks: &[Task], project_id: Option<&str>) -> Self {
        let selected: Vec<&Task> = tasks
            .iter()
            .filter(|t| project_id.map_or(true, |p| t.project_id == p))
            .collect();

        let columns = TaskStatus::ALL
            .iter()
            .map(|status| BoardColumn {
                status: *status,
                tasks: selected
                    .iter()
                    .filter(|t| t.status == *status)
                    .map(|t| (*t).clone())
                    .collect(),
            })
            .collect();

        let open_tasks = selected.iter().filter(|t| t.status.is_open()).count();
        let open_high_priority = selected
            .iter()
            .filter(|t| t.status.is_open() && t.priority == TaskPriority::High)
            .count();

        Self {
            columns,
            open_tasks,
            open_high_priority,
        }
    }
}

/// Tasks assigned to one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssigneeWorkload {
    pub user_id: String,
    pub tasks: Vec<Task>,
    /// Tasks not yet Done
    pub active: usize,
}

impl AssigneeWorkload {
    pub fn build(user_id: &str, tasks: &[Task]) -> Self {
        let tasks: Vec<Task> = tasks
            .iter()
            .filter(|t| t.assignee == user_id)
            .cloned()
            .collect();
        let active = tasks.iter().filter(|t| t.status.is_open()).count();

        Self {
            user_id: user_id.to_string(),
            tasks,
            active,
        }
    }
}

/// Totals shown on the finance dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    pub pending_count: usize,
    pub pending_amount: f64,
    pub approved_amount: f64,
    pub rejected_amount: f64,
    pub approved_by_category: BTreeMap<String, f64>,
}

impl FinanceSummary {
    pub fn build(transactions: &[Transaction]) -> Self {
        transactions
            .iter()
            .fold(FinanceSummary::default(), |mut summary, tx| {
                match tx.status {
                    ApprovalStatus::Pending => {
                        summary.pending_count += 1;
                        summary.pending_amount += tx.amount;
                    }
                    ApprovalStatus::Approved => {
                        summary.approved_amount += tx.amount;
                        *summary
                            .approved_by_category
                            .entry(tx.category.clone())
                            .or_insert(0.0) += tx.amount;
                    }
                    ApprovalStatus::Rejected => {
                        summary.rejected_amount += tx.amount;
                    }
                }
                summary
            })
    }
}
