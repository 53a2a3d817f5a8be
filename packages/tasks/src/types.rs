// ABOUTME: Task type definitions
// ABOUTME: Structures for tasks, their status and priority, and create/update inputs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::progress::clamp_progress;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    /// Board column order
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Done,
    ];

    pub fn is_open(self) -> bool {
        self != TaskStatus::Done
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Todo => write!(f, "Todo"),
            TaskStatus::InProgress => write!(f, "In Progress"),
            TaskStatus::Review => write!(f, "Review"),
            TaskStatus::Done => write!(f, "Done"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskPriority::High => write!(f, "High"),
            TaskPriority::Medium => write!(f, "Medium"),
            TaskPriority::Low => write!(f, "Low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub description: Option<String>,

    /// User id of the assignee
    pub assignee: String,

    /// Display name shown on cards, resolved from the user directory
    pub assignee_name: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: NaiveDate,

    /// Manually reported, 0-100
    pub progress: u8,

    /// Ids of tasks that should finish first. Informational only.
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskCreateInput {
    #[serde(default)]
    pub id: Option<String>,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub assignee: String,
    #[serde(default)]
    pub assignee_name: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub progress: i32,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl TaskCreateInput {
    /// Build the stored task once the id is settled. A missing assignee
    /// name falls back to the assignee id.
    pub fn into_task(self, id: String) -> Task {
        let assignee_name = self
            .assignee_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.assignee.clone());

        Task {
            id,
            project_id: self.project_id,
            title: self.title.trim().to_string(),
            description: self.description,
            assignee: self.assignee,
            assignee_name,
            status: self.status.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            due_date: self.due_date,
            progress: clamp_progress(self.progress),
            dependencies: self.dependencies,
        }
    }
}

/// Partial update for a task. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdateInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub assignee_name: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub progress: Option<i32>,
    #[serde(default)]
    pub dependencies: Option<Vec<String>>,
}

impl TaskUpdateInput {
    pub fn is_empty(&self) -> bool {
        self == &TaskUpdateInput::default()
    }

    /// Merge the present fields into `task`, clamping progress. Reassigning
    /// without a name shows the new assignee id until a name is supplied.
    pub fn apply_to(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            task.description = Some(description);
        }
        if let Some(assignee) = self.assignee {
            task.assignee_name = assignee.clone();
            task.assignee = assignee;
        }
        if let Some(name) = self.assignee_name.filter(|n| !n.trim().is_empty()) {
            task.assignee_name = name;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(progress) = self.progress {
            task.progress = clamp_progress(progress);
        }
        if let Some(dependencies) = self.dependencies {
            task.dependencies = dependencies;
        }
    }
}
