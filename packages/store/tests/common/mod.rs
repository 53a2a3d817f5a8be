// ABOUTME: Common helpers for store integration tests
// ABOUTME: Builds stores and create inputs with sensible defaults

#![allow(dead_code)]

use chrono::NaiveDate;
use sitedesk_config::StoreConfig;
use sitedesk_core::{
    ChangeRequestCreateInput, CommentCreateInput, DocumentCreateInput, DocumentType,
    MessageCreateInput, MilestoneCreateInput, MilestoneStatus, ProjectCreateInput,
    TransactionCreateInput,
};
use sitedesk_store::ProjectStore;
use sitedesk_tasks::TaskCreateInput;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Empty store with default configuration
pub fn empty_store() -> ProjectStore {
    ProjectStore::new(&StoreConfig::default())
}

/// Store seeded with the demo fixtures
pub fn seeded_store() -> ProjectStore {
    ProjectStore::with_fixtures(&StoreConfig::default())
}

pub fn project_input(id: &str) -> ProjectCreateInput {
    ProjectCreateInput {
        id: Some(id.to_string()),
        name: format!("Project {}", id),
        description: String::new(),
        status: None,
        start_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
        budget: 250_000.0,
        manager: "Marcus Ford".to_string(),
    }
}

pub fn task_input(id: &str, project_id: &str, progress: i32) -> TaskCreateInput {
    TaskCreateInput {
        id: Some(id.to_string()),
        project_id: project_id.to_string(),
        title: format!("Task {}", id),
        description: None,
        assignee: "u4".to_string(),
        assignee_name: None,
        status: None,
        priority: None,
        due_date: date(2024, 3, 1),
        progress,
        dependencies: Vec::new(),
    }
}

pub fn comment_input(task_id: &str, content: &str) -> CommentCreateInput {
    CommentCreateInput {
        id: None,
        task_id: task_id.to_string(),
        user_id: "u3".to_string(),
        user_name: "Marcus Ford".to_string(),
        user_avatar: None,
        content: content.to_string(),
        created_at: None,
    }
}

pub fn message_input(channel_id: &str, content: &str) -> MessageCreateInput {
    MessageCreateInput {
        id: None,
        channel_id: channel_id.to_string(),
        user_id: "u4".to_string(),
        user_name: "Emily Dao".to_string(),
        user_avatar: None,
        content: content.to_string(),
        timestamp: None,
    }
}

pub fn document_input(name: &str, project_id: Option<&str>, version: u32) -> DocumentCreateInput {
    DocumentCreateInput {
        id: None,
        name: name.to_string(),
        doc_type: DocumentType::Pdf,
        size: "1.2 MB".to_string(),
        uploaded_by: "Marcus Ford".to_string(),
        date: date(2024, 2, 1),
        project_id: project_id.map(str::to_string),
        task_id: None,
        version,
        url: None,
    }
}

pub fn change_request_input(project_id: &str) -> ChangeRequestCreateInput {
    ChangeRequestCreateInput {
        id: None,
        project_id: project_id.to_string(),
        title: "Extend parking level".to_string(),
        description: String::new(),
        impact_cost: 80_000.0,
        impact_time: 14,
        requested_by: "Marcus Ford".to_string(),
        date: date(2024, 2, 10),
    }
}

pub fn transaction_input(amount: f64) -> TransactionCreateInput {
    TransactionCreateInput {
        id: None,
        description: "Rebar delivery".to_string(),
        amount,
        category: "Materials".to_string(),
        date: date(2024, 2, 12),
    }
}

pub fn milestone_input(title: &str, status: MilestoneStatus) -> MilestoneCreateInput {
    MilestoneCreateInput {
        id: None,
        title: title.to_string(),
        status: Some(status),
        date: date(2024, 4, 30),
    }
}
