// ABOUTME: Entity definitions for the construction project dashboard
// ABOUTME: Projects, users, chat, documents, notifications, approvals, and milestones

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::approval::ApprovalStatus;
use crate::validation::ValidationError;

/// Lifecycle of a project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    Planning,
    Active,
    #[serde(rename = "On Hold")]
    OnHold,
    Completed,
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::Planning => write!(f, "Planning"),
            ProjectStatus::Active => write!(f, "Active"),
            ProjectStatus::OnHold => write!(f, "On Hold"),
            ProjectStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// A construction project. Completion progress is derived from its tasks
/// and is never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
    pub manager: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreateInput {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Option<ProjectStatus>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: f64,
    pub manager: String,
}

/// Dashboard roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    SystemAdmin,
    ProjectOwner,
    Finance,
    ProjectManager,
    ProjectEngineer,
}

impl UserRole {
    pub const ALL: [UserRole; 5] = [
        UserRole::ProjectOwner,
        UserRole::Finance,
        UserRole::ProjectManager,
        UserRole::ProjectEngineer,
        UserRole::SystemAdmin,
    ];
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::SystemAdmin => write!(f, "System Admin"),
            UserRole::ProjectOwner => write!(f, "Project Owner"),
            UserRole::Finance => write!(f, "Finance"),
            UserRole::ProjectManager => write!(f, "Project Manager"),
            UserRole::ProjectEngineer => write!(f, "Project Engineer"),
        }
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "admin" | "system_admin" => Ok(UserRole::SystemAdmin),
            "owner" | "project_owner" => Ok(UserRole::ProjectOwner),
            "finance" => Ok(UserRole::Finance),
            "manager" | "project_manager" => Ok(UserRole::ProjectManager),
            "engineer" | "project_engineer" => Ok(UserRole::ProjectEngineer),
            _ => Err(ValidationError::new(
                "role",
                format!(
                    "Unknown role '{}'. Must be one of: owner, finance, manager, engineer, admin",
                    s
                ),
            )),
        }
    }
}

/// Directory entry used by the role picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    pub avatar: String,
}

/// Remark left on a task. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub task_id: String,
    pub user_id: String,
    pub user_name: String,
    /// Copied from the user directory when the author is known
    pub user_avatar: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCreateInput {
    #[serde(default)]
    pub id: Option<String>,
    pub task_id: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub user_avatar: Option<String>,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Chat message. The channel is free-form: `general`, `announcements`,
/// or a project id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub channel_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: Option<String>,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCreateInput {
    #[serde(default)]
    pub id: Option<String>,
    pub channel_id: String,
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub user_avatar: Option<String>,
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Pdf,
    Xls,
    Doc,
    Img,
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::Pdf => write!(f, "pdf"),
            DocumentType::Xls => write!(f, "xls"),
            DocumentType::Doc => write!(f, "doc"),
            DocumentType::Img => write!(f, "img"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub size: String,
    pub uploaded_by: String,
    pub date: NaiveDate,
    pub project_id: Option<String>,
    pub task_id: Option<String>,
    pub version: u32,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCreateInput {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub size: String,
    pub uploaded_by: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default = "first_version")]
    pub version: u32,
    #[serde(default)]
    pub url: Option<String>,
}

fn first_version() -> u32 {
    1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Alert,
    Info,
    Success,
}

/// Session-wide notification; `read` is its only mutable field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub time: DateTime<Utc>,
    pub read: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationCreateInput {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

/// Proposed change to a project's scope, cost, or schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequest {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub description: String,
    pub impact_cost: f64,
    /// Schedule impact in days
    pub impact_time: i64,
    pub status: ApprovalStatus,
    pub requested_by: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequestCreateInput {
    #[serde(default)]
    pub id: Option<String>,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub impact_cost: f64,
    pub impact_time: i64,
    pub requested_by: String,
    pub date: NaiveDate,
}

/// Financial line item awaiting approval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub status: ApprovalStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCreateInput {
    #[serde(default)]
    pub id: Option<String>,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
}

/// Owner-facing project milestone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MilestoneStatus {
    #[default]
    Upcoming,
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    Completed,
}

impl MilestoneStatus {
    /// Sign-off moves a milestone from Pending Approval to Completed, and
    /// nothing else can be approved.
    pub fn approve(self) -> Result<MilestoneStatus, MilestoneStatus> {
        match self {
            MilestoneStatus::PendingApproval => Ok(MilestoneStatus::Completed),
            other => Err(other),
        }
    }
}

impl fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MilestoneStatus::Upcoming => write!(f, "Upcoming"),
            MilestoneStatus::PendingApproval => write!(f, "Pending Approval"),
            MilestoneStatus::Completed => write!(f, "Completed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub title: String,
    pub status: MilestoneStatus,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneCreateInput {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub status: Option<MilestoneStatus>,
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("owner", UserRole::ProjectOwner)]
    #[case("Finance", UserRole::Finance)]
    #[case("project-manager", UserRole::ProjectManager)]
    #[case("engineer", UserRole::ProjectEngineer)]
    #[case("SYSTEM_ADMIN", UserRole::SystemAdmin)]
    fn test_role_from_str(#[case] input: &str, #[case] expected: UserRole) {
        assert_eq!(input.parse::<UserRole>().unwrap(), expected);
    }

    #[test]
    fn test_role_from_str_rejects_unknown() {
        let err = "janitor".parse::<UserRole>().unwrap_err();
        assert_eq!(err.field, "role");
        assert!(err.message.contains("janitor"));
    }

    #[test]
    fn test_project_status_wire_names() {
        let json = serde_json::to_string(&ProjectStatus::OnHold).unwrap();
        assert_eq!(json, "\"On Hold\"");

        let parsed: ProjectStatus = serde_json::from_str("\"Completed\"").unwrap();
        assert_eq!(parsed, ProjectStatus::Completed);

        assert!(serde_json::from_str::<ProjectStatus>("\"Cancelled\"").is_err());
    }

    #[test]
    fn test_document_input_defaults_to_first_version() {
        let input: DocumentCreateInput = serde_json::from_str(
            r#"{
                "name": "Site_Plan.pdf",
                "type": "pdf",
                "size": "1.2 MB",
                "uploadedBy": "Marcus Ford",
                "date": "2023-10-15"
            }"#,
        )
        .unwrap();

        assert_eq!(input.version, 1);
        assert_eq!(input.doc_type, DocumentType::Pdf);
        assert!(input.project_id.is_none());
    }

    #[test]
    fn test_status_defaults() {
        assert_eq!(ProjectStatus::default(), ProjectStatus::Planning);
        assert_eq!(ApprovalStatus::default(), ApprovalStatus::Pending);
        assert_eq!(MilestoneStatus::default(), MilestoneStatus::Upcoming);
    }

    #[test]
    fn test_milestone_approval_is_one_way() {
        assert_eq!(
            MilestoneStatus::PendingApproval.approve(),
            Ok(MilestoneStatus::Completed)
        );
        assert_eq!(
            MilestoneStatus::Completed.approve(),
            Err(MilestoneStatus::Completed)
        );
        assert_eq!(
            MilestoneStatus::Upcoming.approve(),
            Err(MilestoneStatus::Upcoming)
        );

        let json = serde_json::to_string(&MilestoneStatus::PendingApproval).unwrap();
        assert_eq!(json, "\"Pending Approval\"");
    }

    #[test]
    fn test_notification_kind_uses_type_key() {
        let notification = Notification {
            id: "n1".to_string(),
            title: "Budget Alert".to_string(),
            message: "Logistics budget is at 89% utilization.".to_string(),
            kind: NotificationKind::Alert,
            time: DateTime::parse_from_rfc3339("2023-10-22T08:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            read: false,
        };

        let value = serde_json::to_value(&notification).unwrap();
        assert_eq!(value["type"], "alert");
        assert_eq!(value["read"], false);
    }
}
