// ABOUTME: Change events published after every successful store mutation
// ABOUTME: Subscribers receive the revision, the touched collection, and the changed entity

use serde::{Deserialize, Serialize};
use sitedesk_core::{
    ApprovalStatus, ChangeRequest, Comment, Document, Message, Milestone, Notification, Project,
    Transaction,
};
use sitedesk_tasks::Task;

/// Collections held by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    Projects,
    Tasks,
    Comments,
    Messages,
    Documents,
    Notifications,
    ChangeRequests,
    Transactions,
    Milestones,
}

/// What a mutation did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum StoreChange {
    ProjectAdded {
        project: Project,
    },
    TaskAdded {
        task: Task,
    },
    TaskUpdated {
        task: Task,
    },
    CommentAdded {
        comment: Comment,
    },
    MessageAdded {
        message: Message,
    },
    DocumentAdded {
        document: Document,
    },
    NotificationAdded {
        notification: Notification,
    },
    NotificationRead {
        notification: Notification,
    },
    AllNotificationsRead {
        ids: Vec<String>,
    },
    ChangeRequestAdded {
        change_request: ChangeRequest,
    },
    ChangeRequestStatusChanged {
        change_request: ChangeRequest,
        previous: ApprovalStatus,
    },
    TransactionAdded {
        transaction: Transaction,
    },
    TransactionStatusChanged {
        transaction: Transaction,
        previous: ApprovalStatus,
    },
    MilestoneAdded {
        milestone: Milestone,
    },
    MilestoneApproved {
        milestone: Milestone,
    },
}

impl StoreChange {
    pub fn collection(&self) -> Collection {
        match self {
            StoreChange::ProjectAdded { .. } => Collection::Projects,
            StoreChange::TaskAdded { .. } | StoreChange::TaskUpdated { .. } => Collection::Tasks,
            StoreChange::CommentAdded { .. } => Collection::Comments,
            StoreChange::MessageAdded { .. } => Collection::Messages,
            StoreChange::DocumentAdded { .. } => Collection::Documents,
            StoreChange::NotificationAdded { .. }
            | StoreChange::NotificationRead { .. }
            | StoreChange::AllNotificationsRead { .. } => Collection::Notifications,
            StoreChange::ChangeRequestAdded { .. }
            | StoreChange::ChangeRequestStatusChanged { .. } => Collection::ChangeRequests,
            StoreChange::TransactionAdded { .. }
            | StoreChange::TransactionStatusChanged { .. } => Collection::Transactions,
            StoreChange::MilestoneAdded { .. } | StoreChange::MilestoneApproved { .. } => {
                Collection::Milestones
            }
        }
    }

    /// Id of the single entity touched, if the change has one
    pub fn entity_id(&self) -> Option<&str> {
        match self {
            StoreChange::ProjectAdded { project } => Some(project.id.as_str()),
            StoreChange::TaskAdded { task } | StoreChange::TaskUpdated { task } => {
                Some(task.id.as_str())
            }
            StoreChange::CommentAdded { comment } => Some(comment.id.as_str()),
            StoreChange::MessageAdded { message } => Some(message.id.as_str()),
            StoreChange::DocumentAdded { document } => Some(document.id.as_str()),
            StoreChange::NotificationAdded { notification }
            | StoreChange::NotificationRead { notification } => Some(notification.id.as_str()),
            StoreChange::AllNotificationsRead { .. } => None,
            StoreChange::ChangeRequestAdded { change_request }
            | StoreChange::ChangeRequestStatusChanged { change_request, .. } => {
                Some(change_request.id.as_str())
            }
            StoreChange::TransactionAdded { transaction }
            | StoreChange::TransactionStatusChanged { transaction, .. } => {
                Some(transaction.id.as_str())
            }
            StoreChange::MilestoneAdded { milestone }
            | StoreChange::MilestoneApproved { milestone } => Some(milestone.id.as_str()),
        }
    }
}

/// Broadcast to subscribers once per successful mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreEvent {
    /// Store revision after the mutation
    pub revision: u64,
    pub collection: Collection,
    pub change: StoreChange,
}

impl StoreEvent {
    pub fn new(revision: u64, change: StoreChange) -> Self {
        Self {
            revision,
            collection: change.collection(),
            change,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes_tagged_change() {
        let event = StoreEvent::new(
            7,
            StoreChange::AllNotificationsRead {
                ids: vec!["n1".to_string(), "n2".to_string()],
            },
        );

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["revision"], 7);
        assert_eq!(value["collection"], "notifications");
        assert_eq!(value["change"]["type"], "allNotificationsRead");
        assert_eq!(value["change"]["ids"][1], "n2");
        assert!(event.change.entity_id().is_none());
    }

    #[test]
    fn test_milestone_approval_event() {
        let milestone = Milestone {
            id: "m2".to_string(),
            title: "Phase 2: Foundation Pour".to_string(),
            status: sitedesk_core::MilestoneStatus::Completed,
            date: chrono::NaiveDate::from_ymd_opt(2023, 10, 22).unwrap(),
        };
        let event = StoreEvent::new(3, StoreChange::MilestoneApproved { milestone });

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["collection"], "milestones");
        assert_eq!(value["change"]["type"], "milestoneApproved");
        assert_eq!(value["change"]["milestone"]["status"], "Completed");
        assert_eq!(event.change.entity_id(), Some("m2"));
    }
}
