// ABOUTME: Error taxonomy for store operations
// ABOUTME: Every failed mutation returns one of these and leaves the store unchanged

use serde::{Deserialize, Serialize};
use sitedesk_core::ValidationError;
use std::fmt;
use thiserror::Error;

/// Kinds of entity the store holds, used in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Project,
    Task,
    Comment,
    Message,
    Document,
    Notification,
    ChangeRequest,
    Transaction,
    Milestone,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Project => write!(f, "Project"),
            EntityKind::Task => write!(f, "Task"),
            EntityKind::Comment => write!(f, "Comment"),
            EntityKind::Message => write!(f, "Message"),
            EntityKind::Document => write!(f, "Document"),
            EntityKind::Notification => write!(f, "Notification"),
            EntityKind::ChangeRequest => write!(f, "Change request"),
            EntityKind::Transaction => write!(f, "Transaction"),
            EntityKind::Milestone => write!(f, "Milestone"),
        }
    }
}

/// Store errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("{field} refers to unknown {entity} '{id}'")]
    Reference {
        entity: EntityKind,
        field: &'static str,
        id: String,
    },
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },
    /// `from` and `to` hold the status display names, since approvals and
    /// milestones have separate status types
    #[error("{entity} {id} cannot move from {from} to {to}")]
    InvalidTransition {
        entity: EntityKind,
        id: String,
        from: String,
        to: String,
    },
    #[error("{entity} with id '{id}' already exists")]
    DuplicateId { entity: EntityKind, id: String },
    #[error("Validation errors: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

pub type StoreResult<T> = Result<T, StoreError>;

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl StoreError {
    pub(crate) fn reference(entity: EntityKind, field: &'static str, id: &str) -> Self {
        StoreError::Reference {
            entity,
            field,
            id: id.to_string(),
        }
    }

    pub(crate) fn not_found(entity: EntityKind, id: &str) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub(crate) fn invalid_transition(
        entity: EntityKind,
        id: &str,
        from: impl fmt::Display,
        to: impl fmt::Display,
    ) -> Self {
        StoreError::InvalidTransition {
            entity,
            id: id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Turn collected validation problems into an error, if any
    pub(crate) fn check(errors: Vec<ValidationError>) -> StoreResult<()> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(StoreError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitedesk_core::{ApprovalStatus, MilestoneStatus};

    #[test]
    fn test_error_messages() {
        let err = StoreError::reference(EntityKind::Project, "projectId", "nonexistent");
        assert_eq!(err.to_string(), "projectId refers to unknown Project 'nonexistent'");

        let err = StoreError::invalid_transition(
            EntityKind::ChangeRequest,
            "cr2",
            ApprovalStatus::Approved,
            ApprovalStatus::Pending,
        );
        assert_eq!(
            err.to_string(),
            "Change request cr2 cannot move from Approved to Pending"
        );

        let err = StoreError::invalid_transition(
            EntityKind::Milestone,
            "m1",
            MilestoneStatus::Completed,
            MilestoneStatus::Completed,
        );
        assert_eq!(
            err.to_string(),
            "Milestone m1 cannot move from Completed to Completed"
        );
    }

    #[test]
    fn test_validation_message_joins_fields() {
        let err = StoreError::Validation(vec![
            ValidationError::new("name", "name is required"),
            ValidationError::new("budget", "Budget must be a non-negative number"),
        ]);

        assert_eq!(
            err.to_string(),
            "Validation errors: name: name is required; budget: Budget must be a non-negative number"
        );
    }

    #[test]
    fn test_check_passes_through_empty() {
        assert!(StoreError::check(Vec::new()).is_ok());
        assert!(matches!(
            StoreError::check(vec![ValidationError::new("x", "y")]),
            Err(StoreError::Validation(_))
        ));
    }
}
