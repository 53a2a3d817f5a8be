// ABOUTME: Core types, approval workflow, and validation for sitedesk
// ABOUTME: Foundational package providing the entity model shared across all sitedesk packages

pub mod approval;
pub mod constants;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export main types
pub use types::{
    ChangeRequest, ChangeRequestCreateInput, Comment, CommentCreateInput, Document,
    DocumentCreateInput, DocumentType, Message, MessageCreateInput, Milestone,
    MilestoneCreateInput, MilestoneStatus, Notification, NotificationCreateInput,
    NotificationKind, Project, ProjectCreateInput, ProjectStatus, Transaction,
    TransactionCreateInput, User, UserRole,
};

// Re-export the approval state machine
pub use approval::{ApprovalStatus, TransitionError};

// Re-export constants
pub use constants::{ANNOUNCEMENTS_CHANNEL, GENERAL_CHANNEL};

// Re-export utilities
pub use utils::generate_id;

// Re-export validation
pub use validation::{
    validate_change_request, validate_comment, validate_document, validate_message,
    validate_milestone, validate_notification, validate_project, validate_transaction,
    ValidationError,
};
