// ABOUTME: Field-level validation for entity create inputs
// ABOUTME: Each validator collects every problem instead of stopping at the first

use thiserror::Error;

use crate::types::{
    ChangeRequestCreateInput, CommentCreateInput, DocumentCreateInput, MessageCreateInput,
    MilestoneCreateInput, NotificationCreateInput, ProjectCreateInput, TransactionCreateInput,
};

/// A single field that failed validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn require_text(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, format!("{} is required", field)));
    }
}

fn require_finite(errors: &mut Vec<ValidationError>, field: &str, value: f64) {
    if !value.is_finite() {
        errors.push(ValidationError::new(field, "Must be a finite number"));
    }
}

/// Validates a supplied id. Absent ids are generated by the store.
fn check_id(errors: &mut Vec<ValidationError>, id: &Option<String>) {
    if let Some(id) = id {
        if id.trim().is_empty() {
            errors.push(ValidationError::new("id", "Id cannot be blank"));
        }
    }
}

pub fn validate_project(input: &ProjectCreateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_id(&mut errors, &input.id);
    require_text(&mut errors, "name", &input.name);
    require_text(&mut errors, "manager", &input.manager);

    if !input.budget.is_finite() || input.budget < 0.0 {
        errors.push(ValidationError::new(
            "budget",
            "Budget must be a non-negative number",
        ));
    }

    if input.end_date < input.start_date {
        errors.push(ValidationError::new(
            "endDate",
            format!(
                "End date {} is before start date {}",
                input.end_date, input.start_date
            ),
        ));
    }

    errors
}

pub fn validate_comment(input: &CommentCreateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_id(&mut errors, &input.id);
    require_text(&mut errors, "userId", &input.user_id);
    require_text(&mut errors, "content", &input.content);

    errors
}

pub fn validate_message(input: &MessageCreateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_id(&mut errors, &input.id);
    require_text(&mut errors, "channelId", &input.channel_id);
    require_text(&mut errors, "userId", &input.user_id);
    require_text(&mut errors, "content", &input.content);

    errors
}

pub fn validate_document(input: &DocumentCreateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_id(&mut errors, &input.id);
    require_text(&mut errors, "name", &input.name);
    require_text(&mut errors, "uploadedBy", &input.uploaded_by);

    if input.version == 0 {
        errors.push(ValidationError::new("version", "Version starts at 1"));
    }

    errors
}

pub fn validate_notification(input: &NotificationCreateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_id(&mut errors, &input.id);
    require_text(&mut errors, "title", &input.title);

    errors
}

pub fn validate_milestone(input: &MilestoneCreateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_id(&mut errors, &input.id);
    require_text(&mut errors, "title", &input.title);

    errors
}

pub fn validate_change_request(input: &ChangeRequestCreateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_id(&mut errors, &input.id);
    require_text(&mut errors, "title", &input.title);
    require_text(&mut errors, "requestedBy", &input.requested_by);
    require_finite(&mut errors, "impactCost", input.impact_cost);

    errors
}

pub fn validate_transaction(input: &TransactionCreateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    check_id(&mut errors, &input.id);
    require_text(&mut errors, "description", &input.description);
    require_text(&mut errors, "category", &input.category);
    require_finite(&mut errors, "amount", input.amount);

    errors
}
