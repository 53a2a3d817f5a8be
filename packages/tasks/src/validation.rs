// ABOUTME: Validation rules for task inputs
// ABOUTME: Checks required text and self-referencing dependencies; existence checks belong to the store

use sitedesk_core::ValidationError;

use crate::types::{TaskCreateInput, TaskUpdateInput};

/// Drop blank and repeated dependency ids, keeping first-seen order
pub fn normalize_dependencies(dependencies: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(dependencies.len());
    for dependency in dependencies {
        let dependency = dependency.trim().to_string();
        if !dependency.is_empty() && !seen.contains(&dependency) {
            seen.push(dependency);
        }
    }
    seen
}

/// Ids are compared trimmed, the same way the store stores them
fn check_self_dependency(
    errors: &mut Vec<ValidationError>,
    task_id: &str,
    dependencies: &[String],
) {
    let task_id = task_id.trim();
    if dependencies.iter().any(|d| d.trim() == task_id) {
        errors.push(ValidationError::new(
            "dependencies",
            format!("Task {} cannot depend on itself", task_id),
        ));
    }
}

pub fn validate_task_create(input: &TaskCreateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(id) = &input.id {
        if id.trim().is_empty() {
            errors.push(ValidationError::new("id", "Id cannot be blank"));
        } else {
            check_self_dependency(&mut errors, id, &input.dependencies);
        }
    }

    if input.project_id.trim().is_empty() {
        errors.push(ValidationError::new("projectId", "projectId is required"));
    }
    if input.title.trim().is_empty() {
        errors.push(ValidationError::new("title", "Task title is required"));
    }
    if input.assignee.trim().is_empty() {
        errors.push(ValidationError::new("assignee", "assignee is required"));
    }

    errors
}

pub fn validate_task_update(task_id: &str, update: &TaskUpdateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(title) = &update.title {
        if title.trim().is_empty() {
            errors.push(ValidationError::new("title", "Task title cannot be empty"));
        }
    }
    if let Some(assignee) = &update.assignee {
        if assignee.trim().is_empty() {
            errors.push(ValidationError::new("assignee", "assignee cannot be empty"));
        }
    }
    if let Some(dependencies) = &update.dependencies {
        check_self_dependency(&mut errors, task_id, dependencies);
    }

    errors
}
