// ABOUTME: Task management types for construction projects
// ABOUTME: Task model, typed partial updates, progress clamping, and task validation

pub mod progress;
pub mod types;
pub mod validation;

pub use progress::{clamp_progress, MAX_PROGRESS};
pub use types::*;
pub use validation::{normalize_dependencies, validate_task_create, validate_task_update};
